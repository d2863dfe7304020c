//! Error types for ringfield.
//!
//! Generation itself never fails; these cover the outer surfaces: GPU setup,
//! the alpha-mask image, parameter files and the viewer's event loop.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture format.
    #[error("Surface has no supported texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur while loading the sprite alpha mask.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Failed to decode the image file.
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
    /// Failed to read the file from disk.
    #[error("Failed to read texture file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading or saving generation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the parameter file failed.
    #[error("Failed to access parameter file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid parameter JSON.
    #[error("Invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by a render scene when a group cannot be installed.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The scene has been torn down and accepts no more groups.
    #[error("Render scene is closed")]
    Closed,
    /// The group has more points than a single draw call can address.
    #[error("Particle group with {0} points exceeds the per-draw limit")]
    TooManyPoints(usize),
}

/// Errors that can occur when running the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Parameter file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
