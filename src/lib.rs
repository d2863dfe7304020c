//! # Ringfield
//!
//! Procedural rings of point sprites, rendered with wgpu.
//!
//! A [`ParticleFieldGenerator`] turns a [`GenerationParameters`] snapshot into
//! a set of rings: each ring draws its own point count, radius, vertical band
//! and hue, then scatters its points on a circle in the XZ plane. A
//! [`SceneParticleManager`] owns the rings that are currently in a scene and
//! swaps them out wholesale whenever the parameters change.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ringfield::prelude::*;
//!
//! let generator = ParticleFieldGenerator::new();
//! let mut manager = SceneParticleManager::new(SceneGraph::new());
//!
//! let params = GenerationParameters::default();
//! manager.replace_all(generator.create_all(&params))?;
//! assert_eq!(manager.len(), 10);
//!
//! // A theme change rewrites the hue range; rings are rebuilt from scratch.
//! let params = params.apply(ParameterChange::Theme(Theme::Ocean));
//! manager.regenerate(&generator, &params)?;
//! ```
//!
//! ## Core Concepts
//!
//! ### Parameters
//!
//! [`GenerationParameters`] is an immutable snapshot. Every edit is a
//! [`ParameterChange`] merged with [`GenerationParameters::apply`], which
//! returns a new snapshot. Ranges always satisfy `min <= max`.
//!
//! ### Groups
//!
//! A [`ParticleGroup`] is one realized ring: positions, color and a shared
//! [`PointMaterial`]. Groups never change after creation; spin is a single
//! angle kept by the manager and applied when drawing.
//!
//! ### Scenes
//!
//! Anything implementing [`RenderScene`] can hold groups. [`SceneGraph`] keeps
//! them in memory; `gpu::GpuScene` uploads one vertex buffer per group.
//!
//! ## Viewer
//!
//! [`viewer::run`] opens a window with an orbit camera, theme and camera
//! presets, keyboard shortcuts and (with the `egui` feature) a control panel.
//!
//! | Key | Action |
//! |-----|--------|
//! | `1` `2` `3` | night / day / ocean theme |
//! | `F` `A` `B` `I` | camera front / above / below / inside |
//! | `R` | regenerate |
//! | `Up` `Down` | one ring more / less |
//! | `Space` | pause rotation |
//! | `Esc` | quit |

pub mod camera;
pub mod color;
pub mod error;
pub mod generator;
pub mod gpu;
#[cfg(feature = "egui")]
pub mod panel;
pub mod params;
pub mod presets;
pub mod scene;
pub mod textures;
pub mod time;
pub mod viewer;

pub use glam::Vec3;

pub use camera::Camera;
pub use color::Hsl;
pub use error::{ConfigError, GpuError, SceneError, TextureError, ViewerError};
pub use generator::{
    layout_positions, sample_ring_spec, BlendMode, GroupId, ParticleFieldGenerator,
    ParticleGroup, PointMaterial, RingSpec, MAX_POINTS_PER_RING,
};
pub use params::{GenerationParameters, ParameterChange, Range};
pub use presets::{CameraOrientation, Theme};
pub use scene::{ManagerState, RenderScene, SceneGraph, SceneHandle, SceneParticleManager};
pub use textures::SpriteMask;
pub use time::Time;

/// Convenient imports for generating and managing rings.
///
/// ```ignore
/// use ringfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::generator::{ParticleFieldGenerator, ParticleGroup, PointMaterial};
    pub use crate::params::{GenerationParameters, ParameterChange, Range};
    pub use crate::presets::{CameraOrientation, Theme};
    pub use crate::scene::{RenderScene, SceneGraph, SceneParticleManager};
    pub use glam::Vec3;
}
