//! Alpha mask for point sprites.
//!
//! The mask is read from a grayscale-ish image once at startup. Sprite
//! opacity comes from the green channel, so both RGB grayscale masks and
//! white-on-transparent PNGs work. When the file is missing, a procedural
//! soft disc stands in.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use std::path::Path;

use tracing::{info, warn};

use crate::error::TextureError;

/// Default mask location, relative to the working directory.
pub const DEFAULT_MASK_PATH: &str = "textures/particles/1.png";

/// RGBA8 mask image.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteMask {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl SpriteMask {
    /// Decode a mask from an image file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Decode a mask from encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Radial falloff: opaque center, transparent edge.
    pub fn soft_disc(size: u32) -> Self {
        let size = size.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let half = size as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let d = (dx * dx + dy * dy).sqrt();
                let t = ((1.0 - d) / 0.5).clamp(0.0, 1.0);
                // smoothstep
                let v = (t * t * (3.0 - 2.0 * t) * 255.0).round() as u8;
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Load the mask at `path`, or fall back to [`SpriteMask::soft_disc`].
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(mask) => {
                info!(path = %path.display(), width = mask.width, height = mask.height, "loaded sprite mask");
                mask
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "sprite mask unavailable, using soft disc");
                Self::soft_disc(64)
            }
        }
    }
}
