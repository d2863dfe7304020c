//! Procedural ring generation.
//!
//! Each ring draws its own point count, radius, vertical band and hue from
//! the [`GenerationParameters`], then scatters its points on a circle in the
//! XZ plane with a uniformly random height inside the band.
//!
//! ```ignore
//! use ringfield::prelude::*;
//!
//! let generator = ParticleFieldGenerator::new();
//! let rings = generator.create_all(&GenerationParameters::default());
//! assert_eq!(rings.len(), 10);
//! ```

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use rand::Rng;

use crate::color::Hsl;
use crate::params::{sample_between, GenerationParameters};

/// Per-ring values drawn from the parameters. Used once, then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    /// Number of points, already rounded.
    pub count: usize,
    pub radius: f32,
    /// Band floor. Always `<= y_ceil`.
    pub y_floor: f32,
    pub y_ceil: f32,
    /// Ring color; only the hue varies between rings.
    pub color: Hsl,
}

/// Blending applied when point sprites overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Standard alpha blending.
    #[default]
    Alpha,
    /// Colors add up, overlapping points glow.
    Additive,
}

/// How a group's points are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    /// Sprite size in world units.
    pub size: f32,
    /// Shrink sprites with distance from the camera.
    pub size_attenuation: bool,
    /// Multiply sprite alpha by the mask texture.
    pub alpha_mask: bool,
    /// Rings never write depth, so draw order does not matter.
    pub depth_write: bool,
    pub blend: BlendMode,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            size: 0.1,
            size_attenuation: true,
            alpha_mask: true,
            depth_write: false,
            blend: BlendMode::Alpha,
        }
    }
}

/// Process-unique id of a generated group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        GroupId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// One realized ring: positions plus color and material.
///
/// Groups are immutable. A parameter change always produces fresh groups.
#[derive(Debug, Clone)]
pub struct ParticleGroup {
    id: GroupId,
    spec: RingSpec,
    positions: Vec<Vec3>,
    material: PointMaterial,
}

impl ParticleGroup {
    pub fn new(spec: RingSpec, positions: Vec<Vec3>, material: PointMaterial) -> Self {
        Self {
            id: GroupId::next(),
            spec,
            positions,
            material,
        }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn spec(&self) -> &RingSpec {
        &self.spec
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Linear RGB color for the GPU.
    pub fn linear_color(&self) -> Vec3 {
        self.spec.color.to_linear()
    }

    /// Positions as tightly packed `x, y, z` floats.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

/// Most points a single ring may hold.
pub const MAX_POINTS_PER_RING: usize = 1_000_000;

/// Round a sampled count to a point count. Negative and NaN become zero,
/// anything above [`MAX_POINTS_PER_RING`] is capped.
pub fn round_count(sampled: f32) -> usize {
    if sampled.is_nan() || sampled <= 0.0 {
        0
    } else {
        (sampled.round() as usize).min(MAX_POINTS_PER_RING)
    }
}

/// Draw one ring's count, radius, band and color.
pub fn sample_ring_spec<R: Rng + ?Sized>(params: &GenerationParameters, rng: &mut R) -> RingSpec {
    let count = round_count(params.count.sample(rng));
    let radius = params.radius.sample(rng);
    let hue = params.hue.sample(rng);

    let mut y_floor = params.y.sample(rng);
    let mut y_ceil = params.y.sample(rng);
    if y_floor > y_ceil {
        std::mem::swap(&mut y_floor, &mut y_ceil);
    }

    RingSpec {
        count,
        radius,
        y_floor,
        y_ceil,
        color: Hsl::ring(hue),
    }
}

/// Scatter `count` points on a circle of `radius` in the XZ plane.
///
/// Heights are uniform in the band between `y_floor` and `y_ceil`, which may
/// be given in either order. `count` is capped at [`MAX_POINTS_PER_RING`].
pub fn layout_positions<R: Rng + ?Sized>(
    count: usize,
    radius: f32,
    y_floor: f32,
    y_ceil: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    let count = count.min(MAX_POINTS_PER_RING);
    let (lo, hi) = if y_floor <= y_ceil {
        (y_floor, y_ceil)
    } else {
        (y_ceil, y_floor)
    };

    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let y = sample_between(lo, hi, rng);
            Vec3::new(angle.sin() * radius, y, angle.cos() * radius)
        })
        .collect()
}

/// Builds particle groups from parameters.
#[derive(Debug, Clone, Default)]
pub struct ParticleFieldGenerator {
    material: PointMaterial,
}

impl ParticleFieldGenerator {
    /// Generator using the default point material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose groups use `material`.
    pub fn with_material(material: PointMaterial) -> Self {
        Self { material }
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    /// Generate `params.num_rings` groups with the thread-local RNG.
    pub fn create_all(&self, params: &GenerationParameters) -> Vec<ParticleGroup> {
        self.create_all_with(params, &mut rand::thread_rng())
    }

    /// Generate `params.num_rings` groups from the given random source.
    ///
    /// Rings are drawn independently and returned in generation order.
    pub fn create_all_with<R: Rng + ?Sized>(
        &self,
        params: &GenerationParameters,
        rng: &mut R,
    ) -> Vec<ParticleGroup> {
        (0..params.num_rings)
            .map(|_| self.create_ring(params, rng))
            .collect()
    }

    fn create_ring<R: Rng + ?Sized>(&self, params: &GenerationParameters, rng: &mut R) -> ParticleGroup {
        let spec = sample_ring_spec(params, rng);
        let positions = layout_positions(spec.count, spec.radius, spec.y_floor, spec.y_ceil, rng);
        ParticleGroup::new(spec, positions, self.material)
    }
}
