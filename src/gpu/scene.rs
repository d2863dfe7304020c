//! GPU-side render scene.
//!
//! Each inserted group gets its own vertex buffer of positions and a small
//! uniform buffer with its color and material flags. Removing a group
//! destroys both immediately.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::error::SceneError;
use crate::generator::{BlendMode, ParticleGroup};
use crate::scene::{RenderScene, SceneHandle};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct GroupUniforms {
    pub color: [f32; 4],
    pub size: f32,
    pub size_attenuation: f32,
    pub alpha_mask: f32,
    pub _padding: f32,
}

impl GroupUniforms {
    pub(crate) fn from_group(group: &ParticleGroup) -> Self {
        let material = group.material();
        let color = group.linear_color();
        Self {
            color: [color.x, color.y, color.z, 1.0],
            size: material.size,
            size_attenuation: if material.size_attenuation { 1.0 } else { 0.0 },
            alpha_mask: if material.alpha_mask { 1.0 } else { 0.0 },
            _padding: 0.0,
        }
    }
}

pub(crate) struct GpuGroup {
    pub handle: SceneHandle,
    /// `None` for groups with no points.
    pub vertex_buffer: Option<wgpu::Buffer>,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub point_count: u32,
    pub pipeline_key: (BlendMode, bool),
}

impl GpuGroup {
    fn destroy(self) {
        if let Some(buffer) = self.vertex_buffer {
            buffer.destroy();
        }
        self.uniform_buffer.destroy();
    }
}

/// Render scene backed by wgpu buffers.
pub struct GpuScene {
    device: Arc<wgpu::Device>,
    group_layout: Arc<wgpu::BindGroupLayout>,
    groups: Vec<GpuGroup>,
    next_handle: u64,
}

impl GpuScene {
    pub(crate) fn new(device: Arc<wgpu::Device>, group_layout: Arc<wgpu::BindGroupLayout>) -> Self {
        Self {
            device,
            group_layout,
            groups: Vec::new(),
            next_handle: 0,
        }
    }

    pub(crate) fn groups(&self) -> &[GpuGroup] {
        &self.groups
    }

    /// Total points uploaded across all groups.
    pub fn point_count(&self) -> u64 {
        self.groups.iter().map(|g| g.point_count as u64).sum()
    }
}

impl RenderScene for GpuScene {
    fn insert(&mut self, group: &ParticleGroup) -> Result<SceneHandle, SceneError> {
        let bytes = group.position_bytes();
        let point_count =
            u32::try_from(group.len()).map_err(|_| SceneError::TooManyPoints(group.len()))?;
        if bytes.len() as u64 > self.device.limits().max_buffer_size {
            return Err(SceneError::TooManyPoints(group.len()));
        }

        let vertex_buffer = (!bytes.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Ring Positions"),
                contents: bytes,
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let uniform_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ring Uniforms"),
            contents: bytemuck::bytes_of(&GroupUniforms::from_group(group)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Ring Bind Group"),
            layout: &self.group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let handle = SceneHandle(self.next_handle);
        self.next_handle += 1;

        let material = group.material();
        self.groups.push(GpuGroup {
            handle,
            vertex_buffer,
            uniform_buffer,
            bind_group,
            point_count,
            pipeline_key: (material.blend, material.depth_write),
        });
        Ok(handle)
    }

    fn remove(&mut self, handle: SceneHandle) {
        if let Some(idx) = self.groups.iter().position(|g| g.handle == handle) {
            self.groups.remove(idx).destroy();
        }
    }

    fn len(&self) -> usize {
        self.groups.len()
    }
}

impl Drop for GpuScene {
    fn drop(&mut self) {
        for group in self.groups.drain(..) {
            group.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ParticleFieldGenerator, PointMaterial};
    use crate::params::{GenerationParameters, Range};

    #[test]
    fn test_group_uniform_layout() {
        assert_eq!(std::mem::size_of::<GroupUniforms>(), 32);
    }

    #[test]
    fn test_group_uniforms_carry_material_flags() {
        let mut params = GenerationParameters::default();
        params.num_rings = 1;
        params.count = Range::fixed(2.0);
        params.hue = Range::fixed(0.0);
        let material = PointMaterial {
            size_attenuation: false,
            alpha_mask: true,
            size: 0.25,
            ..Default::default()
        };
        let group = &ParticleFieldGenerator::with_material(material).create_all(&params)[0];
        let u = GroupUniforms::from_group(group);
        assert_eq!(u.size, 0.25);
        assert_eq!(u.size_attenuation, 0.0);
        assert_eq!(u.alpha_mask, 1.0);
        assert_eq!(u.color[3], 1.0);
        assert!(u.color[0] > u.color[1] && u.color[0] > u.color[2]);
    }
}
