//! The animated wave mesh.

use std::sync::Arc;

use instant::Duration;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        geometry::{GeometryBuffers, PlaneGeometry},
        instance::Instance,
    },
    pipelines::{shader_material::MaterialInstance, wave::WaveUniforms},
    render::Shaded,
};

/// Seconds since the animation started. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: Duration,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame and return the new elapsed time in seconds.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed += dt;
        self.seconds()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// A plane bound to its own wave material instance.
///
/// The geometry is shared and immutable; the material instance is owned and
/// its `uTime` is the only thing that changes between frames.
#[derive(Debug)]
pub struct AnimatedMesh {
    geometry: Arc<PlaneGeometry>,
    buffers: GeometryBuffers,
    instance_buffer: wgpu::Buffer,
    material: MaterialInstance<WaveUniforms>,
    clock: AnimationClock,
}

impl AnimatedMesh {
    pub fn new(
        device: &wgpu::Device,
        geometry: Arc<PlaneGeometry>,
        material: MaterialInstance<WaveUniforms>,
    ) -> Self {
        let buffers = geometry.to_buffers(device, "Wave");
        let instance = Instance::new();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wave Instance Buffer"),
            contents: bytemuck::cast_slice(&[instance.to_raw()]),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::debug!(
            "mounted wave mesh with {} vertices and {} indices",
            buffers.num_vertices,
            buffers.num_indices
        );
        Self {
            geometry,
            buffers,
            instance_buffer,
            material,
            clock: AnimationClock::new(),
        }
    }

    /// Per-frame update: accumulate `dt` and push the elapsed time into `uTime`.
    pub fn tick(&mut self, queue: &wgpu::Queue, dt: Duration) -> f32 {
        let time = self.clock.advance(dt);
        self.material.uniforms_mut().time = time;
        self.material.write(queue);
        time
    }

    pub fn geometry(&self) -> &Arc<PlaneGeometry> {
        &self.geometry
    }

    pub fn material(&self) -> &MaterialInstance<WaveUniforms> {
        &self.material
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn to_render<'a>(&'a self, camera: &'a wgpu::BindGroup) -> Shaded<'a> {
        Shaded {
            geometry: &self.buffers,
            instance: &self.instance_buffer,
            material: self.material.bind_group(),
            camera,
        }
    }
}
