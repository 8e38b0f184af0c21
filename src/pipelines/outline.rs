//! Flat overlay pipeline for outlined, rounded buttons.
//!
//! A unit quad is instanced once per button. Each instance carries its
//! rectangle in physical pixels plus colour and shape parameters; the fragment
//! stage cuts the rounded outline (and an optional faint fill) out of the quad
//! with a signed distance function.

use wgpu::util::DeviceExt;

use crate::pipelines::basic::{DepthMode, mk_render_pipeline};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub corner: [f32; 2],
}

impl QuadVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Corners in pixel space, y pointing down: top-left, top-right, bottom-right, bottom-left.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

/// Counter-clockwise once the y axis is flipped into clip space.
pub const QUAD_INDICES: [u16; 6] = [0, 3, 2, 0, 2, 1];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutlineInstance {
    /// x, y, width, height in physical pixels.
    pub rect: [f32; 4],
    pub color: [f32; 4],
    /// corner radius, border width, fill opacity, unused.
    pub shape: [f32; 4],
}

impl OutlineInstance {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<OutlineInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenUniform {
    pub size: [f32; 2],
    _padding: [f32; 2],
}

impl ScreenUniform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width.max(1) as f32, height.max(1) as f32],
            _padding: [0.0; 2],
        }
    }
}

pub fn screen_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("screen_bind_group_layout"),
    })
}

pub fn mk_outline_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Outline Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("outline.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Outline Pipeline Layout"),
        bind_group_layouts: &[&screen_layout(device)],
        push_constant_ranges: &[],
    });
    mk_render_pipeline(
        device,
        "Outline Render Pipeline",
        &layout,
        config.format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        DepthMode::Overlay,
        &[QuadVertex::desc(), OutlineInstance::desc()],
        &shader,
        &shader,
    )
}

/// GPU buffers for one batch of outlines sharing a screen uniform.
#[derive(Debug)]
pub struct OutlineBatch {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub instances: wgpu::Buffer,
    capacity: usize,
    amount: usize,
    screen: wgpu::Buffer,
    pub group: wgpu::BindGroup,
}

impl OutlineBatch {
    pub fn new(device: &wgpu::Device, capacity: usize, width: u32, height: u32) -> Self {
        let capacity = capacity.max(1);
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Outline Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Outline Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Outline Instance Buffer"),
            size: (capacity * std::mem::size_of::<OutlineInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let screen = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Uniform Buffer"),
            contents: bytemuck::cast_slice(&[ScreenUniform::new(width, height)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_layout(device),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen.as_entire_binding(),
            }],
            label: Some("screen_bind_group"),
        });
        Self {
            vertex,
            index,
            instances,
            capacity,
            amount: 0,
            screen,
            group,
        }
    }

    /// Replace the instances. Anything past the batch capacity is dropped.
    pub fn write(&mut self, queue: &wgpu::Queue, outlines: &[OutlineInstance]) {
        if outlines.len() > self.capacity {
            log::warn!(
                "outline batch holds {} instances, dropping {}",
                self.capacity,
                outlines.len() - self.capacity
            );
        }
        let outlines = &outlines[..outlines.len().min(self.capacity)];
        queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(outlines));
        self.amount = outlines.len();
    }

    pub fn resize(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        queue.write_buffer(
            &self.screen,
            0,
            bytemuck::cast_slice(&[ScreenUniform::new(width, height)]),
        );
    }

    pub fn amount(&self) -> usize {
        self.amount
    }
}
