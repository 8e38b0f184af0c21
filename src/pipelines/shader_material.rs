//! Custom surface materials built from a uniform block and two shader bodies.
//!
//! A [`ShaderMaterial`] is a declaration: default uniform values, a vertex
//! body and a fragment body. It does not own GPU state. The rendering layer
//! turns it into a [`MaterialPipeline`] once, and every mesh that wants to use
//! the material gets its own [`MaterialInstance`] with a private uniform
//! buffer.
//!
//! Both stage bodies are prefixed with a generated header that declares the
//! material constants, the camera uniform (group 0) and the material bindings
//! (group 1):
//!
//! ```wgsl
//! @group(0) @binding(0) var<uniform> camera: CameraUniform;
//! @group(1) @binding(0) var<uniform> material: <U::WGSL_NAME>;
//! @group(1) @binding(1) var uTexture: texture_2d<f32>;
//! @group(1) @binding(2) var uSampler: sampler;
//! ```

use std::{fmt::Write, sync::Arc};

use wgpu::util::DeviceExt;

use crate::{
    camera::camera_layout,
    data_structures::{geometry::WaveVertex, instance::InstanceRaw, texture::Texture},
    pipelines::basic::{DepthMode, mk_render_pipeline},
};

/// A plain-old-data uniform block together with its WGSL declaration.
///
/// The Rust layout has to match WGSL's uniform address space rules (16 byte
/// alignment for `vec3`/`vec4`), padding fields included.
pub trait MaterialUniforms: bytemuck::Pod {
    /// Name of the WGSL struct declared by [`Self::WGSL_STRUCT`].
    const WGSL_NAME: &'static str;
    /// WGSL `struct` declaration of the block.
    const WGSL_STRUCT: &'static str;
}

const CAMERA_WGSL: &str = "struct CameraUniform {
    view_proj: mat4x4<f32>,
}
@group(0) @binding(0) var<uniform> camera: CameraUniform;
";

#[derive(Clone, Debug)]
pub struct ShaderMaterial<U: MaterialUniforms> {
    name: &'static str,
    defaults: U,
    vertex: &'static str,
    fragment: &'static str,
    constants: Vec<(&'static str, f32)>,
}

impl<U: MaterialUniforms> ShaderMaterial<U> {
    pub fn new(name: &'static str, defaults: U, vertex: &'static str, fragment: &'static str) -> Self {
        Self {
            name,
            defaults,
            vertex,
            fragment,
            constants: Vec::new(),
        }
    }

    /// Declare a `const NAME: f32` visible to both stages.
    pub fn with_constant(mut self, name: &'static str, value: f32) -> Self {
        self.constants.push((name, value));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn defaults(&self) -> U {
        self.defaults
    }

    pub fn constant(&self, name: &str) -> Option<f32> {
        self.constants
            .iter()
            .find(|(constant, _)| *constant == name)
            .map(|(_, value)| *value)
    }

    fn header(&self) -> String {
        let mut header = String::new();
        for (name, value) in &self.constants {
            // `{:?}` always prints a decimal point, which WGSL needs for f32 literals.
            let _ = writeln!(header, "const {name}: f32 = {value:?};");
        }
        header.push_str(CAMERA_WGSL);
        header.push_str(U::WGSL_STRUCT);
        let _ = writeln!(
            header,
            "@group(1) @binding(0) var<uniform> material: {};",
            U::WGSL_NAME
        );
        header.push_str("@group(1) @binding(1) var uTexture: texture_2d<f32>;\n");
        header.push_str("@group(1) @binding(2) var uSampler: sampler;\n");
        header
    }

    /// Full WGSL source of the vertex stage.
    pub fn vertex_source(&self) -> String {
        format!("{}\n{}", self.header(), self.vertex)
    }

    /// Full WGSL source of the fragment stage.
    pub fn fragment_source(&self) -> String {
        format!("{}\n{}", self.header(), self.fragment)
    }

    /// Compile both stages into a render pipeline for the given surface format.
    ///
    /// WGSL errors are reported through wgpu's error channel and are fatal for
    /// this material.
    pub fn build(&self, device: &wgpu::Device, color_format: wgpu::TextureFormat) -> MaterialPipeline {
        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} vertex shader", self.name)),
            source: wgpu::ShaderSource::Wgsl(self.vertex_source().into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} fragment shader", self.name)),
            source: wgpu::ShaderSource::Wgsl(self.fragment_source().into()),
        });

        let layout = material_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", self.name)),
            bind_group_layouts: &[&camera_layout(device), &layout],
            push_constant_ranges: &[],
        });

        let pipeline = mk_render_pipeline(
            device,
            self.name,
            &pipeline_layout,
            color_format,
            Some(wgpu::BlendState::REPLACE),
            DepthMode::Test,
            &[WaveVertex::desc(), InstanceRaw::desc()],
            &vertex_module,
            &fragment_module,
        );

        log::info!("registered material {}", self.name);
        MaterialPipeline { pipeline, layout }
    }

    /// Create a mesh-private binding of this material's uniforms to `texture`.
    pub fn instantiate(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: Arc<Texture>,
    ) -> anyhow::Result<MaterialInstance<U>> {
        MaterialInstance::new(device, layout, self.name, self.defaults, texture)
    }
}

pub fn material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("material_bind_group_layout"),
    })
}

/// A compiled material.
#[derive(Debug)]
pub struct MaterialPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub layout: wgpu::BindGroupLayout,
}

/// One live binding of a material's uniforms to a texture.
///
/// The uniform values live on the CPU; [`write`](Self::write) uploads them.
/// The texture is shared, the uniform buffer is not.
#[derive(Debug)]
pub struct MaterialInstance<U: MaterialUniforms> {
    uniforms: U,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Arc<Texture>,
}

impl<U: MaterialUniforms> MaterialInstance<U> {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        name: &str,
        uniforms: U,
        texture: Arc<Texture>,
    ) -> anyhow::Result<Self> {
        let sampler = texture
            .sampler
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("texture bound to {name} has no sampler"))?;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Uniform Buffer")),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
            label: Some(&format!("{name} bind group")),
        });

        Ok(Self {
            uniforms,
            buffer,
            bind_group,
            texture,
        })
    }

    pub fn uniforms(&self) -> &U {
        &self.uniforms
    }

    pub fn uniforms_mut(&mut self) -> &mut U {
        &mut self.uniforms
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Upload the current uniform values.
    pub fn write(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniforms]));
    }
}
