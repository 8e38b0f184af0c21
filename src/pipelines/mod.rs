//! Render pipelines used by the page.
//!
//! - `basic` is the shared pipeline builder
//! - `shader_material` turns uniform blocks and WGSL bodies into materials
//! - `wave` is the animated wave material
//! - `outline` draws the outlined link buttons

pub mod basic;
pub mod outline;
pub mod shader_material;
pub mod wave;

use crate::pipelines::{
    outline::mk_outline_pipeline,
    shader_material::MaterialPipeline,
    wave::wave_material,
};

/// Every pipeline compiled for the current surface format.
#[derive(Debug)]
pub struct Pipelines {
    pub wave: MaterialPipeline,
    pub outline: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Self {
        Self {
            wave: wave_material().build(device, config.format),
            outline: mk_outline_pipeline(device, config),
        }
    }
}
