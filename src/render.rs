//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn by returning a [`Render`]. The engine
//! sorts the pieces into one batch per pipeline so every pipeline is bound
//! once per frame: shaded meshes first, then flat overlays on top.

use wgpu::RenderPass;

use crate::{context::Context, data_structures::geometry::GeometryBuffers};

/// A mesh drawn with a shader material.
#[derive(Clone, Copy)]
pub struct Shaded<'a> {
    pub geometry: &'a GeometryBuffers,
    /// Single-instance buffer holding the model matrix.
    pub instance: &'a wgpu::Buffer,
    pub material: &'a wgpu::BindGroup,
    pub camera: &'a wgpu::BindGroup,
}

/// Instanced quads in screen space.
#[derive(Clone, Copy)]
pub struct Flat<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    pub instances: &'a wgpu::Buffer,
    pub group: &'a wgpu::BindGroup,
    pub amount: usize,
}

/// Specifies how a flow should be rendered this frame.
///
/// - `None` renders nothing (for instance while an asset is still loading)
/// - `Shadeds` renders meshes with the wave material pipeline
/// - `Overlay` renders outlined quads on top of the scene
/// - `Composed` recursively renders several renders
/// - `Custom` hands the render pass to a closure, for things that bring their
///   own pipeline (text)
pub enum Render<'a, 'pass>
where
    'pass: 'a,
{
    None,
    Shadeds(Vec<Shaded<'a>>),
    Overlay(Flat<'a>),
    Composed(Vec<Render<'a, 'pass>>),
    Custom(Box<dyn 'a + FnOnce(&Context, &mut wgpu::RenderPass<'pass>)>),
}

impl<'a, 'pass> Render<'a, 'pass> {
    /// Sort `self` into the per-pipeline batches. Custom renders run right away.
    pub(crate) fn set_pipelines(
        self,
        ctx: &Context,
        render_pass: &mut RenderPass<'pass>,
        shaded: &mut Vec<Shaded<'a>>,
        overlays: &mut Vec<Flat<'a>>,
    ) {
        match self {
            Render::Shadeds(mut meshes) => shaded.append(&mut meshes),
            Render::Overlay(flat) => overlays.push(flat),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(ctx, render_pass, shaded, overlays)),
            Render::Custom(f) => f(ctx, render_pass),
            Render::None => (),
        }
    }
}

pub(crate) fn draw_shaded<'a>(render_pass: &mut RenderPass<'_>, ctx: &Context, meshes: Vec<Shaded<'a>>) {
    if meshes.is_empty() {
        return;
    }
    render_pass.set_pipeline(&ctx.pipelines.wave.pipeline);
    for mesh in meshes {
        render_pass.set_bind_group(0, mesh.camera, &[]);
        render_pass.set_bind_group(1, mesh.material, &[]);
        render_pass.set_vertex_buffer(0, mesh.geometry.vertex.slice(..));
        render_pass.set_vertex_buffer(1, mesh.instance.slice(..));
        render_pass.set_index_buffer(mesh.geometry.index.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.geometry.num_indices, 0, 0..1);
    }
}

pub(crate) fn draw_overlays<'a>(render_pass: &mut RenderPass<'_>, ctx: &Context, overlays: Vec<Flat<'a>>) {
    if overlays.is_empty() {
        return;
    }
    render_pass.set_pipeline(&ctx.pipelines.outline);
    for flat in overlays {
        if flat.amount == 0 {
            continue;
        }
        render_pass.set_bind_group(0, flat.group, &[]);
        render_pass.set_vertex_buffer(0, flat.vertex.slice(..));
        render_pass.set_vertex_buffer(1, flat.instances.slice(..));
        render_pass.set_index_buffer(flat.index.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..6, 0, 0..flat.amount as u32);
    }
}
