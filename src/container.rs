//! The flow that owns the wave scene.
//!
//! On init it starts loading the wave texture. The mesh sits behind a
//! [`Deferred`] boundary: nothing but the clear colour is drawn until the
//! texture arrived, and a texture that could not be loaded leaves the page
//! showing the clear colour for good.

use std::sync::Arc;

use image::DynamicImage;
use instant::Duration;
use winit::event::WindowEvent;

use crate::{
    camera::{Camera, CameraResources, Projection},
    config::Config,
    context::{Context, InitContext},
    data_structures::{
        geometry::PlaneGeometry, mesh::AnimatedMesh, scene::Scene, texture::Texture,
    },
    flow::{GraphicsFlow, Out},
    pipelines::wave::{WaveShaderMaterial, WaveUniforms, texture_rows, wave_material},
    render::Render,
    resources::{self, loader::Deferred},
};

/// Results of async work, delivered back through the event loop.
pub enum PageEvent {
    TextureLoaded(anyhow::Result<DynamicImage>),
}

impl std::fmt::Debug for PageEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageEvent::TextureLoaded(Ok(img)) => {
                write!(f, "TextureLoaded({}x{})", img.width(), img.height())
            }
            PageEvent::TextureLoaded(Err(e)) => write!(f, "TextureLoaded(Err({e:#}))"),
        }
    }
}

pub struct SceneContainer {
    config: Config,
    material: WaveShaderMaterial,
    geometry: Arc<PlaneGeometry>,
    scene: Scene,
    texture: Deferred<Arc<Texture>>,
}

impl SceneContainer {
    pub fn new(ctx: &InitContext, config: Config) -> Self {
        let (width, height) = ctx.size;
        let camera = CameraResources::new(
            &ctx.device,
            Camera::from(&config.camera),
            Projection::from_config(&config.camera, width, height),
        );
        let material = wave_material();
        let geometry = Arc::new(PlaneGeometry::new(config.plane));
        let texture = Deferred::new(format!("texture {}", config.texture));
        Self {
            config,
            material,
            geometry,
            scene: Scene::new(camera),
            texture,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn texture(&self) -> &Deferred<Arc<Texture>> {
        &self.texture
    }

    /// Settle the texture boundary with a decoded image and, once it is ready,
    /// mount the wave mesh. Late or repeated results are ignored.
    pub fn on_texture_loaded(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: anyhow::Result<DynamicImage>,
    ) {
        let uploaded = image
            .and_then(|img| {
                let rows = texture_rows(&img);
                Texture::from_image(device, queue, &rows, Some(self.config.texture.as_str()))
            })
            .map(Arc::new);
        if !self.texture.resolve(uploaded) {
            return;
        }
        let Some(texture) = self.texture.ready().cloned() else {
            return;
        };
        if !self.scene.is_empty() {
            return;
        }
        if let Err(e) = self.mount(device, layout, texture) {
            log::error!("cannot mount the wave mesh: {e:#}");
        }
    }

    fn mount(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: Arc<Texture>,
    ) -> anyhow::Result<()> {
        let mut material = self.material.instantiate(device, layout, texture)?;
        *material.uniforms_mut() = WaveUniforms::new(0.0, self.config.tint);
        self.scene
            .add(AnimatedMesh::new(device, self.geometry.clone(), material));
        Ok(())
    }
}

impl<S> GraphicsFlow<S, PageEvent> for SceneContainer {
    fn on_init(&mut self, ctx: &mut Context, _state: &mut S) -> Out<PageEvent> {
        ctx.clear_colour = self.config.clear_colour;
        let file_name = self.config.texture.clone();
        let policy = self.config.retry;
        Out::event(async move {
            PageEvent::TextureLoaded(resources::load_image(&file_name, policy).await)
        })
    }

    fn on_update(&mut self, ctx: &Context, _state: &mut S, dt: Duration) -> Out<PageEvent> {
        self.scene.tick(&ctx.queue, dt);
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        ctx: &Context,
        _state: &mut S,
        event: &WindowEvent,
    ) -> Out<PageEvent> {
        if let WindowEvent::Resized(size) = event {
            self.scene
                .camera
                .resize(&ctx.queue, size.width, size.height);
        }
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        ctx: &Context,
        _state: &mut S,
        event: PageEvent,
    ) -> Option<PageEvent> {
        match event {
            PageEvent::TextureLoaded(image) => {
                self.on_texture_loaded(
                    &ctx.device,
                    &ctx.queue,
                    &ctx.pipelines.wave.layout,
                    image,
                );
                None
            }
        }
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        self.scene.to_render()
    }
}
