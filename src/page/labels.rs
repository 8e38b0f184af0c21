//! Button captions, rendered with glyphon.

use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer, Viewport, Weight,
};

use crate::{
    page::{ButtonRow, Rect},
    pipelines::basic::DepthMode,
    render::Render,
};

pub struct Labels {
    font_system: FontSystem,
    swash_cache: SwashCache,
    atlas: TextAtlas,
    viewport: Viewport,
    renderer: TextRenderer,
    buffers: Vec<Buffer>,
}

impl Labels {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let viewport = Viewport::new(device, &cache);
        let renderer = TextRenderer::new(
            &mut atlas,
            device,
            wgpu::MultisampleState::default(),
            Some(DepthMode::Overlay.state()),
        );
        Self {
            font_system,
            swash_cache,
            atlas,
            viewport,
            renderer,
            buffers: Vec::new(),
        }
    }

    /// Shape every caption and centre it in its button.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        row: &ButtonRow,
        rects: &[Rect],
        (width, height): (u32, u32),
        scale_factor: f64,
    ) {
        let theme = row.theme();
        let scale = scale_factor as f32;
        let metrics = Metrics::new(theme.font_size, theme.font_size * 1.75);
        let [r, g, b, a] = theme.primary;
        let color = Color::rgba(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            (a * 255.0) as u8,
        );
        let attrs = Attrs::new().family(Family::SansSerif).weight(Weight::MEDIUM);

        self.viewport.update(queue, Resolution { width, height });
        self.buffers = (0..rects.len())
            .map(|i| {
                let mut buffer = Buffer::new(&mut self.font_system, metrics);
                let caption = row.caption(i).unwrap_or_default();
                buffer.set_text(&mut self.font_system, &caption, &attrs, Shaping::Advanced, None);
                buffer.shape_until_scroll(&mut self.font_system, false);
                buffer
            })
            .collect();

        let areas: Vec<TextArea> = self
            .buffers
            .iter()
            .zip(rects)
            .map(|(buffer, rect)| {
                let text_width = buffer
                    .layout_runs()
                    .map(|run| run.line_w)
                    .fold(0.0, f32::max)
                    * scale;
                let (cx, cy) = rect.center();
                TextArea {
                    buffer,
                    left: cx - text_width / 2.0,
                    top: cy - metrics.line_height * scale / 2.0,
                    scale,
                    bounds: TextBounds {
                        left: rect.x as i32,
                        top: rect.y as i32,
                        right: rect.right() as i32,
                        bottom: (rect.y + rect.height) as i32,
                    },
                    default_color: color,
                    custom_glyphs: &[],
                }
            })
            .collect();

        if let Err(e) = self.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        ) {
            log::warn!("cannot prepare button captions: {e:?}");
        }
        self.atlas.trim();
    }

    pub fn to_render<'pass>(&self) -> Render<'_, 'pass> {
        Render::Custom(Box::new(move |_ctx, render_pass| {
            if let Err(e) = self.renderer.render(&self.atlas, &self.viewport, render_pass) {
                log::warn!("cannot render button captions: {e:?}");
            }
        }))
    }
}
