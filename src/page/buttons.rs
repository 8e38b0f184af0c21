//! The footer row of outlined link buttons.
//!
//! [`ButtonRow`] is the pure part: sizes, positions and hit testing in
//! physical pixels. [`ButtonRowFlow`] puts it on screen with the outline
//! pipeline, tracks the hovered button and opens links on click.

use instant::Duration;
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    window::CursorIcon,
};

use crate::{
    container::PageEvent,
    context::{Context, InitContext},
    flow::{GraphicsFlow, Out},
    page::{LinkButton, Theme},
    pipelines::outline::{OutlineBatch, OutlineInstance},
    render::{Flat, Render},
};

/// Axis aligned rectangle in physical pixels, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Left and top edges are inside, right and bottom edges are not.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Clone, Debug)]
pub struct ButtonRow {
    theme: Theme,
    buttons: Vec<LinkButton>,
}

impl ButtonRow {
    pub fn new(theme: Theme, buttons: Vec<LinkButton>) -> Self {
        Self { theme, buttons }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn buttons(&self) -> &[LinkButton] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Caption as it is drawn: upper case.
    pub fn caption(&self, index: usize) -> Option<String> {
        self.buttons.get(index).map(|b| b.label.to_uppercase())
    }

    /// Logical width of the button for `label`.
    pub fn button_width(&self, label: &str) -> f32 {
        let text = label.chars().count() as f32 * self.theme.glyph_width;
        (text + 2.0 * self.theme.padding_x).max(self.theme.min_width)
    }

    /// Place the buttons in a row centred horizontally on a `width` x `height`
    /// surface, `bottom_margin` above the bottom edge. There is a gap between
    /// two buttons but none before the first or after the last.
    pub fn layout(&self, width: u32, height: u32, scale_factor: f64) -> Vec<Rect> {
        if self.buttons.is_empty() {
            return Vec::new();
        }
        let scale = scale_factor as f32;
        let widths: Vec<f32> = self
            .buttons
            .iter()
            .map(|b| self.button_width(&b.label) * scale)
            .collect();
        let spacing = self.theme.spacing * scale;
        let total = widths.iter().sum::<f32>() + spacing * (widths.len() - 1) as f32;
        let button_height = self.theme.button_height * scale;
        let y = height as f32 - self.theme.bottom_margin * scale - button_height;

        let mut x = (width as f32 - total) / 2.0;
        widths
            .into_iter()
            .map(|w| {
                let rect = Rect {
                    x,
                    y,
                    width: w,
                    height: button_height,
                };
                x += w + spacing;
                rect
            })
            .collect()
    }

    /// Index of the button under `(x, y)`, if any.
    pub fn hit(rects: &[Rect], x: f32, y: f32) -> Option<usize> {
        rects.iter().position(|r| r.contains(x, y))
    }

    /// Outline instances for `rects`, with `hovered` highlighted.
    pub fn outlines(&self, rects: &[Rect], scale_factor: f64, hovered: Option<usize>) -> Vec<OutlineInstance> {
        let scale = scale_factor as f32;
        let [r, g, b, a] = self.theme.primary;
        rects
            .iter()
            .enumerate()
            .map(|(i, rect)| {
                let is_hovered = hovered == Some(i);
                let (alpha, fill) = if is_hovered {
                    (a, self.theme.hover_fill)
                } else {
                    (a * self.theme.border_opacity, 0.0)
                };
                OutlineInstance {
                    rect: [rect.x, rect.y, rect.width, rect.height],
                    color: [r, g, b, alpha],
                    shape: [
                        self.theme.border_radius * scale,
                        self.theme.border_width * scale,
                        fill,
                        0.0,
                    ],
                }
            })
            .collect()
    }
}

/// The button row as a flow.
pub struct ButtonRowFlow {
    row: ButtonRow,
    batch: OutlineBatch,
    rects: Vec<Rect>,
    size: (u32, u32),
    scale_factor: f64,
    cursor: Option<(f32, f32)>,
    hovered: Option<usize>,
    #[cfg(feature = "ui")]
    labels: crate::page::labels::Labels,
}

impl ButtonRowFlow {
    pub fn new(ctx: &InitContext, row: ButtonRow) -> Self {
        let (width, height) = ctx.size;
        let batch = OutlineBatch::new(&ctx.device, row.len(), width, height);
        #[cfg(feature = "ui")]
        let labels = crate::page::labels::Labels::new(&ctx.device, &ctx.queue, ctx.format);
        let mut flow = Self {
            row,
            batch,
            rects: Vec::new(),
            size: (width, height),
            scale_factor: ctx.scale_factor,
            cursor: None,
            hovered: None,
            #[cfg(feature = "ui")]
            labels,
        };
        flow.relayout(&ctx.device, &ctx.queue);
        flow
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[allow(unused_variables)]
    fn relayout(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let (width, height) = self.size;
        self.rects = self.row.layout(width, height, self.scale_factor);
        self.batch.resize(queue, width, height);
        self.hovered = self
            .cursor
            .and_then(|(x, y)| ButtonRow::hit(&self.rects, x, y));
        self.write_outlines(queue);
        #[cfg(feature = "ui")]
        self.labels.prepare(
            device,
            queue,
            &self.row,
            &self.rects,
            self.size,
            self.scale_factor,
        );
    }

    fn write_outlines(&mut self, queue: &wgpu::Queue) {
        let outlines = self
            .row
            .outlines(&self.rects, self.scale_factor, self.hovered);
        self.batch.write(queue, &outlines);
    }

    fn set_hovered(&mut self, ctx: &Context, hovered: Option<usize>) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        ctx.window.set_cursor(if hovered.is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        });
        self.write_outlines(&ctx.queue);
    }

    fn activate(&self, index: usize) {
        if let Some(button) = self.row.buttons().get(index)
            && let Err(e) = button.open()
        {
            log::error!("cannot open {}: {e:#}", button.label);
        }
    }
}

impl<S> GraphicsFlow<S, PageEvent> for ButtonRowFlow {
    fn on_init(&mut self, _ctx: &mut Context, _state: &mut S) -> Out<PageEvent> {
        Out::Empty
    }

    fn on_update(&mut self, _ctx: &Context, _state: &mut S, _dt: Duration) -> Out<PageEvent> {
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        ctx: &Context,
        _state: &mut S,
        event: &WindowEvent,
    ) -> Out<PageEvent> {
        match event {
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.size = (size.width, size.height);
                    self.relayout(&ctx.device, &ctx.queue);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                self.relayout(&ctx.device, &ctx.queue);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = Some((x, y));
                self.set_hovered(ctx, ButtonRow::hit(&self.rects, x, y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.set_hovered(ctx, None);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(index) = self
                    .cursor
                    .and_then(|(x, y)| ButtonRow::hit(&self.rects, x, y))
                {
                    self.activate(index);
                }
            }
            _ => {}
        }
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        _ctx: &Context,
        _state: &mut S,
        event: PageEvent,
    ) -> Option<PageEvent> {
        Some(event)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        let outlines = Render::Overlay(Flat {
            vertex: &self.batch.vertex,
            index: &self.batch.index,
            instances: &self.batch.instances,
            group: &self.batch.group,
            amount: self.batch.amount(),
        });
        #[cfg(feature = "ui")]
        let render = Render::Composed(vec![outlines, self.labels.to_render()]);
        #[cfg(not(feature = "ui"))]
        let render = outlines;
        render
    }
}
