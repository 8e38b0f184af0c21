use instant::Duration;
use wave_folio::{
    container::PageEvent,
    context::Context,
    flow::{GraphicsFlow, ImageTestResult, Out},
    render::Render,
};
use winit::event::WindowEvent;

pub(crate) type Frame = image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>;

#[derive(Debug, Default)]
pub(crate) struct FrameCounter(u32);

impl FrameCounter {
    pub(crate) fn frame(&self) -> u32 {
        self.0
    }

    pub(crate) fn progress(&mut self) {
        self.0 += 1;
    }
}

/// Give up on frames that never become ready instead of hanging the test.
pub(crate) const MAX_FRAMES: u32 = 600;

pub(crate) type Validate<F> =
    fn(&F, &mut FrameCounter, &mut Frame) -> Result<ImageTestResult, anyhow::Error>;

/// Wraps a real flow and checks every rendered frame with `validate`.
pub(crate) struct Golden<F> {
    pub(crate) inner: F,
    pub(crate) validate: Validate<F>,
}

impl<F: GraphicsFlow<FrameCounter, PageEvent>> GraphicsFlow<FrameCounter, PageEvent> for Golden<F> {
    fn on_init(&mut self, ctx: &mut Context, state: &mut FrameCounter) -> Out<PageEvent> {
        self.inner.on_init(ctx, state)
    }

    fn on_update(&mut self, ctx: &Context, state: &mut FrameCounter, dt: Duration) -> Out<PageEvent> {
        state.progress();
        self.inner.on_update(ctx, state, dt)
    }

    fn on_window_events(
        &mut self,
        ctx: &Context,
        state: &mut FrameCounter,
        event: &WindowEvent,
    ) -> Out<PageEvent> {
        self.inner.on_window_events(ctx, state, event)
    }

    fn on_custom_events(
        &mut self,
        ctx: &Context,
        state: &mut FrameCounter,
        event: PageEvent,
    ) -> Option<PageEvent> {
        self.inner.on_custom_events(ctx, state, event)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        self.inner.on_render()
    }

    fn render_to_texture(
        &self,
        _: &Context,
        state: &mut FrameCounter,
        texture: &mut Frame,
    ) -> Result<ImageTestResult, anyhow::Error> {
        if state.frame() > MAX_FRAMES {
            return Ok(ImageTestResult::Failed);
        }
        (self.validate)(&self.inner, state, texture)
    }
}

pub(crate) fn to_pixel(colour: wgpu::Color) -> image::Rgba<u8> {
    let f_to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    image::Rgba([
        f_to_u8(colour.r),
        f_to_u8(colour.g),
        f_to_u8(colour.b),
        f_to_u8(colour.a),
    ])
}

#[macro_export]
macro_rules! golden_image_test {
    ($make_flow:expr) => {{
        use wave_folio::{
            container::PageEvent,
            flow::{FlowConstructor, GraphicsFlow},
        };
        use $crate::common::test_utils::FrameCounter;

        let constructor: FlowConstructor<FrameCounter, PageEvent> = Box::new(|ctx| {
            Box::pin(async move {
                let flow: Box<dyn GraphicsFlow<FrameCounter, PageEvent>> =
                    Box::new(($make_flow)(ctx));
                flow
            })
        });

        wave_folio::flow::run(vec![constructor]).expect("Failed to run flow for integration test.");
    }};
}
