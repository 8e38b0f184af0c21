//! The page: the wave scene with a footer row of contact links.
//!
//! - `buttons` lays out, draws and hit-tests the link buttons
//! - `labels` draws the button captions (behind the `ui` feature)

pub mod buttons;
#[cfg(feature = "ui")]
pub mod labels;

use anyhow::{Context as _, anyhow};

use crate::{
    config::Config,
    container::{PageEvent, SceneContainer},
    flow::{self, FlowConstructor, GraphicsFlow},
};

pub use buttons::{ButtonRow, ButtonRowFlow, Rect};

/// Colours and metrics of the button row, in logical pixels.
///
/// Passed to [`ButtonRow::new`]; there is no global styling state.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Outline, caption and hover colour.
    pub primary: [f32; 4],
    /// Page background behind the buttons.
    pub secondary: [f32; 4],
    /// Corner radius. Anything above half the button height gives a pill.
    pub border_radius: f32,
    pub border_width: f32,
    /// Opacity of the outline while the button is not hovered.
    pub border_opacity: f32,
    /// Fill opacity of a hovered button.
    pub hover_fill: f32,
    /// Horizontal gap between two buttons.
    pub spacing: f32,
    pub button_height: f32,
    pub padding_x: f32,
    pub min_width: f32,
    /// Advance of one caption character, used to size buttons.
    pub glyph_width: f32,
    pub font_size: f32,
    /// Distance between the row and the bottom edge.
    pub bottom_margin: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: [1.0, 1.0, 1.0, 1.0],
            secondary: [0.0, 0.0, 0.0, 1.0],
            border_radius: 800.0,
            border_width: 1.0,
            border_opacity: 0.5,
            hover_fill: 0.04,
            spacing: 8.0,
            button_height: 36.0,
            padding_x: 15.0,
            min_width: 64.0,
            glyph_width: 9.0,
            font_size: 14.0,
            bottom_margin: 32.0,
        }
    }
}

/// A labelled link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub href: String,
}

impl LinkButton {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Follow the link. In the browser this navigates the page, natively the
    /// target is only logged.
    pub fn open(&self) -> anyhow::Result<()> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().context("no browser window")?;
            window
                .location()
                .set_href(&self.href)
                .map_err(|e| anyhow!("cannot navigate to {}: {e:?}", self.href))?;
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if self.href.is_empty() {
                return Err(anyhow!("{} has no link target", self.label));
            }
            log::info!("open {} -> {}", self.label, self.href);
        }
        Ok(())
    }
}

pub fn default_links() -> Vec<LinkButton> {
    vec![
        LinkButton::new("Contact", "mailto:me@alejandrina.me"),
        LinkButton::new("Github", "https://www.github.com/agonzalezreyes/"),
        LinkButton::new("LinkedIn", "https://www.linkedin.com/in/alegore/"),
    ]
}

/// Build the page from `config` and run it until the window closes.
pub fn run(config: Config) -> anyhow::Result<()> {
    let row = ButtonRow::new(Theme::default(), default_links());
    let scene: FlowConstructor<(), PageEvent> = Box::new(move |ctx| {
        Box::pin(async move {
            Box::new(SceneContainer::new(&ctx, config)) as Box<dyn GraphicsFlow<(), PageEvent>>
        })
    });
    let buttons: FlowConstructor<(), PageEvent> = Box::new(move |ctx| {
        Box::pin(async move {
            Box::new(ButtonRowFlow::new(&ctx, row)) as Box<dyn GraphicsFlow<(), PageEvent>>
        })
    });
    flow::run(vec![scene, buttons]).context("the page stopped with an error")
}
