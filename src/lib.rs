//! wave-folio
//!
//! A personal portfolio page for native windows and the browser: a plane
//! whose surface is pushed around by animated simplex noise, textured with
//! the page's artwork, and a footer row of outlined contact links.
//!
//! High-level modules
//! - `camera`: fixed perspective camera and its uniform
//! - `config`: page configuration with defaults
//! - `container`: the flow that loads the texture and owns the wave scene
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: plane geometry, instances, textures, the animated mesh and the scene
//! - `flow`: the event loop and the flow lifecycle
//! - `noise`: CPU reference of the simplex noise used by the wave shader
//! - `page`: page composition, link buttons and the entry point
//! - `pipelines`: the wave material and the outline overlay pipeline
//! - `render`: render composition for efficient pipeline reuse
//! - `resources`: asset loading, retries and the deferred-loading boundary
//!

pub mod camera;
pub mod config;
pub mod container;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod noise;
pub mod page;
pub mod pipelines;
pub mod render;
pub mod resources;

pub use config::Config;
pub use page::run;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), wasm_bindgen::JsValue> {
    page::run(Config::default()).map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{e:#}")))
}
