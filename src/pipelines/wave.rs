//! The wave material: a textured plane whose vertices are pushed along Z by
//! 3D simplex noise that scrolls with time.
//!
//! Vertex stage: `z += snoise3(x * NOISE_FREQ + uTime, y, z) * NOISE_AMP`,
//! and the displaced `z` is handed to the fragment stage as `wave`.
//! Fragment stage: sample `uTexture` at `uv + wave * WAVE_UV_SCALE` and output
//! it fully opaque.
//!
//! [`displace`] and [`sample_coords`] compute the same thing on the CPU.
//!
//! The plane's `v` coordinate grows upward while wgpu puts the first texel
//! row at `v = 0`, so the artwork is uploaded bottom row first
//! ([`texture_rows`]).

use crate::{
    noise::simplex3,
    pipelines::shader_material::{MaterialUniforms, ShaderMaterial},
};

pub const NOISE_FREQ: f32 = 2.0;
pub const NOISE_AMP: f32 = 0.4;
pub const WAVE_UV_SCALE: f32 = 0.2;

/// `uTime` and `uColor`; the third input, `uTexture`, is bound next to the block.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveUniforms {
    /// Seconds since the mesh was mounted.
    pub time: f32,
    // `uColor` is a vec3 and therefore 16 byte aligned
    _padding: [u32; 3],
    pub color: [f32; 3],
    _padding2: u32,
}

impl WaveUniforms {
    pub fn new(time: f32, color: [f32; 3]) -> Self {
        Self {
            time,
            _padding: [0; 3],
            color,
            _padding2: 0,
        }
    }
}

impl Default for WaveUniforms {
    fn default() -> Self {
        Self::new(0.0, [0.0, 0.0, 0.0])
    }
}

impl MaterialUniforms for WaveUniforms {
    const WGSL_NAME: &'static str = "WaveUniforms";
    const WGSL_STRUCT: &'static str = "struct WaveUniforms {
    uTime: f32,
    uColor: vec3<f32>,
}
";
}

pub type WaveShaderMaterial = ShaderMaterial<WaveUniforms>;

/// The material declaration used by the page.
pub fn wave_material() -> WaveShaderMaterial {
    ShaderMaterial::new(
        "WaveShaderMaterial",
        WaveUniforms::default(),
        concat!(include_str!("noise.wgsl"), include_str!("wave.vert.wgsl")),
        include_str!("wave.frag.wgsl"),
    )
    .with_constant("NOISE_FREQ", NOISE_FREQ)
    .with_constant("NOISE_AMP", NOISE_AMP)
    .with_constant("WAVE_UV_SCALE", WAVE_UV_SCALE)
}

/// Displaced local position and the `wave` value of one vertex at `time`.
pub fn displace(position: [f32; 3], time: f32) -> ([f32; 3], f32) {
    let [x, y, z] = position;
    let z = z + simplex3([x * NOISE_FREQ + time, y, z]) * NOISE_AMP;
    ([x, y, z], z)
}

/// Texture coordinate sampled by a fragment at `uv` with interpolated `wave`.
pub fn sample_coords(uv: [f32; 2], wave: f32) -> [f32; 2] {
    let shift = wave * WAVE_UV_SCALE;
    [uv[0] + shift, uv[1] + shift]
}

/// `img` with its rows in upload order for the wave plane: bottom row first.
pub fn texture_rows(img: &image::DynamicImage) -> image::DynamicImage {
    img.flipv()
}
