//! Page configuration.
//!
//! Plain structs with sensible defaults that are handed to the components
//! that need them: the [`Context`](crate::context::Context) reads the clear
//! colour, the scene container reads the camera, geometry and asset settings.
//! Nothing here is global; build a [`Config`] and pass it to
//! [`page::run`](crate::page::run).

use instant::Duration;

/// Fixed perspective camera parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 12.0,
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// Construction parameters of the subdivided plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: 0.4,
            height: 0.6,
            width_segments: 16,
            height_segments: 16,
        }
    }
}

/// How often and how patiently an asset load is retried before the
/// deferred-loading boundary gives up and keeps showing its fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between two attempts. Ignored on the web.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy {
        max_attempts: 1,
        backoff: Duration::from_millis(0),
    };
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Everything the wave scene needs to know up front.
#[derive(Clone, Debug)]
pub struct Config {
    pub camera: CameraConfig,
    pub plane: PlaneConfig,
    /// File name of the wave texture, relative to the `assets` directory.
    pub texture: String,
    /// Tint written into `uColor`. The shader does not read it yet but the
    /// uniform is part of the material interface.
    pub tint: [f32; 3],
    pub retry: RetryPolicy,
    /// Shown behind everything and while the texture is still loading.
    pub clear_colour: wgpu::Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            plane: PlaneConfig::default(),
            texture: "Artboard.png".to_string(),
            // "hotpink"
            tint: [1.0, 105.0 / 255.0, 180.0 / 255.0],
            retry: RetryPolicy::default(),
            clear_colour: wgpu::Color::BLACK,
        }
    }
}
