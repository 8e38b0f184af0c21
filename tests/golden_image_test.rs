#![cfg(feature = "integration-tests")]

mod common;

use wave_folio::{
    config::{Config, RetryPolicy},
    container::SceneContainer,
    context::InitContext,
    flow::ImageTestResult,
};

use crate::common::test_utils::{Golden, to_pixel};

#[test]
fn should_show_the_clear_colour_when_the_texture_is_missing() {
    golden_image_test!(|ctx: InitContext| {
        let config = Config {
            texture: "missing.png".to_string(),
            retry: RetryPolicy::NONE,
            clear_colour: wgpu::Color::WHITE,
            ..Config::default()
        };
        Golden {
            inner: SceneContainer::new(&ctx, config),
            validate: |container, state, texture| {
                if !container.texture().state().is_failed() || state.frame() < 2 {
                    return Ok(ImageTestResult::Waiting);
                }
                assert!(container.scene().is_empty());
                let desired_pixel = to_pixel(wgpu::Color::WHITE);
                for pixel in texture.pixels() {
                    assert_eq!(*pixel, desired_pixel);
                }
                Ok(ImageTestResult::Passed)
            },
        }
    });
}

#[test]
fn should_draw_one_wave_once_the_texture_loaded() {
    golden_image_test!(|ctx: InitContext| Golden {
        inner: SceneContainer::new(&ctx, Config::default()),
        validate: |container, _, texture| {
            let meshes = container.scene().meshes();
            // wait for a frame that already advanced the clock
            if meshes.is_empty() || meshes[0].clock().seconds() == 0.0 {
                return Ok(ImageTestResult::Waiting);
            }
            assert!(container.texture().state().is_ready());
            assert_eq!(meshes.len(), 1);
            assert_eq!(meshes[0].material().uniforms().time, meshes[0].clock().seconds());
            // the mesh samples the texture that settled the boundary
            let loaded = container.texture().ready().expect("texture is ready");
            assert!(std::sync::Arc::ptr_eq(meshes[0].material().texture(), loaded));
            assert_eq!(meshes[0].geometry().vertices().len(), 17 * 17);

            let clear = to_pixel(wgpu::Color::BLACK);
            assert_eq!(*texture.get_pixel(0, 0), clear);
            let covered = texture.pixels().filter(|p| **p != clear).count();
            assert!(covered > 0, "the wave plane was not drawn");
            Ok(ImageTestResult::Passed)
        },
    });
}
