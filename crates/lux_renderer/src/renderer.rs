//! Core recursive ray tracer.
//!
//! Implements light transport with:
//! - Recursive scattering bounded by `max_depth`
//! - Anti-aliasing via multi-sampling
//! - A vertical sky gradient for rays that escape the scene
//!
//! Pixels are produced strictly in scan order (rows top to bottom, columns
//! left to right) and handed to a [`PixelSink`] as linear colors.

use crate::camera::CameraError;
use crate::output::{ImageBuffer, PixelSink};
use crate::{Camera, Color, Hittable, Ray};
use lux_math::Interval;
use rand::RngCore;
use std::io;
use thiserror::Error;

/// Smallest ray parameter accepted as a hit.
///
/// Scattered rays start on the surface they left; float error can place
/// that origin slightly inside it, which would otherwise re-hit at `t ≈ 0`.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Errors that can occur while rendering an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid camera: {0}")]
    Camera(#[from] CameraError),

    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, multiplying in each surface's
/// attenuation until it escapes, is absorbed, or runs out of depth.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded the ray bounce limit, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background seen by rays that miss every object.
///
/// Blends linearly on the normalized direction's y component: straight up
/// is white, straight down is sky blue `(0.5, 0.7, 1.0)`.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * a + blue * (1.0 - a)
}

/// Render a single pixel with multi-sampling.
///
/// Fails with [`CameraError::NotInitialized`] unless `camera` was initialized
/// for its current configuration. Sample count, depth and geometry all come
/// from that one initialized state.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Result<Color, RenderError> {
    let state = camera.state()?;
    let mut pixel_color = Color::ZERO;

    for _ in 0..state.config.samples_per_pixel {
        let ray = state.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, world, state.config.max_depth, rng);
    }

    Ok(state.pixel_samples_scale * pixel_color)
}

/// Render the scene, streaming pixels to `sink` in scan order.
///
/// Initializes the camera first. Progress is logged at debug level.
pub fn render(
    camera: &mut Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
    sink: &mut dyn PixelSink,
) -> Result<(), RenderError> {
    render_with_progress(camera, world, rng, sink, &mut |remaining| {
        log::debug!("Scanlines remaining: {remaining}");
    })
}

/// Like [`render`], but reports the number of remaining scanlines to
/// `progress` before each row.
pub fn render_with_progress(
    camera: &mut Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
    sink: &mut dyn PixelSink,
    progress: &mut dyn FnMut(u32),
) -> Result<(), RenderError> {
    camera.initialize()?;

    let width = camera.image_width();
    let height = camera.image_height();
    sink.begin(width, height)?;

    for j in 0..height {
        progress(height - j);
        for i in 0..width {
            let color = render_pixel(camera, world, i, j, rng)?;
            sink.write_pixel(color)?;
        }
    }

    sink.finish()?;
    log::debug!("Render of {width}x{height} done");
    Ok(())
}

/// Render the entire scene to an in-memory image buffer.
pub fn render_image(
    camera: &mut Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
) -> Result<ImageBuffer, RenderError> {
    let mut image = ImageBuffer::default();
    render(camera, world, rng, &mut image)?;
    Ok(image)
}
