//! Lux Renderer - CPU Ray Tracing
//!
//! A recursive ray tracer: a thin-lens camera shoots jittered rays through
//! each pixel, surfaces scatter them through their materials, and rays that
//! escape pick up a sky gradient.
//!
//! All sampling draws from a caller-supplied `rand::RngCore`, so a seeded
//! generator reproduces an image bit for bit.

mod camera;
mod hittable;
mod material;
mod output;
pub mod random;
mod renderer;
mod scene;
mod sphere;

pub use camera::{Camera, CameraConfig, CameraError, CameraState};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{color_to_rgb8, linear_to_gamma, ImageBuffer, OutputError, PixelSink, PpmWriter};
pub use renderer::{
    ray_color, render, render_image, render_pixel, render_with_progress, sky_gradient, RenderError,
    SHADOW_ACNE_EPSILON,
};
pub use scene::{MaterialDescription, ObjectDescription, SceneDescription, SceneError};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
