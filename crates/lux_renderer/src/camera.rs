//! Camera for ray generation.
//!
//! A [`Camera`] pairs user-facing [`CameraConfig`] with the viewport geometry
//! derived from it. [`Camera::initialize`] validates the configuration and
//! recomputes the derived [`CameraState`]; rays are then generated per pixel
//! with sub-pixel jitter and an optional thin-lens defocus disk.

use crate::random::{random_in_unit_disk, sample_square};
use crate::Ray;
use lux_math::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a camera configuration cannot produce valid geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Image width must be at least 1 pixel")]
    InvalidImageWidth,

    #[error("Samples per pixel must be at least 1")]
    InvalidSamplesPerPixel,

    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Defocus angle must be in [0, 180) degrees, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("Focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Camera position and look-at point coincide")]
    DegenerateView,

    #[error("Up vector is zero or parallel to the view direction")]
    DegenerateUp,

    #[error("Camera is not initialized for its current configuration")]
    NotInitialized,
}

/// User-facing camera settings. Treated as immutable during a render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into scene
    pub max_depth: u32,

    /// Vertical view angle in degrees
    pub vfov: f32,
    pub lookfrom: Vec3,
    pub lookat: Vec3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Vec3::ZERO,
            lookat: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Check every precondition the viewport math relies on.
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.image_width == 0 {
            return Err(CameraError::InvalidImageWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::InvalidSamplesPerPixel);
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }
        if !(self.defocus_angle >= 0.0 && self.defocus_angle < 180.0) {
            return Err(CameraError::InvalidDefocusAngle(self.defocus_angle));
        }
        if !(self.focus_dist > 0.0 && self.focus_dist.is_finite()) {
            return Err(CameraError::InvalidFocusDistance(self.focus_dist));
        }

        let view = self.lookfrom - self.lookat;
        if !(view.length_squared() > 0.0 && view.is_finite()) {
            return Err(CameraError::DegenerateView);
        }
        let side = self.vup.cross(view.normalize());
        if !(side.length_squared() > 1e-12 && side.is_finite()) {
            return Err(CameraError::DegenerateUp);
        }

        Ok(())
    }

    /// Image height implied by width and aspect ratio, never below 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }
}

/// Geometry derived from a [`CameraConfig`] by [`Camera::initialize`].
///
/// Carries the configuration it was computed from, so rays never mix
/// geometry from one configuration with settings from another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub config: CameraConfig,
    pub image_height: u32,
    /// Color scale factor for a sum of pixel samples
    pub pixel_samples_scale: f32,
    pub center: Vec3,
    /// Location of pixel 0, 0
    pub pixel00_loc: Vec3,
    /// Offset to pixel to the right
    pub pixel_delta_u: Vec3,
    /// Offset to pixel below
    pub pixel_delta_v: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    /// Points from lookat back towards lookfrom
    pub w: Vec3,
    /// Defocus disk horizontal radius
    pub defocus_disk_u: Vec3,
    /// Defocus disk vertical radius
    pub defocus_disk_v: Vec3,
}

impl CameraState {
    /// Compute the derived geometry. `config` must already be validated.
    fn from_config(config: &CameraConfig) -> Self {
        let image_height = config.image_height();
        let center = config.lookfrom;

        // Determine viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (config.image_width as f32 / image_height as f32);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (config.lookfrom - config.lookat).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / config.image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        Self {
            config: *config,
            image_height,
            pixel_samples_scale: 1.0 / config.samples_per_pixel as f32,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray originates from the defocus disk and points at a randomly
    /// sampled point around pixel location (i, j).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    pub config: CameraConfig,
    state: Option<CameraState>,
}

impl Camera {
    /// Create a camera from a configuration. Call [`Camera::initialize`]
    /// before generating rays.
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Set image width and aspect ratio; the height is derived.
    pub fn with_image(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.config.image_width = image_width;
        self.config.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.config.samples_per_pixel = samples_per_pixel;
        self.config.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, lookfrom: Vec3, lookat: Vec3, vup: Vec3) -> Self {
        self.config.lookfrom = lookfrom;
        self.config.lookat = lookat;
        self.config.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.config.vfov = vfov;
        self.config.defocus_angle = defocus_angle;
        self.config.focus_dist = focus_dist;
        self
    }

    /// Validate the configuration and recompute derived geometry.
    ///
    /// Must be called after any configuration change and before generating
    /// rays. On error the camera is left uninitialized.
    pub fn initialize(&mut self) -> Result<(), CameraError> {
        self.state = None;
        self.config.validate()?;

        let state = CameraState::from_config(&self.config);
        log::debug!(
            "Camera initialized: {}x{}, {} spp, max depth {}",
            self.config.image_width,
            state.image_height,
            self.config.samples_per_pixel,
            self.config.max_depth
        );
        self.state = Some(state);
        Ok(())
    }

    /// Derived geometry, if it matches the current configuration.
    ///
    /// Fails with [`CameraError::NotInitialized`] before the first
    /// successful [`Camera::initialize`] and after any config edit since.
    pub fn state(&self) -> Result<&CameraState, CameraError> {
        match &self.state {
            Some(state) if state.config == self.config => Ok(state),
            _ => Err(CameraError::NotInitialized),
        }
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.config.image_height()
    }

    /// Generate a ray for pixel (i, j). See [`CameraState::get_ray`].
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Result<Ray, CameraError> {
        Ok(self.state()?.get_ray(i, j, rng))
    }
}
