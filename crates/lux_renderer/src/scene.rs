//! Serializable scene descriptions.
//!
//! A scene file is JSON holding a camera block and a list of objects:
//!
//! ```json
//! {
//!   "camera": { "image_width": 400, "aspect_ratio": 1.7777, "vfov": 20.0,
//!               "lookfrom": [13, 2, 3], "lookat": [0, 0, 0] },
//!   "objects": [
//!     { "type": "sphere", "center": [0, -1000, 0], "radius": 1000,
//!       "material": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] } }
//!   ]
//! }
//! ```
//!
//! Missing camera fields take [`CameraConfig::default`] values.

use std::fs;
use std::path::Path;

use lux_math::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::{gen_f32, gen_range, random_color};
use crate::{CameraConfig, Color, Dielectric, HittableList, Lambertian, Metal, Sphere};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Surface material of a described object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f32 },
    Dielectric { refraction_index: f32 },
}

/// A described scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Sphere {
        center: Vec3,
        radius: f32,
        material: MaterialDescription,
    },
}

/// Camera settings plus the objects to render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let scene = Self::from_json_str(&fs::read_to_string(path)?)?;
        log::info!("Loaded {} objects from {}", scene.objects.len(), path.display());
        Ok(scene)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the hittable world for these objects.
    pub fn build_world(&self) -> HittableList {
        let mut world = HittableList::new();

        for object in &self.objects {
            let ObjectDescription::Sphere {
                center,
                radius,
                material,
            } = *object;

            match material {
                MaterialDescription::Lambertian { albedo } => {
                    world.add(Box::new(Sphere::new(center, radius, Lambertian::new(albedo))))
                }
                MaterialDescription::Metal { albedo, fuzz } => {
                    world.add(Box::new(Sphere::new(center, radius, Metal::new(albedo, fuzz))))
                }
                MaterialDescription::Dielectric { refraction_index } => world.add(Box::new(
                    Sphere::new(center, radius, Dielectric::new(refraction_index)),
                )),
            }
        }

        world
    }

    /// The classic "book cover" scene: a large ground sphere, a grid of small
    /// random spheres and three large feature spheres, viewed through a
    /// slightly defocused lens.
    pub fn book_cover(rng: &mut dyn RngCore) -> Self {
        let mut objects = Vec::new();

        // Ground
        objects.push(sphere(
            Vec3::new(0.0, -1000.0, 0.0),
            1000.0,
            MaterialDescription::Lambertian {
                albedo: Color::new(0.5, 0.5, 0.5),
            },
        ));

        for a in -11..11 {
            for b in -11..11 {
                let choose_mat = gen_f32(rng);
                let center = Vec3::new(
                    a as f32 + 0.9 * gen_f32(rng),
                    0.2,
                    b as f32 + 0.9 * gen_f32(rng),
                );

                // Keep clear of the metal feature sphere
                if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                    continue;
                }

                let material = if choose_mat < 0.8 {
                    MaterialDescription::Lambertian {
                        albedo: random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0),
                    }
                } else if choose_mat < 0.95 {
                    MaterialDescription::Metal {
                        albedo: random_color(rng, 0.5, 1.0),
                        fuzz: gen_range(rng, 0.0, 0.5),
                    }
                } else {
                    MaterialDescription::Dielectric {
                        refraction_index: 1.5,
                    }
                };
                objects.push(sphere(center, 0.2, material));
            }
        }

        objects.push(sphere(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            MaterialDescription::Dielectric {
                refraction_index: 1.5,
            },
        ));
        objects.push(sphere(
            Vec3::new(-4.0, 1.0, 0.0),
            1.0,
            MaterialDescription::Lambertian {
                albedo: Color::new(0.4, 0.2, 0.1),
            },
        ));
        objects.push(sphere(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            MaterialDescription::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.0,
            },
        ));

        let camera = CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 1200,
            samples_per_pixel: 500,
            max_depth: 50,
            vfov: 20.0,
            lookfrom: Vec3::new(13.0, 2.0, 3.0),
            lookat: Vec3::ZERO,
            vup: Vec3::Y,
            defocus_angle: 0.6,
            focus_dist: 10.0,
        };

        Self { camera, objects }
    }
}

fn sphere(center: Vec3, radius: f32, material: MaterialDescription) -> ObjectDescription {
    ObjectDescription::Sphere {
        center,
        radius,
        material,
    }
}
