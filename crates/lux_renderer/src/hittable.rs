//! Ray-object intersection: the [`Hittable`] trait, the [`HitRecord`] it
//! produces and [`HittableList`], the closest-hit aggregate used as the world.

use crate::{Material, Ray};
use lux_math::{Interval, Vec3};

/// Where and how a ray struck a surface.
#[derive(Clone)]
pub struct HitRecord<'a> {
    pub p: Vec3,
    /// Unit normal on the side the ray came from
    pub normal: Vec3,
    pub material: &'a dyn Material,
    pub t: f32,
    /// True when the ray arrived from outside the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at ray parameter `t`.
    ///
    /// `outward_normal` must be unit length; it is flipped when the ray
    /// arrives from inside so `normal` always opposes the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a dyn Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        Self {
            p: ray.at(t),
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            material,
            t,
            front_face,
        }
    }
}

/// Anything a ray can intersect.
pub trait Hittable: Send + Sync {
    /// Closest intersection with `t` strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// The scene: a flat collection of objects searched for the closest hit.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            // Each hit shrinks the far bound, so later objects must beat it
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, max)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};

    const RAY_T: Interval = Interval::new(0.001, f32::INFINITY);

    fn grey() -> Lambertian {
        Lambertian::new(Vec3::splat(0.5))
    }

    #[test]
    fn test_record_orients_normal_against_ray() {
        let material = grey();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let outside = HitRecord::new(&ray, 2.0, Vec3::Z, &material);
        assert!(outside.front_face);
        assert_eq!(outside.normal, Vec3::Z);
        assert_eq!(outside.p, Vec3::new(0.0, 0.0, -2.0));

        let inside = HitRecord::new(&ray, 2.0, Vec3::NEG_Z, &material);
        assert!(!inside.front_face);
        assert_eq!(inside.normal, Vec3::Z);
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(world.is_empty());
        assert!(world.hit(&ray, RAY_T).is_none());
    }

    #[test]
    fn test_list_returns_closest_hit() {
        let mut world = HittableList::new();
        // Far sphere added first so ordering cannot fake the result
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, grey())));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey())));
        assert_eq!(world.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-5);

        world.clear();
        assert!(world.is_empty());
    }

    #[test]
    fn test_list_keeps_nearer_hit_when_farther_object_follows() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey())));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, grey())));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_list_respects_interval_max() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, grey())));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.001, 4.0)).is_none());
    }
}
