//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lux_math::{Interval, Vec3};

/// A sphere primitive.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f32,
    material: M,
}

impl<M: Material> Sphere<M> {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: M) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl<M: Material + 'static> Hittable for Sphere<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // A zero radius has no surface to hit and no defined normal
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    const RAY_T: Interval = Interval::new(0.001, f32::INFINITY);

    fn unit_sphere() -> Sphere<Lambertian> {
        Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Lambertian::new(Vec3::new(0.5, 0.5, 0.5)),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = sphere.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, RAY_T).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        let rec = sphere.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
        assert!(!rec.front_face);
        // Normal flipped to face the ray
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_surface_origin_leaving_sphere_does_not_self_hit() {
        let sphere = unit_sphere();
        // Starts on the near surface and heads back out
        let ray = Ray::new(Vec3::new(0.0, 0.0, -0.5), Vec3::Z);
        assert!(sphere.hit(&ray, RAY_T).is_none());
    }

    #[test]
    fn test_surface_origin_entering_sphere_skips_t_zero() {
        let sphere = unit_sphere();
        // Starts on the near surface and heads through the sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, -0.5), Vec3::NEG_Z);
        let rec = sphere.hit(&ray, RAY_T).unwrap();
        assert!(rec.t > 0.001);
        assert!((rec.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scattered_bounce_origin_does_not_self_hit() {
        let sphere = Sphere::new(Vec3::new(3.0, -2.0, 7.0), 1.25, Lambertian::new(Vec3::ONE));

        // Points computed by intersecting rays carry float error off the surface
        let directions = [
            Vec3::new(0.3, 0.1, 1.0),
            Vec3::new(-1.0, 0.2, 0.4),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        for dir in directions {
            let outward = dir.normalize();
            let p = sphere.center() + outward * sphere.radius();
            let ray = Ray::new(p, outward + Vec3::new(0.01, 0.0, 0.0));
            if let Some(rec) = sphere.hit(&ray, RAY_T) {
                panic!("self hit at t={}", rec.t);
            }
        }
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -2.0, Lambertian::new(Vec3::ONE));
        assert_eq!(sphere.radius(), 0.0);
    }

    #[test]
    fn test_degenerate_sphere_is_never_hit() {
        let center = Vec3::new(0.0, 0.0, -1.0);
        let through_center = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let from_center = Ray::new(center, Vec3::X);

        for radius in [0.0, -1.0] {
            let sphere = Sphere::new(center, radius, Lambertian::new(Vec3::ONE));
            assert!(sphere.hit(&through_center, RAY_T).is_none());
            assert!(sphere.hit(&from_center, Interval::UNIVERSE).is_none());
        }
    }
}
