// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_cross_is_orthogonal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let c = a.cross(b);
        assert_eq!(c.dot(a), 0.0);
        assert_eq!(c.dot(b), 0.0);
    }

    #[test]
    fn test_vec3_componentwise_multiply() {
        // Colors attenuate component-wise
        let attenuation = Vec3::new(0.5, 0.25, 1.0);
        let incoming = Vec3::new(1.0, 1.0, 0.5);
        assert_eq!(attenuation * incoming, Vec3::new(0.5, 0.25, 0.5));
    }
}
