//! Ray-sphere intersection (quadratic in the ray parameter).

use nalgebra::{Point3, Unit, Vector3};

use crate::error::GeometryError;
use crate::ray::Ray;
use crate::util::{self, align_zero, is_zero};

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Point3<f64>, radius: f64) -> Result<Self, GeometryError> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Sphere { center, radius })
    }

    /// Returns up to two ray parameters, nearest first.
    ///
    /// A ray grazing the sphere (tangent) does not intersect it.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        let u = self.center - ray.origin;
        if is_zero(u.norm()) {
            // starting at the center, the only way out is one radius along the ray
            return if util::ahead_within(self.radius, max_distance) { vec![self.radius] } else { Vec::new() };
        }

        let t_mid = align_zero(ray.direction.dot(&u));
        let d_squared = align_zero(u.norm_squared() - t_mid * t_mid);
        let r_squared = self.radius * self.radius;
        if align_zero(d_squared - r_squared) >= 0.0 {
            return Vec::new();
        }

        let t_half = align_zero((r_squared - d_squared).sqrt());
        [t_mid - t_half, t_mid + t_half]
            .into_iter()
            .filter(|&t| util::ahead_within(t, max_distance))
            .collect()
    }

    pub fn normal(&self, point: &Point3<f64>) -> Unit<Vector3<f64>> {
        Unit::new_normalize(point - self.center)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{point, vector};

    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3::origin(), 1.0).unwrap()
    }

    #[test]
    fn test_ray_through_center() {
        let ray = Ray::try_new(point![-2.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]).unwrap();
        let hits = unit_sphere().intersect(&ray, f64::INFINITY);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(ray.at(hits[0]), point![-1.0, 0.0, 0.0], epsilon = 1e-12);
        assert_relative_eq!(ray.at(hits[1]), point![1.0, 0.0, 0.0], epsilon = 1e-12);
    }

    #[test]
    fn test_ray_miss() {
        let ray = Ray::try_new(point![-2.0, 2.0, 0.0], vector![1.0, 0.0, 0.0]).unwrap();
        assert!(unit_sphere().intersect(&ray, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_ray_tangent() {
        let ray = Ray::try_new(point![-2.0, 1.0, 0.0], vector![1.0, 0.0, 0.0]).unwrap();
        assert!(unit_sphere().intersect(&ray, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_ray_from_inside() {
        let ray = Ray::try_new(point![0.5, 0.0, 0.0], vector![1.0, 0.0, 0.0]).unwrap();
        let hits = unit_sphere().intersect(&ray, f64::INFINITY);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_from_center() {
        let ray = Ray::try_new(Point3::origin(), vector![0.0, 3.0, 4.0]).unwrap();
        let hits = unit_sphere().intersect(&ray, f64::INFINITY);
        assert_eq!(hits, vec![1.0]);
        assert!(unit_sphere().intersect(&ray, 0.5).is_empty());
    }

    #[test]
    fn test_ray_after_sphere() {
        let ray = Ray::try_new(point![2.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]).unwrap();
        assert!(unit_sphere().intersect(&ray, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_max_distance_keeps_near_root() {
        let ray = Ray::try_new(point![-2.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]).unwrap();
        let hits = unit_sphere().intersect(&ray, 2.0);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_is_unit() {
        let sphere = Sphere::new(point![1.0, 2.0, 3.0], 2.0).unwrap();
        let ray = Ray::try_new(point![-5.0, 2.5, 3.2], vector![1.0, 0.0, 0.0]).unwrap();
        for t in sphere.intersect(&ray, f64::INFINITY) {
            let normal = sphere.normal(&ray.at(t));
            assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        assert!(matches!(Sphere::new(Point3::origin(), 0.0), Err(GeometryError::NonPositiveRadius(_))));
        assert!(matches!(Sphere::new(Point3::origin(), f64::NAN), Err(GeometryError::NonPositiveRadius(_))));
    }
}
