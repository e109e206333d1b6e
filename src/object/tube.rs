//! Ray-tube intersection: an infinite cylinder reduced to a circle in the
//! plane perpendicular to its axis.

use nalgebra::{Point3, Unit, Vector3};

use crate::error::GeometryError;
use crate::ray::Ray;
use crate::util::{self, align_zero, is_zero};

#[derive(Clone, Debug)]
pub struct Tube {
    pub axis: Ray,
    pub radius: f64,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Tube { axis, radius })
    }

    /// Removes the axis component of `v`.
    fn perpendicular(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let along = align_zero(self.axis.direction.dot(v));
        if is_zero(along) {
            *v
        } else {
            v - self.axis.direction.as_ref() * along
        }
    }

    /// Returns up to two ray parameters, nearest first.
    ///
    /// Rays parallel to the axis never cross the side, and tangent rays are misses.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        let d_perp = self.perpendicular(ray.direction.as_ref());
        let a = align_zero(d_perp.norm_squared());
        if is_zero(a) {
            // parallel to the axis: either always on the surface or never
            return Vec::new();
        }

        let offset = ray.origin - self.axis.origin;
        let r_squared = self.radius * self.radius;

        if is_zero(offset.norm()) {
            // starting on the axis origin, the circle equation is a² t² = r²
            let t = self.radius / a.sqrt();
            return if util::ahead_within(t, max_distance) { vec![t] } else { Vec::new() };
        }

        let o_perp = self.perpendicular(&offset);
        let b = align_zero(2.0 * d_perp.dot(&o_perp));
        let c = align_zero(o_perp.norm_squared() - r_squared);

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let sqrt_disc = discriminant.sqrt();
        [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)]
            .into_iter()
            .filter(|&t| util::ahead_within(t, max_distance))
            .collect()
    }

    /// Signed distance of the projection of `point` onto the axis from the axis origin.
    pub fn axial(&self, point: &Point3<f64>) -> f64 {
        align_zero(self.axis.direction.dot(&(point - self.axis.origin)))
    }

    /// Radial direction from the closest axis point to `point`.
    pub fn normal(&self, point: &Point3<f64>) -> Unit<Vector3<f64>> {
        let center = self.axis.at(self.axial(point));
        Unit::new_normalize(point - center)
    }
}
