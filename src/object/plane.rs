//! Ray-plane intersection (closed form).

use nalgebra::{Point3, Unit, Vector3};

use crate::error::GeometryError;
use crate::ray::Ray;
use crate::util::{self, align_zero, is_zero};

#[derive(Clone, Debug)]
pub struct Plane {
    pub point: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
}

impl Plane {
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Result<Self, GeometryError> {
        Ok(Plane { point, normal: util::unit(normal)? })
    }

    /// Plane through three points, oriented by `(p2 - p1) x (p3 - p1)`.
    pub fn from_points(p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Result<Self, GeometryError> {
        let normal = (p2 - p1).cross(&(p3 - p1));
        let normal = util::unit(normal).map_err(|_| GeometryError::CollinearPoints)?;
        Ok(Plane { point: p1, normal })
    }

    /// Returns the single ray parameter where the ray crosses the plane, if any.
    ///
    /// A ray parallel to the plane, or starting on it, does not intersect it.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let denom = align_zero(self.normal.dot(ray.direction.as_ref()));
        if is_zero(denom) {
            return None;
        }

        let numerator = align_zero(self.normal.dot(&(self.point - ray.origin)));
        if is_zero(numerator) {
            return None;
        }

        let t = numerator / denom;
        util::ahead_within(t, max_distance).then_some(t)
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.normal
    }
}
