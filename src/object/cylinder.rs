//! Finite cylinder: the side of a [`Tube`] between two capping disks.

use nalgebra::{Point3, Unit, Vector3};

use crate::error::GeometryError;
use crate::object::plane::Plane;
use crate::object::tube::Tube;
use crate::ray::Ray;
use crate::util::{align_zero, is_zero};

#[derive(Clone, Debug)]
pub struct Cylinder {
    pub tube: Tube,
    pub height: f64,
    bottom: Plane,
    top: Plane,
}

impl Cylinder {
    /// Cylinder whose bottom cap is centered on the axis origin and whose top
    /// cap is `height` further along the axis direction.
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        if height.is_nan() || height <= 0.0 {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        let tube = Tube::new(axis, radius)?;
        let bottom = Plane { point: axis.origin, normal: axis.direction };
        let top = Plane { point: axis.at(height), normal: axis.direction };
        Ok(Cylinder { tube, height, bottom, top })
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius
    }

    pub fn axis(&self) -> &Ray {
        &self.tube.axis
    }

    fn on_cap(&self, cap: &Plane, point: &Point3<f64>) -> bool {
        let radius = self.radius();
        align_zero((point - cap.point).norm_squared() - radius * radius) < 0.0
    }

    /// Side hits strictly between the caps plus cap hits strictly inside the
    /// cap disks. Ordering is unspecified.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        let mut hits: Vec<f64> = self.tube.intersect(ray, max_distance)
            .into_iter()
            .filter(|&t| {
                let h = self.tube.axial(&ray.at(t));
                h > 0.0 && align_zero(h - self.height) < 0.0
            })
            .collect();

        for cap in [&self.bottom, &self.top] {
            if let Some(t) = cap.intersect(ray, max_distance) {
                if self.on_cap(cap, &ray.at(t)) {
                    hits.push(t);
                }
            }
        }

        hits
    }

    /// Cap points get the outward axis direction; everything else the radial
    /// side normal. Cap centers are matched by value within the shared
    /// epsilon so they never reach the radial formula.
    pub fn normal(&self, point: &Point3<f64>) -> Unit<Vector3<f64>> {
        let up = self.axis().direction;
        let down = Unit::new_unchecked(-up.into_inner());

        if is_zero((point - self.top.point).norm()) {
            return up;
        }
        if is_zero((point - self.bottom.point).norm()) {
            return down;
        }

        let h = self.tube.axial(point);
        if is_zero(h) {
            return down;
        }
        if is_zero(h - self.height) {
            return up;
        }
        self.tube.normal(point)
    }
}
