use nalgebra::{Point3, Unit, Vector3};

use crate::error::GeometryError;
use crate::object::Surface;
use crate::util;

/// How far secondary rays are pushed off the surface they start on.
pub const DELTA: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Unit<Vector3<f64>>) -> Self {
        Self { origin, direction }
    }

    /// Normalizes `direction`, rejecting a zero-length vector.
    pub fn try_new(origin: Point3<f64>, direction: Vector3<f64>) -> Result<Self, GeometryError> {
        Ok(Self::new(origin, util::unit(direction)?))
    }

    /// A ray leaving a surface at `point`, with its origin moved [`DELTA`] along
    /// `normal` onto the side `direction` heads into, so the ray cannot hit the
    /// surface it starts on.
    pub fn offset(point: Point3<f64>, normal: &Unit<Vector3<f64>>, direction: Unit<Vector3<f64>>) -> Self {
        let delta = if normal.dot(direction.as_ref()) < 0.0 { -DELTA } else { DELTA };
        Self::new(point + normal.as_ref() * delta, direction)
    }

    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction.as_ref() * t
    }
}

/// A point where a ray met a surface of the scene.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub surface: &'a Surface,
    pub point: Point3<f64>,
    /// Distance from the ray origin.
    pub t: f64,
}

impl<'a> Hit<'a> {
    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.surface.normal(&self.point)
    }
}
