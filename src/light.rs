//! Light sources.
//!
//! Directions handed out by a light point *from* the light *toward* the lit
//! point, so a shadow ray travels along the negated direction.

use std::iter::repeat_with;

use nalgebra::{Point3, Unit, Vector3};
use once_cell::sync::OnceCell;

use crate::error::GeometryError;
use crate::picture::Color;
use crate::util::{self, align_zero};

/// Light reaching every point of the scene equally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub intensity: Color,
}

impl AmbientLight {
    pub const NONE: AmbientLight = AmbientLight { intensity: Color::BLACK };

    /// Ambient light of color `ia` attenuated by the per-channel factor `ka`.
    pub fn new(ia: Color, ka: Vector3<f64>) -> Self {
        AmbientLight { intensity: ia.scale(&ka) }
    }

    pub fn from_intensity(intensity: Color) -> Self {
        AmbientLight { intensity }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        AmbientLight::NONE
    }
}

/// One shadow-ray target on a light: the direction from it to the lit point
/// and how far away it is.
#[derive(Clone, Copy, Debug)]
pub struct LightSample {
    pub direction: Unit<Vector3<f64>>,
    pub distance: f64,
}

/// Fixed pattern of points on a disk around a point light, used to average
/// several shadow rays into a soft penumbra.
///
/// The pattern is drawn once, from `seed`, and shared by every query. It is
/// oriented perpendicular to the light-to-point direction on each query.
#[derive(Clone, Debug)]
pub struct DiskSampling {
    radius: f64,
    count: usize,
    seed: u64,
    offsets: OnceCell<Vec<(f64, f64)>>,
}

impl DiskSampling {
    pub fn new(radius: f64, count: usize, seed: u64) -> Result<Self, GeometryError> {
        if radius.is_nan() || radius < 0.0 {
            return Err(GeometryError::NegativeSampleRadius(radius));
        }
        Ok(DiskSampling { radius, count, seed, offsets: OnceCell::new() })
    }

    /// Points of the unit disk, drawn on first use.
    pub fn offsets(&self) -> &[(f64, f64)] {
        self.offsets.get_or_init(|| {
            let mut rng = fastrand::Rng::with_seed(self.seed);
            repeat_with(|| (rng.f64() * 2.0 - 1.0, rng.f64() * 2.0 - 1.0))
                .filter(|(x, y)| x * x + y * y < 1.0)
                .take(self.count)
                .collect()
        })
    }

    fn is_hard(&self) -> bool {
        self.count <= 1 || self.radius == 0.0
    }

    fn samples(&self, center: &Point3<f64>, point: &Point3<f64>) -> Vec<LightSample> {
        let Ok(to_point) = util::unit(point - center) else {
            return Vec::new();
        };
        let vx = util::orthogonal(&to_point);
        let vy = Unit::new_normalize(vx.cross(to_point.as_ref()));

        self.offsets().iter()
            .filter_map(|&(x, y)| {
                let source = center + vx.as_ref() * (x * self.radius) + vy.as_ref() * (y * self.radius);
                let to_point = point - source;
                let distance = to_point.norm();
                util::unit(to_point).ok().map(|direction| LightSample { direction, distance })
            })
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub intensity: Color,
    pub direction: Unit<Vector3<f64>>,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector3<f64>) -> Result<Self, GeometryError> {
        Ok(DirectionalLight { intensity, direction: util::unit(direction)? })
    }
}

/// Omnidirectional light falling off as `1 / (kc + kl·d + kq·d²)`.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Point3<f64>,
    pub kc: f64,
    pub kl: f64,
    pub kq: f64,
    pub sampling: Option<DiskSampling>,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point3<f64>) -> Self {
        PointLight {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            sampling: None,
        }
    }

    pub fn with_attenuation(self, kc: f64, kl: f64, kq: f64) -> Self {
        PointLight { kc, kl, kq, ..self }
    }

    pub fn with_soft_shadows(self, sampling: DiskSampling) -> Self {
        PointLight { sampling: Some(sampling), ..self }
    }

    pub fn intensity_at(&self, point: &Point3<f64>) -> Color {
        let d_squared = (point - self.position).norm_squared();
        let factor = self.kc + self.kl * d_squared.sqrt() + self.kq * d_squared;
        self.intensity / factor
    }

    /// `None` when `point` coincides with the light.
    pub fn direction_to(&self, point: &Point3<f64>) -> Option<Unit<Vector3<f64>>> {
        util::unit(point - self.position).ok()
    }

    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        (point - self.position).norm()
    }

    pub fn samples(&self, point: &Point3<f64>) -> Vec<LightSample> {
        match &self.sampling {
            Some(sampling) if !sampling.is_hard() => sampling.samples(&self.position, point),
            _ => self.direction_to(point)
                .map(|direction| LightSample { direction, distance: self.distance(point) })
                .into_iter()
                .collect(),
        }
    }
}

/// Point light concentrated around `direction`, falling off as
/// `max(0, direction·l)^narrow_beam`.
#[derive(Clone, Debug)]
pub struct SpotLight {
    pub light: PointLight,
    pub direction: Unit<Vector3<f64>>,
    pub narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point3<f64>, direction: Vector3<f64>) -> Result<Self, GeometryError> {
        Ok(SpotLight {
            light: PointLight::new(intensity, position),
            direction: util::unit(direction)?,
            narrow_beam: 1.0,
        })
    }

    pub fn with_attenuation(self, kc: f64, kl: f64, kq: f64) -> Self {
        SpotLight { light: self.light.with_attenuation(kc, kl, kq), ..self }
    }

    pub fn with_narrow_beam(self, narrow_beam: f64) -> Self {
        SpotLight { narrow_beam, ..self }
    }

    pub fn with_soft_shadows(self, sampling: DiskSampling) -> Self {
        SpotLight { light: self.light.with_soft_shadows(sampling), ..self }
    }

    pub fn intensity_at(&self, point: &Point3<f64>) -> Color {
        let Some(l) = self.light.direction_to(point) else {
            return Color::BLACK;
        };
        let projection = align_zero(l.dot(self.direction.as_ref()));
        if projection <= 0.0 {
            return Color::BLACK;
        }
        self.light.intensity_at(point) * projection.powf(self.narrow_beam)
    }
}

#[derive(Clone, Debug)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl From<DirectionalLight> for Light {
    fn from(value: DirectionalLight) -> Self {
        Light::Directional(value)
    }
}

impl From<PointLight> for Light {
    fn from(value: PointLight) -> Self {
        Light::Point(value)
    }
}

impl From<SpotLight> for Light {
    fn from(value: SpotLight) -> Self {
        Light::Spot(value)
    }
}

impl Light {
    /// Intensity arriving at `point`, before any shadowing.
    pub fn intensity_at(&self, point: &Point3<f64>) -> Color {
        match self {
            Light::Directional(light) => light.intensity,
            Light::Point(light) => light.intensity_at(point),
            Light::Spot(light) => light.intensity_at(point),
        }
    }

    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        match self {
            Light::Directional(_) => f64::INFINITY,
            Light::Point(light) => light.distance(point),
            Light::Spot(light) => light.light.distance(point),
        }
    }

    /// Shadow-ray targets for `point`: a single one unless the light has a
    /// sampling disk. Empty when `point` sits on the light itself.
    pub fn samples(&self, point: &Point3<f64>) -> Vec<LightSample> {
        match self {
            Light::Directional(light) => vec![LightSample { direction: light.direction, distance: f64::INFINITY }],
            Light::Point(light) => light.samples(point),
            Light::Spot(light) => light.light.samples(point),
        }
    }

    /// Draws any lazily generated sampling pattern now, so later queries from
    /// many threads only read it.
    pub fn prepare(&self) {
        let sampling = match self {
            Light::Directional(_) => None,
            Light::Point(light) => light.sampling.as_ref(),
            Light::Spot(light) => light.light.sampling.as_ref(),
        };
        if let Some(sampling) = sampling {
            sampling.offsets();
        }
    }
}
