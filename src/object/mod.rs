//! Renderable surfaces and the aggregate that groups them.
//!
//! Every shape answers the same two questions: where does a ray cross it
//! (parameters strictly ahead of the ray origin, no further than a maximum
//! distance), and what is its unit normal at a point on it. [`Surface`] pairs a
//! shape with its emission and material, and [`Object`] lets surfaces be
//! grouped arbitrarily deep while still answering the intersection question.

use float_ord::FloatOrd;
use nalgebra::{Point3, Unit, Vector3};

use crate::material::Material;
use crate::picture::Color;
use crate::ray::{Hit, Ray};

mod cylinder;
mod plane;
mod polygon;
mod sphere;
mod tube;

pub use cylinder::Cylinder;
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::Tube;

#[derive(Clone, Debug)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    /// Ray parameters of every crossing in `(0, max_distance]`, in no particular order.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        match self {
            Shape::Plane(plane) => plane.intersect(ray, max_distance).into_iter().collect(),
            Shape::Sphere(sphere) => sphere.intersect(ray, max_distance),
            Shape::Triangle(triangle) => triangle.intersect(ray, max_distance).into_iter().collect(),
            Shape::Polygon(polygon) => polygon.intersect(ray, max_distance).into_iter().collect(),
            Shape::Tube(tube) => tube.intersect(ray, max_distance),
            Shape::Cylinder(cylinder) => cylinder.intersect(ray, max_distance),
        }
    }

    pub fn normal(&self, point: &Point3<f64>) -> Unit<Vector3<f64>> {
        match self {
            Shape::Plane(plane) => plane.normal(),
            Shape::Sphere(sphere) => sphere.normal(point),
            Shape::Triangle(triangle) => triangle.normal(),
            Shape::Polygon(polygon) => polygon.normal(),
            Shape::Tube(tube) => tube.normal(point),
            Shape::Cylinder(cylinder) => cylinder.normal(point),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(value: $variant) -> Self {
                    Shape::$variant(value)
                }
            }

            impl From<$variant> for Surface {
                fn from(value: $variant) -> Self {
                    Surface::new(value)
                }
            }

            impl From<$variant> for Object {
                fn from(value: $variant) -> Self {
                    Object::Surface(Surface::new(value))
                }
            }
        )*
    };
}

impl_from_shape!(Plane, Sphere, Triangle, Polygon, Tube, Cylinder);

/// A shape with its emission color and material. Both default to black.
#[derive(Clone, Debug)]
pub struct Surface {
    pub shape: Shape,
    pub emission: Color,
    pub material: Material,
}

impl Surface {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Surface {
            shape: shape.into(),
            emission: Color::BLACK,
            material: Material::default(),
        }
    }

    pub fn with_emission(self, emission: Color) -> Self {
        Surface { emission, ..self }
    }

    pub fn with_material(self, material: Material) -> Self {
        Surface { material, ..self }
    }

    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Hit<'_>> {
        self.shape.intersect(ray, max_distance)
            .into_iter()
            .map(|t| Hit { surface: self, point: ray.at(t), t })
            .collect()
    }

    pub fn normal(&self, point: &Point3<f64>) -> Unit<Vector3<f64>> {
        self.shape.normal(point)
    }
}

#[derive(Clone, Debug)]
pub enum Object {
    Surface(Surface),
    List(Vec<Object>),
}

impl Default for Object {
    fn default() -> Self {
        Object::List(Vec::new())
    }
}

impl From<Surface> for Object {
    fn from(value: Surface) -> Self {
        Object::Surface(value)
    }
}

impl From<Vec<Object>> for Object {
    fn from(value: Vec<Object>) -> Self {
        Object::List(value)
    }
}

impl Object {
    /// All hits against every surface, in no particular order.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Hit<'_>> {
        match self {
            Object::Surface(surface) => surface.intersect(ray, max_distance),
            Object::List(list) => {
                list.iter()
                    .flat_map(|obj| obj.intersect(ray, max_distance))
                    .collect()
            }
        }
    }

    /// The hit nearest the ray origin; the first one found wins a tie.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.intersect(ray, f64::INFINITY)
            .into_iter()
            .min_by_key(|hit| FloatOrd(hit.t))
    }

    /// Number of surfaces, counting through nested lists.
    pub fn len(&self) -> usize {
        match self {
            Object::Surface(_) => 1,
            Object::List(list) => list.iter().map(Object::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
