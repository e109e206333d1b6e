//! Whitted-style ray tracer.
//!
//! Analytic surfaces ([`object`]) grouped into a read-only [`scene::Scene`]
//! are shaded by [`tracer::RayTracer`]: Phong local lighting with shadows
//! filtered through transparent occluders, plus recursive reflection and
//! refraction. [`render`] drives a [`camera::Camera`] over the scene in
//! parallel.

pub mod camera;
pub mod demo;
pub mod error;
pub mod light;
pub mod material;
pub mod object;
pub mod picture;
pub mod ray;
pub mod render;
pub mod scene;
pub mod tracer;
pub mod util;

pub use error::GeometryError;
pub use picture::{Color, Picture};
pub use ray::Ray;
pub use scene::Scene;
pub use tracer::{RayTracer, TracerConfig};
