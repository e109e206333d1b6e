//! Built-in scenes for the command line renderer.

use std::f64::consts::FRAC_PI_4;

use nalgebra::{point, vector, Point3, Unit, Vector3};

use crate::camera::Camera;
use crate::error::GeometryError;
use crate::light::{AmbientLight, DirectionalLight, DiskSampling, PointLight, SpotLight};
use crate::material::Material;
use crate::object::{Cylinder, Object, Plane, Polygon, Sphere, Surface, Triangle};
use crate::picture::Color;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::util;

/// A scene together with a camera framing it.
pub struct Demo {
    pub scene: Scene,
    pub camera: Camera,
}

/// Color from 8-bit channel values; light intensities may go past 255.
fn rgb(r: f64, g: f64, b: f64) -> Color {
    Color::new(r / 255.0, g / 255.0, b / 255.0)
}

/// A blue glass ball around a red one, lit by a spot light from the lower left.
pub fn two_spheres() -> Result<Demo, GeometryError> {
    let scene = Scene::builder("two spheres")
        .geometry(Surface::new(Sphere::new(point![0.0, 0.0, -50.0], 50.0)?)
            .with_emission(rgb(0.0, 0.0, 255.0))
            .with_material(Material::new().diffuse(0.4).specular(0.3).shininess(100).transmission(0.3)))
        .geometry(Surface::new(Sphere::new(point![0.0, 0.0, -50.0], 25.0)?)
            .with_emission(rgb(255.0, 0.0, 0.0))
            .with_material(Material::new().diffuse(0.5).specular(0.5).shininess(100)))
        .light(SpotLight::new(rgb(1000.0, 600.0, 0.0), point![-100.0, -100.0, 500.0], vector![-1.0, -1.0, -2.0])?
            .with_attenuation(1.0, 0.0004, 0.0000006))
        .build();
    let camera = Camera::new(point![0.0, 0.0, 1000.0], 1000.0).with_view_height(150.0);
    Ok(Demo { scene, camera })
}

/// Nested spheres reflected in two large triangular mirrors.
pub fn mirrors() -> Result<Demo, GeometryError> {
    let scene = Scene::builder("mirrors")
        .ambient_light(AmbientLight::new(Color::WHITE, Vector3::repeat(0.1)))
        .geometry(Surface::new(Sphere::new(point![-950.0, -900.0, -1000.0], 400.0)?)
            .with_emission(rgb(0.0, 50.0, 100.0))
            .with_material(Material::new().diffuse(0.25).specular(0.25).shininess(20)
                .transmission_rgb(vector![0.5, 0.0, 0.0])))
        .geometry(Surface::new(Sphere::new(point![-950.0, -900.0, -1000.0], 200.0)?)
            .with_emission(rgb(100.0, 50.0, 20.0))
            .with_material(Material::new().diffuse(0.25).specular(0.25).shininess(20)))
        .geometry(Surface::new(Triangle::new(
                point![1500.0, -1500.0, -1500.0],
                point![-1500.0, 1500.0, -1500.0],
                point![670.0, 670.0, 3000.0],
            )?)
            .with_emission(rgb(20.0, 20.0, 20.0))
            .with_material(Material::new().reflection(1.0)))
        .geometry(Surface::new(Triangle::new(
                point![1500.0, -1500.0, -1500.0],
                point![-1500.0, 1500.0, -1500.0],
                point![-1500.0, -1500.0, -2000.0],
            )?)
            .with_emission(rgb(20.0, 20.0, 20.0))
            .with_material(Material::new().reflection_rgb(vector![0.5, 0.0, 0.4])))
        .light(SpotLight::new(rgb(1020.0, 400.0, 400.0), point![-750.0, -750.0, -150.0], vector![-1.0, -1.0, -4.0])?
            .with_attenuation(1.0, 0.00001, 0.000005))
        .build();
    let camera = Camera::new(point![0.0, 0.0, 10000.0], 10000.0).with_view_height(2500.0);
    Ok(Demo { scene, camera })
}

/// Round table: a flat cylinder top resting on four cylinder legs, grouped
/// into one object. `center` is the middle of the underside of the top and
/// `up` points from the legs toward the top.
pub fn table(center: Point3<f64>, up: Vector3<f64>, size: f64, color: Color) -> Result<Object, GeometryError> {
    let up = util::unit(up)?;
    let down = Unit::new_unchecked(-up.into_inner());
    let u = util::orthogonal(&up);
    let w = up.cross(u.as_ref());

    let material = Material::new().diffuse(0.6).specular(0.2).shininess(40);
    let part = |cylinder: Cylinder| -> Object {
        Surface::new(cylinder).with_emission(color).with_material(material.clone()).into()
    };

    let top = part(Cylinder::new(Ray::new(center, up), size, size / 20.0)?);
    let legs = (0..4)
        .map(|i| {
            let angle = FRAC_PI_4 * (2 * i + 1) as f64;
            let foot = center + (u.as_ref() * angle.cos() + w * angle.sin()) * (0.7 * size);
            Cylinder::new(Ray::new(foot, down), size / 11.0, 1.5 * size).map(part)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Object::List(vec![top, Object::List(legs)]))
}

/// A table on a floor, with a glass ball on top.
pub fn dining_room() -> Result<Demo, GeometryError> {
    let scene = Scene::builder("table")
        .background(rgb(42.0, 201.0, 255.0))
        .ambient_light(AmbientLight::new(Color::WHITE, Vector3::repeat(0.15)))
        .geometry(Surface::new(Plane::new(point![0.0, -150.5, 0.0], vector![0.0, 1.0, 0.0])?)
            .with_emission(rgb(15.0, 60.0, 15.0))
            .with_material(Material::new().diffuse(0.5).reflection(0.3)))
        .geometry(table(point![0.0, 0.0, -300.0], vector![0.0, 1.0, 0.0], 100.0, rgb(100.0, 50.0, 20.0))?)
        .geometry(Surface::new(Sphere::new(point![0.0, 35.0, -300.0], 30.0)?)
            .with_emission(rgb(0.0, 30.0, 60.0))
            .with_material(Material::new().diffuse(0.2).specular(0.5).shininess(60).transmission(0.5)))
        .light(PointLight::new(rgb(1020.0, 400.0, 400.0), point![200.0, 400.0, 0.0])
            .with_attenuation(1.0, 0.00001, 0.000005))
        .light(DirectionalLight::new(rgb(60.0, 60.0, 60.0), vector![0.0, -1.0, -0.5])?)
        .build();
    let camera = Camera::new(point![0.0, 200.0, 1000.0], 1000.0)
        .with_rotation(0.0, -0.2, 0.0)
        .with_view_height(400.0);
    Ok(Demo { scene, camera })
}

/// Shadows of a ball and a tinted glass pane under a wide spot light.
pub fn soft_shadows() -> Result<Demo, GeometryError> {
    let sampling = DiskSampling::new(15.0, 64, 0x5eed)?;
    let scene = Scene::builder("soft shadows")
        .ambient_light(AmbientLight::new(Color::WHITE, Vector3::repeat(0.1)))
        .geometry(Surface::new(Polygon::new(vec![
                point![-200.0, -50.0, 0.0],
                point![200.0, -50.0, 0.0],
                point![200.0, -50.0, -300.0],
                point![-200.0, -50.0, -300.0],
            ])?)
            .with_material(Material::new().diffuse(0.5).specular(0.3).shininess(30)))
        .geometry(Surface::new(Sphere::new(point![-40.0, 0.0, -150.0], 30.0)?)
            .with_emission(rgb(0.0, 0.0, 255.0))
            .with_material(Material::new().diffuse(0.5).specular(0.8).shininess(60)))
        .geometry(Surface::new(Polygon::new(vec![
                point![30.0, 10.0, -120.0],
                point![90.0, 10.0, -120.0],
                point![90.0, 10.0, -180.0],
                point![30.0, 10.0, -180.0],
            ])?)
            .with_emission(rgb(60.0, 0.0, 0.0))
            .with_material(Material::new().diffuse(0.2).transmission_rgb(vector![0.8, 0.3, 0.3])))
        .light(SpotLight::new(rgb(700.0, 600.0, 500.0), point![0.0, 150.0, -150.0], vector![0.0, -1.0, 0.0])?
            .with_attenuation(1.0, 1E-5, 1.5E-7)
            .with_soft_shadows(sampling))
        .build();
    let camera = Camera::new(point![0.0, 60.0, 400.0], 1000.0)
        .with_rotation(0.0, -0.2, 0.0)
        .with_view_height(500.0);
    Ok(Demo { scene, camera })
}
