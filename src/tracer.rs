//! Recursive Whitted-style shading.
//!
//! The color of a hit is its emission, plus Phong diffuse and specular terms
//! for every light (attenuated by whatever transparent surfaces stand in the
//! way), plus the colors seen along the mirror-reflected and transmitted rays.
//! Recursion stops after [`TracerConfig::max_level`] bounces, or earlier once
//! the accumulated attenuation drops below [`TracerConfig::min_k`] in every
//! channel.

use nalgebra::{Point3, Unit, Vector3};

use crate::light::Light;
use crate::material::{reflect, Material};
use crate::picture::Color;
use crate::ray::{Hit, Ray};
use crate::scene::Scene;
use crate::util::{align_zero, is_zero, lower_than};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracerConfig {
    /// Recursion depth of the first hit; a hit at level 1 gets no reflection or refraction.
    pub max_level: u32,
    /// Attenuation below which a branch or shadow sample is no longer worth tracing.
    pub min_k: f64,
}

impl Default for TracerConfig {
    fn default() -> Self {
        TracerConfig {
            max_level: 10,
            min_k: 0.001,
        }
    }
}

/// Traces rays against a read-only scene. Cheap to share between threads.
#[derive(Clone, Copy)]
pub struct RayTracer<'a> {
    scene: &'a Scene,
    config: TracerConfig,
}

impl<'a> RayTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self::with_config(scene, TracerConfig::default())
    }

    pub fn with_config(scene: &'a Scene, config: TracerConfig) -> Self {
        RayTracer { scene, config }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Color seen along `ray`. The scene ambient light is added once here, not
    /// at every bounce.
    pub fn trace_ray(&self, ray: &Ray) -> Color {
        match self.scene.geometries.closest_hit(ray) {
            None => self.scene.background,
            Some(hit) => {
                let level = self.config.max_level.max(1);
                self.color_at(&hit, ray, level, &Vector3::repeat(1.0))
                    + self.scene.ambient_light.intensity
            }
        }
    }

    fn color_at(&self, hit: &Hit<'a>, ray: &Ray, level: u32, k: &Vector3<f64>) -> Color {
        let mut color = hit.surface.emission;

        let v = ray.direction;
        let n = hit.normal();
        let nv = align_zero(n.dot(v.as_ref()));
        if is_zero(nv) {
            // grazing ray
            return color;
        }

        let material = &hit.surface.material;
        color += self.local_effects(hit, material, &n, &v, nv, k);
        if level == 1 {
            return color;
        }
        color + self.global_effects(hit, material, &n, &v, level, k)
    }

    fn local_effects(
        &self,
        hit: &Hit<'a>,
        material: &Material,
        n: &Unit<Vector3<f64>>,
        v: &Unit<Vector3<f64>>,
        nv: f64,
        k: &Vector3<f64>,
    ) -> Color {
        self.scene.lights.iter()
            .map(|light| self.light_contribution(light, hit.point, material, n, v, nv, k))
            .sum()
    }

    /// Diffuse and specular light from one source, averaged over its shadow samples.
    #[allow(clippy::too_many_arguments)]
    fn light_contribution(
        &self,
        light: &Light,
        point: Point3<f64>,
        material: &Material,
        n: &Unit<Vector3<f64>>,
        v: &Unit<Vector3<f64>>,
        nv: f64,
        k: &Vector3<f64>,
    ) -> Color {
        let samples = light.samples(&point);
        if samples.is_empty() {
            return Color::BLACK;
        }

        let intensity = light.intensity_at(&point);
        let mut color = Color::BLACK;
        for sample in &samples {
            let l = sample.direction;
            let nl = align_zero(n.dot(l.as_ref()));
            // light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(point, n, &l, sample.distance);
            if lower_than(&ktr.component_mul(k), self.config.min_k) {
                continue;
            }

            let il = intensity.scale(&ktr);
            color += diffuse(&material.kd, nl, il) + specular(material, n, &l, nl, v, il);
        }
        color / samples.len() as f64
    }

    /// Product of the transmission coefficients of everything between `point`
    /// and a light sample `distance` away along `-l`.
    fn transparency(&self, point: Point3<f64>, n: &Unit<Vector3<f64>>, l: &Unit<Vector3<f64>>, distance: f64) -> Vector3<f64> {
        let to_light = Unit::new_unchecked(-l.into_inner());
        let shadow_ray = Ray::offset(point, n, to_light);

        let mut ktr = Vector3::repeat(1.0);
        for occluder in self.scene.geometries.intersect(&shadow_ray, distance) {
            ktr.component_mul_assign(&occluder.surface.material.kt);
            if lower_than(&ktr, self.config.min_k) {
                return Vector3::zeros();
            }
        }
        ktr
    }

    fn global_effects(
        &self,
        hit: &Hit<'a>,
        material: &Material,
        n: &Unit<Vector3<f64>>,
        v: &Unit<Vector3<f64>>,
        level: u32,
        k: &Vector3<f64>,
    ) -> Color {
        let mut color = Color::BLACK;

        let kkr = material.kr.component_mul(k);
        if !lower_than(&kkr, self.config.min_k) {
            let reflected = reflected_ray(hit.point, v, n);
            color += self.global_effect(&reflected, level, &material.kr, &kkr);
        }

        let kkt = material.kt.component_mul(k);
        if !lower_than(&kkt, self.config.min_k) {
            let refracted = Ray::offset(hit.point, n, *v);
            color += self.global_effect(&refracted, level, &material.kt, &kkt);
        }

        color
    }

    fn global_effect(&self, ray: &Ray, level: u32, kx: &Vector3<f64>, kkx: &Vector3<f64>) -> Color {
        let color = match self.scene.geometries.closest_hit(ray) {
            None => self.scene.background,
            Some(hit) => self.color_at(&hit, ray, level - 1, kkx),
        };
        color.scale(kx)
    }
}

fn diffuse(kd: &Vector3<f64>, nl: f64, intensity: Color) -> Color {
    intensity.scale(&(kd * nl.abs()))
}

fn specular(
    material: &Material,
    n: &Unit<Vector3<f64>>,
    l: &Unit<Vector3<f64>>,
    nl: f64,
    v: &Unit<Vector3<f64>>,
    intensity: Color,
) -> Color {
    let r = l.as_ref() - n.as_ref() * (2.0 * nl);
    let minus_vr = -align_zero(r.dot(v.as_ref()));
    if minus_vr <= 0.0 {
        // looking away from the highlight
        return Color::BLACK;
    }
    intensity.scale(&(material.ks * minus_vr.powi(material.shininess as i32)))
}

fn reflected_ray(point: Point3<f64>, v: &Unit<Vector3<f64>>, n: &Unit<Vector3<f64>>) -> Ray {
    let r = reflect(v.as_ref(), n.as_ref());
    Ray::offset(point, n, Unit::new_normalize(r))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{point, vector};

    use super::*;
    use crate::light::{AmbientLight, DirectionalLight, DiskSampling, PointLight};
    use crate::object::{Plane, Polygon, Sphere, Surface};
    use crate::scene::SceneBuilder;

    fn floor() -> Surface {
        Surface::new(Plane::new(Point3::origin(), vector![0.0, 0.0, 1.0]).unwrap())
            .with_material(Material::new().diffuse(1.0))
    }

    /// Horizontal square at height `z`, centered on the z axis.
    fn pane(z: f64, half: f64, kt: f64) -> Surface {
        let polygon = Polygon::new(vec![
            point![-half, -half, z],
            point![half, -half, z],
            point![half, half, z],
            point![-half, half, z],
        ]).unwrap();
        Surface::new(polygon).with_material(Material::new().transmission(kt))
    }

    /// Looks at the origin from above and to the side, clear of the panes.
    fn view_ray() -> Ray {
        Ray::try_new(point![5.0, 0.0, 5.0], vector![-1.0, 0.0, -1.0]).unwrap()
    }

    fn overhead_light() -> PointLight {
        PointLight::new(Color::WHITE, point![0.0, 0.0, 10.0])
    }

    fn lit_floor(builder: SceneBuilder) -> Color {
        let scene = builder.geometry(floor()).light(overhead_light()).build();
        RayTracer::new(&scene).trace_ray(&view_ray())
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::builder("empty").background(Color::new(0.2, 0.3, 0.4)).build();
        let ray = Ray::try_new(Point3::origin(), vector![0.0, 0.0, 1.0]).unwrap();
        assert_eq!(RayTracer::new(&scene).trace_ray(&ray), Color::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_emission_and_ambient() {
        let scene = Scene::builder("glow")
            .ambient_light(AmbientLight::from_intensity(Color::new(0.1, 0.1, 0.1)))
            .geometry(Surface::new(Sphere::new(Point3::origin(), 1.0).unwrap()).with_emission(Color::new(0.5, 0.0, 0.0)))
            .build();
        let ray = Ray::try_new(point![0.0, 0.0, -5.0], vector![0.0, 0.0, 1.0]).unwrap();
        let color = RayTracer::new(&scene).trace_ray(&ray);
        assert_relative_eq!(color.r, 0.6, epsilon = 1e-12);
        assert_relative_eq!(color.g, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_grazing_ray_returns_emission_only() {
        let scene = Scene::builder("graze")
            .ambient_light(AmbientLight::NONE)
            .geometry(Surface::new(Sphere::new(Point3::origin(), 1.0).unwrap())
                .with_emission(Color::new(0.0, 0.3, 0.0))
                .with_material(Material::new().diffuse(1.0)))
            .light(DirectionalLight::new(Color::WHITE, vector![0.0, 0.0, 1.0]).unwrap())
            .build();
        let tracer = RayTracer::new(&scene);
        let hit = scene.geometries.closest_hit(&Ray::try_new(point![0.0, 0.0, -5.0], vector![0.0, 0.0, 1.0]).unwrap()).unwrap();
        // a ray along the tangent plane at the hit point
        let tangent = Ray::try_new(hit.point - vector![1.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]).unwrap();
        let color = tracer.color_at(&hit, &tangent, 10, &Vector3::repeat(1.0));
        assert_eq!(color, Color::new(0.0, 0.3, 0.0));
    }

    #[test]
    fn test_unshadowed_diffuse() {
        let color = lit_floor(Scene::builder("lit"));
        assert_relative_eq!(color.r, 1.0, epsilon = 1e-9);
        assert_relative_eq!(color.b, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let scene = Scene::builder("behind")
            .geometry(floor())
            .light(PointLight::new(Color::WHITE, point![0.0, 0.0, -10.0]))
            .build();
        assert_eq!(RayTracer::new(&scene).trace_ray(&view_ray()), Color::BLACK);
    }

    #[test]
    fn test_opaque_occluder_blocks_light() {
        let color = lit_floor(Scene::builder("opaque").geometry(pane(3.0, 1.0, 0.0)));
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_transparent_occluders_multiply() {
        let one = lit_floor(Scene::builder("one").geometry(pane(3.0, 1.0, 0.5)));
        assert_relative_eq!(one.g, 0.5, epsilon = 1e-9);

        let two = lit_floor(Scene::builder("two").geometry(pane(3.0, 1.0, 0.5)).geometry(pane(6.0, 1.0, 0.5)));
        assert_relative_eq!(two.g, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_occluder_past_light_is_ignored() {
        let color = lit_floor(Scene::builder("past").geometry(pane(12.0, 1.0, 0.0)));
        assert_relative_eq!(color.r, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shadow_sample_skipped_below_cutoff_for_branch() {
        let scene = Scene::builder("dim branch")
            .geometry(floor())
            .geometry(pane(3.0, 1.0, 0.3))
            .light(overhead_light())
            .build();
        let tracer = RayTracer::new(&scene);
        let ray = view_ray();
        let hit = scene.geometries.closest_hit(&ray).unwrap();

        // ktr = 0.3 on its own, 0.003 after a branch attenuation of 0.01
        let color = tracer.color_at(&hit, &ray, 1, &Vector3::repeat(0.01));
        assert_relative_eq!(color.r, 0.3, epsilon = 1e-9);

        // 0.3 * 0.002 falls under min_k, so the light adds nothing
        let color = tracer.color_at(&hit, &ray, 1, &Vector3::repeat(0.002));
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_specular_highlight() {
        // mirror direction of the light about the floor normal points at the viewer
        let scene = Scene::builder("shiny")
            .geometry(Surface::new(Plane::new(Point3::origin(), vector![0.0, 0.0, 1.0]).unwrap())
                .with_material(Material::new().specular(1.0).shininess(20)))
            .light(PointLight::new(Color::WHITE, point![-5.0, 0.0, 5.0]))
            .build();
        let color = RayTracer::new(&scene).trace_ray(&view_ray());
        // intensity is 1 / (kc = 1), reflection is exact so the power term is 1
        assert_relative_eq!(color.r, 1.0, epsilon = 1e-9);

        let off_axis = Ray::try_new(point![5.0, 0.0, 2.0], vector![-5.0, 0.0, -2.0]).unwrap();
        let dimmer = RayTracer::new(&scene).trace_ray(&off_axis);
        assert!(dimmer.r < 0.5);
    }

    #[test]
    fn test_parallel_mirrors_stop_at_max_level() {
        let glow = Color::new(0.1, 0.2, 0.0);
        let mirror = Material::new().reflection(1.0);
        let scene = Scene::builder("mirrors")
            .background(Color::new(0.0, 0.0, 1.0))
            .geometry(Surface::new(Plane::new(point![0.0, 0.0, -1.0], vector![0.0, 0.0, 1.0]).unwrap())
                .with_emission(glow)
                .with_material(mirror.clone()))
            .geometry(Surface::new(Plane::new(point![0.0, 0.0, 1.0], vector![0.0, 0.0, -1.0]).unwrap())
                .with_emission(glow)
                .with_material(mirror))
            .geometry(Surface::new(Sphere::new(point![5.0, 0.0, 0.0], 0.5).unwrap())
                .with_material(Material::new().diffuse(0.5)))
            .build();

        // bounces straight up and down forever; only the level bound ends it,
        // with each of the max_level hits adding its emission once
        let ray = Ray::try_new(Point3::origin(), vector![0.0, 0.0, 1.0]).unwrap();
        for max_level in [1, 2, 3, 7] {
            let config = TracerConfig { max_level, ..TracerConfig::default() };
            let color = RayTracer::with_config(&scene, config).trace_ray(&ray);
            assert_relative_eq!(color.r, 0.1 * max_level as f64, epsilon = 1e-9);
            assert_relative_eq!(color.g, 0.2 * max_level as f64, epsilon = 1e-9);
            assert_eq!(color.b, 0.0);
        }
    }

    #[test]
    fn test_reflection_adds_what_the_mirror_sees() {
        let red = Color::new(1.0, 0.0, 0.0);
        let scene = Scene::builder("mirror")
            .background(Color::new(0.0, 0.0, 1.0))
            .geometry(Surface::new(Plane::new(Point3::origin(), vector![0.0, 0.0, 1.0]).unwrap())
                .with_material(Material::new().reflection(0.5)))
            .geometry(Surface::new(Sphere::new(point![-5.0, 0.0, 5.0], 1.0).unwrap()).with_emission(red))
            .build();
        // reflected off the origin toward the emissive sphere
        let color = RayTracer::new(&scene).trace_ray(&view_ray());
        assert_relative_eq!(color.r, 0.5, epsilon = 1e-9);
        assert_relative_eq!(color.b, 0.0, epsilon = 1e-9);

        // at level 1 there is no reflection at all
        let config = TracerConfig { max_level: 1, ..TracerConfig::default() };
        let flat = RayTracer::with_config(&scene, config).trace_ray(&view_ray());
        assert_eq!(flat, Color::BLACK);
    }

    #[test]
    fn test_refraction_sees_through() {
        let scene = Scene::builder("glass")
            .background(Color::new(0.0, 1.0, 0.0))
            .geometry(Surface::new(Sphere::new(Point3::origin(), 1.0).unwrap())
                .with_material(Material::new().transmission(0.5)))
            .build();
        let ray = Ray::try_new(point![0.0, 0.0, -5.0], vector![0.0, 0.0, 1.0]).unwrap();
        // enters and leaves the sphere: background attenuated twice
        let color = RayTracer::new(&scene).trace_ray(&ray);
        assert_relative_eq!(color.g, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_attenuation_cutoff_skips_branches() {
        let scene = Scene::builder("dim")
            .background(Color::WHITE)
            .geometry(Surface::new(Plane::new(Point3::origin(), vector![0.0, 0.0, 1.0]).unwrap())
                .with_material(Material::new().reflection(0.0005)))
            .build();
        assert_eq!(RayTracer::new(&scene).trace_ray(&view_ray()), Color::BLACK);
    }

    #[test]
    fn test_soft_shadow_converges_to_hard_shadow() {
        // an opaque pane just beside the hard shadow ray
        let occluder = Surface::new(Polygon::new(vec![
            point![0.05, -2.0, 5.0],
            point![2.0, -2.0, 5.0],
            point![2.0, 2.0, 5.0],
            point![0.05, 2.0, 5.0],
        ]).unwrap());

        let render = |light: PointLight| {
            let scene = Scene::builder("soft")
                .geometry(floor())
                .geometry(occluder.clone())
                .light(light)
                .build();
            RayTracer::new(&scene).trace_ray(&view_ray())
        };

        let hard = render(overhead_light());
        assert_relative_eq!(hard.r, 1.0, epsilon = 1e-9);

        let errors: Vec<f64> = [1.0, 0.1, 0.001]
            .into_iter()
            .map(|radius| {
                let sampling = DiskSampling::new(radius, 256, 11).unwrap();
                let soft = render(overhead_light().with_soft_shadows(sampling));
                (soft.r - hard.r).abs()
            })
            .collect();

        assert!(errors[0] > 0.1, "wide disk should be partly shadowed: {:?}", errors);
        assert!(errors[2] < errors[0]);
        assert!(errors[2] < 1e-3, "{:?}", errors);
    }
}
