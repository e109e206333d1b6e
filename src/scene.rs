use log::debug;

use crate::light::{AmbientLight, Light};
use crate::object::Object;
use crate::picture::Color;

/// Everything the tracer reads while rendering. Built once, then only read.
#[derive(Clone, Debug)]
pub struct Scene {
    pub name: String,
    pub background: Color,
    pub ambient_light: AmbientLight,
    pub geometries: Object,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder::new(name)
    }
}

/// Collects the scene contents. Background defaults to black and ambient
/// light to [`AmbientLight::NONE`].
pub struct SceneBuilder {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Vec<Object>,
    lights: Vec<Light>,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        SceneBuilder {
            name: name.into(),
            background: Color::BLACK,
            ambient_light: AmbientLight::NONE,
            geometries: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn geometry(mut self, object: impl Into<Object>) -> Self {
        self.geometries.push(object.into());
        self
    }

    pub fn geometries(mut self, objects: impl IntoIterator<Item=Object>) -> Self {
        self.geometries.extend(objects);
        self
    }

    pub fn light(mut self, light: impl Into<Light>) -> Self {
        self.lights.push(light.into());
        self
    }

    /// Finishes the scene. Light sampling patterns are drawn here so the
    /// scene can be shared between render threads as is.
    pub fn build(self) -> Scene {
        for light in &self.lights {
            light.prepare();
        }
        let scene = Scene {
            name: self.name,
            background: self.background,
            ambient_light: self.ambient_light,
            geometries: Object::List(self.geometries),
            lights: self.lights,
        };
        debug!(
            target: "scene",
            "Built scene {:?}: {} surfaces, {} lights",
            scene.name,
            scene.geometries.len(),
            scene.lights.len()
        );
        scene
    }
}
