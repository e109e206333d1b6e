use nalgebra::Vector3;

/// Reflects `v` about the plane with normal `n`.
pub fn reflect(v: &Vector3<f64>, n: &Vector3<f64>) -> Vector3<f64> {
    v - 2.0 * v.dot(n) * n
}

/// Phong coefficients of a surface, one weight per color channel.
///
/// The weights are artist controlled: `kd + ks + kt` is not required to sum to one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    /// Diffuse.
    pub kd: Vector3<f64>,
    /// Specular.
    pub ks: Vector3<f64>,
    /// Transmission, also used as the shadow transparency of the surface.
    pub kt: Vector3<f64>,
    /// Mirror reflection.
    pub kr: Vector3<f64>,
    pub shininess: u32,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diffuse(self, kd: f64) -> Self {
        self.diffuse_rgb(Vector3::repeat(kd))
    }

    pub fn diffuse_rgb(self, kd: Vector3<f64>) -> Self {
        Material { kd, ..self }
    }

    pub fn specular(self, ks: f64) -> Self {
        self.specular_rgb(Vector3::repeat(ks))
    }

    pub fn specular_rgb(self, ks: Vector3<f64>) -> Self {
        Material { ks, ..self }
    }

    pub fn transmission(self, kt: f64) -> Self {
        self.transmission_rgb(Vector3::repeat(kt))
    }

    pub fn transmission_rgb(self, kt: Vector3<f64>) -> Self {
        Material { kt, ..self }
    }

    pub fn reflection(self, kr: f64) -> Self {
        self.reflection_rgb(Vector3::repeat(kr))
    }

    pub fn reflection_rgb(self, kr: Vector3<f64>) -> Self {
        Material { kr, ..self }
    }

    pub fn shininess(self, shininess: u32) -> Self {
        Material { shininess, ..self }
    }
}
