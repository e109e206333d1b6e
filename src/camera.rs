use nalgebra::{Point2, Point3, Rotation3, Unit, vector, Vector3};

use crate::ray::Ray;

/// Pinhole camera looking down its local `-z` axis with `+y` up.
///
/// Orientation is applied as yaw (about `y`), then pitch (about `x`), then
/// roll (about `z`), all in radians.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    /// Distance from the position to the view plane.
    pub focal_length: f64,
    /// Height of the view plane in scene units; its width follows the image aspect ratio.
    pub view_height: f64,
}

impl Camera {
    pub fn new(position: Point3<f64>, focal_length: f64) -> Self {
        Camera {
            position,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            focal_length,
            view_height: 2.0,
        }
    }

    pub fn with_rotation(self, yaw: f64, pitch: f64, roll: f64) -> Self {
        Camera { yaw, pitch, roll, ..self }
    }

    pub fn with_view_height(self, view_height: f64) -> Self {
        Camera { view_height, ..self }
    }

    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        let image_width = width as f64;
        let image_height = height as f64;

        let aspect_ratio = image_width / image_height;
        let horizontal = self.view_height * aspect_ratio;

        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw) *
            Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch) *
            Rotation3::from_axis_angle(&Vector3::z_axis(), self.roll);
        let vertical = rotation * vector![0.0, self.view_height, 0.0];
        let horizontal = rotation * vector![horizontal, 0.0, 0.0];
        let depth = rotation * vector![0.0, 0.0, self.focal_length];

        let lower_left_corner = self.position - vertical / 2.0 - horizontal / 2.0 - depth;

        Viewport {
            origin: self.position,
            image_width,
            image_height,
            horizontal,
            vertical,
            lower_left_corner,
        }
    }
}

/// The view plane of a [`Camera`] for one image size.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub origin: Point3<f64>,
    pub image_width: f64,
    pub image_height: f64,
    pub horizontal: Vector3<f64>,
    pub vertical: Vector3<f64>,
    pub lower_left_corner: Point3<f64>,
}

impl Viewport {
    /// Ray through the view plane at `uv`, where `(0, 0)` is the lower left
    /// corner and `(1, 1)` the upper right.
    pub fn emit_ray(&self, uv: &Point2<f64>) -> Ray {
        let target = self.lower_left_corner + self.horizontal * uv.x + self.vertical * uv.y;
        // the view plane sits focal_length away, so the direction is never zero
        Ray::new(self.origin, Unit::new_normalize(target - self.origin))
    }
}
