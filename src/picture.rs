use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul};

use nalgebra::Vector3;

/// Linear RGB color. Channels are not clamped; that is up to whoever encodes the image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Sum for Color {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        let mut acc = Color::BLACK;
        for color in iter {
            acc += color;
        }
        acc
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Per-channel product with a coefficient vector.
    pub fn scale(&self, k: &Vector3<f64>) -> Color {
        Color::new(self.r * k.x, self.g * k.y, self.b * k.z)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
        )
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Color::new(
            self.r * rhs,
            self.g * rhs,
            self.b * rhs,
        )
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, rhs: f64) -> Self::Output {
        Color::new(
            self.r / rhs,
            self.g / rhs,
            self.b / rhs,
        )
    }
}

/// Row-major buffer of rendered colors.
pub struct Picture {
    pixels: Vec<Color>,
    size: (u32, u32),
}

impl Picture {
    pub fn new(size: (u32, u32)) -> Self {
        let len = size.0 as usize * size.1 as usize;
        Picture { pixels: vec![Color::BLACK; len], size }
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    fn to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> &Color {
        &self.pixels[self.to_index(x, y)]
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Color {
        let index = self.to_index(x, y);
        &mut self.pixels[index]
    }

    pub fn buffer(&self) -> &[Color] {
        &self.pixels
    }

    pub fn buffer_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Mean of all pixels, handy for logging a quick summary of a frame.
    pub fn average(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::BLACK;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f64
    }
}
