use std::time::Instant;

use log::{info, trace};
use nalgebra::{point, vector, Vector2};
use rayon::prelude::*;

use crate::camera::{Camera, Viewport};
use crate::picture::{Color, Picture};
use crate::tracer::RayTracer;

/// Sub-pixel positions to shoot rays through, each in `[0, 1)²`.
pub trait SamplePattern: Sync {
    fn sample_offsets(&self) -> &[Vector2<f64>];
}

impl<const N: usize> SamplePattern for [Vector2<f64>; N] {
    fn sample_offsets(&self) -> &[Vector2<f64>] {
        self
    }
}

// patterns based on DirectX (https://learn.microsoft.com/en-us/windows/win32/api/d3d11/ne-d3d11-d3d11_standard_multisample_quality_levels)
pub const SINGLE_SAMPLE_PATTERN: [Vector2<f64>; 1] = [vector![0.5, 0.5]];
pub const MULTISAMPLE_2X_PATTERN: [Vector2<f64>; 2] = [
    vector![0.25, 0.75],
    vector![0.75, 0.25],
];
pub const MULTISAMPLE_4X_PATTERN: [Vector2<f64>; 4] = [
    vector![0.125, 0.375],
    vector![0.375, 0.875],
    vector![0.625, 0.125],
    vector![0.875, 0.625],
];
pub const MULTISAMPLE_8X_PATTERN: [Vector2<f64>; 8] = [
    vector![0.0625, 0.5625],
    vector![0.1875, 0.1875],
    vector![0.3125, 0.8125],
    vector![0.4375, 0.3125],
    vector![0.5625, 0.6875],
    vector![0.6875, 0.0625],
    vector![0.8125, 0.4375],
    vector![0.9375, 0.9375],
];

/// Mean color of the rays through pixel `(x, y)`, with row 0 at the top of
/// the image. No gamma or clamping is applied.
pub fn render_pixel(
    x: u32,
    y: u32,
    viewport: &Viewport,
    tracer: &RayTracer,
    samples: &(impl SamplePattern + ?Sized),
) -> Color {
    let samples = samples.sample_offsets();
    let sum: Color = samples.iter()
        .map(|offset| {
            let u = (x as f64 + offset.x) / viewport.image_width;
            let v = 1.0 - (y as f64 + offset.y) / viewport.image_height;
            viewport.emit_ray(&point![u, v])
        })
        .map(|ray| tracer.trace_ray(&ray))
        .sum();
    sum / samples.len() as f64
}

const LINES_PER_WORK: usize = 50;

/// Renders a whole frame. Bands of rows are traced in parallel, each into its
/// own slice of the picture buffer.
pub fn render_frame(
    camera: &Camera,
    tracer: &RayTracer,
    width: u32,
    height: u32,
    samples: &(impl SamplePattern + ?Sized),
) -> Picture {
    let mut picture = Picture::new((width, height));
    if width == 0 || height == 0 {
        return picture;
    }
    let viewport = camera.viewport(width, height);
    let row_len = width as usize;
    let chunk_len = row_len * LINES_PER_WORK;

    info!(target: "render", "Starting frame render...");
    let start = Instant::now();

    picture.buffer_mut()
        .par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(chunk, pixels)| {
            let first = chunk * chunk_len;
            trace!(target: "render", "Rendering chunk: {:?}", first..first + pixels.len());
            for (i, pixel) in pixels.iter_mut().enumerate() {
                let index = first + i;
                let (x, y) = ((index % row_len) as u32, (index / row_len) as u32);
                *pixel = render_pixel(x, y, &viewport, tracer, samples);
            }
        });

    let elapsed = start.elapsed();
    info!(target: "render", "Finished rendering. Took {:?}", elapsed);
    picture
}
