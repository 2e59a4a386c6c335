//! Polyline sampling of smooth curves and regular polygons.
//!
//! Curves are sampled at `segments + 1` equally spaced parameters on `[0, 2π]`
//! so the last sample coincides with the first.

use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::types::Coord;

/// Points on the ellipse with semi-axes `rx`, `ry`, rotated by `rotation_deg`
/// counterclockwise and centered at `center`.
pub fn sample_ellipse(center: Coord, rx: f64, ry: f64, rotation_deg: f64, segments: usize) -> Vec<Coord> {
    let segments = segments.max(3);
    let (s, c) = rotation_deg.to_radians().sin_cos();
    (0..=segments)
        .map(|i| {
            let t = (i as f64) / (segments as f64) * TAU;
            let x = rx * t.cos();
            let y = ry * t.sin();
            center + Vector2::new(x * c - y * s, x * s + y * c)
        })
        .collect()
}

#[inline]
pub fn sample_circle(center: Coord, radius: f64, segments: usize) -> Vec<Coord> {
    sample_ellipse(center, radius, radius, 0.0, segments)
}

/// `n` vertices at angular steps of `2π/n`, starting at `start_angle` (radians).
pub fn regular_polygon(center: Coord, radius: f64, start_angle: f64, n: usize) -> Vec<Coord> {
    let delta = TAU / (n as f64);
    (0..n)
        .map(|k| {
            let angle = start_angle + (k as f64) * delta;
            center + Vector2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Circular arc around `center` from `start_angle` sweeping `sweep` radians
/// (negative sweeps run clockwise), `segments + 1` points.
pub fn sample_arc(center: Coord, radius: f64, start_angle: f64, sweep: f64, segments: usize) -> Vec<Coord> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let angle = start_angle + (i as f64) / (segments as f64) * sweep;
            center + Vector2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}
