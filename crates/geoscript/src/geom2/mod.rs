//! Numeric geometry kernel in 2D.
//!
//! Purpose
//! - Pure functions over `Coord` (= `nalgebra::Vector2<f64>`): distances,
//!   line clipping and intersection, perpendicular feet, shoelace centroids,
//!   affine maps and curve sampling.
//! - No registry access; every failure is a `GeoError` rather than NaN/∞.
//!
//! Tolerances live in `GeomCfg` (default `1e-9` everywhere).

mod sample;
mod solvers;
mod types;
mod util;

pub use sample::{regular_polygon, sample_arc, sample_circle, sample_ellipse};
pub use solvers::{circumcenter, clip_line_to_box, foot_of_perpendicular, intersect_lines, LineDir};
pub use types::{Affine2, Coord, GeomCfg, ViewBox};
pub use util::{
    centroid, close_ring, cross, distance, fmt2, fmt_coord, fmt_num, is_ring_closed, mean,
    midpoint, signed_area,
};
