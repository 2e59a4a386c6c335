//! Small 2D solvers used by the construction operations.
//!
//! - `clip_line_to_box`: endpoints of an infinite line inside a `ViewBox`.
//! - `intersect_lines`: intersection of two infinite lines given by point pairs.
//! - `foot_of_perpendicular`: orthogonal projection onto a line.
//! - `circumcenter`: intersection of two perpendicular bisectors.
//!
//! All solvers reject inputs that would divide by a (near-)zero quantity.
use nalgebra::Vector2;

use super::types::{Coord, GeomCfg, ViewBox};
use super::util::{cross, midpoint};
use crate::error::{GeoError, GeoResult};

/// How the second degree of freedom of an infinite line is given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineDir {
    /// The line passes through this second point.
    Through(Coord),
    /// The line runs along this direction vector.
    Direction(Coord),
}

/// Crossings of the infinite line through `p` with the edges of `view`.
///
/// Candidates are deduplicated per axis within `eps_dedup` and sorted by x;
/// the first and last are returned. Vertical lines (`|Δx| < eps`) are mapped
/// straight to the bottom and top edges.
pub fn clip_line_to_box(
    p: Coord,
    dir: LineDir,
    view: &ViewBox,
    cfg: GeomCfg,
) -> GeoResult<(Coord, Coord)> {
    let v = match dir {
        LineDir::Through(q) => {
            if cfg.same_point(p, q) {
                return Err(GeoError::DegenerateLine {
                    reason: "both points coincide",
                });
            }
            q - p
        }
        LineDir::Direction(v) => {
            if v.x.abs() < cfg.eps_dedup && v.y.abs() < cfg.eps_dedup {
                return Err(GeoError::DegenerateLine {
                    reason: "direction is the zero vector",
                });
            }
            v
        }
    };

    if v.x.abs() < cfg.eps_dedup {
        if !view.contains_x(p.x) {
            return Err(GeoError::DegenerateLine {
                reason: "line misses the viewport",
            });
        }
        return Ok((
            Vector2::new(p.x, view.min_y),
            Vector2::new(p.x, view.max_y),
        ));
    }

    let m = v.y / v.x;
    let b = p.y - m * p.x;
    let mut candidates: Vec<Coord> = Vec::with_capacity(4);
    let y_at_min_x = m * view.min_x + b;
    if view.contains_y(y_at_min_x) {
        candidates.push(Vector2::new(view.min_x, y_at_min_x));
    }
    let y_at_max_x = m * view.max_x + b;
    if view.contains_y(y_at_max_x) {
        candidates.push(Vector2::new(view.max_x, y_at_max_x));
    }
    if m.abs() > cfg.eps_dedup {
        let x_at_min_y = (view.min_y - b) / m;
        if view.contains_x(x_at_min_y) {
            candidates.push(Vector2::new(x_at_min_y, view.min_y));
        }
        let x_at_max_y = (view.max_y - b) / m;
        if view.contains_x(x_at_max_y) {
            candidates.push(Vector2::new(x_at_max_y, view.max_y));
        }
    }

    let mut unique: Vec<Coord> = Vec::with_capacity(candidates.len());
    for c in candidates {
        if !unique.iter().any(|u| cfg.same_point(*u, c)) {
            unique.push(c);
        }
    }
    if unique.len() < 2 {
        return Err(GeoError::DegenerateLine {
            reason: "line misses the viewport",
        });
    }
    unique.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    Ok((unique[0], unique[unique.len() - 1]))
}

/// Intersection of line AB with line CD.
///
/// Parallelism is decided on the normalized cross product of the two
/// directions (the sine of the angle between them), which agrees with a slope
/// comparison for non-vertical lines and stays finite for vertical ones.
pub fn intersect_lines(a: Coord, b: Coord, c: Coord, d: Coord, cfg: GeomCfg) -> GeoResult<Coord> {
    let d1 = b - a;
    let d2 = d - c;
    let n1 = d1.norm();
    let n2 = d2.norm();
    if n1 < cfg.eps_dedup || n2 < cfg.eps_dedup {
        return Err(GeoError::DegenerateLine {
            reason: "line has zero length",
        });
    }
    let denom = cross(d1, d2);
    if (denom / (n1 * n2)).abs() < cfg.eps_parallel {
        return Err(GeoError::ParallelLines);
    }
    let t = cross(c - a, d2) / denom;
    Ok(a + d1 * t)
}

/// Orthogonal projection of `p` onto the infinite line AB.
pub fn foot_of_perpendicular(p: Coord, a: Coord, b: Coord, cfg: GeomCfg) -> GeoResult<Coord> {
    let d = b - a;
    let len2 = d.norm_squared();
    if len2.sqrt() < cfg.eps_dedup {
        return Err(GeoError::DegenerateLine {
            reason: "base line has zero length",
        });
    }
    let t = (p - a).dot(&d) / len2;
    Ok(a + d * t)
}

/// Center of the circle through `a`, `b`, `c`.
///
/// Intersects the perpendicular bisectors of AB and BC. Collinear input is
/// reported as `ParallelLines`; coincident points as `DegenerateLine`.
pub fn circumcenter(a: Coord, b: Coord, c: Coord, cfg: GeomCfg) -> GeoResult<Coord> {
    let m1 = midpoint(a, b);
    let m2 = midpoint(b, c);
    let e1 = b - a;
    let e2 = c - b;
    let n1 = Vector2::new(-e1.y, e1.x);
    let n2 = Vector2::new(-e2.y, e2.x);
    intersect_lines(m1, m1 + n1, m2, m2 + n2, cfg)
}
