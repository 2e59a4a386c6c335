//! Basic 2D types and tolerances used by the construction kernel.
//!
//! - `GeomCfg`: centralizes epsilons for parallelism, deduplication and area checks.
//! - `ViewBox`: axis-aligned window used for clipping infinite lines and for layout.
//! - `Affine2`: 2D affine map used by translate/rotate/reflect.
//!
//! Code cross-refs: `solvers::{clip_line_to_box,intersect_lines}`, `construct::transform`

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// A position (or direction) in the plane.
pub type Coord = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    /// Slopes closer than this are treated as parallel (normalized cross product).
    pub eps_parallel: f64,
    /// Coordinates closer than this (per axis) are the same point.
    pub eps_dedup: f64,
    /// Signed areas below this fall back to the vertex mean.
    pub eps_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_parallel: 1e-9,
            eps_dedup: 1e-9,
            eps_area: 1e-9,
        }
    }
}

impl GeomCfg {
    /// Per-axis coincidence test.
    #[inline]
    pub fn same_point(&self, a: Coord, b: Coord) -> bool {
        (a.x - b.x).abs() < self.eps_dedup && (a.y - b.y).abs() < self.eps_dedup
    }
}

/// Axis-aligned window `[min_x, max_x] × [min_y, max_y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::new(-10.0, 10.0, -10.0, 10.0)
    }
}

impl ViewBox {
    #[inline]
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
    #[inline]
    pub fn center(&self) -> Coord {
        Vector2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min_x && x <= self.max_x
    }
    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.min_y && y <= self.max_y
    }
    /// Smallest box holding every point, or `None` for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Coord>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Self::new(first.x, first.x, first.y, first.y);
        for p in it {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Shift by `(dx, dy)`.
    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::new(dx, dy),
        }
    }

    /// Counterclockwise rotation by `degrees` about `pivot`.
    ///
    /// `x ↦ R (x - p) + p`, so `t = p - R p`.
    pub fn rotation_about(pivot: Coord, degrees: f64) -> Self {
        let th = degrees.to_radians();
        let (s, c) = th.sin_cos();
        let m = Matrix2::new(c, -s, s, c);
        Self {
            m,
            t: pivot - m * pivot,
        }
    }

    /// Point reflection through `mirror`: `x ↦ 2 m - x`.
    #[inline]
    pub fn point_reflection(mirror: Coord) -> Self {
        Self {
            m: -Matrix2::identity(),
            t: mirror * 2.0,
        }
    }

    #[inline]
    pub fn apply(&self, p: Coord) -> Coord {
        self.m * p + self.t
    }

    /// Inverse map if `m` is invertible.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    /// Composition `self ∘ other`.
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }
}
