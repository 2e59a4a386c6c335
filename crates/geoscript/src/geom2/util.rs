use nalgebra::Vector2;

use super::types::{Coord, GeomCfg};

/// Euclidean distance.
#[inline]
pub fn distance(a: Coord, b: Coord) -> f64 {
    (b - a).norm()
}

#[inline]
pub fn midpoint(a: Coord, b: Coord) -> Coord {
    (a + b) / 2.0
}

/// 2D cross product (z-component) of `u × v`.
#[inline]
pub fn cross(u: Coord, v: Coord) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Arithmetic mean of the points; `None` if empty.
pub fn mean(points: &[Coord]) -> Option<Coord> {
    if points.is_empty() {
        return None;
    }
    let mut acc = Vector2::zeros();
    for &p in points {
        acc += p;
    }
    Some(acc / (points.len() as f64))
}

/// True if the ring's last vertex repeats its first (within `eps_dedup`).
#[inline]
pub fn is_ring_closed(vertices: &[Coord], cfg: GeomCfg) -> bool {
    match (vertices.first(), vertices.last()) {
        (Some(&a), Some(&b)) if vertices.len() > 1 => cfg.same_point(a, b),
        _ => false,
    }
}

/// Append the first vertex unless the ring already ends on it.
pub fn close_ring(vertices: &mut Vec<Coord>, cfg: GeomCfg) {
    if let Some(&first) = vertices.first() {
        if !is_ring_closed(vertices, cfg) {
            vertices.push(first);
        }
    }
}

/// The ring without its repeated closing vertex.
fn open_ring(vertices: &[Coord], cfg: GeomCfg) -> &[Coord] {
    if is_ring_closed(vertices, cfg) {
        &vertices[..vertices.len() - 1]
    } else {
        vertices
    }
}

/// Signed shoelace area of the implicitly closed ring (CCW positive).
pub fn signed_area(vertices: &[Coord], cfg: GeomCfg) -> f64 {
    let ring = open_ring(vertices, cfg);
    let n = ring.len();
    let mut acc = 0.0;
    for i in 0..n {
        acc += cross(ring[i], ring[(i + 1) % n]);
    }
    acc / 2.0
}

/// Area-weighted centroid of the implicitly closed vertex ring.
///
/// Falls back to the vertex mean when `|area| < eps_area` (collinear or
/// otherwise degenerate rings). Returns `None` only for an empty input.
pub fn centroid(vertices: &[Coord], cfg: GeomCfg) -> Option<Coord> {
    let ring = open_ring(vertices, cfg);
    let n = ring.len();
    if n == 0 {
        return None;
    }
    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        let factor = cross(p, q);
        area += factor;
        cx += (p.x + q.x) * factor;
        cy += (p.y + q.y) * factor;
    }
    area /= 2.0;
    if area.abs() < cfg.eps_area {
        return mean(ring);
    }
    Some(Vector2::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Round to two decimals for display (`12.3456 → "12.35"`).
#[inline]
pub fn fmt2(v: f64) -> String {
    format!("{:.2}", v)
}

/// Compact coordinate formatting used in tooltips: `(1, 2.5)`.
pub fn fmt_coord(p: Coord) -> String {
    format!("({}, {})", fmt_num(p.x), fmt_num(p.y))
}

/// Shortest faithful number formatting (`2.0 → "2"`, `-0.0 → "0"`).
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{}", v)
}
