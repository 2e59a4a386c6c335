use nalgebra::Vector2;

use crate::error::{GeoError, GeoResult};
use crate::geom2::{clip_line_to_box, fmt2, fmt_coord, foot_of_perpendicular, Coord, LineDir};
use crate::registry::{tooltip, Curve, Entity, Ref, Stroke};
use crate::session::Session;

fn endpoints_tooltip(name: &str, a: Coord, b: Coord) -> String {
    tooltip(
        name,
        &[
            format!("Start: {}", fmt_coord(a)),
            format!("End: {}", fmt_coord(b)),
        ],
    )
}

impl Session {
    /// Line between two points (auto-named `Line<k>`).
    pub fn line(&mut self, a: &Ref, b: &Ref, name: Option<&str>) -> GeoResult<String> {
        let a = self.registry.lookup_point(a)?;
        let b = self.registry.lookup_point(b)?;
        let name = self.claim_name(name, "Line")?;
        let curve = Curve::open(vec![a, b], Stroke::solid("#000"))?
            .with_tooltip(endpoints_tooltip(&name, a, b));
        self.commit(name, Entity::Curve(curve))
    }

    /// Segment from a point to a point, or from a point by a length
    /// (auto-named `Segment<k>`).
    ///
    /// - `end = Ref::Number(len)`: horizontal segment of `|len|` units, to the
    ///   right for positive `len` and to the left for negative; the end point
    ///   is materialized as `P_end_<name>`.
    /// - `start = Ref::Coord(..)`: the start point is materialized as
    ///   `P_start_<name>`.
    pub fn segment(&mut self, start: &Ref, end: &Ref, name: Option<&str>) -> GeoResult<String> {
        let a = self.registry.lookup_point(start)?;
        let (b, materialize_end) = match end {
            Ref::Number(len) => {
                if !len.is_finite() || *len == 0.0 {
                    return Err(GeoError::invalid(format!(
                        "segment length must be finite and non-zero, got {}",
                        len
                    )));
                }
                let b = a + Vector2::new(*len, 0.0);
                if !b.x.is_finite() {
                    return Err(GeoError::invalid(format!(
                        "segment end leaves the finite range, length {}",
                        len
                    )));
                }
                (b, true)
            }
            other => (self.registry.lookup_point(other)?, false),
        };
        let name = self.claim_name(name, "Segment")?;
        let curve = Curve::open(vec![a, b], Stroke::solid("#F00"))?
            .with_tooltip(endpoints_tooltip(&name, a, b));

        let start_aux = matches!(start, Ref::Coord(_))
            .then(|| self.registry.unique_name(&format!("P_start_{}", name)));
        let end_aux = materialize_end.then(|| self.registry.unique_name(&format!("P_end_{}", name)));

        if let Some(aux) = start_aux {
            self.commit(aux, Entity::point(a, "red"))?;
        }
        let name = self.commit(name, Entity::Curve(curve))?;
        if let Some(aux) = end_aux {
            self.commit(aux, Entity::point(b, "blue"))?;
        }
        Ok(name)
    }

    /// Infinite line through a point, clipped to the current window
    /// (auto-named `InfLine<k>`).
    ///
    /// The second argument is a point (name or `[x, y]`), a direction
    /// `Ref::Vector`, or the name of an existing line whose direction is reused.
    pub fn infinite_line(&mut self, at: &Ref, second: &Ref, name: Option<&str>) -> GeoResult<String> {
        let p = self.registry.lookup_point(at)?;
        let dir = match second {
            Ref::Name(n) => match self.registry.require(n)? {
                Entity::Point(q) => LineDir::Through(q.coord),
                Entity::Curve(c) => {
                    let (a, b) = c.endpoints();
                    LineDir::Direction(b - a)
                }
                Entity::Text(_) => {
                    return Err(GeoError::InvalidReference {
                        found: second.to_string(),
                        expected: "a point, a line or a direction vector",
                    })
                }
            },
            Ref::Coord(q) => LineDir::Through(*q),
            Ref::Vector(v) => LineDir::Direction(*v),
            Ref::Number(_) => {
                return Err(GeoError::InvalidReference {
                    found: second.to_string(),
                    expected: "a point, a line or a direction vector",
                })
            }
        };
        let view = self.current_view();
        let (e1, e2) = clip_line_to_box(p, dir, &view, self.cfg.geom)?;
        let name = self.claim_name(name, "InfLine")?;
        let tip = tooltip(
            &name,
            &[
                format!("Crossing 1: {}", fmt_coord(e1)),
                format!("Crossing 2: {}", fmt_coord(e2)),
            ],
        );
        let curve = Curve::open(vec![e1, e2], Stroke::dashed("#00F"))?.with_tooltip(tip);
        self.commit(name, Entity::Curve(curve))
    }

    /// Vector arrow from `start` (origin if `None`) to `end` (auto-named `Vector<k>`).
    pub fn vector(&mut self, start: Option<&Ref>, end: &Ref, name: Option<&str>) -> GeoResult<String> {
        let a = match start {
            Some(r) => self.registry.lookup_point(r)?,
            None => Vector2::zeros(),
        };
        let b = self.registry.lookup_point(end)?;
        let name = self.claim_name(name, "Vector")?;
        let d = b - a;
        let tip = tooltip(
            &name,
            &[
                format!("Start: {}", fmt_coord(a)),
                format!("End: {}", fmt_coord(b)),
                format!("Length: {}", fmt2(d.norm())),
                format!("Direction: ({}, {})", fmt2(d.x), fmt2(d.y)),
            ],
        );
        let curve = Curve::open(vec![a, b], Stroke::solid("#FF4500"))?.with_tooltip(tip);
        self.commit(name, Entity::Curve(curve))
    }

    /// Dashed segment from a point to its foot on a line (auto-named `Perpendicular<k>`).
    pub fn perpendicular(&mut self, at: &Ref, line: &Ref, name: Option<&str>) -> GeoResult<String> {
        let p = self.registry.lookup_point(at)?;
        let (a, b) = self.registry.curve_ref(line)?.endpoints();
        let foot = foot_of_perpendicular(p, a, b, self.cfg.geom)?;
        let name = self.claim_name(name, "Perpendicular")?;
        let tip = tooltip(&name, &[format!("Foot: {}", fmt_coord(foot))]);
        let curve = Curve::open(vec![p, foot], Stroke::dashed("#A0A"))?.with_tooltip(tip);
        self.commit(name, Entity::Curve(curve))
    }

    /// Dashed segment from `p` to `p + (B - A)` where AB is the line's first
    /// two vertices (auto-named `Parallel<k>`). Not clipped to the window.
    pub fn parallel(&mut self, at: &Ref, line: &Ref, name: Option<&str>) -> GeoResult<String> {
        let p = self.registry.lookup_point(at)?;
        let (a, b) = self.registry.curve_ref(line)?.endpoints();
        let d = b - a;
        if d.norm() < self.cfg.geom.eps_dedup {
            return Err(GeoError::DegenerateLine {
                reason: "base line has zero length",
            });
        }
        let name = self.claim_name(name, "Parallel")?;
        let q = p + d;
        let curve = Curve::open(vec![p, q], Stroke::dashed("#0AA"))?
            .with_tooltip(endpoints_tooltip(&name, p, q));
        self.commit(name, Entity::Curve(curve))
    }
}
