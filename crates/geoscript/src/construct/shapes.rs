use crate::error::{GeoError, GeoResult};
use crate::geom2::{
    circumcenter, distance, fmt2, fmt_coord, fmt_num, regular_polygon, sample_circle,
    sample_ellipse, Coord,
};
use crate::registry::{tooltip, Curve, Entity, Ref, Stroke};
use crate::session::Session;

use super::check_vertex_count;

const POLYGON_STROKE: &str = "#0A0";
const POLYGON_FILL: &str = "rgba(0,170,0,0.3)";

/// How a circle's radius is given.
#[derive(Clone, Debug, PartialEq)]
pub enum CircleSpec {
    /// Explicit radius.
    Radius(f64),
    /// Length of an existing line-like curve (first two vertices).
    Segment(String),
    /// A point on the circumference.
    Through(Ref),
}

fn check_positive(what: &str, v: f64) -> GeoResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(GeoError::invalid(format!(
            "{} must be positive and finite, got {}",
            what, v
        )));
    }
    Ok(())
}

impl Session {
    /// Closed polygon through at least three point refs (auto-named `Polygon<k>`).
    pub fn polygon(&mut self, refs: &[Ref], name: Option<&str>) -> GeoResult<String> {
        if refs.len() < 3 {
            return Err(GeoError::TooFewVertices {
                needed: 3,
                got: refs.len(),
            });
        }
        let pts = self.resolve_points(refs)?;
        let name = self.claim_name(name, "Polygon")?;
        let tip = tooltip(&name, &[format!("Vertices: {}", pts.len())]);
        let curve = Curve::closed(pts, Stroke::solid(POLYGON_STROKE), self.cfg.geom)?
            .with_fill(POLYGON_FILL)
            .with_tooltip(tip);
        self.commit(name, Entity::Curve(curve))
    }

    /// Regular `n`-gon around `center` with one vertex at `vertex`
    /// (auto-named `RegularPolygon<k>`).
    ///
    /// With `direction` the first vertex is placed along that vector instead,
    /// keeping the radius `|vertex - center|`.
    pub fn regular_polygon(
        &mut self,
        center: &Ref,
        vertex: &Ref,
        n: usize,
        direction: Option<&Ref>,
        name: Option<&str>,
    ) -> GeoResult<String> {
        if n < 3 {
            return Err(GeoError::TooFewVertices { needed: 3, got: n });
        }
        check_vertex_count("regular polygon", n)?;
        let c = self.registry.lookup_point(center)?;
        let v = self.registry.lookup_point(vertex)?;
        let radius = distance(c, v);
        if radius < self.cfg.geom.eps_dedup {
            return Err(GeoError::invalid("center and vertex coincide"));
        }
        let heading: Coord = match direction {
            None => v - c,
            Some(Ref::Vector(d)) | Some(Ref::Coord(d)) => *d,
            Some(other) => {
                return Err(GeoError::InvalidReference {
                    found: other.to_string(),
                    expected: "a direction <dx, dy>",
                })
            }
        };
        if !heading.x.is_finite() || !heading.y.is_finite() || heading.norm() < self.cfg.geom.eps_dedup {
            return Err(GeoError::invalid("direction must be a non-zero finite vector"));
        }
        let start = heading.y.atan2(heading.x);
        let pts = regular_polygon(c, radius, start, n);
        let name = self.claim_name(name, "RegularPolygon")?;
        let tip = tooltip(
            &name,
            &[
                format!("Center: {}", fmt_coord(c)),
                format!("Radius: {}", fmt2(radius)),
                format!("Vertices: {}", n),
            ],
        );
        let curve = Curve::closed(pts, Stroke::solid(POLYGON_STROKE), self.cfg.geom)?
            .with_fill(POLYGON_FILL)
            .with_tooltip(tip);
        self.commit(name, Entity::Curve(curve))
    }

    /// Sampled circle (auto-named `Circle<k>`).
    pub fn circle(&mut self, center: &Ref, spec: &CircleSpec, name: Option<&str>) -> GeoResult<String> {
        let c = self.registry.lookup_point(center)?;
        let radius = match spec {
            CircleSpec::Radius(r) => *r,
            CircleSpec::Segment(s) => {
                let (a, b) = self.registry.curve(s)?.endpoints();
                distance(a, b)
            }
            CircleSpec::Through(p) => distance(c, self.registry.lookup_point(p)?),
        };
        check_positive("radius", radius)?;
        self.insert_circle(c, radius, name)
    }

    /// Circle through three points, centered at their circumcenter.
    ///
    /// Collinear points fail with `ParallelLines` (the bisectors never meet).
    pub fn circle_through(&mut self, a: &Ref, b: &Ref, c: &Ref, name: Option<&str>) -> GeoResult<String> {
        let a = self.registry.lookup_point(a)?;
        let b = self.registry.lookup_point(b)?;
        let c = self.registry.lookup_point(c)?;
        let center = circumcenter(a, b, c, self.cfg.geom)?;
        let radius = distance(a, center);
        check_positive("radius", radius)?;
        self.insert_circle(center, radius, name)
    }

    fn insert_circle(&mut self, center: Coord, radius: f64, name: Option<&str>) -> GeoResult<String> {
        check_vertex_count("curve segments", self.cfg.curve_segments)?;
        let pts = sample_circle(center, radius, self.cfg.curve_segments);
        let name = self.claim_name(name, "Circle")?;
        let tip = tooltip(
            &name,
            &[
                format!("Center: {}", fmt_coord(center)),
                format!("Radius: {}", fmt2(radius)),
            ],
        );
        let curve = Curve::closed(pts, Stroke::solid("#00F"), self.cfg.geom)?
            .with_fill("rgba(0,0,255,0.1)")
            .with_tooltip(tip);
        self.commit(name, Entity::Curve(curve))
    }

    /// Sampled ellipse with semi-axes `rx`, `ry`, rotated counterclockwise by
    /// `rotation_deg` (auto-named `Ellipse<k>`).
    pub fn ellipse(
        &mut self,
        center: &Ref,
        rx: f64,
        ry: f64,
        rotation_deg: f64,
        name: Option<&str>,
    ) -> GeoResult<String> {
        let c = self.registry.lookup_point(center)?;
        check_positive("rx", rx)?;
        check_positive("ry", ry)?;
        if !rotation_deg.is_finite() {
            return Err(GeoError::invalid("rotation must be finite"));
        }
        check_vertex_count("curve segments", self.cfg.curve_segments)?;
        let pts = sample_ellipse(c, rx, ry, rotation_deg, self.cfg.curve_segments);
        let name = self.claim_name(name, "Ellipse")?;
        let tip = tooltip(
            &name,
            &[
                format!("Center: {}", fmt_coord(c)),
                format!("rx: {}, ry: {}", fmt_num(rx), fmt_num(ry)),
                format!("Rotation: {}°", fmt_num(rotation_deg)),
            ],
        );
        let curve = Curve::closed(pts, Stroke::solid("#800080"), self.cfg.geom)?
            .with_fill("rgba(128,0,128,0.1)")
            .with_tooltip(tip);
        self.commit(name, Entity::Curve(curve))
    }
}
