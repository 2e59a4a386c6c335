//! Entity kinds stored in the registry.
//!
//! Kept small and explicit; every drawable is a `Point`, a `Curve` (any
//! polyline, closed or open) or a `Text` label.

use crate::error::{GeoError, GeoResult};
use crate::geom2::{close_ring, Affine2, Coord, GeomCfg};

pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Line dash pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

impl StrokeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeStyle::Solid => "solid",
            StrokeStyle::Dashed => "dashed",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub style: StrokeStyle,
}

impl Stroke {
    pub fn solid(color: &str) -> Self {
        Self {
            color: color.to_string(),
            width: DEFAULT_STROKE_WIDTH,
            style: StrokeStyle::Solid,
        }
    }
    pub fn dashed(color: &str) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            ..Self::solid(color)
        }
    }
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointEntity {
    pub coord: Coord,
    pub color: String,
}

/// Polyline with at least two vertices.
///
/// Invariants:
/// - `vertices.len() >= 2`.
/// - `closed` implies first == last (within `eps_dedup`).
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    vertices: Vec<Coord>,
    closed: bool,
    pub stroke: Stroke,
    pub fill: Option<String>,
    pub tooltip: Option<String>,
}

impl Curve {
    /// Open polyline.
    pub fn open(vertices: Vec<Coord>, stroke: Stroke) -> GeoResult<Self> {
        check_vertices(&vertices, 2)?;
        Ok(Self {
            vertices,
            closed: false,
            stroke,
            fill: None,
            tooltip: None,
        })
    }

    /// Closed ring; the first vertex is appended when the ring is not yet closed.
    pub fn closed(mut vertices: Vec<Coord>, stroke: Stroke, cfg: GeomCfg) -> GeoResult<Self> {
        check_vertices(&vertices, 2)?;
        close_ring(&mut vertices, cfg);
        Ok(Self {
            vertices,
            closed: true,
            stroke,
            fill: None,
            tooltip: None,
        })
    }

    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = Some(fill.to_string());
        self
    }

    pub fn with_tooltip(mut self, tooltip: String) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    #[inline]
    pub fn vertices(&self) -> &[Coord] {
        &self.vertices
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// First two vertices: the defining points of a line-like curve.
    #[inline]
    pub fn endpoints(&self) -> (Coord, Coord) {
        (self.vertices[0], self.vertices[1])
    }

    /// Vertices of the ring without the repeated closing vertex.
    pub fn ring(&self) -> &[Coord] {
        if self.closed {
            &self.vertices[..self.vertices.len() - 1]
        } else {
            &self.vertices
        }
    }
}

fn check_vertices(vertices: &[Coord], needed: usize) -> GeoResult<()> {
    if vertices.len() < needed {
        return Err(GeoError::TooFewVertices {
            needed,
            got: vertices.len(),
        });
    }
    if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
        return Err(GeoError::invalid("non-finite vertex coordinate"));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextEntity {
    pub coord: Coord,
    pub content: String,
    pub font_size: f64,
    pub color: String,
    pub background: Option<String>,
}

impl TextEntity {
    pub fn label(coord: Coord, content: String) -> Self {
        Self {
            coord,
            content,
            font_size: DEFAULT_FONT_SIZE,
            color: "#000".to_string(),
            background: None,
        }
    }
}

/// A named geometric object.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Point(PointEntity),
    Curve(Curve),
    Text(TextEntity),
}

impl Entity {
    pub fn point(coord: Coord, color: &str) -> Self {
        Entity::Point(PointEntity {
            coord,
            color: color.to_string(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Point(_) => "point",
            Entity::Curve(c) if c.is_closed() => "polygon",
            Entity::Curve(_) => "line",
            Entity::Text(_) => "text",
        }
    }

    /// Every coordinate the entity occupies (used for autoscaling).
    pub fn coords(&self) -> &[Coord] {
        match self {
            Entity::Point(p) => std::slice::from_ref(&p.coord),
            Entity::Curve(c) => c.vertices(),
            Entity::Text(t) => std::slice::from_ref(&t.coord),
        }
    }

    /// Apply an affine map to every coordinate in place.
    ///
    /// Affine maps send a closed ring to a closed ring, so curve invariants hold.
    pub fn map_coords(&mut self, f: &Affine2) {
        match self {
            Entity::Point(p) => p.coord = f.apply(p.coord),
            Entity::Curve(c) => {
                for v in c.vertices.iter_mut() {
                    *v = f.apply(*v);
                }
            }
            Entity::Text(t) => t.coord = f.apply(t.coord),
        }
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.coords().iter().all(|c| c.x.is_finite() && c.y.is_finite())
    }

    pub fn tooltip_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Entity::Curve(c) => Some(&mut c.tooltip),
            _ => None,
        }
    }
}

/// Tooltip markup: bold title followed by `<br>`-separated detail lines.
pub fn tooltip(title: &str, details: &[String]) -> String {
    let mut out = format!("<strong>{}</strong>", title);
    for d in details {
        out.push_str("<br>");
        out.push_str(d);
    }
    out
}

/// Replace the tooltip title quoting `old` by `new`; other text is kept.
pub(crate) fn retitle_tooltip(tip: &mut String, old: &str, new: &str) {
    let old_head = format!("<strong>{}</strong>", old);
    if let Some(rest) = tip.strip_prefix(&old_head) {
        *tip = format!("<strong>{}</strong>{}", new, rest);
    }
}
