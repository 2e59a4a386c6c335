//! Declarative chart description handed to the plotting front end.
//!
//! Serialized with serde in camelCase; optional style fields are omitted when
//! unset so each series kind carries only what it uses.

use serde::Serialize;

use crate::geom2::{fmt_coord, Coord};
use crate::registry::{Entity, StrokeStyle};

/// Fill used for closed curves that do not carry their own.
pub const DEFAULT_FILL: &str = "rgba(0,170,0,0.3)";
/// Marker diameter of point series.
pub const POINT_SYMBOL_SIZE: f64 = 7.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub show: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    Point,
    Line,
    FilledLine,
    Text,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub data: Vec<[f64; 2]>,
    pub style: SeriesStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

#[inline]
fn xy(c: Coord) -> [f64; 2] {
    [c.x, c.y]
}

impl Series {
    /// One series for one registered entity.
    pub fn from_entity(name: &str, entity: &Entity) -> Self {
        match entity {
            Entity::Point(p) => Series {
                name: name.to_string(),
                kind: SeriesKind::Point,
                data: vec![xy(p.coord)],
                style: SeriesStyle {
                    color: p.color.clone(),
                    symbol_size: Some(POINT_SYMBOL_SIZE),
                    label: Some(name.to_string()),
                    ..SeriesStyle::default()
                },
                tooltip: Some(format!("<strong>{}</strong><br>{}", name, fmt_coord(p.coord))),
            },
            Entity::Curve(c) => {
                let (kind, fill) = if c.is_closed() {
                    let fill = c.fill.clone().unwrap_or_else(|| DEFAULT_FILL.to_string());
                    (SeriesKind::FilledLine, Some(fill))
                } else {
                    (SeriesKind::Line, None)
                };
                Series {
                    name: name.to_string(),
                    kind,
                    data: c.vertices().iter().copied().map(xy).collect(),
                    style: SeriesStyle {
                        color: c.stroke.color.clone(),
                        width: Some(c.stroke.width),
                        line_style: Some(c.stroke.style.as_str()),
                        fill,
                        ..SeriesStyle::default()
                    },
                    tooltip: Some(c.tooltip.clone().unwrap_or_else(|| name.to_string())),
                }
            }
            Entity::Text(t) => Series {
                name: name.to_string(),
                kind: SeriesKind::Text,
                data: vec![xy(t.coord)],
                style: SeriesStyle {
                    color: t.color.clone(),
                    symbol_size: Some(0.0),
                    font_size: Some(t.font_size),
                    background: t.background.clone(),
                    label: Some(t.content.clone()),
                    ..SeriesStyle::default()
                },
                tooltip: None,
            },
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.style.line_style == Some(StrokeStyle::Dashed.as_str())
    }
}
