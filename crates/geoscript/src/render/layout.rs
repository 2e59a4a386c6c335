//! Axis window computation.
//!
//! Order of operations:
//! 1. bounding box of every registered coordinate (the configured default
//!    view when nothing is registered, without padding),
//! 2. padding on all four sides,
//! 3. aspect equalization: the shorter axis grows symmetrically about its
//!    center to the longer span,
//! 4. per-call explicit limits, then the session override, each bound
//!    replaced individually.

use serde::{Deserialize, Serialize};

use crate::geom2::ViewBox;
use crate::registry::Registry;

/// Per-bound axis override; `None` keeps the computed bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisLimits {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

impl AxisLimits {
    pub fn full(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x: Some(min_x),
            max_x: Some(max_x),
            min_y: Some(min_y),
            max_y: Some(max_y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x.is_none() && self.max_x.is_none() && self.min_y.is_none() && self.max_y.is_none()
    }

    /// Replace each bound of `view` that this override sets.
    pub fn apply_to(&self, view: ViewBox) -> ViewBox {
        ViewBox {
            min_x: self.min_x.unwrap_or(view.min_x),
            max_x: self.max_x.unwrap_or(view.max_x),
            min_y: self.min_y.unwrap_or(view.min_y),
            max_y: self.max_y.unwrap_or(view.max_y),
        }
    }
}

/// Padded bounding box of the registry, or `fallback` when it is empty.
pub fn autoscale(registry: &Registry, padding: f64, fallback: ViewBox) -> ViewBox {
    let coords = registry.iter().flat_map(|(_, e)| e.coords().iter().copied());
    match ViewBox::bounding(coords) {
        Some(b) => ViewBox::new(
            b.min_x - padding,
            b.max_x + padding,
            b.min_y - padding,
            b.max_y + padding,
        ),
        None => fallback,
    }
}

/// Expand the shorter axis about its center so both spans match.
pub fn equalize(view: ViewBox) -> ViewBox {
    let (w, h) = (view.width(), view.height());
    let c = view.center();
    if w > h {
        ViewBox::new(view.min_x, view.max_x, c.y - w / 2.0, c.y + w / 2.0)
    } else {
        ViewBox::new(c.x - h / 2.0, c.x + h / 2.0, view.min_y, view.max_y)
    }
}

/// Full window pipeline with override precedence
/// autoscale < `explicit` < `session`.
pub fn window(
    registry: &Registry,
    padding: f64,
    fallback: ViewBox,
    explicit: Option<&AxisLimits>,
    session: Option<&AxisLimits>,
) -> ViewBox {
    let mut view = equalize(autoscale(registry, padding, fallback));
    for limits in [explicit, session].into_iter().flatten() {
        view = limits.apply_to(view);
    }
    view
}
