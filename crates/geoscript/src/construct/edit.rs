use crate::error::{GeoError, GeoResult};
use crate::registry::Entity;
use crate::render::AxisLimits;
use crate::session::Session;

impl Session {
    /// Change an element's color.
    ///
    /// Points and text change their color; curves change their stroke and,
    /// when they have one, their fill.
    pub fn recolor(&mut self, element: &str, color: &str) -> GeoResult<String> {
        if color.is_empty() {
            return Err(GeoError::invalid("empty color"));
        }
        match self.registry.require_mut(element)? {
            Entity::Point(p) => p.color = color.to_string(),
            Entity::Curve(c) => {
                c.stroke.color = color.to_string();
                if c.fill.is_some() {
                    c.fill = Some(color.to_string());
                }
            }
            Entity::Text(t) => t.color = color.to_string(),
        }
        tracing::debug!(name = element, color, "recolor");
        Ok(element.to_string())
    }

    /// Move an element to a new name; returns the new name.
    pub fn rename(&mut self, old: &str, new: &str) -> GeoResult<String> {
        self.registry.rename(old, new)?;
        tracing::debug!(old, new, "rename");
        Ok(new.to_string())
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Session-level axis window, taking precedence over autoscaling and
    /// per-call limits.
    pub fn set_axis_limits(&mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> GeoResult<()> {
        for (what, v) in [("minX", min_x), ("maxX", max_x), ("minY", min_y), ("maxY", max_y)] {
            if !v.is_finite() {
                return Err(GeoError::invalid(format!("{} must be finite, got {}", what, v)));
            }
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(GeoError::invalid(format!(
                "axis limits need min < max, got x [{}, {}], y [{}, {}]",
                min_x, max_x, min_y, max_y
            )));
        }
        self.axis_override = Some(AxisLimits::full(min_x, max_x, min_y, max_y));
        Ok(())
    }

    pub fn set_axes_visible(&mut self, visible: bool) {
        self.axes_visible = visible;
    }
}
