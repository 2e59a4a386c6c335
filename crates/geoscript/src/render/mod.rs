//! Layout/render compiler.
//!
//! Purpose
//! - Turn the final registry into a `ChartConfig`: one series per entity in
//!   insertion order, an autoscaled (or overridden) square-aspect window, the
//!   title and the axis visibility flag.
//!
//! Rendering is a pure read of the session; calling it twice yields the same
//! config.

mod chart;
mod layout;

pub use chart::{Axis, ChartConfig, Series, SeriesKind, SeriesStyle, DEFAULT_FILL, POINT_SYMBOL_SIZE};
pub use layout::{autoscale, equalize, window, AxisLimits};

use crate::session::Session;

impl Session {
    /// Compile the registry into a chart description.
    ///
    /// `explicit` limits beat autoscaling; the session's own axis override
    /// (`set_axis_limits`) beats both.
    pub fn render(&self, explicit: Option<&AxisLimits>) -> ChartConfig {
        let view = window(
            &self.registry,
            self.cfg.padding,
            self.cfg.default_view,
            explicit,
            self.axis_override.as_ref(),
        );
        let series: Vec<Series> = self
            .registry
            .iter()
            .map(|(name, e)| Series::from_entity(name, e))
            .collect();
        tracing::debug!(series = series.len(), ?view, "render");
        ChartConfig {
            title: (!self.title.is_empty()).then(|| self.title.clone()),
            x_axis: Axis {
                min: view.min_x,
                max: view.max_x,
                show: self.axes_visible,
            },
            y_axis: Axis {
                min: view.min_y,
                max: view.max_y,
                show: self.axes_visible,
            },
            series,
        }
    }
}
