//! Session state and configuration.
//!
//! A `Session` is one evaluation's worth of state: the registry, the chart
//! title, the session-level axis override and the axis visibility flag. It is
//! an explicit value: callers that evaluate scripts concurrently create one
//! session per evaluation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::geom2::{GeomCfg, ViewBox};
use crate::registry::Registry;
use crate::render::AxisLimits;
use crate::script::{self, Evaluation, ScriptError};

/// Upper bound on sampled or generated vertices per curve.
pub const MAX_VERTICES: usize = 10_000;

/// What the interpreter does when a command fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failing command and return its error.
    #[default]
    Abort,
    /// Log the failure, record it as a diagnostic and continue.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(format!("unknown error policy \"{}\" (abort|skip)", other)),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionCfg {
    pub geom: GeomCfg,
    /// Window used to clip infinite lines when no axis override is set, and
    /// the chart window of an empty registry.
    pub default_view: ViewBox,
    /// Units added on every side of the autoscaled bounding box.
    pub padding: f64,
    /// Segments used to sample circles and ellipses.
    pub curve_segments: usize,
    /// Segments of an angle marker arc.
    pub arc_segments: usize,
    /// Radius of an angle marker arc; its label sits at 1.5× this radius.
    pub arc_radius: f64,
    pub label_font_size: f64,
    pub on_error: ErrorPolicy,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            geom: GeomCfg::default(),
            default_view: ViewBox::default(),
            padding: 1.0,
            curve_segments: 100,
            arc_segments: 20,
            arc_radius: 1.0,
            label_font_size: 14.0,
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl SessionCfg {
    /// Reject settings that would produce non-finite geometry or unbounded
    /// sampling.
    pub fn validate(&self) -> GeoResult<()> {
        for (what, n) in [
            ("curveSegments", self.curve_segments),
            ("arcSegments", self.arc_segments),
        ] {
            if n == 0 || n > MAX_VERTICES {
                return Err(GeoError::invalid(format!(
                    "{} must be in 1..={}, got {}",
                    what, MAX_VERTICES, n
                )));
            }
        }
        for (what, v) in [
            ("arcRadius", self.arc_radius),
            ("labelFontSize", self.label_font_size),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(GeoError::invalid(format!("{} must be positive, got {}", what, v)));
            }
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(GeoError::invalid(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) cfg: SessionCfg,
    pub(crate) registry: Registry,
    pub(crate) title: String,
    pub(crate) axis_override: Option<AxisLimits>,
    pub(crate) axes_visible: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionCfg::default())
    }
}

impl Session {
    pub fn new(cfg: SessionCfg) -> Self {
        Self {
            cfg,
            registry: Registry::new(),
            title: String::new(),
            axis_override: None,
            axes_visible: true,
        }
    }

    /// Reset registry, title, axis override and visibility together.
    pub fn init(&mut self) {
        self.registry.clear();
        self.title.clear();
        self.axis_override = None;
        self.axes_visible = true;
    }

    #[inline]
    pub fn cfg(&self) -> &SessionCfg {
        &self.cfg
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn axis_override(&self) -> Option<&AxisLimits> {
        self.axis_override.as_ref()
    }

    #[inline]
    pub fn axes_visible(&self) -> bool {
        self.axes_visible
    }

    /// Window used for clipping: the default view with each overridden bound replaced.
    pub fn current_view(&self) -> ViewBox {
        match &self.axis_override {
            Some(limits) => limits.apply_to(self.cfg.default_view),
            None => self.cfg.default_view,
        }
    }

    /// Reset, run `source` through the interpreter and render the result.
    pub fn evaluate(&mut self, source: &str) -> Result<Evaluation, ScriptError> {
        self.init();
        script::run(self, source, None)
    }

    /// Like `evaluate`, rendering with per-call axis limits (the script's own
    /// `AxisLimits` command still takes precedence).
    pub fn evaluate_with_limits(&mut self, source: &str, limits: &AxisLimits) -> Result<Evaluation, ScriptError> {
        self.init();
        script::run(self, source, Some(limits))
    }
}
