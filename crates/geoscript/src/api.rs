//! Curated API surface.
//!
//! Important
//! - Prefer these re-exports over reaching into module internals; the module
//!   layout below may be reshuffled without notice.

// Kernel
pub use crate::geom2::{
    centroid, circumcenter, clip_line_to_box, distance, foot_of_perpendicular, intersect_lines,
    sample_arc, sample_circle, sample_ellipse, Affine2, Coord, GeomCfg, LineDir, ViewBox,
};
// Registry
pub use crate::registry::{Curve, Entity, PointEntity, Ref, Registry, Stroke, StrokeStyle, TextEntity};
// Operations and session
pub use crate::construct::{AngleMeasure, CircleSpec, Value};
pub use crate::error::{GeoError, GeoResult};
pub use crate::session::{ErrorPolicy, Session, SessionCfg};
// Rendering
pub use crate::render::{window, Axis, AxisLimits, ChartConfig, Series, SeriesKind, SeriesStyle};
// Scripts
pub use crate::script::{
    check, lookup, parse, Arg, Command, Diagnostic, Evaluation, OpSpec, Outcome, ScriptError,
    ScriptErrorKind, OPS,
};
