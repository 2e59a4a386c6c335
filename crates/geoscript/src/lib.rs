//! Scripted 2D geometric construction.
//!
//! A script is a list of calls such as `Punkt(0, 0, "A")` or
//! `Circle(M, 3)`. Each call mutates a `Session` (a registry of named
//! points, curves and labels); the final registry compiles to a
//! `ChartConfig`, a plain data description of the picture that a chart
//! frontend can draw.
//!
//! Layers, bottom-up:
//! - `geom2`: numeric kernel over `nalgebra::Vector2<f64>`.
//! - `registry`: name → entity map with collision-safe naming.
//! - `construct`: the operations, as methods on `Session`.
//! - `render`: window computation and chart compilation.
//! - `script`: tokenizer, parser and the dispatch table.
//!
//! API Policy
//! - `api` and `prelude` are the intended import surfaces. Module internals may
//!   change between versions.

pub mod api;
pub mod construct;
pub mod error;
pub mod geom2;
pub mod registry;
pub mod render;
pub mod script;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeoError, GeoResult};
pub use geom2::{Coord, GeomCfg};
pub use session::{ErrorPolicy, Session, SessionCfg};

/// Common exports for scripts driven from Rust.
pub mod prelude {
    pub use crate::construct::{CircleSpec, Value};
    pub use crate::error::{GeoError, GeoResult};
    pub use crate::geom2::{Coord, GeomCfg, ViewBox};
    pub use crate::registry::{Entity, Ref};
    pub use crate::render::{AxisLimits, ChartConfig};
    pub use crate::script::{Evaluation, ScriptError};
    pub use crate::session::{ErrorPolicy, Session, SessionCfg};
    pub use nalgebra::{vector, Vector2 as Vec2};
}
