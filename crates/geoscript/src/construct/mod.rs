//! Construction operations.
//!
//! Purpose
//! - The public operators of a session (points, lines, shapes, measures,
//!   transforms, edits), each composing the `geom2` kernel and mutating the
//!   registry.
//!
//! Atomicity
//! - Each operation resolves and validates all of its references, computes all
//!   geometry and checks all target names before the first insert. Any
//!   failure therefore leaves the registry unchanged.
//!
//! Split by concern: `points.rs`, `lines.rs`, `shapes.rs`, `measure.rs`,
//! `transform.rs`, `edit.rs`.

mod edit;
mod lines;
mod measure;
mod points;
mod shapes;
mod transform;

use std::fmt;

pub use measure::AngleMeasure;
pub use shapes::CircleSpec;

use crate::error::{GeoError, GeoResult};
use crate::geom2::fmt_num;
use crate::registry::Entity;
use crate::session::{Session, MAX_VERTICES};

/// Result of an operation as seen by a script.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Name of the created or modified entity.
    Name(String),
    /// Numeric measurement (Distance).
    Number(f64),
    /// Display string (Angle).
    Text(String),
    /// Operations that only change session state.
    Unit,
}

impl Value {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Name(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Name(n) => write!(f, "{}", n),
            Value::Number(v) => write!(f, "{}", fmt_num(*v)),
            Value::Text(t) => write!(f, "{}", t),
            Value::Unit => write!(f, "()"),
        }
    }
}

/// Reject vertex or segment counts above `MAX_VERTICES` before allocating.
pub(crate) fn check_vertex_count(what: &str, n: usize) -> GeoResult<()> {
    if n > MAX_VERTICES {
        return Err(GeoError::invalid(format!(
            "{} exceeds the limit of {} vertices, got {}",
            what, MAX_VERTICES, n
        )));
    }
    Ok(())
}

impl Session {
    /// Explicit name (must be free) or the next generated `prefix<k>`.
    pub(crate) fn claim_name(&self, name: Option<&str>, prefix: &str) -> GeoResult<String> {
        match name {
            Some(n) => {
                self.registry.check_free(n)?;
                Ok(n.to_string())
            }
            None => Ok(self.registry.generate_name(prefix)),
        }
    }

    /// Insert a fully built entity.
    pub(crate) fn commit(&mut self, name: String, entity: Entity) -> GeoResult<String> {
        tracing::debug!(name = %name, kind = entity.kind(), "insert");
        self.registry.insert(&name, entity)?;
        Ok(name)
    }
}

#[cfg(test)]
mod tests;
