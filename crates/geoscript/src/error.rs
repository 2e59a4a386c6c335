//! Errors surfaced by the kernel, the registry and the construction operations.
//!
//! Every error is local to the operation that reports it: the registry is left
//! exactly as it was before the call.

use std::fmt;

/// Failure of a single geometric operation.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoError {
    /// A referenced name is absent from the registry.
    NotFound { name: String },
    /// An argument resolved to the wrong kind of thing (e.g. a curve where a
    /// point was expected, or a number where a coordinate was expected).
    InvalidReference { found: String, expected: &'static str },
    /// The target name is already taken; the existing entity is untouched.
    NameCollision { name: String },
    /// Two lines with (numerically) equal slopes.
    ParallelLines,
    /// Zero-length direction, a line missing the viewport, or a zero-length base line.
    DegenerateLine { reason: &'static str },
    /// Fewer vertices than the construction needs.
    TooFewVertices { needed: usize, got: usize },
    /// Out-of-range or non-finite numeric input.
    InvalidParameter { reason: String },
}

impl GeoError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GeoError::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// The pre-existing name reported by a collision, if this is one.
    pub fn colliding_name(&self) -> Option<&str> {
        match self {
            GeoError::NameCollision { name } => Some(name),
            _ => None,
        }
    }

    /// Stable short identifier of the error kind (used in diagnostics).
    pub fn kind(&self) -> &'static str {
        match self {
            GeoError::NotFound { .. } => "NotFound",
            GeoError::InvalidReference { .. } => "InvalidReference",
            GeoError::NameCollision { .. } => "NameCollision",
            GeoError::ParallelLines => "ParallelLines",
            GeoError::DegenerateLine { .. } => "DegenerateLine",
            GeoError::TooFewVertices { .. } => "TooFewVertices",
            GeoError::InvalidParameter { .. } => "InvalidParameter",
        }
    }
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::NotFound { name } => write!(f, "element \"{}\" not found", name),
            GeoError::InvalidReference { found, expected } => {
                write!(f, "invalid reference {}: expected {}", found, expected)
            }
            GeoError::NameCollision { name } => write!(f, "name \"{}\" is already taken", name),
            GeoError::ParallelLines => write!(f, "lines are parallel"),
            GeoError::DegenerateLine { reason } => write!(f, "degenerate line: {}", reason),
            GeoError::TooFewVertices { needed, got } => {
                write!(f, "need at least {} vertices, got {}", needed, got)
            }
            GeoError::InvalidParameter { reason } => write!(f, "invalid parameter: {}", reason),
        }
    }
}

impl std::error::Error for GeoError {}

pub type GeoResult<T> = Result<T, GeoError>;
