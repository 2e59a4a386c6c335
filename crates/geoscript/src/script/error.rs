use std::fmt;

use crate::error::GeoError;

/// What went wrong with one script command.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptErrorKind {
    /// Tokenizer or parser failure.
    Syntax { msg: String },
    /// Operation name not in the dispatch table.
    UnknownOp { name: String },
    /// Wrong number or kind of arguments.
    Usage { op: &'static str, msg: String },
    /// The operation itself failed.
    Geo { op: &'static str, source: GeoError },
}

/// A `ScriptErrorKind` with the 1-based line of the offending command.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptError {
    pub line: usize,
    pub kind: ScriptErrorKind,
}

impl ScriptError {
    pub fn new(line: usize, kind: ScriptErrorKind) -> Self {
        Self { line, kind }
    }

    /// The geometric error, if the operation itself failed.
    pub fn geo(&self) -> Option<&GeoError> {
        match &self.kind {
            ScriptErrorKind::Geo { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ScriptErrorKind::Syntax { msg } => write!(f, "syntax error: {}", msg),
            ScriptErrorKind::UnknownOp { name } => write!(f, "unknown operation `{}`", name),
            ScriptErrorKind::Usage { op, msg } => write!(f, "{}: {}", op, msg),
            ScriptErrorKind::Geo { op, source } => write!(f, "{}: {}", op, source),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ScriptErrorKind::Geo { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure inside a handler, before the line is known.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CallError {
    Usage(String),
    Geo(GeoError),
}

impl From<GeoError> for CallError {
    fn from(e: GeoError) -> Self {
        CallError::Geo(e)
    }
}

impl CallError {
    pub(crate) fn at(self, line: usize, op: &'static str) -> ScriptError {
        let kind = match self {
            CallError::Usage(msg) => ScriptErrorKind::Usage { op, msg },
            CallError::Geo(source) => ScriptErrorKind::Geo { op, source },
        };
        ScriptError::new(line, kind)
    }
}
