//! Construction script interpreter.
//!
//! Purpose
//! - Turn script text into an ordered list of `(operation, args)` commands
//!   and run them one at a time against a `Session` through a fixed dispatch
//!   table. Nothing in a script is evaluated as host code.
//!
//! Pipeline: `lexer` → `parser` (whole script, syntax errors are fatal) →
//! `interp` (per-command dispatch; failures follow `SessionCfg::on_error`) →
//! `Session::render`.
//!
//! Results of earlier commands can be bound to identifiers
//! (`let g = Line(A, B)`) and used as later arguments.

mod error;
mod interp;
mod lexer;
mod parser;

use std::collections::HashMap;

use serde::Serialize;

pub use error::{ScriptError, ScriptErrorKind};
pub use interp::{lookup, OpSpec, OPS};
pub use parser::{parse, Arg, Command};

use crate::construct::Value;
use crate::render::{AxisLimits, ChartConfig};
use crate::session::{ErrorPolicy, Session};

use interp::Args;

/// Result of one successful command.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub line: usize,
    pub op: &'static str,
    pub value: Value,
}

/// A command skipped under `ErrorPolicy::Skip`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: &'static str,
    pub message: String,
}

impl From<&ScriptError> for Diagnostic {
    fn from(e: &ScriptError) -> Self {
        let kind = match &e.kind {
            ScriptErrorKind::Syntax { .. } => "Syntax",
            ScriptErrorKind::UnknownOp { .. } => "UnknownOp",
            ScriptErrorKind::Usage { .. } => "Usage",
            ScriptErrorKind::Geo { source, .. } => source.kind(),
        };
        Self {
            line: e.line,
            kind,
            message: e.to_string(),
        }
    }
}

/// Everything one evaluation produced.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub chart: ChartConfig,
    pub outcomes: Vec<Outcome>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse `source` and resolve every operation name without running anything.
pub fn check(source: &str) -> Result<Vec<Command>, ScriptError> {
    let commands = parse(source)?;
    for cmd in &commands {
        resolve(cmd)?;
    }
    Ok(commands)
}

fn resolve(cmd: &Command) -> Result<&'static OpSpec, ScriptError> {
    lookup(&cmd.op).ok_or_else(|| {
        ScriptError::new(
            cmd.line,
            ScriptErrorKind::UnknownOp {
                name: cmd.op.clone(),
            },
        )
    })
}

/// Run `source` against `session` (without resetting it) and render.
pub(crate) fn run(
    session: &mut Session,
    source: &str,
    limits: Option<&AxisLimits>,
) -> Result<Evaluation, ScriptError> {
    let commands = check(source)?;
    let mut vars: HashMap<String, Value> = HashMap::new();
    let mut outcomes = Vec::with_capacity(commands.len());
    let mut diagnostics = Vec::new();

    for cmd in &commands {
        let spec = resolve(cmd)?;
        let result = Args::bind(cmd, &vars).and_then(|args| spec.call(session, &args));
        match result {
            Ok(value) => {
                if let Some(var) = &cmd.binding {
                    vars.insert(var.clone(), value.clone());
                }
                outcomes.push(Outcome {
                    line: cmd.line,
                    op: spec.name,
                    value,
                });
            }
            Err(e) => {
                let err = e.at(cmd.line, spec.name);
                match session.cfg.on_error {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Skip => {
                        tracing::warn!(line = cmd.line, op = spec.name, error = %err, "skipping command");
                        diagnostics.push(Diagnostic::from(&err));
                    }
                }
            }
        }
    }

    tracing::info!(
        commands = commands.len(),
        skipped = diagnostics.len(),
        entities = session.registry.len(),
        "evaluated script"
    );
    Ok(Evaluation {
        chart: session.render(limits),
        outcomes,
        diagnostics,
    })
}
