mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use geoscript::render::AxisLimits;
use geoscript::script::{self, OPS};
use geoscript::{ErrorPolicy, Session, SessionCfg};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geoscript")]
#[command(about = "Evaluate geometric construction scripts into chart JSON", version)]
struct Cmd {
    /// Log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log filter directive (e.g. `geoscript=debug`); beats -v and RUST_LOG
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate a script and write the chart configuration
    Run {
        /// Script file, or `-` for stdin
        script: String,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Failing commands: abort (default) or skip
        #[arg(long)]
        on_error: Option<ErrorPolicy>,
        /// Axis limits `minX,maxX,minY,maxY`; empty fields keep the computed bound
        #[arg(long, value_parser = parse_limits, allow_hyphen_values = true)]
        limits: Option<AxisLimits>,
        /// Padding around the autoscaled bounding box
        #[arg(long)]
        padding: Option<f64>,
        /// Session settings as JSON (see `SessionCfg`)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip the provenance sidecar next to `--out`
        #[arg(long)]
        no_provenance: bool,
    },
    /// Parse a script and resolve operation names without running it
    Check {
        /// Script file, or `-` for stdin
        script: String,
    },
    /// List the available operations
    Ops,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = match &cmd.log {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid --log filter \"{}\"", directive))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Run {
            script,
            out,
            pretty,
            on_error,
            limits,
            padding,
            config,
            no_provenance,
        } => {
            let mut cfg = load_cfg(config.as_deref())?;
            if let Some(policy) = on_error {
                cfg.on_error = policy;
            }
            if let Some(p) = padding {
                if !p.is_finite() || p < 0.0 {
                    bail!("--padding must be a non-negative number, got {}", p);
                }
                cfg.padding = p;
            }
            run(&script, cfg, limits, out, pretty, !no_provenance)
        }
        Action::Check { script } => check(&script),
        Action::Ops => ops(),
    }
}

fn read_script(path: &str) -> Result<String> {
    if path == "-" {
        let mut src = String::new();
        std::io::stdin()
            .read_to_string(&mut src)
            .context("reading script from stdin")?;
        Ok(src)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading script {}", path))
    }
}

fn load_cfg(path: Option<&Path>) -> Result<SessionCfg> {
    match path {
        None => Ok(SessionCfg::default()),
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            let cfg: SessionCfg = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", p.display()))?;
            cfg.validate()
                .with_context(|| format!("invalid config {}", p.display()))?;
            Ok(cfg)
        }
    }
}

fn run(
    script_path: &str,
    cfg: SessionCfg,
    limits: Option<AxisLimits>,
    out: Option<PathBuf>,
    pretty: bool,
    provenance: bool,
) -> Result<()> {
    let src = read_script(script_path)?;
    tracing::info!(script = script_path, on_error = %cfg.on_error, "run");
    let params = serde_json::json!({
        "session": &cfg,
        "limits": &limits,
    });
    let mut session = Session::new(cfg);
    let ev = match &limits {
        Some(l) => session.evaluate_with_limits(&src, l),
        None => session.evaluate(&src),
    }
    .with_context(|| format!("evaluating {}", script_path))?;
    for o in &ev.outcomes {
        tracing::debug!(line = o.line, op = o.op, value = %o.value, "outcome");
    }
    for d in &ev.diagnostics {
        eprintln!("skipped {}", d.message);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&ev.chart)?
    } else {
        serde_json::to_string(&ev.chart)?
    };
    match out {
        None => println!("{}", json),
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            if provenance {
                let payload = provenance::Payload::new(params)
                    .with_input(script_path)
                    .with_diagnostics(serde_json::to_value(&ev.diagnostics)?);
                let prov = provenance::write_sidecar(&path, payload)?;
                tracing::info!(chart = %path.display(), provenance = %prov.display(), "wrote");
            }
        }
    }
    Ok(())
}

fn check(script_path: &str) -> Result<()> {
    let src = read_script(script_path)?;
    let commands = script::check(&src).with_context(|| format!("checking {}", script_path))?;
    println!("{}: {} commands ok", script_path, commands.len());
    Ok(())
}

fn ops() -> Result<()> {
    for op in OPS {
        if op.aliases.is_empty() {
            println!("{:<14} {}", op.name, op.usage);
        } else {
            println!("{:<14} {}  (also: {})", op.name, op.usage, op.aliases.join(", "));
        }
    }
    Ok(())
}

/// Parse `minX,maxX,minY,maxY`; an empty field leaves that bound unset.
fn parse_limits(s: &str) -> Result<AxisLimits, String> {
    let fields: Vec<&str> = s.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 comma-separated values, got {}", fields.len()));
    }
    let mut bounds = [None; 4];
    for (slot, field) in bounds.iter_mut().zip(&fields) {
        if field.is_empty() {
            continue;
        }
        let v: f64 = field
            .parse()
            .map_err(|_| format!("not a number: \"{}\"", field))?;
        if !v.is_finite() {
            return Err(format!("not a finite number: \"{}\"", field));
        }
        *slot = Some(v);
    }
    let [min_x, max_x, min_y, max_y] = bounds;
    for (lo, hi, axis) in [(min_x, max_x, "x"), (min_y, max_y, "y")] {
        if let (Some(lo), Some(hi)) = (lo, hi) {
            if lo >= hi {
                return Err(format!("{} minimum must be below its maximum", axis));
            }
        }
    }
    Ok(AxisLimits {
        min_x,
        max_x,
        min_y,
        max_y,
    })
}
