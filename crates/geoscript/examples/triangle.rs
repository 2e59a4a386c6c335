//! Evaluate a small construction and print the chart JSON.
//!
//! Usage:
//!   cargo run -p geoscript --example triangle
//!   cargo run -p geoscript --example triangle -- skip
//!
//! With `skip`, failing commands are reported and the rest still runs.

use geoscript::prelude::*;

const SCRIPT: &str = r#"
Punkt(0, 0, "A")
Punkt(4, 0, "B")
Punkt(1, 3, "C")
Polygon(A, B, C, "abc")
Mittelpunkt(abc, "S")
Kreis(A, B, C)
Winkel(B, A, C)
Abstand(A, B)
Schnittpunkt(A, B)
Titel("Triangle")
"#;

fn main() {
    let policy = match std::env::args().nth(1).as_deref() {
        Some("skip") => ErrorPolicy::Skip,
        _ => ErrorPolicy::Abort,
    };
    let mut session = Session::new(SessionCfg {
        on_error: policy,
        ..SessionCfg::default()
    });
    match session.evaluate(SCRIPT) {
        Ok(ev) => {
            for o in &ev.outcomes {
                println!("line {:>2} {:<12} -> {}", o.line, o.op, o.value);
            }
            for d in &ev.diagnostics {
                eprintln!("skipped: {}", d.message);
            }
            match serde_json::to_string_pretty(&ev.chart) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("serialize: {}", e),
            }
        }
        Err(e) => eprintln!("error: {}", e),
    }
}
