//! `codescape run` and `codescape check`.

use std::io::Read;
use std::path::Path;
use std::process;

use codescape_core::{transpile, Catalog};
use codescape_eval::{RunReport, Session};

use crate::config::{read_config, CliConfig};
use crate::{fail, OutputFormat};

pub(crate) struct RunOptions<'a> {
    pub config: Option<&'a Path>,
    pub mask: Option<&'a Path>,
    pub radius: Option<u32>,
    pub map: bool,
    pub strict: bool,
}

/// Read a script from `path`, or stdin when `path` is `-`.
fn read_script(path: &Path) -> Result<String, String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("could not read stdin: {}", e))?;
        return Ok(source);
    }
    std::fs::read_to_string(path).map_err(|e| format!("could not read '{}': {}", path.display(), e))
}

pub(crate) fn cmd_run(script: &Path, opts: &RunOptions<'_>, output: OutputFormat, quiet: bool) {
    let config = match opts.config {
        Some(path) => read_config(path).unwrap_or_else(|e| fail(&e, output, quiet)),
        None => CliConfig::default(),
    };
    let (mask, session_config) = config
        .resolve(opts.mask, opts.radius)
        .unwrap_or_else(|e| fail(&e, output, quiet));
    let source = read_script(script).unwrap_or_else(|e| fail(&e, output, quiet));

    tracing::debug!(
        grid = session_config.grid_size,
        land = mask.land_count(),
        radius = session_config.radius(),
        "starting session"
    );
    let mut session = Session::new(mask, &session_config);
    let report = session.run(&source);

    if !quiet {
        match output {
            OutputFormat::Json => {
                let mut json = report.to_json_value();
                if opts.map {
                    json["map"] = serde_json::Value::String(session.render_map());
                }
                print_json(&json);
            }
            OutputFormat::Text => {
                print_report(&report);
                if opts.map {
                    println!();
                    println!("{}", session.render_map());
                }
            }
        }
    }

    if opts.strict && !report.is_clean() {
        process::exit(1);
    }
}

pub(crate) fn cmd_check(script: &Path, output: OutputFormat, quiet: bool) {
    let source = read_script(script).unwrap_or_else(|e| fail(&e, output, quiet));
    let transpiled = transpile(&source, &Catalog::builtin());

    if !quiet {
        match output {
            OutputFormat::Json => {
                let diagnostics: Vec<serde_json::Value> = transpiled
                    .diagnostics
                    .iter()
                    .map(|d| d.to_json_value())
                    .collect();
                print_json(&serde_json::json!({
                    "normalized_code": transpiled.normalized_code,
                    "calls": transpiled.calls.len(),
                    "diagnostics": diagnostics,
                }));
            }
            OutputFormat::Text => {
                for line in &transpiled.normalized_code {
                    println!("{}", line);
                }
                for diag in &transpiled.diagnostics {
                    eprintln!("warning: {}", diag);
                }
            }
        }
    }

    if !transpiled.diagnostics.is_empty() {
        process::exit(1);
    }
}

fn print_json(value: &serde_json::Value) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    println!("{}", pretty);
}

fn print_report(report: &RunReport) {
    for diag in &report.diagnostics {
        println!("warning: {}", diag);
    }
    for result in &report.results {
        match &result.outcome {
            Ok(outcome) => println!("line {}: ok: {}", result.call.line, outcome),
            Err(msg) => println!("line {}: error: {}", result.call.line, msg),
        }
    }
    println!(
        "{} of {} call(s) succeeded, {} diagnostic(s)",
        report.success_count,
        report.results.len(),
        report.diagnostics.len()
    );
}
