mod config;
mod logging;
mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// CodeScape city script runner.
#[derive(Parser)]
#[command(name = "codescape", version, about = "CodeScape city script runner")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log engine activity to stderr (overridden by CODESCAPE_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a codescape.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile and execute a script
    Run {
        /// Path to the script, or `-` for stdin
        script: PathBuf,
        /// Land/water mask file (text rows or JSON); overrides the config file
        #[arg(long)]
        mask: Option<PathBuf>,
        /// Maximum ring search radius; overrides the config file
        #[arg(long)]
        radius: Option<u32>,
        /// Print the resulting map
        #[arg(long)]
        map: bool,
        /// Exit with status 1 if any line was diagnosed or any call failed
        #[arg(long)]
        strict: bool,
    },

    /// Transpile a script without executing it
    Check {
        /// Path to the script, or `-` for stdin
        script: PathBuf,
    },

    /// List available operations and their defaults
    Ops,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: could not initialise logging: {}", e);
    }

    match cli.command {
        Commands::Run {
            script,
            mask,
            radius,
            map,
            strict,
        } => {
            let opts = runner::RunOptions {
                config: cli.config.as_deref(),
                mask: mask.as_deref(),
                radius,
                map,
                strict,
            };
            runner::cmd_run(&script, &opts, cli.output, cli.quiet);
        }
        Commands::Check { script } => {
            runner::cmd_check(&script, cli.output, cli.quiet);
        }
        Commands::Ops => {
            cmd_ops(cli.output, cli.quiet);
        }
    }
}

fn cmd_ops(output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    let catalog = codescape_core::Catalog::builtin();
    match output {
        OutputFormat::Json => {
            let ops: Vec<serde_json::Value> = catalog
                .iter()
                .map(|sig| {
                    let params: Vec<serde_json::Value> = sig
                        .parameters
                        .iter()
                        .zip(&sig.defaults)
                        .map(|(name, default)| serde_json::json!({ "name": name, "default": default }))
                        .collect();
                    serde_json::json!({ "name": sig.name, "parameters": params })
                })
                .collect();
            let pretty = serde_json::to_string_pretty(&ops)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for sig in catalog.iter() {
                println!("{}", sig.describe());
            }
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Report `msg` and exit with status 1.
pub(crate) fn fail(msg: &str, output: OutputFormat, quiet: bool) -> ! {
    report_error(msg, output, quiet);
    process::exit(1);
}
