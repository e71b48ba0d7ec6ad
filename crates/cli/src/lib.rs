//! Command-line surface for kmdgen: argument parsing, configuration
//! resolution and tracing setup.

use clap::{CommandFactory, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod check;
mod common;
mod generate;

/// Crates whose events a plain `KMDGEN_LOG` level applies to.
const LOG_TARGETS: [&str; 2] = ["kmdgen_core", "kmdgen_cli"];

#[derive(Parser, Debug)]
#[command(
    name = "kmdgen",
    version,
    about = "Generate Go client bindings from Kurento module descriptors (*.kmd.json)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate bindings and write them to the output directory
    Generate(generate::GenerateArgs),
    /// Run the whole pipeline without writing anything
    Check(check::CheckArgs),
}

/// Parse `args` (program name first) and run the selected subcommand.
///
/// Returns the process exit code: 0 on success, 1 when the pipeline fails and
/// clap's own code for usage errors.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(args),
            Some(Commands::Check(args)) => check::run(args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Run a command body, logging its error once and mapping it to an exit code.
pub(crate) fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> kmdgen_core::Result<()>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            error!("{err}");
            1
        }
    }
}

/// Install the stderr subscriber, filtered by `KMDGEN_LOG`.
pub fn init_tracing() {
    // KMDGEN_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "kmdgen_core=debug"
    let filter = filter_spec(std::env::var("KMDGEN_LOG").ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(var: Option<&str>) -> String {
    let per_target = |level: &str| {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };
    match var {
        Some(level) if is_plain_level(level) => per_target(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => per_target("info"),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
