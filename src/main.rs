//! Cadence CLI - Command-line interface for resolving Cadence rounds.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Cadence - A simultaneous-turn program resolution engine
#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a scenario's round to completion
    Run {
        /// Scenario JSON file
        #[arg(required = true)]
        scenario: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Report ignored intents as INFO events
        #[arg(long)]
        diagnostics: bool,

        /// Suppress the event listing
        #[arg(short, long)]
        quiet: bool,
    },

    /// Interactive TUI to step through a round
    Watch {
        /// Scenario JSON file
        #[arg(required = true)]
        scenario: PathBuf,

        /// Auto-advance delay in milliseconds (default: 500)
        #[arg(long, default_value = "500")]
        speed: u64,
    },

    /// Resolve many scenarios in parallel
    Batch {
        /// Scenario JSON files
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Check a scenario's catalog and programs against the rules
    Validate {
        /// Scenario JSON file
        #[arg(required = true)]
        scenario: PathBuf,
    },

    /// List catalog cards and their frame timelines
    Cards {
        /// Card catalog JSON file (default: built-in sample set)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Board radius used for the reach line (default: 3)
        #[arg(short, long, default_value = "3")]
        radius: u32,
    },
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            scenario,
            format,
            diagnostics,
            quiet,
        } => cli::run::execute(scenario, format, diagnostics, quiet),

        Commands::Watch { scenario, speed } => cli::watch::execute(scenario, speed),

        Commands::Batch {
            scenarios,
            threads,
            format,
            progress,
        } => cli::batch::execute(scenarios, threads, format, progress),

        Commands::Validate { scenario } => cli::validate::execute(scenario),

        Commands::Cards { catalog, radius } => cli::cards::execute(catalog, radius),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
