//! Tock CLI: runs the registered counter test cases.
//!
//! Provides `tock test` for running the registered cases (optionally recording
//! a waveform) and `tock list` for printing their names.

#![warn(missing_docs)]

mod list;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Tock: verification bench for a generated counter model.
#[derive(Parser, Debug)]
#[command(name = "tock", version, about = "Tock counter verification bench")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `tock.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run registered test cases.
    Test(TestArgs),
    /// List registered test cases.
    List,
}

/// Arguments for the `tock test` subcommand.
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Specific test case to run, e.g. `CounterTest.count16` (optional).
    pub name: Option<String>,

    /// Substring filter for test case names.
    #[arg(long)]
    pub filter: Option<String>,

    /// Record a waveform to this path.
    #[arg(long, conflicts_with = "no_waveform")]
    pub wave: Option<String>,

    /// Disable waveform recording, even if enabled in `tock.toml`.
    #[arg(long)]
    pub no_waveform: bool,

    /// Output format for results.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Test(ref args) => test::run(args, &global),
        Command::List => list::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the logger; `RUST_LOG` overrides the flag-derived default.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
