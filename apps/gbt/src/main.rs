#![warn(clippy::pedantic)]

//! # Godot Build Tools (gbt)
//!
//! The `gbt` command prepares a CI machine for building a Godot project. It
//! reads `.godot-build.toml`, downloads the configured Godot release for the
//! target OS and installs the engine binary.
//!
//! ## Subcommands
//!
//! - (none) - run the build steps selected with `--steps`
//! - `init` - write a starter `.godot-build.toml`
//!
//! ## Build Steps
//!
//! - `godot-setup` - download and install Godot (default)
//!
//! ## Examples
//!
//! Create a config and install Godot:
//! ```bash
//! gbt init
//! gbt --steps godot-setup
//! ```
//!
//! Install the Windows build from a Linux runner with debug logging:
//! ```bash
//! gbt --target-os windows --verbose
//! ```

mod commands;
mod config;
mod steps;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::init;
use config::{BuildConfig, DEFAULT_CONFIG_FILE};
use gbt_godot::TargetOs;
use gbt_logging::{LoggerOptions, new_logger};
use steps::{StepContext, StepSelection};

/// Godot build tools.
#[derive(Parser)]
#[command(
    name = "gbt",
    author,
    version,
    about = "Godot build tools for CI pipelines",
    long_about = "The 'gbt' command installs the Godot engine described by .godot-build.toml \
    and runs build steps against it.",
    after_help = "\
ENVIRONMENT VARIABLES:
    GITHUB_ACTIONS          Emit GitHub Actions workflow commands when 'true'
    GITHUB_OUTPUT           File receiving step outputs (GitHub Actions)
    GITHUB_STEP_SUMMARY     File receiving the job summary (GitHub Actions)
    RUST_LOG                Extra log filter directives"
)]
pub struct Cli {
    /// Comma-separated list of build steps to run.
    #[clap(long = "steps", default_value = steps::GODOT_SETUP)]
    pub steps: String,

    /// Enable debug logging.
    #[clap(long = "verbose", global = true, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Path of the build config.
    #[clap(long = "config", global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Operating system to install Godot for (linux, windows, macos).
    ///
    /// Defaults to the host operating system.
    #[clap(long = "target-os")]
    pub target_os: Option<TargetOs>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the gbt CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter .godot-build.toml.
    ///
    /// The config pins the default Godot version and release channel.
    Init(init::InitArgs),
}

fn main() {
    if let Err(e) = run() {
        let exit_code = handle_error(&e);
        std::process::exit(exit_code);
    }
}

/// Prints the error chain and returns the exit code.
fn handle_error(e: &anyhow::Error) -> i32 {
    eprintln!("Error: {e:?}");
    1
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "{} {}", record.level(), record.args())
        })
        .filter_level(level)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Commands::Init(args)) = &cli.command {
        return init::execute(args, &cli.config);
    }

    let logger = new_logger(&LoggerOptions {
        debug: cli.verbose,
        ..LoggerOptions::default()
    });
    let config = BuildConfig::load(&cli.config, logger.as_ref())?;
    let target_os = cli.target_os.unwrap_or_else(TargetOs::host);
    logger.debug(&format!("Target OS: {target_os}"));

    let ctx = StepContext {
        logger: logger.as_ref(),
        config: &config,
        target_os,
    };
    steps::run(&StepSelection::parse(&cli.steps), &ctx)
}
