//! Init command for the gbt CLI.
//!
//! Writes a starter build configuration pinned to the default Godot release.
//!
//! ## Usage
//!
//! ```bash
//! gbt init           # Create .godot-build.toml
//! gbt init --force   # Replace an existing one
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::config::BuildConfig;

/// Arguments for the `init` command.
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing build config.
    #[clap(long = "force", action = clap::ArgAction::SetTrue)]
    pub force: bool,
}

/// Executes the `init` command, writing the config to `config_path`.
///
/// # Errors
///
/// Returns an error if:
/// - the config already exists and `--force` was not given
/// - the file cannot be written
pub fn execute(args: &InitArgs, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists, use --force to overwrite it",
            config_path.display()
        );
    }

    let content = BuildConfig::starter().to_toml()?;
    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write build config: {}", config_path.display()))?;

    println!("Initialized build config in {}", config_path.display());
    Ok(())
}
