//! The `godot-setup` step: download and install Godot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gbt_godot::Downloader;

use super::StepContext;

/// Step output holding the installed binary path.
pub const GODOT_BIN_OUTPUT: &str = "godot_bin";

/// Installs the configured Godot release for the target OS.
///
/// The installed path is published as the `godot_bin` step output.
///
/// # Errors
///
/// Returns an error if the downloader cannot be configured or the download
/// or installation fails.
pub fn run(ctx: &StepContext<'_>) -> Result<PathBuf> {
    let release = ctx.config.release();
    let downloader = Downloader::new(
        ctx.target_os,
        ctx.logger,
        ctx.config.downloader_options(),
    )
    .context("Failed to configure Godot downloader")?;

    let installed = downloader
        .setup(ctx.target_os, &release)
        .with_context(|| format!("Failed to set up Godot {release}"))?;

    ctx.logger
        .set_output(GODOT_BIN_OUTPUT, &installed.to_string_lossy());

    Ok(installed)
}
