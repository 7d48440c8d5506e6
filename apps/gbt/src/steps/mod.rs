//! Build steps selected with `--steps`.
//!
//! Steps run in a fixed order regardless of how they are listed. A step that
//! is not selected is skipped with a debug message; a selected name that
//! matches no step is warned about and ignored.

pub mod godot_setup;

use anyhow::Result;
use gbt_godot::TargetOs;
use gbt_logging::Logger;

use crate::config::BuildConfig;

/// Installs the configured Godot release.
pub const GODOT_SETUP: &str = "godot-setup";

/// Every step gbt knows, in execution order.
pub const KNOWN_STEPS: &[&str] = &[GODOT_SETUP];

/// The step names given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSelection {
    steps: Vec<String>,
}

impl StepSelection {
    /// Splits a comma-separated list. Blank entries are dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let steps = raw
            .split(',')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(String::from)
            .collect();
        Self { steps }
    }

    #[must_use]
    pub fn has(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s == step)
    }

    /// Selected names that match no known step.
    pub fn unknown(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .map(String::as_str)
            .filter(|step| !KNOWN_STEPS.contains(step))
    }
}

/// Everything a step needs to run.
pub struct StepContext<'a> {
    pub logger: &'a dyn Logger,
    pub config: &'a BuildConfig,
    pub target_os: TargetOs,
}

/// Runs the selected steps.
///
/// # Errors
///
/// Returns the error of the first failing step. Later steps do not run.
pub fn run(selection: &StepSelection, ctx: &StepContext<'_>) -> Result<()> {
    for step in selection.unknown() {
        ctx.logger.warn(&format!("Unknown build step '{step}', ignoring"));
    }

    if selection.has(GODOT_SETUP) {
        godot_setup::run(ctx)?;
    } else {
        ctx.logger.debug(&format!("Skipping {GODOT_SETUP} step"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_commas() {
        let selection = StepSelection::parse("godot-setup,export");
        assert!(selection.has("godot-setup"));
        assert!(selection.has("export"));
        assert!(!selection.has("godot"));
    }

    #[test]
    fn parse_trims_and_drops_blanks() {
        let selection = StepSelection::parse(" godot-setup , ,");
        assert!(selection.has(GODOT_SETUP));
        assert_eq!(selection.unknown().count(), 0);
    }

    #[test]
    fn empty_selection_has_nothing() {
        let selection = StepSelection::parse("");
        assert!(!selection.has(GODOT_SETUP));
    }

    #[test]
    fn unknown_lists_unrecognized_names_in_order() {
        let selection = StepSelection::parse("lint,godot-setup,export");
        assert_eq!(selection.unknown().collect::<Vec<_>>(), vec!["lint", "export"]);
    }
}
