//! Logging for the gbt build tools.
//!
//! Build steps narrate their progress through the [`Logger`] trait. Two
//! implementations exist:
//!
//! - [`ConsoleLogger`] - plain console output through the `log` facade, with
//!   group names prefixed to each message and masked values redacted
//! - [`GitHubActionsLogger`] - GitHub Actions workflow commands
//!   (`::group::`, `::add-mask::`, `::notice::`, ...) plus step outputs and
//!   step summaries written to the files the runner provides
//!
//! Use [`new_logger`] to pick the right one for the current environment.
//!
//! ## Example
//!
//! ```ignore
//! use gbt_logging::{LoggerOptions, new_logger};
//!
//! let logger = new_logger(&LoggerOptions::default());
//! logger.start_group("Godot Setup");
//! logger.info("Downloading Godot");
//! logger.end_group();
//! ```

mod console;
mod github_actions;

use std::io::Write;
use std::path::{Path, PathBuf};

pub use console::ConsoleLogger;
pub use github_actions::GitHubActionsLogger;

/// Environment variable set to `true` by GitHub Actions runners.
pub const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";

/// Leveled, group-aware logging used by every build step.
///
/// All methods take `&self`; implementations keep their group and mask state
/// behind interior mutability so a single logger can be shared by reference
/// across the whole run.
pub trait Logger {
    /// Logs an informational message.
    fn info(&self, message: &str);

    /// Logs a warning.
    fn warn(&self, message: &str);

    /// Logs an error.
    fn error(&self, message: &str);

    /// Logs a debug message. Dropped unless debug logging is enabled.
    fn debug(&self, message: &str);

    /// Hides `value` from all subsequent output.
    fn mask(&self, value: &str);

    /// Opens a named group. Groups nest.
    fn start_group(&self, name: &str);

    /// Closes the innermost open group. Does nothing when no group is open.
    fn end_group(&self);

    /// Emits a notice, optionally anchored to a file location.
    fn notice(&self, message: &str, notice: &NoticeMessage);

    /// Records a `name=value` step output for later workflow steps.
    fn set_output(&self, name: &str, value: &str);

    /// Appends markdown to the job summary.
    fn set_summary(&self, summary: &str);
}

/// Optional location attributes attached to a notice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeMessage {
    pub title: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub end_line: Option<u32>,
    pub col: Option<u32>,
    pub end_column: Option<u32>,
}

impl NoticeMessage {
    /// Returns the set attributes as `(key, value)` pairs in protocol order.
    #[must_use]
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        let mut properties = Vec::new();
        if let Some(title) = &self.title {
            properties.push(("title", title.clone()));
        }
        if let Some(file) = &self.file {
            properties.push(("file", file.clone()));
        }
        if let Some(line) = self.line {
            properties.push(("line", line.to_string()));
        }
        if let Some(end_line) = self.end_line {
            properties.push(("endLine", end_line.to_string()));
        }
        if let Some(col) = self.col {
            properties.push(("col", col.to_string()));
        }
        if let Some(end_column) = self.end_column {
            properties.push(("endColumn", end_column.to_string()));
        }
        properties
    }

    /// Returns the notice attributes as `key=value` strings in protocol order.
    #[must_use]
    pub fn attributes(&self) -> Vec<String> {
        self.properties()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }
}

/// Options shared by both logger implementations.
#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    /// Emit debug messages.
    pub debug: bool,
    /// File receiving `name=value` step outputs (console logger only).
    pub outputs_file: Option<PathBuf>,
    /// File receiving markdown summaries (console logger only).
    pub summary_file: Option<PathBuf>,
}

/// Creates the logger appropriate for the current environment.
///
/// Inside a GitHub Actions runner (`GITHUB_ACTIONS=true`) this is a
/// [`GitHubActionsLogger`]; everywhere else a [`ConsoleLogger`].
#[must_use]
pub fn new_logger(options: &LoggerOptions) -> Box<dyn Logger> {
    let ci = std::env::var(GITHUB_ACTIONS_ENV).ok();
    if is_github_actions(ci.as_deref()) {
        Box::new(GitHubActionsLogger::new(options.debug))
    } else {
        Box::new(ConsoleLogger::new(options))
    }
}

/// Returns true when the `GITHUB_ACTIONS` value marks a GitHub runner.
#[must_use]
pub fn is_github_actions(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Appends `content` to `path`, creating the file when missing.
pub(crate) fn append_to_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    file.write_all(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_attributes_follow_protocol_order() {
        let notice = NoticeMessage {
            title: Some(String::from("Build")),
            file: Some(String::from("main.gd")),
            line: Some(3),
            end_line: Some(4),
            col: Some(1),
            end_column: Some(9),
        };
        assert_eq!(
            notice.attributes(),
            vec![
                "title=Build",
                "file=main.gd",
                "line=3",
                "endLine=4",
                "col=1",
                "endColumn=9"
            ]
        );
    }

    #[test]
    fn empty_notice_has_no_attributes() {
        assert!(NoticeMessage::default().attributes().is_empty());
    }

    #[test]
    fn github_actions_detection() {
        assert!(is_github_actions(Some("true")));
        assert!(is_github_actions(Some("TRUE")));
        assert!(!is_github_actions(Some("false")));
        assert!(!is_github_actions(Some("")));
        assert!(!is_github_actions(None));
    }

    #[test]
    fn append_to_file_appends() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("out.txt");

        append_to_file(&path, "a=1\n").expect("Should append");
        append_to_file(&path, "b=2\n").expect("Should append");

        let content = std::fs::read_to_string(&path).expect("Should read");
        assert_eq!(content, "a=1\nb=2\n");
    }
}
