//! Plain console logger.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::{Logger, LoggerOptions, NoticeMessage, append_to_file};

/// Replacement text for masked values.
const MASK: &str = "********";

/// Logs through the `log` facade with group prefixes and masked values.
///
/// Messages inside open groups are prefixed `"<group> - "`, innermost group
/// first. Step outputs and summaries are appended to the files given in
/// [`LoggerOptions`] and silently skipped when no file is configured.
pub struct ConsoleLogger {
    debug: bool,
    outputs_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
    groups: RefCell<Vec<String>>,
    masks: RefCell<Vec<String>>,
}

impl ConsoleLogger {
    #[must_use]
    pub fn new(options: &LoggerOptions) -> Self {
        Self {
            debug: options.debug,
            outputs_file: options.outputs_file.clone(),
            summary_file: options.summary_file.clone(),
            groups: RefCell::new(Vec::new()),
            masks: RefCell::new(Vec::new()),
        }
    }

    /// Redacts masked values and prepends the open group names.
    #[must_use]
    pub fn format_message(&self, message: &str) -> String {
        let mut message = message.to_string();
        for mask in self.masks.borrow().iter() {
            message = message.replace(mask.as_str(), MASK);
        }
        for group in self.groups.borrow().iter() {
            message = format!("{group} - {message}");
        }
        message
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(&LoggerOptions::default())
    }
}

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        log::info!("{}", self.format_message(message));
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", self.format_message(message));
    }

    fn error(&self, message: &str) {
        log::error!("{}", self.format_message(message));
    }

    fn debug(&self, message: &str) {
        if self.debug {
            log::debug!("{}", self.format_message(message));
        }
    }

    fn mask(&self, value: &str) {
        if !value.is_empty() {
            self.masks.borrow_mut().push(value.to_string());
        }
    }

    fn start_group(&self, name: &str) {
        self.groups.borrow_mut().push(name.to_string());
    }

    fn end_group(&self) {
        self.groups.borrow_mut().pop();
    }

    fn notice(&self, message: &str, notice: &NoticeMessage) {
        let attributes = notice.attributes();
        if attributes.is_empty() {
            self.info(message);
        } else {
            self.info(&format!("{} {message}", attributes.join(" ")));
        }
    }

    fn set_output(&self, name: &str, value: &str) {
        let Some(path) = &self.outputs_file else {
            return;
        };
        if let Err(e) = append_to_file(path, &format!("{name}={value}\n")) {
            self.error(&format!(
                "failed to write outputs file {}: {e}",
                path.display()
            ));
        }
    }

    fn set_summary(&self, summary: &str) {
        let Some(path) = &self.summary_file else {
            return;
        };
        if let Err(e) = append_to_file(path, summary) {
            self.error(&format!(
                "failed to write summary file {}: {e}",
                path.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_message_without_groups_is_unchanged() {
        let logger = ConsoleLogger::default();
        assert_eq!(logger.format_message("hello"), "hello");
    }

    #[test]
    fn groups_prefix_innermost_first() {
        let logger = ConsoleLogger::default();
        logger.start_group("Outer");
        logger.start_group("Inner");
        assert_eq!(logger.format_message("msg"), "Inner - Outer - msg");

        logger.end_group();
        assert_eq!(logger.format_message("msg"), "Outer - msg");

        logger.end_group();
        logger.end_group();
        assert_eq!(logger.format_message("msg"), "msg");
    }

    #[test]
    fn masks_are_redacted() {
        let logger = ConsoleLogger::default();
        logger.mask("s3cr3t");
        logger.mask("");
        assert_eq!(
            logger.format_message("token=s3cr3t, again s3cr3t"),
            "token=********, again ********"
        );
    }

    #[test]
    fn masks_apply_before_group_prefix() {
        let logger = ConsoleLogger::default();
        logger.mask("Setup");
        logger.start_group("Setup");
        assert_eq!(logger.format_message("msg"), "Setup - msg");
    }

    #[test]
    fn set_output_appends_lines() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let outputs = dir.path().join("outputs");
        let logger = ConsoleLogger::new(&LoggerOptions {
            outputs_file: Some(outputs.clone()),
            ..LoggerOptions::default()
        });

        logger.set_output("godot_bin", "/usr/bin/godot");
        logger.set_output("version", "4.1.3");

        let content = std::fs::read_to_string(&outputs).expect("Should read outputs");
        assert_eq!(content, "godot_bin=/usr/bin/godot\nversion=4.1.3\n");
    }

    #[test]
    fn set_summary_without_file_is_noop() {
        let logger = ConsoleLogger::default();
        logger.set_summary("# Summary");
        logger.set_output("a", "b");
    }

    #[test]
    fn set_summary_appends_markdown() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let summary = dir.path().join("summary.md");
        let logger = ConsoleLogger::new(&LoggerOptions {
            summary_file: Some(summary.clone()),
            ..LoggerOptions::default()
        });

        logger.set_summary("# Build\n");
        logger.set_summary("done\n");

        let content = std::fs::read_to_string(&summary).expect("Should read summary");
        assert_eq!(content, "# Build\ndone\n");
    }
}
