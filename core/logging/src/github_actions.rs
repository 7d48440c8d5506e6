//! GitHub Actions workflow-command logger.
//!
//! See <https://docs.github.com/en/actions/reference/workflow-commands-for-github-actions>
//! for the protocol this logger speaks.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;

use crate::{Logger, NoticeMessage, append_to_file};

/// Runner-provided file collecting step outputs.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Runner-provided file collecting the job summary.
pub const GITHUB_STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Speaks the GitHub Actions workflow-command protocol.
///
/// Info, warning, debug and group commands go to stdout; errors go to stderr.
/// Masking and grouping are handled by the runner, so this logger keeps no
/// state besides its writers.
pub struct GitHubActionsLogger {
    debug: bool,
    out: RefCell<Box<dyn Write>>,
    err: RefCell<Box<dyn Write>>,
    outputs_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
}

impl GitHubActionsLogger {
    /// Creates a logger writing to the process stdout/stderr, with output and
    /// summary files taken from the runner environment.
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            out: RefCell::new(Box::new(std::io::stdout())),
            err: RefCell::new(Box::new(std::io::stderr())),
            outputs_file: std::env::var_os(GITHUB_OUTPUT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            summary_file: std::env::var_os(GITHUB_STEP_SUMMARY_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Creates a logger writing to the given sinks, with no output or summary
    /// file configured.
    #[must_use]
    pub fn with_writers(debug: bool, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self {
            debug,
            out: RefCell::new(out),
            err: RefCell::new(err),
            outputs_file: None,
            summary_file: None,
        }
    }

    #[must_use]
    pub fn with_outputs_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_summary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_file = Some(path.into());
        self
    }

    fn stdout_line(&self, line: &str) {
        let _ = writeln!(self.out.borrow_mut(), "{line}");
    }

    fn stderr_line(&self, line: &str) {
        let _ = writeln!(self.err.borrow_mut(), "{line}");
    }
}

impl Logger for GitHubActionsLogger {
    fn info(&self, message: &str) {
        self.stdout_line(message);
    }

    fn warn(&self, message: &str) {
        self.stdout_line(&format!("::warning::{}", escape_data(message)));
    }

    fn error(&self, message: &str) {
        self.stderr_line(&format!("::error::{}", escape_data(message)));
    }

    fn debug(&self, message: &str) {
        if self.debug {
            self.stdout_line(&format!("::debug::{}", escape_data(message)));
        }
    }

    fn mask(&self, value: &str) {
        self.stdout_line(&format!("::add-mask::{}", escape_data(value)));
    }

    fn start_group(&self, name: &str) {
        self.stdout_line(&format!("::group::{}", escape_data(name)));
    }

    fn end_group(&self) {
        self.stdout_line("::endgroup::");
    }

    fn notice(&self, message: &str, notice: &NoticeMessage) {
        let message = escape_data(message);
        let properties: Vec<String> = notice
            .properties()
            .into_iter()
            .map(|(key, value)| format!("{key}={}", escape_property(&value)))
            .collect();
        if properties.is_empty() {
            self.stdout_line(&format!("::notice::{message}"));
        } else {
            self.stdout_line(&format!("::notice {}::{message}", properties.join(",")));
        }
    }

    fn set_output(&self, name: &str, value: &str) {
        let Some(path) = &self.outputs_file else {
            self.error(&format!("{GITHUB_OUTPUT_ENV} is not set"));
            return;
        };
        if let Err(e) = append_to_file(path, &format!("{name}={value}\n")) {
            self.error(&format!("failed to write output file: {e}"));
        }
    }

    fn set_summary(&self, summary: &str) {
        let Some(path) = &self.summary_file else {
            self.error(&format!("{GITHUB_STEP_SUMMARY_ENV} is not set"));
            return;
        };
        if let Err(e) = append_to_file(path, summary) {
            self.error(&format!("failed to write summary file: {e}"));
        }
    }
}

/// Escapes workflow-command message data.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow-command property value, which additionally may not
/// contain `:` or `,`.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
