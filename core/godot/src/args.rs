//! Command-line argument builders for invoking Godot.
//!
//! Godot 3 and Godot 4 ship as different binaries whose flag sets may drift
//! apart. Each major version gets its own [`GodotArgBuilder`]
//! implementation so callers stay version-agnostic while the builders evolve
//! independently.
//!
//! Flags are emitted in call order. Nothing is validated or deduplicated:
//! calling a method twice emits the flag twice.
//!
//! ## Example
//!
//! ```
//! use gbt_godot::{ExportType, GodotArgBuilder, Godot4ArgBuilder};
//!
//! let mut args = Godot4ArgBuilder::new("/p");
//! args.add_headless_flag();
//! args.add_debug_flag();
//! args.add_export_flag(ExportType::Pack);
//! assert_eq!(args.generate_args(), "--path /p --headless --debug --export-pack");
//! ```

use crate::release::Release;

/// Which export mode `--export*` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportType {
    /// `--export`
    Release,
    /// `--export-debug`
    Debug,
    /// `--export-pack`
    Pack,
}

/// Accumulates flags for one Godot invocation.
///
/// Implementations are seeded with `--path <project dir>` on construction.
pub trait GodotArgBuilder {
    /// Appends `--headless`.
    fn add_headless_flag(&mut self);
    /// Appends `--debug`.
    fn add_debug_flag(&mut self);
    /// Appends `--verbose`.
    fn add_verbose_flag(&mut self);
    /// Appends `--quiet`.
    fn add_quiet_flag(&mut self);
    /// Appends `--dump-gdextension-interface`.
    fn add_dump_gdextension_interface_flag(&mut self);
    /// Appends `--dump-extension-api`.
    fn add_dump_extension_api_flag(&mut self);
    /// Appends `--check-only`.
    fn add_check_only_flag(&mut self);
    /// Appends the flag for `export_type`.
    fn add_export_flag(&mut self, export_type: ExportType);

    /// Returns the accumulated tokens, starting with `--path <project dir>`.
    fn args(&self) -> &[String];

    /// Renders the tokens joined by single spaces.
    fn generate_args(&self) -> String {
        self.args().join(" ")
    }
}

/// Argument builder for Godot 3.x binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Godot3ArgBuilder {
    args: Vec<String>,
}

impl Godot3ArgBuilder {
    #[must_use]
    pub fn new(project_dir: impl Into<String>) -> Self {
        Self {
            args: vec![String::from("--path"), project_dir.into()],
        }
    }

    fn push(&mut self, flag: &str) {
        self.args.push(flag.to_string());
    }
}

impl GodotArgBuilder for Godot3ArgBuilder {
    fn add_headless_flag(&mut self) {
        self.push("--headless");
    }

    fn add_debug_flag(&mut self) {
        self.push("--debug");
    }

    fn add_verbose_flag(&mut self) {
        self.push("--verbose");
    }

    fn add_quiet_flag(&mut self) {
        self.push("--quiet");
    }

    fn add_dump_gdextension_interface_flag(&mut self) {
        self.push("--dump-gdextension-interface");
    }

    fn add_dump_extension_api_flag(&mut self) {
        self.push("--dump-extension-api");
    }

    fn add_check_only_flag(&mut self) {
        self.push("--check-only");
    }

    fn add_export_flag(&mut self, export_type: ExportType) {
        match export_type {
            ExportType::Release => self.push("--export"),
            ExportType::Debug => self.push("--export-debug"),
            ExportType::Pack => self.push("--export-pack"),
        }
    }

    fn args(&self) -> &[String] {
        &self.args
    }
}

/// Argument builder for Godot 4.x binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Godot4ArgBuilder {
    args: Vec<String>,
}

impl Godot4ArgBuilder {
    #[must_use]
    pub fn new(project_dir: impl Into<String>) -> Self {
        Self {
            args: vec![String::from("--path"), project_dir.into()],
        }
    }

    fn push(&mut self, flag: &str) {
        self.args.push(flag.to_string());
    }
}

impl GodotArgBuilder for Godot4ArgBuilder {
    fn add_headless_flag(&mut self) {
        self.push("--headless");
    }

    fn add_debug_flag(&mut self) {
        self.push("--debug");
    }

    fn add_verbose_flag(&mut self) {
        self.push("--verbose");
    }

    fn add_quiet_flag(&mut self) {
        self.push("--quiet");
    }

    fn add_dump_gdextension_interface_flag(&mut self) {
        self.push("--dump-gdextension-interface");
    }

    fn add_dump_extension_api_flag(&mut self) {
        self.push("--dump-extension-api");
    }

    fn add_check_only_flag(&mut self) {
        self.push("--check-only");
    }

    fn add_export_flag(&mut self, export_type: ExportType) {
        match export_type {
            ExportType::Release => self.push("--export"),
            ExportType::Debug => self.push("--export-debug"),
            ExportType::Pack => self.push("--export-pack"),
        }
    }

    fn args(&self) -> &[String] {
        &self.args
    }
}

/// Returns the builder matching the major version of `release`.
///
/// Godot 3 releases get a [`Godot3ArgBuilder`]; everything else, including
/// versions without a numeric major component, gets a [`Godot4ArgBuilder`].
#[must_use]
pub fn arg_builder_for(release: &Release, project_dir: &str) -> Box<dyn GodotArgBuilder> {
    match release.major() {
        Some(3) => Box::new(Godot3ArgBuilder::new(project_dir)),
        _ => Box::new(Godot4ArgBuilder::new(project_dir)),
    }
}
