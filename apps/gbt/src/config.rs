//! Build configuration loaded from `.godot-build.toml`.
//!
//! ## Format
//!
//! ```toml
//! [godot]
//! version = "4.1.3"
//! release = "stable"
//!
//! # Optional overrides
//! download_url = "https://downloads.tuxfamily.org/godotengine/"
//! bin_dir = "/home/me/.local/bin"
//! ```
//!
//! A missing or empty `version` or `release` falls back to the default with a
//! warning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use gbt_godot::{DEFAULT_RELEASE, DEFAULT_VERSION, DownloaderOptions, Release};
use gbt_logging::Logger;
use serde::{Deserialize, Serialize};

/// File name of the build configuration.
pub const DEFAULT_CONFIG_FILE: &str = ".godot-build.toml";

/// Root of `.godot-build.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    /// The `[godot]` table.
    #[serde(default)]
    pub godot: GodotConfig,
}

/// Which Godot to install and where to get it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GodotConfig {
    /// Engine version, e.g. `4.1.3`.
    #[serde(default)]
    pub version: String,

    /// Release channel, e.g. `stable` or `rc1`.
    #[serde(default)]
    pub release: String,

    /// Base URL of the download repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    /// Directory the Godot binary is installed into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_dir: Option<PathBuf>,
}

impl BuildConfig {
    /// The configuration written by `gbt init`.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            godot: GodotConfig {
                version: DEFAULT_VERSION.to_string(),
                release: DEFAULT_RELEASE.to_string(),
                download_url: None,
                bin_dir: None,
            },
        }
    }

    /// Reads and validates the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is not
    /// valid TOML for this schema.
    pub fn load(path: &Path, logger: &dyn Logger) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                bail!("Build config not found, please run `gbt init`")
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read build config: {}", path.display()));
            }
        };

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to parse build config: {}", path.display()))?;
        config.fill_defaults(logger);
        Ok(config)
    }

    /// Parses TOML content without applying defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML for this schema.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid build config")
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize build config")
    }

    /// Replaces an empty version or release with the default, warning once for each.
    pub fn fill_defaults(&mut self, logger: &dyn Logger) {
        if self.godot.release.is_empty() {
            logger.warn(&format!(
                "Godot release not specified, defaulting to {DEFAULT_RELEASE}"
            ));
            self.godot.release = DEFAULT_RELEASE.to_string();
        }

        if self.godot.version.is_empty() {
            logger.warn(&format!(
                "Godot version not specified, defaulting to {DEFAULT_VERSION}"
            ));
            self.godot.version = DEFAULT_VERSION.to_string();
        }
    }

    #[must_use]
    pub fn release(&self) -> Release {
        Release::new(&self.godot.version, &self.godot.release)
    }

    #[must_use]
    pub fn downloader_options(&self) -> DownloaderOptions {
        DownloaderOptions {
            download_repository_url: self.godot.download_url.clone(),
            bin_dir: self.godot.bin_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct WarningLog {
        warnings: RefCell<Vec<String>>,
    }

    impl Logger for WarningLog {
        fn info(&self, _message: &str) {}
        fn warn(&self, message: &str) {
            self.warnings.borrow_mut().push(message.to_string());
        }
        fn error(&self, _message: &str) {}
        fn debug(&self, _message: &str) {}
        fn mask(&self, _value: &str) {}
        fn start_group(&self, _name: &str) {}
        fn end_group(&self) {}
        fn notice(&self, _message: &str, _notice: &gbt_logging::NoticeMessage) {}
        fn set_output(&self, _name: &str, _value: &str) {}
        fn set_summary(&self, _summary: &str) {}
    }

    #[test]
    fn parses_full_config() {
        let config = BuildConfig::parse(
            r#"
[godot]
version = "3.5.3"
release = "rc2"
download_url = "http://localhost:8080/"
bin_dir = "/opt/godot"
"#,
        )
        .expect("Should parse");

        assert_eq!(config.godot.version, "3.5.3");
        assert_eq!(config.godot.release, "rc2");
        assert_eq!(config.release(), Release::new("3.5.3", "rc2"));

        let options = config.downloader_options();
        assert_eq!(
            options.download_repository_url.as_deref(),
            Some("http://localhost:8080/")
        );
        assert_eq!(options.bin_dir, Some(PathBuf::from("/opt/godot")));
    }

    #[test]
    fn missing_fields_default_with_warnings() {
        let logger = WarningLog::default();
        let mut config = BuildConfig::parse("[godot]\n").expect("Should parse");
        config.fill_defaults(&logger);

        assert_eq!(config.release(), Release::new("4.1.3", "stable"));
        assert_eq!(
            *logger.warnings.borrow(),
            vec![
                "Godot release not specified, defaulting to stable",
                "Godot version not specified, defaulting to 4.1.3",
            ]
        );
    }

    #[test]
    fn empty_file_defaults_everything() {
        let logger = WarningLog::default();
        let mut config = BuildConfig::parse("").expect("Should parse");
        config.fill_defaults(&logger);

        assert_eq!(config.godot.version, DEFAULT_VERSION);
        assert_eq!(config.godot.release, DEFAULT_RELEASE);
        assert_eq!(logger.warnings.borrow().len(), 2);
    }

    #[test]
    fn explicit_values_do_not_warn() {
        let logger = WarningLog::default();
        let mut config =
            BuildConfig::parse("[godot]\nversion = \"4.2\"\nrelease = \"beta1\"\n")
                .expect("Should parse");
        config.fill_defaults(&logger);

        assert!(logger.warnings.borrow().is_empty());
        assert_eq!(config.release(), Release::new("4.2", "beta1"));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(BuildConfig::parse("[godot\nversion = ").is_err());
        assert!(BuildConfig::parse("[godot]\nversion = 4\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempfile::tempdir().expect("Should create temp dir");
        let err = BuildConfig::load(&temp.path().join(DEFAULT_CONFIG_FILE), &WarningLog::default())
            .expect_err("Should fail");
        assert_eq!(err.to_string(), "Build config not found, please run `gbt init`");
    }

    #[test]
    fn starter_round_trips_through_toml() {
        let toml = BuildConfig::starter().to_toml().expect("Should serialize");
        assert!(toml.contains("[godot]"));
        assert!(toml.contains("version = \"4.1.3\""));
        assert!(!toml.contains("bin_dir"));
        assert_eq!(
            BuildConfig::parse(&toml).expect("Should parse"),
            BuildConfig::starter()
        );
    }
}
