//! Godot engine download and installation.
//!
//! This crate fetches a Godot release for a target operating system, extracts
//! the engine binary from the published ZIP package and installs it into a
//! bin directory. It also builds command lines for invoking the installed
//! binary.
//!
//! ## Module Structure
//!
//! - [`platform`] - per-OS naming rules and default install locations
//! - [`release`] - version and release-channel descriptors
//! - [`archive`] - ZIP extraction guarded against path traversal
//! - [`downloader`] - URL resolution and package download
//! - [`install`] - binary selection and installation
//! - [`args`] - Godot 3 and Godot 4 argument builders
//! - [`errors`] - the [`GodotError`] taxonomy
//!
//! ## Example
//!
//! ```ignore
//! use gbt_godot::{Downloader, DownloaderOptions, Release, TargetOs};
//! use gbt_logging::ConsoleLogger;
//!
//! let logger = ConsoleLogger::default();
//! let downloader = Downloader::new(TargetOs::host(), &logger, DownloaderOptions::default())?;
//! let godot = downloader.setup(TargetOs::host(), &Release::default())?;
//! ```

pub mod archive;
pub mod args;
pub mod downloader;
pub mod errors;
pub mod install;
pub mod platform;
pub mod release;

pub use archive::extract;
pub use args::{ExportType, Godot3ArgBuilder, Godot4ArgBuilder, GodotArgBuilder, arg_builder_for};
pub use downloader::{DEFAULT_REPOSITORY_URL, DownloadedArchive, Downloader, DownloaderOptions};
pub use errors::{ExtractError, GodotError, Result};
pub use install::find_platform_binary;
pub use platform::TargetOs;
pub use release::{DEFAULT_RELEASE, DEFAULT_VERSION, Release};
