//! Godot package downloads.
//!
//! A [`Downloader`] resolves the package URL for a target OS and release,
//! fetches it with a single blocking GET and stores it in a fresh temporary
//! directory owned by the returned [`DownloadedArchive`].
//!
//! ## URL layout
//!
//! ```text
//! <repository>/<version>/<file>             # stable releases
//! <repository>/<version>/<channel>/<file>   # pre-releases (rc1, beta2, ...)
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gbt_logging::Logger;
use tempfile::TempDir;
use url::Url;

use crate::errors::{GodotError, Result};
use crate::platform::TargetOs;
use crate::release::Release;

/// Public Godot distribution endpoint used when no repository is configured.
pub const DEFAULT_REPOSITORY_URL: &str = "https://downloads.tuxfamily.org/godotengine/";

/// Prefix of the temporary directories packages are downloaded into.
const TEMP_DIR_PREFIX: &str = "godot-build-tools";

/// Timeout for establishing the connection. The transfer itself is unbounded.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Optional overrides for a [`Downloader`]. Empty values count as unset.
#[derive(Debug, Clone, Default)]
pub struct DownloaderOptions {
    /// Base URL of the Godot download repository.
    pub download_repository_url: Option<String>,
    /// Directory the Godot binary is installed into.
    pub bin_dir: Option<PathBuf>,
}

/// Downloads Godot packages and installs the engine binary from them.
pub struct Downloader<'a> {
    pub(crate) repository_url: String,
    pub(crate) bin_dir: PathBuf,
    pub(crate) client: reqwest::blocking::Client,
    pub(crate) logger: &'a dyn Logger,
}

impl<'a> Downloader<'a> {
    /// Creates a downloader, filling unset options with defaults for `target_os`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when no bin directory is configured and
    /// the default one cannot be determined (no home directory on Linux), and
    /// a `Network` error when the HTTP client cannot be created.
    pub fn new(
        target_os: TargetOs,
        logger: &'a dyn Logger,
        options: DownloaderOptions,
    ) -> Result<Self> {
        let repository_url = options
            .download_repository_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string());

        let bin_dir = match options.bin_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => target_os.default_bin_dir().ok_or_else(|| {
                GodotError::configuration(format!(
                    "could not determine the default bin directory for {target_os}; \
                     set one explicitly"
                ))
            })?,
        };

        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None::<Duration>)
            .user_agent(concat!("gbt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GodotError::network_with_source("failed to create HTTP client", e))?;

        Ok(Self {
            repository_url,
            bin_dir,
            client,
            logger,
        })
    }

    #[must_use]
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    #[must_use]
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Builds the download URL of the package for `os` and `release`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the repository URL does not parse
    /// or cannot carry path segments.
    pub fn download_url(&self, os: TargetOs, release: &Release) -> Result<Url> {
        let file_name = release.remote_file_name(os);
        let mut url = Url::parse(&self.repository_url).map_err(|e| {
            GodotError::configuration(format!(
                "failed to parse download repository URL '{}': {e}",
                self.repository_url
            ))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                GodotError::configuration(format!(
                    "download repository URL '{}' cannot be a base URL",
                    self.repository_url
                ))
            })?;
            segments.pop_if_empty().push(&release.version);
            if !release.is_stable() {
                segments.push(&release.channel);
            }
            segments.push(&file_name);
        }

        Ok(url)
    }

    /// Downloads the Godot package for `os` and `release`.
    ///
    /// The package is written to a new temporary directory that lives as long
    /// as the returned [`DownloadedArchive`]. The request is attempted once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the temporary directory or output file cannot be created
    /// - the repository URL is malformed
    /// - the request fails or the server answers with a non-success status
    /// - the response body cannot be written to disk
    pub fn download_archive(&self, os: TargetOs, release: &Release) -> Result<DownloadedArchive> {
        let file_name = release.remote_file_name(os);

        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(|e| GodotError::filesystem("failed to create temporary directory", e))?;
        let path = dir.path().join(&file_name);
        let mut out = File::create(&path).map_err(|e| {
            GodotError::filesystem(
                format!("failed to create output file: {}", path.display()),
                e,
            )
        })?;

        let url = self.download_url(os, release)?;
        self.logger.debug(&format!("Download URL: {url}"));

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| GodotError::network_with_source(format!("failed to download {url}"), e))?;

        if !response.status().is_success() {
            return Err(GodotError::network(format!(
                "HTTP error {}: {url}",
                response.status()
            )));
        }

        let bytes = std::io::copy(&mut response, &mut out).map_err(|e| {
            GodotError::filesystem(
                format!("failed to write Godot package to {}", path.display()),
                e,
            )
        })?;
        self.logger
            .debug(&format!("Downloaded {bytes} bytes to {}", path.display()));

        Ok(DownloadedArchive { dir, path })
    }
}

/// A downloaded package and the temporary directory holding it.
///
/// Dropping the value deletes the directory together with anything extracted
/// into it.
#[derive(Debug)]
pub struct DownloadedArchive {
    dir: TempDir,
    path: PathBuf,
}

impl DownloadedArchive {
    /// Path of the downloaded archive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temporary directory holding the archive and its extracted files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Deletes the temporary directory, reporting failures that `Drop` would swallow.
    ///
    /// # Errors
    ///
    /// Returns a `Filesystem` error if the directory cannot be removed.
    pub fn close(self) -> Result<()> {
        let dir = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            GodotError::filesystem(format!("failed to remove {}", dir.display()), e)
        })
    }
}
