//! Installing the Godot binary from a downloaded package.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use gbt_logging::Logger;

use crate::archive;
use crate::downloader::Downloader;
use crate::errors::{GodotError, Result};
use crate::platform::TargetOs;
use crate::release::Release;

/// Permission bits of the installed binary.
#[cfg(unix)]
const EXECUTABLE_MODE: u32 = 0o755;

/// Name of the log group wrapping a full setup.
const SETUP_GROUP: &str = "Godot Setup";

impl Downloader<'_> {
    /// Extracts `archive_path` and installs the Godot binary it contains.
    ///
    /// The first extracted file (in archive order) recognized by
    /// [`TargetOs::is_platform_binary`] is copied to `<bin_dir>/<file name>`
    /// with executable permissions. The extracted original is then removed on
    /// a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - extraction fails (see [`archive::extract`])
    /// - no extracted file matches the target OS (`BinaryNotFound`)
    /// - the binary cannot be read, or the bin directory or installed file
    ///   cannot be written
    pub fn install_from_archive(
        &self,
        archive_path: &Path,
        os: TargetOs,
        release: &Release,
    ) -> Result<PathBuf> {
        let files = archive::extract(archive_path).map_err(|e| {
            self.logger.debug(&format!(
                "{} extracted file(s) left in {}",
                e.extracted.len(),
                archive_path.parent().unwrap_or(archive_path).display()
            ));
            GodotError::from(e)
        })?;

        let binary = find_platform_binary(os, &files)
            .ok_or_else(|| GodotError::binary_not_found(archive_path))?;
        let file_name = binary
            .file_name()
            .ok_or_else(|| GodotError::binary_not_found(archive_path))?;
        self.logger.debug(&format!(
            "Found Godot {release} binary: {}",
            binary.display()
        ));

        let data = std::fs::read(binary).map_err(|e| {
            GodotError::filesystem(
                format!("failed to read Godot binary: {}", binary.display()),
                e,
            )
        })?;

        std::fs::create_dir_all(&self.bin_dir).map_err(|e| {
            GodotError::filesystem(
                format!("failed to create directory: {}", self.bin_dir.display()),
                e,
            )
        })?;

        let installed = self.bin_dir.join(file_name);
        write_executable(&installed, &data).map_err(|e| {
            GodotError::filesystem(
                format!("failed to write Godot binary: {}", installed.display()),
                e,
            )
        })?;

        let _ = std::fs::remove_file(binary);

        Ok(installed)
    }

    /// Downloads and installs Godot, narrating each step in a log group.
    ///
    /// Failures are logged at error level before being returned. The
    /// downloaded package and its temporary directory are removed whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Downloader::download_archive`] or
    /// [`Downloader::install_from_archive`].
    pub fn setup(&self, os: TargetOs, release: &Release) -> Result<PathBuf> {
        let _group = LogGroup::start(self.logger, SETUP_GROUP);

        self.logger.info(&format!("Downloading Godot {release} for {os}"));
        let archive = self.download_archive(os, release).inspect_err(|e| {
            self.logger.error(&format!("Failed to download Godot: {e}"));
        })?;
        self.logger
            .info(&format!("Godot package: {}", archive.path().display()));

        self.logger.info("Installing Godot");
        let installed = self.install_from_archive(archive.path(), os, release);

        if let Err(e) = archive.close() {
            self.logger.warn(&format!("Failed to clean up Godot package: {e}"));
        }

        let installed = installed.inspect_err(|e| {
            self.logger.error(&format!("Failed to install Godot: {e}"));
        })?;
        self.logger
            .info(&format!("Godot binary: {}", installed.display()));

        Ok(installed)
    }
}

/// Returns the first path naming the Godot binary for `os`.
#[must_use]
pub fn find_platform_binary(os: TargetOs, files: &[PathBuf]) -> Option<&Path> {
    files
        .iter()
        .map(PathBuf::as_path)
        .find(|path| os.is_platform_binary(path))
}

/// Writes `data` to `path` and marks it executable.
fn write_executable(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(EXECUTABLE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;

    // The open mode only applies to new files; fix up a pre-existing binary.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(EXECUTABLE_MODE);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Closes its log group when dropped.
struct LogGroup<'a> {
    logger: &'a dyn Logger,
}

impl<'a> LogGroup<'a> {
    fn start(logger: &'a dyn Logger, name: &str) -> Self {
        logger.start_group(name);
        Self { logger }
    }
}

impl Drop for LogGroup<'_> {
    fn drop(&mut self) {
        self.logger.end_group();
    }
}
