//! ZIP extraction for downloaded Godot packages.
//!
//! Archives are extracted next to themselves: the destination is the
//! absolute path of the directory holding the archive. Entries that would
//! land outside that directory are rejected.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek};
use std::path::{Component, Path, PathBuf};

use crate::errors::{ExtractError, GodotError, Result};

/// Mode used for file entries that carry no Unix permissions.
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Extracts every entry of the ZIP archive at `archive_path` into the
/// archive's own directory.
///
/// Returns the absolute paths of the extracted files, in archive order.
/// Directory entries are created but not listed.
///
/// # Errors
///
/// Stops at the first failing entry and returns an [`ExtractError`] holding
/// the files extracted so far and the cause:
/// - the archive cannot be opened or is not a valid ZIP file
/// - the destination directory cannot be resolved
/// - an entry resolves outside the destination (`PathTraversal`)
/// - a directory or file cannot be created, or an entry cannot be copied
pub fn extract(archive_path: &Path) -> std::result::Result<Vec<PathBuf>, ExtractError> {
    let fail = |error| ExtractError::new(Vec::new(), error);

    let file = File::open(archive_path).map_err(|e| {
        fail(GodotError::filesystem(
            format!("failed to open archive: {}", archive_path.display()),
            e,
        ))
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        fail(GodotError::archive_format(
            format!("failed to read ZIP archive: {}", archive_path.display()),
            e,
        ))
    })?;

    let dest_dir = destination_dir(archive_path).map_err(fail)?;

    let mut extracted = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        if let Err(error) = extract_entry(&mut archive, index, &dest_dir, &mut extracted) {
            return Err(ExtractError::new(extracted, error));
        }
    }

    Ok(extracted)
}

/// Resolves the absolute directory an archive is extracted into.
fn destination_dir(archive_path: &Path) -> Result<PathBuf> {
    let parent = archive_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::path::absolute(parent)
        .map(|dir| normalize_lexically(&dir))
        .map_err(|e| {
            GodotError::filesystem(
                format!("failed to resolve extraction directory for {}", archive_path.display()),
                e,
            )
        })
}

fn extract_entry<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    index: usize,
    dest_dir: &Path,
    extracted: &mut Vec<PathBuf>,
) -> Result<()> {
    let mut entry = archive.by_index(index).map_err(|e| {
        GodotError::archive_format(format!("failed to read archive entry {index}"), e)
    })?;

    let output_path = normalize_lexically(&dest_dir.join(entry.name()));
    if !is_strictly_within(&output_path, dest_dir) {
        return Err(GodotError::path_traversal(output_path));
    }

    if entry.is_dir() {
        return std::fs::create_dir_all(&output_path).map_err(|e| {
            GodotError::filesystem(
                format!("failed to create directory: {}", output_path.display()),
                e,
            )
        });
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            GodotError::filesystem(
                format!("failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    let mut outfile = create_output_file(&output_path, entry.unix_mode()).map_err(|e| {
        GodotError::filesystem(format!("failed to open file: {}", output_path.display()), e)
    })?;

    std::io::copy(&mut entry, &mut outfile).map_err(|e| {
        GodotError::filesystem(format!("failed to extract: {}", output_path.display()), e)
    })?;

    extracted.push(output_path);
    Ok(())
}

/// Creates or truncates `path`, applying the entry's stored mode on Unix.
fn create_output_file(path: &Path, mode: Option<u32>) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode.unwrap_or(DEFAULT_FILE_MODE) & 0o7777);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}

/// Resolves `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// True when `path` is below `dir`; `dir` itself does not count.
fn is_strictly_within(path: &Path, dir: &Path) -> bool {
    path != dir && path.starts_with(dir)
}
