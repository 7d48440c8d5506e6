//! Target platform rules for Godot downloads.
//!
//! Godot publishes one archive per operating system, and the naming scheme
//! differs between OSes and between engine generations. This module maps a
//! [`TargetOs`] onto those conventions.
//!
//! ## Supported Platforms
//!
//! - Linux `x86_64` (`linux.x86_64`, `x11.64` for Godot 3)
//! - Windows 64-bit (`win64.exe`)
//! - macOS universal (`macos.universal`)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::GodotError;

/// Operating system a Godot binary is installed for.
///
/// The value is chosen once, from the host or explicitly, and passed to every
/// operation that depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    Linux,
    Windows,
    MacOs,
}

impl TargetOs {
    /// Returns the target matching the operating system this process runs on.
    ///
    /// Unknown operating systems are treated as Linux.
    #[must_use]
    pub fn host() -> Self {
        Self::from_os_name(std::env::consts::OS).unwrap_or(Self::Linux)
    }

    /// Maps an OS name (`std::env::consts::OS` style, `darwin` accepted) to a target.
    #[must_use]
    pub fn from_os_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linux" => Some(Self::Linux),
            "windows" => Some(Self::Windows),
            "macos" | "darwin" => Some(Self::MacOs),
            _ => None,
        }
    }

    #[must_use = "returns the OS string without side effects"]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::MacOs => "macos",
        }
    }

    /// Returns the directory Godot is installed into when none is configured.
    ///
    /// - Linux: `~/.local/bin`
    /// - Windows: `C:\Program Files (x86)\Godot`
    /// - macOS: `/Applications/Godot`
    ///
    /// Returns `None` on Linux when the home directory cannot be determined.
    #[must_use]
    pub fn default_bin_dir(self) -> Option<PathBuf> {
        match self {
            Self::Linux => dirs::home_dir().map(|home| home.join(".local").join("bin")),
            Self::Windows => Some(PathBuf::from(r"C:\Program Files (x86)\Godot")),
            Self::MacOs => Some(PathBuf::from("/Applications/Godot")),
        }
    }

    /// Returns the archive file name published for `version` and `release`.
    ///
    /// Both values are used verbatim and must match the server's spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use gbt_godot::TargetOs;
    ///
    /// assert_eq!(
    ///     TargetOs::Linux.remote_file_name("4.1.3", "stable"),
    ///     "Godot_v4.1.3-stable_linux.x86_64.zip"
    /// );
    /// ```
    #[must_use]
    pub fn remote_file_name(self, version: &str, release: &str) -> String {
        match self {
            Self::Linux if version.starts_with('3') => {
                format!("Godot_v{version}-{release}_x11.64.zip")
            }
            Self::Linux => format!("Godot_v{version}-{release}_linux.x86_64.zip"),
            Self::Windows => format!("Godot_v{version}-{release}_win64.exe.zip"),
            Self::MacOs => format!("Godot_v{version}-{release}_macos.universal.zip"),
        }
    }

    /// Returns whether `path` names the Godot executable for this target.
    ///
    /// Only the extension is inspected: `.x86_64` or `.64` on Linux, `.exe` on
    /// Windows, `.universal` on macOS. Paths ending in a separator are
    /// directories and never match.
    #[must_use]
    pub fn is_platform_binary(self, path: &Path) -> bool {
        let is_dir = path
            .as_os_str()
            .to_string_lossy()
            .chars()
            .last()
            .is_some_and(std::path::is_separator);
        if is_dir {
            return false;
        }

        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        match self {
            Self::Linux => matches!(extension, "x86_64" | "64"),
            Self::Windows => extension == "exe",
            Self::MacOs => extension == "universal",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetOs {
    type Err = GodotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_os_name(s).ok_or_else(|| {
            GodotError::configuration(format!(
                "unsupported target OS '{s}', expected one of: linux, windows, macos"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TargetOs; 3] = [TargetOs::Linux, TargetOs::Windows, TargetOs::MacOs];

    #[test]
    fn as_str_returns_expected_values() {
        assert_eq!(TargetOs::Linux.as_str(), "linux");
        assert_eq!(TargetOs::Windows.as_str(), "windows");
        assert_eq!(TargetOs::MacOs.as_str(), "macos");
    }

    #[test]
    fn display_matches_as_str() {
        for os in ALL {
            assert_eq!(os.to_string(), os.as_str());
        }
    }

    #[test]
    fn from_os_name_accepts_darwin() {
        assert_eq!(TargetOs::from_os_name("darwin"), Some(TargetOs::MacOs));
        assert_eq!(TargetOs::from_os_name("MacOS"), Some(TargetOs::MacOs));
        assert_eq!(TargetOs::from_os_name("freebsd"), None);
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert_eq!("windows".parse::<TargetOs>().ok(), Some(TargetOs::Windows));
        let err = "plan9".parse::<TargetOs>().expect_err("Should reject plan9");
        assert!(matches!(err, GodotError::Configuration { .. }));
    }

    #[test]
    fn host_matches_compile_target() {
        #[cfg(target_os = "linux")]
        assert_eq!(TargetOs::host(), TargetOs::Linux);

        #[cfg(target_os = "macos")]
        assert_eq!(TargetOs::host(), TargetOs::MacOs);

        #[cfg(target_os = "windows")]
        assert_eq!(TargetOs::host(), TargetOs::Windows);
    }

    #[test]
    fn remote_file_name_per_os() {
        assert_eq!(
            TargetOs::Linux.remote_file_name("4.1.3", "stable"),
            "Godot_v4.1.3-stable_linux.x86_64.zip"
        );
        assert_eq!(
            TargetOs::Windows.remote_file_name("4.1.3", "stable"),
            "Godot_v4.1.3-stable_win64.exe.zip"
        );
        assert_eq!(
            TargetOs::MacOs.remote_file_name("4.2", "rc1"),
            "Godot_v4.2-rc1_macos.universal.zip"
        );
    }

    #[test]
    fn legacy_linux_name_only_for_godot_3() {
        assert_eq!(
            TargetOs::Linux.remote_file_name("3.5.3", "stable"),
            "Godot_v3.5.3-stable_x11.64.zip"
        );
        assert_eq!(
            TargetOs::Windows.remote_file_name("3.5.3", "stable"),
            "Godot_v3.5.3-stable_win64.exe.zip"
        );
        assert!(
            !TargetOs::Linux
                .remote_file_name("13.0", "stable")
                .contains("x11")
        );
    }

    #[test]
    fn remote_file_name_contains_inputs_verbatim() {
        for os in ALL {
            for (version, release) in [("4.1.3", "stable"), ("3.6", "beta2"), ("4.3", "RC1")] {
                let name = os.remote_file_name(version, release);
                assert!(name.contains(version), "{name} should contain {version}");
                assert!(name.contains(release), "{name} should contain {release}");
            }
        }
    }

    #[test]
    fn default_bin_dir_per_os() {
        assert_eq!(
            TargetOs::Windows.default_bin_dir(),
            Some(PathBuf::from(r"C:\Program Files (x86)\Godot"))
        );
        assert_eq!(
            TargetOs::MacOs.default_bin_dir(),
            Some(PathBuf::from("/Applications/Godot"))
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                TargetOs::Linux.default_bin_dir(),
                Some(home.join(".local").join("bin"))
            );
        }
    }

    #[test]
    fn linux_binary_extensions() {
        let os = TargetOs::Linux;
        assert!(os.is_platform_binary(Path::new("/tmp/Godot_v4.1.3-stable_linux.x86_64")));
        assert!(os.is_platform_binary(Path::new("/tmp/Godot_v3.5-stable_x11.64")));
        assert!(!os.is_platform_binary(Path::new("/tmp/Godot_v4.1.3-stable_win64.exe")));
        assert!(!os.is_platform_binary(Path::new("/tmp/README")));
    }

    #[test]
    fn windows_binary_extensions() {
        let os = TargetOs::Windows;
        assert!(os.is_platform_binary(Path::new("Godot_v4.1.3-stable_win64.exe")));
        assert!(!os.is_platform_binary(Path::new("Godot_v4.1.3-stable_linux.x86_64")));
        assert!(!os.is_platform_binary(Path::new("Godot.EXE.txt")));
    }

    #[test]
    fn macos_binary_extensions() {
        let os = TargetOs::MacOs;
        assert!(os.is_platform_binary(Path::new("Godot_v4.1.3-stable_macos.universal")));
        assert!(!os.is_platform_binary(Path::new("Godot.app")));
    }

    #[test]
    fn names_without_extension_and_directories_never_match() {
        for os in ALL {
            assert!(!os.is_platform_binary(Path::new("godot")));
            assert!(!os.is_platform_binary(Path::new("")));
        }
        assert!(!TargetOs::Linux.is_platform_binary(Path::new("bin.x86_64/")));
        assert!(!TargetOs::Windows.is_platform_binary(Path::new("tools.exe/")));
        assert!(!TargetOs::MacOs.is_platform_binary(Path::new("Godot.universal/")));
    }
}
