//! Godot release descriptors.

use std::fmt;

/// Release channel name used for final releases.
pub const STABLE: &str = "stable";

/// Version the build tools fall back to when none is configured.
pub const DEFAULT_VERSION: &str = "4.1.3";

/// Release channel the build tools fall back to when none is configured.
pub const DEFAULT_RELEASE: &str = STABLE;

/// A Godot version paired with its release channel.
///
/// The channel is `stable` for final releases or a pre-release label such as
/// `rc1` or `beta2`. Both strings are used verbatim in remote paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Release {
    pub version: String,
    pub channel: String,
}

impl Release {
    #[must_use]
    pub fn new(version: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            channel: channel.into(),
        }
    }

    /// Returns true for the `stable` channel.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.channel == STABLE
    }

    /// Returns the major engine version: the number before the first `.`.
    #[must_use]
    pub fn major(&self) -> Option<u32> {
        self.version.split('.').next()?.parse().ok()
    }

    /// Returns the archive file name for this release on `os`.
    #[must_use]
    pub fn remote_file_name(&self, os: crate::TargetOs) -> String {
        os.remote_file_name(&self.version, &self.channel)
    }
}

impl Default for Release {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION, DEFAULT_RELEASE)
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.version, self.channel)
    }
}
