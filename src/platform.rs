use std::fmt;

use crate::error::{PackagerError, Result};

/// Target platforms the packager can produce artifacts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Darwin,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Linux, Platform::Darwin];

    /// Canonical upper-case identifier, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "LINUX",
            Platform::Darwin => "DARWIN",
        }
    }

    /// File extension of the artifact produced for this platform.
    pub fn artifact_extension(&self) -> &'static str {
        match self {
            Platform::Linux => "tar.gz",
            Platform::Darwin => "dmg",
        }
    }

    /// Parses a platform name case-insensitively. `macos` is an alias of `darwin`.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_uppercase().as_str() {
            "LINUX" => Ok(Platform::Linux),
            "DARWIN" | "MACOS" => Ok(Platform::Darwin),
            _ => Err(PackagerError::unsupported(raw.trim())),
        }
    }

    /// Maps a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::Darwin),
            other => Err(PackagerError::unsupported(other)),
        }
    }

    /// Detects the platform of the running host.
    pub fn host() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selects the platform for this run.
///
/// An explicit override always wins; without one the host platform is used.
pub fn select_platform(override_name: Option<&str>) -> Result<Platform> {
    match override_name {
        Some(name) => Platform::parse(name),
        None => Platform::host(),
    }
}
