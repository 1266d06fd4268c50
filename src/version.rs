use std::fmt;
use std::fs;
use std::path::Path;

use toml::Value;

use crate::error::{PackagerError, Result};

/// The release version being packaged.
///
/// Read once from the project manifest and used verbatim in artifact names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(semver::Version);

impl Version {
    /// Parses a semantic version string (e.g. `0.0.1`, `1.2.0-rc.1`).
    pub fn parse(raw: &str) -> Result<Self> {
        semver::Version::parse(raw.trim()).map(Version).map_err(|e| {
            PackagerError::config(format!("'{}' is not a semantic version: {}", raw, e))
        })
    }

    pub fn semver(&self) -> &semver::Version {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves the project version from a cargo manifest.
///
/// Looks at `[package].version` first. When the package inherits its version
/// (`version.workspace = true`) or the manifest is a virtual workspace, falls
/// back to `[workspace.package].version`.
///
/// # Returns
/// * `Ok(Version)` - The declared version
/// * `Err(PackagerError::Config)` - If the manifest is missing, unreadable,
///   has no version field, or the field is not a semantic version
pub fn resolve_version(manifest_path: &Path) -> Result<Version> {
    let content = fs::read_to_string(manifest_path).map_err(|e| {
        PackagerError::config(format!(
            "cannot read manifest '{}': {}",
            manifest_path.display(),
            e
        ))
    })?;

    let manifest: Value = content.parse().map_err(|e| {
        PackagerError::config(format!(
            "cannot parse manifest '{}': {}",
            manifest_path.display(),
            e
        ))
    })?;

    let raw = declared_version(&manifest).ok_or_else(|| {
        PackagerError::config(format!(
            "manifest '{}' does not declare a version",
            manifest_path.display()
        ))
    })?;

    Version::parse(raw)
}

fn declared_version(manifest: &Value) -> Option<&str> {
    let workspace_version = move || {
        manifest
            .get("workspace")
            .and_then(|w| w.get("package"))
            .and_then(|p| p.get("version"))
            .and_then(Value::as_str)
    };

    match manifest.get("package").and_then(|p| p.get("version")) {
        Some(Value::String(version)) => Some(version.as_str()),
        Some(Value::Table(inherit)) if inherit.get("workspace") == Some(&Value::Boolean(true)) => {
            workspace_version()
        }
        Some(_) => None,
        None => workspace_version(),
    }
}
