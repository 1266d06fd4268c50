use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PackagerError, Result};

/// File name searched for in the project root.
pub const CONFIG_FILE_NAME: &str = "wtpack.toml";

/// Represents the complete configuration for wt-package.
///
/// Names the binary being shipped, where its version is declared, which cargo
/// profile produces it, and the per-platform build and shrink settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(default = "default_bundle_identifier")]
    pub bundle_identifier: String,

    #[serde(default = "PlatformConfig::linux", deserialize_with = "linux_table")]
    pub linux: PlatformConfig,

    #[serde(default = "PlatformConfig::darwin", deserialize_with = "darwin_table")]
    pub darwin: PlatformConfig,
}

fn default_binary() -> String {
    "wt".to_string()
}

fn default_manifest() -> String {
    "Cargo.toml".to_string()
}

fn default_profile() -> String {
    "release-smaller".to_string()
}

fn default_bundle_identifier() -> String {
    "org.wt.walkie-talkie".to_string()
}

/// Build settings for one target platform.
///
/// `shrink` is the size-reduction command; the binary path is appended as its
/// last argument. An empty list disables the step.
///
/// Fields left out of a `[linux]` or `[darwin]` table keep that platform's
/// defaults. `target = ""` selects the host target.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PlatformConfig {
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub shrink: Vec<String>,
}

impl PlatformConfig {
    /// Static musl build compressed with upx.
    pub fn linux() -> Self {
        PlatformConfig {
            target: Some("x86_64-unknown-linux-musl".to_string()),
            shrink: vec!["upx".to_string(), "--best".to_string()],
        }
    }

    /// Host-target build with symbols stripped.
    pub fn darwin() -> Self {
        PlatformConfig {
            target: None,
            shrink: vec!["strip".to_string()],
        }
    }
}

/// A `[linux]` / `[darwin]` table as written, before defaults are filled in.
#[derive(Deserialize)]
struct PlatformTable {
    #[serde(default)]
    target: Option<String>,

    #[serde(default)]
    shrink: Option<Vec<String>>,
}

impl PlatformTable {
    fn over(self, defaults: PlatformConfig) -> PlatformConfig {
        let target = match self.target {
            None => defaults.target,
            Some(target) if target.trim().is_empty() => None,
            Some(target) => Some(target),
        };

        PlatformConfig {
            target,
            shrink: self.shrink.unwrap_or(defaults.shrink),
        }
    }
}

fn linux_table<'de, D>(deserializer: D) -> std::result::Result<PlatformConfig, D::Error>
where
    D: Deserializer<'de>,
{
    PlatformTable::deserialize(deserializer).map(|table| table.over(PlatformConfig::linux()))
}

fn darwin_table<'de, D>(deserializer: D) -> std::result::Result<PlatformConfig, D::Error>
where
    D: Deserializer<'de>,
{
    PlatformTable::deserialize(deserializer).map(|table| table.over(PlatformConfig::darwin()))
}

impl Default for Config {
    fn default() -> Self {
        Config {
            binary: default_binary(),
            manifest: default_manifest(),
            profile: default_profile(),
            bundle_identifier: default_bundle_identifier(),
            linux: PlatformConfig::linux(),
            darwin: PlatformConfig::darwin(),
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self> {
        if self.binary.trim().is_empty() {
            return Err(PackagerError::config("'binary' must not be empty"));
        }
        if self.binary.contains('/') || self.binary.contains('\\') {
            return Err(PackagerError::config(format!(
                "'binary' must be a plain file name, got '{}'",
                self.binary
            )));
        }
        if self.profile.trim().is_empty() {
            return Err(PackagerError::config("'profile' must not be empty"));
        }
        Ok(self)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `wtpack.toml` in the project root
/// 3. Default configuration if no file found
///
/// Settings describe the project being packaged, so nothing outside the
/// root is consulted implicitly.
///
/// # Arguments
/// * `root` - Project root the packager runs against
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(root: &Path, config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            PackagerError::config(format!("cannot read config file '{}': {}", path, e))
        })?
    } else {
        let root_config = root.join(CONFIG_FILE_NAME);
        if !root_config.exists() {
            return Ok(Config::default());
        }
        fs::read_to_string(&root_config).map_err(|e| {
            PackagerError::config(format!(
                "cannot read config file '{}': {}",
                root_config.display(),
                e
            ))
        })?
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| PackagerError::config(format!("invalid {}: {}", CONFIG_FILE_NAME, e)))?;
    config.validate()
}
