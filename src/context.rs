use std::path::{Path, PathBuf};

use crate::config::{Config, PlatformConfig};
use crate::package::artifact_file_name;
use crate::platform::Platform;
use crate::version::Version;

/// Everything a pipeline run needs to know, resolved once at startup.
///
/// Stages only read from it; nothing in a run mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagingContext {
    pub root: PathBuf,
    pub config: Config,
    pub version: Version,
    pub platform: Platform,
}

impl PackagingContext {
    pub fn new(root: impl Into<PathBuf>, config: Config, version: Version, platform: Platform) -> Self {
        PackagingContext {
            root: root.into(),
            config,
            version,
            platform,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build settings for the selected platform.
    pub fn platform_config(&self) -> &PlatformConfig {
        match self.platform {
            Platform::Linux => &self.config.linux,
            Platform::Darwin => &self.config.darwin,
        }
    }

    /// Where the final artifact is written: the project root.
    pub fn artifact_path(&self) -> PathBuf {
        self.root.join(artifact_file_name(
            &self.config.binary,
            &self.version,
            self.platform,
        ))
    }
}
