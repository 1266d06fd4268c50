use thiserror::Error;

use crate::cli::orchestration::Stage;

/// Unified error type for wt-package operations
#[derive(Error, Debug)]
pub enum PackagerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),

    #[error("Build failed: {0}")]
    Build(String),

    #[error("Packaging failed: {0}")]
    Package(String),

    #[error("Tool invocation failed: {0}")]
    Tool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in wt-package
pub type Result<T> = std::result::Result<T, PackagerError>;

impl PackagerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PackagerError::Config(msg.into())
    }

    /// Create an unsupported-platform error naming the rejected platform
    pub fn unsupported(platform: impl Into<String>) -> Self {
        PackagerError::UnsupportedPlatform(platform.into())
    }

    /// Create a build error with context
    pub fn build(msg: impl Into<String>) -> Self {
        PackagerError::Build(msg.into())
    }

    /// Create a packaging error with context
    pub fn package(msg: impl Into<String>) -> Self {
        PackagerError::Package(msg.into())
    }

    /// Create an external tool error with context
    pub fn tool(msg: impl Into<String>) -> Self {
        PackagerError::Tool(msg.into())
    }

    /// The last stage the pipeline completed before this error stopped it.
    ///
    /// Unclassified tool and I/O errors carry no stage.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PackagerError::Config(_) => Some(Stage::Start),
            PackagerError::UnsupportedPlatform(_) => Some(Stage::VersionResolved),
            PackagerError::Build(_) => Some(Stage::PlatformResolved),
            PackagerError::Package(_) => Some(Stage::Built),
            PackagerError::Tool(_) | PackagerError::Io(_) => None,
        }
    }

    /// Process exit code used by the binary for this error class.
    ///
    /// * `2` - configuration (manifest, version, packager config)
    /// * `3` - unsupported platform
    /// * `4` - build failure
    /// * `5` - packaging failure
    /// * `1` - anything else
    pub fn exit_code(&self) -> i32 {
        match self {
            PackagerError::Config(_) => 2,
            PackagerError::UnsupportedPlatform(_) => 3,
            PackagerError::Build(_) => 4,
            PackagerError::Package(_) => 5,
            PackagerError::Tool(_) | PackagerError::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PackagerError::config("manifest has no version");
        assert_eq!(
            err.to_string(),
            "Configuration error: manifest has no version"
        );
    }

    #[test]
    fn test_unsupported_platform_names_platform() {
        let err = PackagerError::unsupported("WINDOWS");
        assert_eq!(err.to_string(), "Platform not supported: WINDOWS");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PackagerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_build_and_package_are_distinct() {
        let build = PackagerError::build("x");
        let package = PackagerError::package("x");
        assert_ne!(build.to_string(), package.to_string());
        assert_ne!(build.exit_code(), package.exit_code());
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = vec![
            PackagerError::config("x"),
            PackagerError::unsupported("x"),
            PackagerError::build("x"),
            PackagerError::package("x"),
            PackagerError::tool("x"),
        ];

        for err in errors {
            assert_ne!(err.exit_code(), 0, "{} must not exit with 0", err);
        }
    }

    #[test]
    fn test_error_stage_mapping() {
        assert_eq!(PackagerError::config("x").stage(), Some(Stage::Start));
        assert_eq!(
            PackagerError::unsupported("x").stage(),
            Some(Stage::VersionResolved)
        );
        assert_eq!(
            PackagerError::build("x").stage(),
            Some(Stage::PlatformResolved)
        );
        assert_eq!(PackagerError::package("x").stage(), Some(Stage::Built));
        assert_eq!(PackagerError::tool("x").stage(), None);
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (PackagerError::config("x"), "Configuration error"),
            (PackagerError::unsupported("x"), "Platform not supported"),
            (PackagerError::build("x"), "Build failed"),
            (PackagerError::package("x"), "Packaging failed"),
            (PackagerError::tool("x"), "Tool invocation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
