//! Wraps a built binary into the distributable for its platform
//!
//! - [tarball]: `<binary>_<version>.tar.gz` holding the bare binary (Linux)
//! - [disk_image]: `<binary>_<version>.dmg` holding an application bundle (macOS)
//!
//! Both write the artifact into the project root. The artifact name depends
//! only on the binary name, version and platform, so repeated runs of the
//! same version always produce the same file name.

pub mod disk_image;
pub mod tarball;

use std::fs;
use std::path::{Path, PathBuf};

use crate::advisory::AdvisoryWarning;
use crate::context::PackagingContext;
use crate::error::{PackagerError, Result};
use crate::platform::Platform;
use crate::process::ToolRunner;
use crate::version::Version;

/// Result of a successful packaging step.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageOutput {
    pub artifact: PathBuf,
    pub advisories: Vec<AdvisoryWarning>,
}

/// File name of the artifact, e.g. `wt_0.0.1.tar.gz`.
pub fn artifact_file_name(binary: &str, version: &Version, platform: Platform) -> String {
    format!("{}_{}.{}", binary, version, platform.artifact_extension())
}

/// Packages `binary` for the context's platform.
///
/// # Returns
/// * `Ok(PackageOutput)` - The artifact exists at [PackagingContext::artifact_path]
/// * `Err(PackagerError::Package)` - If the build output is missing, the
///   archiver fails, or the artifact is not on disk afterwards
pub fn package(
    ctx: &PackagingContext,
    binary: &Path,
    runner: &dyn ToolRunner,
) -> Result<PackageOutput> {
    if !binary.is_file() {
        return Err(PackagerError::package(format!(
            "build output '{}' does not exist",
            binary.display()
        )));
    }

    let artifact = ctx.artifact_path();
    // a leftover artifact from an earlier run must not pass the final check
    if artifact.exists() {
        fs::remove_file(&artifact).map_err(|e| {
            PackagerError::package(format!(
                "cannot replace existing '{}': {}",
                artifact.display(),
                e
            ))
        })?;
    }

    let advisories = match ctx.platform {
        Platform::Linux => tarball::create(ctx, binary, &artifact, runner)?,
        Platform::Darwin => disk_image::create(ctx, binary, &artifact, runner)?,
    };

    if !artifact.is_file() {
        return Err(PackagerError::package(format!(
            "artifact '{}' was not created",
            artifact.display()
        )));
    }

    Ok(PackageOutput {
        artifact,
        advisories,
    })
}

/// Removes a staging path, reporting failure as an advisory.
fn remove_staging(path: &Path, advisories: &mut Vec<AdvisoryWarning>) {
    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => advisories.push(AdvisoryWarning::StagingLeftBehind {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}
