use std::fs;
use std::path::Path;

use crate::advisory::AdvisoryWarning;
use crate::context::PackagingContext;
use crate::error::{PackagerError, Result};
use crate::process::{Invocation, ToolRunner};

/// Builds `<binary>_<version>.tar.gz` in the project root.
///
/// The binary is copied to `<root>/<binary>` so the archive holds a single
/// top-level entry with the plain binary name. Anything already at that path
/// is left alone and packaging fails instead. The staging copy is removed
/// whether or not `tar` succeeded.
pub fn create(
    ctx: &PackagingContext,
    binary: &Path,
    artifact: &Path,
    runner: &dyn ToolRunner,
) -> Result<Vec<AdvisoryWarning>> {
    let name = ctx.config.binary.as_str();
    let staging = ctx.root().join(name);
    if staging.symlink_metadata().is_ok() {
        return Err(PackagerError::package(format!(
            "staging path '{}' already exists",
            staging.display()
        )));
    }

    fs::copy(binary, &staging).map_err(|e| {
        PackagerError::package(format!(
            "cannot stage '{}' as '{}': {}",
            binary.display(),
            staging.display(),
            e
        ))
    })?;

    let archive = invocation(ctx, artifact);
    let archived = runner.run(&archive);

    let mut advisories = Vec::new();
    super::remove_staging(&staging, &mut advisories);

    archived.map_err(|e| PackagerError::package(e.to_string()))?;
    Ok(advisories)
}

fn invocation(ctx: &PackagingContext, artifact: &Path) -> Invocation {
    let archive_name = artifact
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| artifact.display().to_string());

    Invocation::new("tar", ctx.root()).args([
        "-czf".to_string(),
        archive_name,
        ctx.config.binary.clone(),
    ])
}
