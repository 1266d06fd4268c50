use std::fs;
use std::path::{Path, PathBuf};

use crate::advisory::AdvisoryWarning;
use crate::context::PackagingContext;
use crate::error::{PackagerError, Result};
use crate::process::{Invocation, ToolRunner};

/// Folder under the build tree that becomes the image's root volume,
/// relative to the project root.
const STAGING_DIR: &str = "target/dmg";

pub fn staging_dir(ctx: &PackagingContext) -> PathBuf {
    ctx.root().join(STAGING_DIR)
}

/// `<staging>/<binary>.app`
pub fn bundle_dir(ctx: &PackagingContext) -> PathBuf {
    staging_dir(ctx).join(format!("{}.app", ctx.config.binary))
}

/// Info.plist for the application bundle.
pub fn info_plist(ctx: &PackagingContext) -> String {
    let name = &ctx.config.binary;
    let identifier = &ctx.config.bundle_identifier;
    let version = &ctx.version;

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleName</key>
    <string>{name}</string>
    <key>CFBundleDisplayName</key>
    <string>{name}</string>
    <key>CFBundleIdentifier</key>
    <string>{identifier}</string>
    <key>CFBundleExecutable</key>
    <string>{name}</string>
    <key>CFBundlePackageType</key>
    <string>APPL</string>
    <key>CFBundleShortVersionString</key>
    <string>{version}</string>
    <key>CFBundleVersion</key>
    <string>{version}</string>
    <key>CFBundleInfoDictionaryVersion</key>
    <string>6.0</string>
    <key>NSHighResolutionCapable</key>
    <true/>
</dict>
</plist>
"#
    )
}

/// Builds `<binary>_<version>.dmg` in the project root.
///
/// Lays out `<binary>.app/Contents/{MacOS/<binary>, Info.plist}` in a staging
/// folder next to an `Applications` link, then has `hdiutil` turn the folder
/// into a compressed read-only image. The staging folder is removed whether
/// or not `hdiutil` succeeded. The image is not signed.
pub fn create(
    ctx: &PackagingContext,
    binary: &Path,
    artifact: &Path,
    runner: &dyn ToolRunner,
) -> Result<Vec<AdvisoryWarning>> {
    let staging = staging_dir(ctx);
    let mut advisories = Vec::new();

    let laid_out = layout_bundle(ctx, binary, &staging);
    let imaged = match laid_out {
        Ok(()) => runner
            .run(&invocation(ctx, artifact))
            .map_err(|e| PackagerError::package(e.to_string())),
        Err(e) => Err(e),
    };

    super::remove_staging(&staging, &mut advisories);
    imaged?;
    Ok(advisories)
}

fn layout_bundle(ctx: &PackagingContext, binary: &Path, staging: &Path) -> Result<()> {
    let staging_error = |e: std::io::Error| {
        PackagerError::package(format!(
            "cannot lay out bundle in '{}': {}",
            staging.display(),
            e
        ))
    };

    if staging.exists() {
        fs::remove_dir_all(staging).map_err(staging_error)?;
    }

    let contents = bundle_dir(ctx).join("Contents");
    let macos = contents.join("MacOS");
    fs::create_dir_all(&macos).map_err(staging_error)?;
    fs::copy(binary, macos.join(&ctx.config.binary)).map_err(staging_error)?;
    fs::write(contents.join("Info.plist"), info_plist(ctx)).map_err(staging_error)?;

    #[cfg(unix)]
    std::os::unix::fs::symlink("/Applications", staging.join("Applications"))
        .map_err(staging_error)?;

    Ok(())
}

/// Paths are relative to the root, which is also the working directory.
fn invocation(ctx: &PackagingContext, artifact: &Path) -> Invocation {
    let image_name = artifact
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| artifact.display().to_string());

    Invocation::new("hdiutil", ctx.root()).args([
        "create".to_string(),
        "-volname".to_string(),
        format!("{} {}", ctx.config.binary, ctx.version),
        "-srcfolder".to_string(),
        STAGING_DIR.to_string(),
        "-ov".to_string(),
        "-format".to_string(),
        "UDZO".to_string(),
        image_name,
    ])
}
