//! Compiles the binary for the selected platform and shrinks it.

use std::path::PathBuf;

use crate::advisory::AdvisoryWarning;
use crate::context::PackagingContext;
use crate::error::{PackagerError, Result};
use crate::process::{Invocation, ToolRunner};

/// The commands a build runs and the binary it is expected to leave behind.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPlan {
    pub compile: Invocation,
    pub shrink: Option<Invocation>,
    pub binary: PathBuf,
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub binary: PathBuf,
    pub shrunk: bool,
    pub advisories: Vec<AdvisoryWarning>,
}

/// Cargo names the output directory of the `dev` profile `debug`.
fn profile_dir(profile: &str) -> &str {
    match profile {
        "dev" | "test" => "debug",
        "bench" => "release",
        other => other,
    }
}

/// Works out the build for the context's platform.
///
/// With a target triple the binary lands in `target/<triple>/<profile>/`,
/// otherwise in `target/<profile>/`. Tools run with the root as their working
/// directory, so the shrink step gets the binary path relative to it.
pub fn plan(ctx: &PackagingContext) -> BuildPlan {
    let config = &ctx.config;
    let platform_config = ctx.platform_config();

    let mut compile =
        Invocation::new("cargo", ctx.root()).args(["build", "--profile", config.profile.as_str()]);
    let mut relative = PathBuf::from("target");
    if let Some(target) = &platform_config.target {
        compile = compile.args(["--target", target.as_str()]);
        relative.push(target);
    }
    relative.push(profile_dir(&config.profile));
    relative.push(&config.binary);
    let binary = ctx.root().join(&relative);

    let shrink = platform_config.shrink.split_first().map(|(program, args)| {
        Invocation::new(program.as_str(), ctx.root())
            .args(args.iter().map(String::as_str))
            .arg(relative.display().to_string())
    });

    BuildPlan {
        compile,
        shrink,
        binary,
    }
}

/// Runs the build and the size-reduction step.
///
/// A failing compile or a missing binary stops the pipeline. The shrink step
/// is best-effort: when it is not configured or fails, the build still
/// succeeds and the reason is returned as an advisory.
pub fn build(ctx: &PackagingContext, runner: &dyn ToolRunner) -> Result<BuildOutput> {
    let plan = plan(ctx);

    runner
        .run(&plan.compile)
        .map_err(|e| PackagerError::build(e.to_string()))?;
    ensure_binary(&plan)?;

    let mut advisories = Vec::new();
    let shrunk = match &plan.shrink {
        Some(shrink) => match runner.run(shrink) {
            Ok(()) => true,
            Err(e) => {
                advisories.push(AdvisoryWarning::ShrinkSkipped {
                    binary: plan.binary.display().to_string(),
                    reason: e.to_string(),
                });
                false
            }
        },
        None => {
            advisories.push(AdvisoryWarning::ShrinkSkipped {
                binary: plan.binary.display().to_string(),
                reason: format!("no shrink command configured for {}", ctx.platform),
            });
            false
        }
    };
    ensure_binary(&plan)?;

    Ok(BuildOutput {
        binary: plan.binary,
        shrunk,
        advisories,
    })
}

fn ensure_binary(plan: &BuildPlan) -> Result<()> {
    if plan.binary.is_file() {
        Ok(())
    } else {
        Err(PackagerError::build(format!(
            "expected binary '{}' does not exist after '{}'",
            plan.binary.display(),
            plan.compile
        )))
    }
}
