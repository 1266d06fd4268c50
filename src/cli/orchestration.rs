//! Release packaging workflow
//!
//! Runs the stages strictly in order, each one feeding the next:
//! version, platform, build, package, cleanup. Any fatal error ends the run
//! at the stage that raised it. Cleanup runs only after the artifact has
//! been reported and can never turn a successful run into a failed one.
//!
//! Two runs against the same project root at the same time are not
//! supported: they share the staging copy, the build tree and the artifact
//! path, and nothing locks them.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::advisory::AdvisoryWarning;
use crate::build;
use crate::cleanup::{self, CleanupOutcome, Confirm};
use crate::config;
use crate::context::PackagingContext;
use crate::error::{PackagerError, Result};
use crate::package;
use crate::platform::{self, Platform};
use crate::process::ToolRunner;
use crate::ui;
use crate::version::{self, Version};

/// Arguments for the packaging workflow
///
/// Mirrors the CLI arguments without depending on clap, so the workflow can
/// be driven from tests.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineArgs {
    /// Project root holding the manifest; artifacts are written here
    pub root: PathBuf,

    /// Path to a custom packager config file
    pub config_path: Option<String>,

    /// Explicit platform override
    pub platform: Option<String>,
}

/// Pipeline states, in the only order they can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Start,
    VersionResolved,
    PlatformResolved,
    Built,
    Packaged,
    CleanedUp,
    End,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Start => Some(Stage::VersionResolved),
            Stage::VersionResolved => Some(Stage::PlatformResolved),
            Stage::PlatformResolved => Some(Stage::Built),
            Stage::Built => Some(Stage::Packaged),
            Stage::Packaged => Some(Stage::CleanedUp),
            Stage::CleanedUp => Some(Stage::End),
            Stage::End => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::VersionResolved => "version",
            Stage::PlatformResolved => "platform",
            Stage::Built => "build",
            Stage::Packaged => "package",
            Stage::CleanedUp => "cleanup",
            Stage::End => "end",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a successful packaging run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub version: Version,
    pub platform: Platform,
    pub artifact: PathBuf,
    pub cleanup: CleanupOutcome,
    /// Every stage reached, starting with [Stage::Start]
    pub stages: Vec<Stage>,
    /// Wall time of each stage that ran
    pub timings: Vec<(Stage, Duration)>,
    pub advisories: Vec<AdvisoryWarning>,
}

/// Tracks progress through [Stage] and refuses to skip or repeat one.
struct Progress {
    stages: Vec<Stage>,
    timings: Vec<(Stage, Duration)>,
    advisories: Vec<AdvisoryWarning>,
}

impl Progress {
    fn new() -> Self {
        Progress {
            stages: vec![Stage::Start],
            timings: Vec::new(),
            advisories: Vec::new(),
        }
    }

    fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Start)
    }

    fn advance(&mut self, reached: Stage, started: Instant) {
        debug_assert_eq!(self.current().next(), Some(reached));
        let elapsed = started.elapsed();
        ui::display_stage_timing(reached.name(), elapsed);
        self.stages.push(reached);
        self.timings.push((reached, elapsed));
    }

    fn warn(&mut self, warnings: Vec<AdvisoryWarning>) {
        for warning in warnings {
            ui::display_advisory(&warning);
            self.advisories.push(warning);
        }
    }
}

/// Main packaging workflow
///
/// # Arguments
///
/// * `args` - Project root, config path and platform override
/// * `runner` - Executes cargo, the shrink tool and the archiver
/// * `confirm` - Decides whether build outputs are removed at the end
///
/// # Returns
///
/// The report of a run that produced its artifact, or the error of the
/// stage that stopped it
pub fn run_pipeline(
    args: PipelineArgs,
    runner: &dyn ToolRunner,
    confirm: &dyn Confirm,
) -> Result<PipelineReport> {
    let mut progress = Progress::new();

    let started = Instant::now();
    ui::display_status("Resolving version...");
    let config = config::load_config(&args.root, args.config_path.as_deref())?;
    let version = version::resolve_version(&args.root.join(&config.manifest))?;
    ui::display_success(&format!("Version {}", version));
    progress.advance(Stage::VersionResolved, started);

    let started = Instant::now();
    ui::display_status("Selecting platform...");
    let platform = platform::select_platform(args.platform.as_deref())?;
    ui::display_success(&format!("Platform {}", platform));
    progress.advance(Stage::PlatformResolved, started);

    let ctx = PackagingContext::new(args.root, config, version, platform);

    let started = Instant::now();
    let plan = build::plan(&ctx);
    ui::display_status(&format!("Building: {}", plan.compile));
    let built = build::build(&ctx, runner)?;
    progress.warn(built.advisories);
    ui::display_success(&format!("Built {}", built.binary.display()));
    progress.advance(Stage::Built, started);

    let started = Instant::now();
    ui::display_status(&format!(
        "Packaging {} for {}...",
        ctx.config.binary, ctx.platform
    ));
    let packaged = package::package(&ctx, &built.binary, runner)?;
    progress.warn(packaged.advisories);
    progress.advance(Stage::Packaged, started);
    ui::display_artifact(&packaged.artifact);

    let started = Instant::now();
    let outcome = cleanup::cleanup(&ctx, runner, confirm);
    match &outcome {
        CleanupOutcome::Removed => ui::display_success("Build outputs removed"),
        CleanupOutcome::Kept => ui::display_status("Build outputs kept"),
        CleanupOutcome::Failed(reason) => progress.warn(vec![AdvisoryWarning::CleanupFailed {
            reason: reason.clone(),
        }]),
    }
    progress.advance(Stage::CleanedUp, started);
    progress.stages.push(Stage::End);

    Ok(PipelineReport {
        version: ctx.version,
        platform: ctx.platform,
        artifact: packaged.artifact,
        cleanup: outcome,
        stages: progress.stages,
        timings: progress.timings,
        advisories: progress.advisories,
    })
}

/// One-line description of why a run stopped, naming the failing stage.
pub fn describe_failure(error: &PackagerError) -> String {
    match error.stage().and_then(Stage::next) {
        Some(stage) => format!("{} stage failed: {}", stage, error),
        None => error.to_string(),
    }
}
