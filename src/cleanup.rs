//! Optional removal of build outputs after packaging.

use anyhow::Result;

use crate::context::PackagingContext;
use crate::process::{Invocation, ToolRunner};
use crate::ui;

/// Source of the yes/no decision that gates cleanup.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Asks the operator on the terminal. Pressing Enter keeps the outputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Prompt;

impl Confirm for Prompt {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        ui::confirm_action(prompt)
    }
}

/// A decision fixed up front, e.g. from `--yes` or `--no-cleanup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset(pub bool);

impl Confirm for Preset {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    Kept,
    Failed(String),
}

pub const PROMPT: &str = "Remove build outputs (cargo clean)?";

/// Runs `cargo clean` in the project root if `confirm` agrees.
///
/// Never fails: a failed prompt or a failed `cargo clean` is returned as
/// [CleanupOutcome::Failed] for the caller to report.
pub fn cleanup(
    ctx: &PackagingContext,
    runner: &dyn ToolRunner,
    confirm: &dyn Confirm,
) -> CleanupOutcome {
    match confirm.confirm(PROMPT) {
        Ok(true) => {}
        Ok(false) => return CleanupOutcome::Kept,
        Err(e) => return CleanupOutcome::Failed(format!("could not read answer: {}", e)),
    }

    match runner.run(&Invocation::new("cargo", ctx.root()).arg("clean")) {
        Ok(()) => CleanupOutcome::Removed,
        Err(e) => CleanupOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::platform::Platform;
    use crate::process::MockRunner;
    use crate::version::Version;
    use std::path::Path;

    fn context() -> PackagingContext {
        PackagingContext::new(
            Path::new("/work"),
            Config::default(),
            Version::parse("0.0.1").unwrap(),
            Platform::Linux,
        )
    }

    struct Broken;

    impl Confirm for Broken {
        fn confirm(&self, _prompt: &str) -> Result<bool> {
            Err(anyhow::anyhow!("stdin closed"))
        }
    }

    #[test]
    fn test_declined_keeps_outputs() {
        let runner = MockRunner::new();
        assert_eq!(
            cleanup(&context(), &runner, &Preset(false)),
            CleanupOutcome::Kept
        );
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_confirmed_runs_cargo_clean() {
        let runner = MockRunner::new();
        assert_eq!(
            cleanup(&context(), &runner, &Preset(true)),
            CleanupOutcome::Removed
        );
        let calls = runner.invocations();
        assert_eq!(calls[0].program, "cargo");
        assert_eq!(calls[0].args, vec!["clean"]);
        assert_eq!(calls[0].cwd, Path::new("/work"));
    }

    #[test]
    fn test_failed_clean_is_reported() {
        let runner = MockRunner::new().fail("cargo");
        assert!(matches!(
            cleanup(&context(), &runner, &Preset(true)),
            CleanupOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_prompt_error_is_reported() {
        let runner = MockRunner::new();
        let outcome = cleanup(&context(), &runner, &Broken);
        assert_eq!(
            outcome,
            CleanupOutcome::Failed("could not read answer: stdin closed".to_string())
        );
        assert!(runner.invocations().is_empty());
    }
}
