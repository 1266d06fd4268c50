//! External tool invocation layer
//!
//! Every step of the packaging pipeline shells out to a tool that is not part
//! of this crate: cargo, the stripper or compressor, `tar`, `hdiutil`. This
//! module puts a trait in front of those calls so the pipeline can run
//! against real processes or against a recording mock.
//!
//! - [SystemRunner]: spawns the program with inherited stdio and waits for it
//! - [mock::MockRunner]: records invocations and simulates their effects

pub mod mock;

pub use mock::MockRunner;

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PackagerError, Result};

/// One call to an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs external programs for the pipeline.
///
/// Implementations block until the program exits. A program that cannot be
/// started or exits unsuccessfully is reported as [PackagerError::Tool];
/// callers decide whether that is fatal for their stage.
pub trait ToolRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PackagerError::tool(format!(
                    "'{}' was not found on PATH",
                    invocation.program
                )),
                _ => PackagerError::tool(format!("failed to start '{}': {}", invocation, e)),
            })?;

        if !status.success() {
            return Err(PackagerError::tool(match status.code() {
                Some(code) => format!("'{}' exited with code {}", invocation, code),
                None => format!("'{}' was terminated by a signal", invocation),
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display_quotes_spaces() {
        let inv = Invocation::new("hdiutil", "/tmp")
            .arg("create")
            .args(["-volname", "wt 0.0.1"]);
        assert_eq!(inv.to_string(), "hdiutil create -volname \"wt 0.0.1\"");
    }

    #[test]
    fn test_missing_program_is_tool_error() {
        let inv = Invocation::new("wt-package-no-such-program", std::env::temp_dir());
        let err = SystemRunner.run(&inv).unwrap_err();
        assert!(matches!(err, PackagerError::Tool(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_tool_error() {
        let inv = Invocation::new("false", std::env::temp_dir());
        let err = SystemRunner.run(&inv).unwrap_err();
        assert!(err.to_string().contains("exited with code 1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_exit() {
        let inv = Invocation::new("true", std::env::temp_dir());
        assert!(SystemRunner.run(&inv).is_ok());
    }
}
