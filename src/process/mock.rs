use crate::error::{PackagerError, Result};
use crate::process::{Invocation, ToolRunner};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Mock runner for testing without spawning external programs
///
/// Every invocation is recorded. Programs registered with [MockRunner::fail]
/// return a tool error; programs registered with [MockRunner::produce] write
/// the given files, standing in for what the real tool would leave on disk.
pub struct MockRunner {
    invocations: Mutex<Vec<Invocation>>,
    failing: HashSet<String>,
    outputs: HashMap<String, Vec<PathBuf>>,
}

impl MockRunner {
    /// Create a mock where every program succeeds without side effects
    pub fn new() -> Self {
        MockRunner {
            invocations: Mutex::new(Vec::new()),
            failing: HashSet::new(),
            outputs: HashMap::new(),
        }
    }

    /// Make every invocation of `program` fail
    pub fn fail(mut self, program: impl Into<String>) -> Self {
        self.failing.insert(program.into());
        self
    }

    /// Make a successful invocation of `program` create `path`
    pub fn produce(mut self, program: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.outputs
            .entry(program.into())
            .or_default()
            .push(path.into());
        self
    }

    /// All invocations seen so far, in call order
    pub fn invocations(&self) -> Vec<Invocation> {
        match self.invocations.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Program names seen so far, in call order
    pub fn programs(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|inv| inv.program)
            .collect()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        match self.invocations.lock() {
            Ok(mut guard) => guard.push(invocation.clone()),
            Err(poisoned) => poisoned.into_inner().push(invocation.clone()),
        }

        if self.failing.contains(&invocation.program) {
            return Err(PackagerError::tool(format!(
                "'{}' exited with code 1",
                invocation
            )));
        }

        for path in self.outputs.get(&invocation.program).into_iter().flatten() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, invocation.to_string())?;
        }

        Ok(())
    }
}
