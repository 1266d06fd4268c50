use std::fmt;

/// Warnings raised by best-effort pipeline steps.
/// These never fail a run but must be shown to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisoryWarning {
    /// The size-reduction step did not run or did not succeed
    ShrinkSkipped { binary: String, reason: String },
    /// A staging copy or folder could not be removed after packaging
    StagingLeftBehind { path: String, reason: String },
    /// Build outputs could not be removed during cleanup
    CleanupFailed { reason: String },
}

impl fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisoryWarning::ShrinkSkipped { binary, reason } => {
                write!(
                    f,
                    "Binary '{}' was not size-reduced: {}",
                    binary, reason
                )
            }
            AdvisoryWarning::StagingLeftBehind { path, reason } => {
                write!(f, "Could not remove staging path '{}': {}", path, reason)
            }
            AdvisoryWarning::CleanupFailed { reason } => {
                write!(f, "Build outputs were not removed: {}", reason)
            }
        }
    }
}
