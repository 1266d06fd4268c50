//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here have no side effects beyond printing.

use std::path::Path;
use std::time::Duration;

use console::style;

use crate::advisory::AdvisoryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display an advisory warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_advisory(warning: &AdvisoryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print how long a stage took.
pub fn display_stage_timing(stage: &str, elapsed: Duration) {
    println!(
        "  {}",
        style(format!("{} finished in {}", stage, format_duration(elapsed))).dim()
    );
}

/// Display the final artifact produced by the run.
pub fn display_artifact(path: &Path) {
    println!(
        "\n{} Package ready: {}\n",
        style("✓").green(),
        style(path.display()).bold()
    );
}

/// Seconds with one decimal, e.g. `12.3s`.
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(12_340)), "12.3s");
        assert_eq!(format_duration(Duration::ZERO), "0.0s");
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_advisory() {
        display_advisory(&AdvisoryWarning::CleanupFailed {
            reason: "test".to_string(),
        });
    }
}
