use wt_package::advisory::AdvisoryWarning;
use wt_package::ui;

#[test]
fn test_shrink_skipped_display() {
    let warning = AdvisoryWarning::ShrinkSkipped {
        binary: "target/release-smaller/wt".to_string(),
        reason: "'upx' was not found on PATH".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("target/release-smaller/wt"),
        "Message should name the binary, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("upx"),
        "Message should carry the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_staging_left_behind_display() {
    let warning = AdvisoryWarning::StagingLeftBehind {
        path: "/work/wt".to_string(),
        reason: "Permission denied".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("/work/wt"));
    assert!(display_msg.contains("Permission denied"));
}

#[test]
fn test_cleanup_failed_display() {
    let warning = AdvisoryWarning::CleanupFailed {
        reason: "'cargo clean' exited with code 101".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "Build outputs were not removed: 'cargo clean' exited with code 101"
    );
}

#[test]
fn test_advisory_equality() {
    let a = AdvisoryWarning::CleanupFailed {
        reason: "x".to_string(),
    };
    assert_eq!(a.clone(), a);
    assert_ne!(
        a,
        AdvisoryWarning::CleanupFailed {
            reason: "y".to_string()
        }
    );
}

#[test]
fn test_display_advisory_does_not_panic() {
    ui::display_advisory(&AdvisoryWarning::ShrinkSkipped {
        binary: "wt".to_string(),
        reason: "no shrink command configured for LINUX".to_string(),
    });
}
