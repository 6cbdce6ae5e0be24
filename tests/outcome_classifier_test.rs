use midi_bridge::application::services::classify;
use midi_bridge::application::services::outcome_classifier::{NO_OUTPUT_MESSAGE, TIMED_OUT_MESSAGE};
use midi_bridge::domain::{FailureKind, ProcessOutcome};

fn exited(code: i32, stdout: &str) -> ProcessOutcome {
    ProcessOutcome::exited(Some(code), stdout.to_string(), String::new())
}

fn artifact_in(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let artifact = dir.path().join("out.mid");
    std::fs::write(&artifact, b"MThd").unwrap();
    artifact
}

#[test]
fn given_success_marker_and_artifact_when_classifying_then_success_with_artifact_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = artifact_in(&dir);

    let result = classify(&exited(0, "loading\nSUCCESS: wrote out.mid"), &artifact);

    assert!(result.is_success());
    assert_eq!(result.output_path(), Some(artifact.as_path()));
}

#[test]
fn given_success_marker_without_artifact_when_classifying_then_no_output_failure() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = classify(&exited(0, "SUCCESS:"), &dir.path().join("out.mid"));

    assert_eq!(result.failure_kind(), Some(FailureKind::MissingArtifact));
    assert_eq!(result.message(), NO_OUTPUT_MESSAGE);
    assert!(result.output_path().is_none());
}

#[test]
fn given_timeout_with_success_marker_and_artifact_when_classifying_then_timeout_wins() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = artifact_in(&dir);
    let outcome = ProcessOutcome::timed_out("SUCCESS: done".to_string(), String::new());

    let result = classify(&outcome, &artifact);

    assert_eq!(result.failure_kind(), Some(FailureKind::TimedOut));
    assert_eq!(result.message(), TIMED_OUT_MESSAGE);
}

#[test]
fn given_error_marker_when_classifying_then_message_is_trimmed_detail() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = classify(&exited(1, "ERROR:Disk full"), &dir.path().join("out.mid"));

    assert_eq!(result.failure_kind(), Some(FailureKind::ProgramError));
    assert!(result.message().ends_with("Disk full"));
}

#[test]
fn given_error_marker_with_zero_exit_when_classifying_then_still_failure() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = classify(
        &exited(0, "loading model\nERROR:  model missing  \n"),
        &dir.path().join("out.mid"),
    );

    assert_eq!(result.failure_kind(), Some(FailureKind::ProgramError));
    assert_eq!(result.message(), "model missing");
}

#[test]
fn given_several_error_markers_when_classifying_then_detail_follows_first_marker() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = classify(&exited(2, "ERROR: first\nERROR: second"), &dir.path().join("x"));

    assert!(result.message().starts_with("first"));
}

#[test]
fn given_success_marker_with_nonzero_exit_when_classifying_then_reports_exit_code() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = artifact_in(&dir);

    let result = classify(&exited(3, "SUCCESS: wrote file"), &artifact);

    assert_eq!(result.failure_kind(), Some(FailureKind::ExitStatus));
    assert!(result.message().contains("exit code 3"));
}

#[test]
fn given_success_and_error_markers_with_zero_exit_and_artifact_when_classifying_then_success() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = artifact_in(&dir);

    let result = classify(&exited(0, "ERROR: retrying\nSUCCESS: done"), &artifact);

    assert!(result.is_success());
}

#[test]
fn given_no_markers_when_classifying_then_message_includes_exit_code() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = classify(&exited(137, "segfault?"), &dir.path().join("x"));

    assert_eq!(result.failure_kind(), Some(FailureKind::ExitStatus));
    assert!(result.message().contains("137"));
}

#[test]
fn given_signal_termination_when_classifying_then_failure_without_code() {
    let dir = tempfile::TempDir::new().unwrap();
    let outcome = ProcessOutcome::exited(None, String::new(), String::new());

    let result = classify(&outcome, &dir.path().join("x"));

    assert_eq!(result.failure_kind(), Some(FailureKind::ExitStatus));
}

#[test]
fn given_bare_error_marker_when_classifying_then_message_is_trimmed_empty_detail() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = classify(&exited(1, "ERROR:   "), &dir.path().join("x"));

    assert_eq!(result.failure_kind(), Some(FailureKind::ProgramError));
    assert_eq!(result.message(), "");
}

#[test]
fn given_artifact_path_is_directory_when_classifying_then_no_output_failure() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = classify(&exited(0, "SUCCESS:"), dir.path());

    assert_eq!(result.failure_kind(), Some(FailureKind::MissingArtifact));
}
