//! CLI exit status integration tests.
//!
//! Run with: `cargo test -p narrate-cli --test cli_exit_test`
//!
//! These tests spawn the compiled `narrate` binary with a scrubbed
//! environment and a throwaway working directory, so they stay offline
//! and need no AWS credentials.

use std::process::Command;

fn narrate() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_narrate"));
    cmd.env_clear();
    cmd
}

#[test]
fn run_without_configuration_exits_nonzero() {
    let dir = tempfile::tempdir().expect("temp dir");

    let output = narrate()
        .current_dir(dir.path())
        .arg("run")
        .output()
        .expect("spawn narrate");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load configuration"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn run_with_missing_object_exits_nonzero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = dir.path().join("store");
    let work = dir.path().join("work");

    // A complete local-backend configuration, but no object to narrate.
    let status = narrate()
        .current_dir(dir.path())
        .env("NARRATE_STORAGE_BACKEND", "local")
        .env("NARRATE_LOCAL_STORE", &store)
        .env("NARRATE_REGION", "ap-south-1")
        .env("NARRATE_BASE_PATH", "audiobooks")
        .env("NARRATE_WORK_DIR", &work)
        .arg("run")
        .status()
        .expect("spawn narrate");

    assert!(!status.success(), "a missing input object must fail the run");
}
