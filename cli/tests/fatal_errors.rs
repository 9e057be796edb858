use std::process::Command;

fn evdump(workdir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_evdump"));
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("USERPROFILE", workdir)
        .env_remove("BRAINTRUST_API_KEY")
        .env_remove("RUST_LOG")
        .env_remove("EVDUMP_BASE_URL")
        .env_remove("EVDUMP_OUTPUT_DIR");
    cmd
}

#[test]
fn missing_api_key_is_reported_once_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = evdump(dir.path())
        .args(["--project-name", "demo"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("BRAINTRUST_API_KEY environment variable is not set").count(),
        1,
        "stderr was: {stderr}"
    );
    assert!(!dir.path().join("braintrust_data").exists());
}

#[test]
fn missing_project_selector_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = evdump(dir.path()).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--project-id"), "stderr was: {stderr}");
}
