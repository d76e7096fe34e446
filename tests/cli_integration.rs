//! Runs the `berth` binary and checks exit codes and stream separation

mod support;

use std::process::Command;
use support::copy_fixture;

fn berth() -> Command {
    Command::new(env!("CARGO_BIN_EXE_berth"))
}

#[test]
fn test_cli_help() {
    let output = berth().arg("--help").output().expect("Failed to run berth");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
}

#[test]
fn test_analyze_prints_json_on_stdout() {
    let (_temp, root) = copy_fixture("microservices");

    let output = berth()
        .args(["--log-level", "debug", "init", "--analyze", "--root"])
        .arg(&root)
        .output()
        .expect("Failed to run berth");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["dockerfiles"].as_array().unwrap().len(), 2);
}

#[test]
fn test_force_writes_config() {
    let (_temp, root) = copy_fixture("microservices");

    let status = berth()
        .args(["-q", "init", "--force", "-f", "generated.yaml", "--root"])
        .arg(&root)
        .status()
        .expect("Failed to run berth");

    assert!(status.success());
    assert!(root.join("generated.yaml").exists());
}

#[test]
fn test_malformed_mapping_fails() {
    let (_temp, root) = copy_fixture("microservices");

    let output = berth()
        .args(["init", "--force", "-a", "leeroy-app/Dockerfile", "--root"])
        .arg(&root)
        .output()
        .expect("Failed to run berth");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_subcommand() {
    let output = berth().arg("deploy").output().expect("Failed to run berth");
    assert!(!output.status.success());
}
