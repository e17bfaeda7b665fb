//! CLI smoke tests for the groupcal binary
//!
//! Every run points the home directory at a temp dir so log files never
//! land in the real `$HOME`.

use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_groupcal(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_groupcal"))
        .args(args)
        .env("GROUPCAL__CORE__HOME_DIR", home)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute groupcal")
}

fn write_input(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("members.json");
    std::fs::write(&path, body).expect("Failed to write input");
    path.to_str().unwrap().to_string()
}

const TWO_MEMBERS: &str = r#"[
  { "userId": "alice", "userEmail": "alice@example.com", "organizationId": "org_1",
    "timeRanges": { "monday": [{ "start": "09:00", "end": "12:00" }] } },
  { "userId": "bob", "userEmail": "bob@example.com", "organizationId": "org_1",
    "timeRanges": { "monday": [{ "start": "11:00", "end": "15:00" }] } },
  { "userId": "eve", "userEmail": "eve@example.com", "organizationId": "org_2",
    "timeRanges": { "monday": [{ "start": "00:00", "end": "23:59" }] } }
]"#;

#[test]
fn test_cli_help_command() {
    let home = TempDir::new().unwrap();
    let output = run_groupcal(home.path(), &["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("overlap"), "Should contain 'overlap' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_invalid_command() {
    let home = TempDir::new().unwrap();
    let output = run_groupcal(home.path(), &["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report an error: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let home = TempDir::new().unwrap();
    let output = run_groupcal(home.path(), &["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file not found"), "{stderr}");
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed").unwrap();

    let output = run_groupcal(home.path(), &["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "{stderr}");
}

#[test]
fn test_cli_check_prints_config() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "core:\n  home_dir: \"\"\nmodules:\n  group_calendar:\n    overlap_mode: legacy\n",
    )
    .unwrap();

    let output = run_groupcal(home.path(), &["--config", config_path.to_str().unwrap(), "check"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("overlap_mode: legacy"));
}

#[test]
fn test_cli_rejects_bad_module_config() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "core:\n  home_dir: \"\"\nmodules:\n  group_calendar:\n    overlap_mode: fuzzy\n",
    )
    .unwrap();

    let output = run_groupcal(home.path(), &["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("group_calendar"), "{stderr}");
}

#[test]
fn test_cli_overlap_plateau() {
    let home = TempDir::new().unwrap();
    let input = write_input(&home, TWO_MEMBERS);

    let output = run_groupcal(home.path(), &["overlap", "--input", &input, "--org", "org_1"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["userCount"], 2);
    assert_eq!(
        json["overlap"]["monday"],
        serde_json::json!([
            { "start": "09:00", "end": "10:59", "percentage": 50.0 },
            { "start": "11:00", "end": "12:00", "percentage": 100.0 },
            { "start": "12:01", "end": "15:00", "percentage": 50.0 }
        ])
    );
    assert_eq!(json["overlap"]["sunday"], serde_json::json!([]));
}

#[test]
fn test_cli_overlap_legacy_mode_flag() {
    let home = TempDir::new().unwrap();
    let input = write_input(&home, TWO_MEMBERS);

    let output = run_groupcal(
        home.path(),
        &["overlap", "--input", &input, "--org", "org_1", "--mode", "legacy"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["overlap"]["monday"],
        serde_json::json!([{ "start": "09:00", "end": "15:00", "percentage": 50.0 }])
    );
}

#[test]
fn test_cli_overlap_unknown_org_is_empty() {
    let home = TempDir::new().unwrap();
    let input = write_input(&home, TWO_MEMBERS);

    let output = run_groupcal(home.path(), &["overlap", "--input", &input, "--org", "org_9"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, serde_json::json!({ "overlap": {}, "userCount": 0 }));
}

#[test]
fn test_cli_overlap_rejects_malformed_time() {
    let home = TempDir::new().unwrap();
    let input = write_input(
        &home,
        r#"[{ "userId": "alice", "organizationId": "org_1",
             "timeRanges": { "monday": [{ "start": "9:00", "end": "12:00" }] } }]"#,
    );

    let output = run_groupcal(home.path(), &["overlap", "--input", &input, "--org", "org_1"]);
    assert!(!output.status.success(), "Malformed time should fail");
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("alice"), "{stderr}");
}
