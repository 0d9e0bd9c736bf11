//! CLI integration tests
//!
//! Run the built binary end to end: `steps` prints templates and `chat`
//! drives a whole session from piped stdin.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn raidchat() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_raidchat"));
    command.env("RUST_LOG", "off");
    command
}

fn chat(args: &[&str], input: &str) -> Output {
    let mut child = raidchat()
        .arg("chat")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("Failed to wait for CLI")
}

#[test]
fn test_steps_prints_create_template() {
    let output = raidchat().args(["steps", "create"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Create RAID item");
    assert!(lines[1].starts_with("1. type (required):"));
    assert!(lines[4].starts_with("4. priority (optional):"));
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_steps_honours_config_policy() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("raidchat.toml");
    std::fs::write(&config_path, "[sequencer]\nask_priority = false\nask_owner = false\n").unwrap();

    let output = raidchat()
        .args(["steps", "create", "--config", config_path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 4);
    assert!(!stdout.contains("priority"));
}

#[test]
fn test_broken_config_fails_with_message() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    std::fs::write(&config_path, "[sequencer\n").unwrap();

    let output = raidchat()
        .args(["steps", "edit", "--config", config_path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"));
}

#[test]
fn test_chat_creates_and_lists_item() {
    let output = chat(
        &["--project", "APOLLO"],
        "create a risk\n\nVendor slip\nSupplier may deliver late\nhigh\n\nlist\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[assistant] ✅ **Risk created** (raid-1)"));
    assert!(stdout.contains("- raid-1 [Risk] Vendor slip (open, high)"));
}

#[test]
fn test_chat_writes_transcript() {
    let temp_dir = TempDir::new().unwrap();
    let transcript = temp_dir.path().join("transcript.json");

    let output = chat(
        &["--project", "APOLLO", "--transcript", transcript.to_str().unwrap()],
        "hello\n",
    );

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&transcript).unwrap()).unwrap();
    let messages = json.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
}

#[test]
fn test_chat_without_project_fails() {
    let output = chat(&[], "");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no project given"));
}
