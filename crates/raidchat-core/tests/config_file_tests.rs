use raidchat_core::logging_facility::Profile;
use raidchat_core::{ChatError, EngineConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "default_project = \"HERMES\"\nlog_profile = \"test\"\n\n[sequencer]\nask_priority = false"
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.default_project.as_deref(), Some("HERMES"));
    assert_eq!(config.log_profile, Profile::Test);
    assert!(!config.sequencer.ask_priority);
    assert!(config.sequencer.ask_owner);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();

    match err {
        ChatError::Config { reason } => assert!(reason.contains("absent.toml")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[sequencer\nask_owner = true").unwrap();

    assert!(matches!(
        EngineConfig::load(file.path()),
        Err(ChatError::Config { .. })
    ));
}
