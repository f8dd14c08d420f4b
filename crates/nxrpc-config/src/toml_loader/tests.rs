//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::LogLevel;
use nxrpc_common::ActivityKind;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_nxrpc_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, nxrpc_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[console]
host = "192.168.1.40"
retry_delay_secs = 7

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.console.host, "192.168.1.40");
    assert_eq!(config.console.retry_delay_secs, 7);
    assert_eq!(config.logging.level, LogLevel::Debug);
    // Defaults preserved
    assert_eq!(config.console.port, 0xCAFE);
    assert_eq!(config.console.heartbeat_timeout_secs, 10);
    assert_eq!(config.discord.login_attempts, 10);
    assert_eq!(config.classification.len(), 3);
}

#[test]
fn load_classification_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[[classification]]
pattern = "Netflix"
kind = "watching"

[[classification]]
pattern = "Netflix Party Game"
kind = "playing"

[artwork.title_remap]
"0500000000000001" = "0100000000000001"

[[artwork.overrides]]
pattern = "Emulator"
image = "emulator_icon"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.classification.len(), 2);
    assert_eq!(config.classification[0].pattern, "Netflix");
    assert_eq!(config.classification[0].kind, ActivityKind::Watching);
    assert_eq!(config.classification[1].kind, ActivityKind::Playing);
    assert_eq!(
        config.artwork.title_remap.get("0500000000000001").map(String::as_str),
        Some("0100000000000001")
    );
    assert_eq!(config.artwork.overrides.len(), 1);
    assert_eq!(config.artwork.overrides[0].image, "emulator_icon");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, nxrpc_common::ConfigError::ParseError(_)));
}

#[test]
fn load_unknown_kind_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[[classification]]
pattern = "Radio"
kind = "listening"
"#,
    )
    .unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, nxrpc_common::ConfigError::ParseError(_)));
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nxrpc").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert!(config.console.host.is_empty());
    assert_eq!(config.discord.client_id, "831528990439243806");
    assert_eq!(config.artwork.overrides.len(), 4);
}

#[test]
fn default_config_path_ends_with_nxrpc() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("nxrpc/config.toml"));
    }
}
