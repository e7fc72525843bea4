//! Integration tests for file-backed settings records.

use stagehand_conf::{DatabaseConfig, Settings, SettingsError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_settings() -> Settings {
	let mut settings = Settings::base("/srv/app");
	settings.secret_key = "file-backed-secret-key".to_string();
	settings.allowed_hosts = vec!["example.com".to_string()];
	settings.static_root = Some(PathBuf::from("/srv/app/static"));
	settings.media_root = Some(PathBuf::from("/srv/app/media"));
	settings.databases.insert(
		"default".to_string(),
		DatabaseConfig::postgres("appdb", "app", "secret", "db", "5432"),
	);
	settings
}

#[test]
fn test_toml_round_trip() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("settings.toml");

	let settings = sample_settings();
	fs::write(&path, toml::to_string(&settings).unwrap()).unwrap();

	let restored = Settings::from_file(&path).unwrap();
	assert_eq!(restored, settings);
}

#[test]
fn test_json_round_trip() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("settings.json");

	let settings = sample_settings();
	fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

	let restored = Settings::from_file(&path).unwrap();
	assert_eq!(restored, settings);
}

#[test]
fn test_unsupported_extension() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("settings.yaml");
	fs::write(&path, "secret_key: nope").unwrap();

	let err = Settings::from_file(&path).unwrap_err();
	assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file_is_a_file_error() {
	let err = Settings::from_file("/nonexistent/settings.toml").unwrap_err();
	assert!(matches!(err, SettingsError::FileError(_)));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("settings.toml");
	fs::write(&path, "secret_key = [unclosed").unwrap();

	let err = Settings::from_file(&path).unwrap_err();
	assert!(matches!(err, SettingsError::ParseError(_)));
}
