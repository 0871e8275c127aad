use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::*;

#[cfg(unix)]
const TEST_FILE: &str = "/bin/cat";
#[cfg(windows)]
const TEST_FILE: &str = "C:\\Windows\\System32\\cmd.exe";

#[test]
fn test_location() {
    // Test with explicit argument
    let conf_path = PathBuf::from(TEST_FILE);
    let result = location(Some(conf_path.clone()));
    assert_eq!(result.unwrap(), conf_path);

    // Test with environment variable
    env::set_var(TELEMETRY_CONF_ENV, TEST_FILE);
    let result = location(None);
    assert_eq!(result.unwrap(), PathBuf::from(TEST_FILE));

    // Test with default path
    env::remove_var(TELEMETRY_CONF_ENV);
    env::set_var("HOME", "/fake/home");
    let result = location(None);
    assert_eq!(
        result.unwrap(),
        PathBuf::from("/fake/home/.telemetry/telemetry.toml")
    );
}

#[test]
fn test_save_and_load() {
    let conf_path = PathBuf::from("test_telemetry.toml");
    let config = TelemetryConfig {
        enabled: false,
        source_token: Some("tok_abc".to_owned()),
        ..Default::default()
    };

    config.to_toml(&conf_path).unwrap();
    let loaded = TelemetryConfig::from_toml(&conf_path).unwrap();
    assert!(!loaded.enabled);
    assert_eq!(loaded.source_token.as_deref(), Some("tok_abc"));
    assert!(loaded.ignore_exceptions.is_empty());
    assert!(loaded.report_exceptions.is_empty());

    // Clean up
    fs::remove_file(conf_path).unwrap();
}

#[test]
fn test_load_provisions_missing_file() {
    let conf_path = PathBuf::from("test_provision/telemetry.toml");
    let _ = fs::remove_dir_all("test_provision");

    let loaded = TelemetryConfig::from_toml(&conf_path).unwrap();
    assert!(loaded.enabled);
    assert!(loaded.source_token.is_none());
    // The default file must now exist on disk
    assert!(conf_path.exists());

    fs::remove_dir_all("test_provision").unwrap();
}

#[test]
fn test_publish_default_conf() {
    let dir = PathBuf::from("test_publish");
    let _ = fs::remove_dir_all(&dir);

    let published = publish_default_conf(&dir).unwrap();
    assert_eq!(published, dir.join("telemetry.toml"));
    assert!(published.exists());

    // Publishing again must not overwrite an existing file
    fs::write(&published, "enabled = false\n").unwrap();
    let republished = publish_default_conf(&dir).unwrap();
    assert_eq!(republished, published);
    assert!(!TelemetryConfig::from_toml(&republished).unwrap().enabled);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_from_env() {
    // All TELEMETRY_ENABLED cases in one test, the environment is
    // process-wide state
    env::remove_var(TELEMETRY_ENABLED_ENV);
    env::remove_var(TELEMETRY_SOURCE_TOKEN_ENV);
    let config = TelemetryConfig::from_env().unwrap();
    assert!(config.enabled);
    assert!(config.source_token.is_none());

    env::set_var(TELEMETRY_ENABLED_ENV, "false");
    env::set_var(TELEMETRY_SOURCE_TOKEN_ENV, "tok_abc");
    let config = TelemetryConfig::from_env().unwrap();
    assert!(!config.enabled);
    assert_eq!(config.source_token.as_deref(), Some("tok_abc"));

    env::set_var(TELEMETRY_ENABLED_ENV, "1");
    assert!(TelemetryConfig::from_env().unwrap().enabled);
    env::set_var(TELEMETRY_ENABLED_ENV, "No");
    assert!(!TelemetryConfig::from_env().unwrap().enabled);

    env::set_var(TELEMETRY_ENABLED_ENV, "maybe");
    assert!(TelemetryConfig::from_env().is_err());
    // only 1/0/true/false/yes/no are accepted
    env::set_var(TELEMETRY_ENABLED_ENV, "on");
    assert!(TelemetryConfig::from_env().is_err());

    env::remove_var(TELEMETRY_ENABLED_ENV);
    env::remove_var(TELEMETRY_SOURCE_TOKEN_ENV);
}

#[derive(Debug)]
struct TimeoutError;

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timed out")
    }
}

impl std::error::Error for TimeoutError {}

#[derive(Debug)]
struct RefusedError;

impl fmt::Display for RefusedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection refused")
    }
}

impl std::error::Error for RefusedError {}

#[test]
fn test_exception_class_matching() {
    let class = ExceptionClass::of::<TimeoutError>();
    assert!(class.name().ends_with("TimeoutError"));
    assert!(class.matches(&TimeoutError));
    assert!(!class.matches(&RefusedError));
}
