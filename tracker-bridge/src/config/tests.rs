//! Config tests.

use crate::config::{load_places, BridgeConfig};
use serial_test::serial;
use std::env;
use std::io::Write;

fn clear_env() {
    for name in [
        "GITHUB_API_URL",
        "PLATFORM_URL",
        "PLATFORM_TOKEN",
        "WEBHOOK_CALLBACK_URL",
        "TILE_REFRESH_INTERVAL_SECS",
        "RECENT_ISSUES_LIMIT",
        "LOG_FILE",
    ] {
        env::remove_var(name);
    }
}

fn set_required() {
    env::set_var("PLATFORM_URL", "https://community.example.com");
    env::set_var("WEBHOOK_CALLBACK_URL", "https://bridge.example.com/webhooks/github");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    set_required();

    let config = BridgeConfig::load().unwrap();

    assert_eq!(config.github_api_url, "https://api.github.com");
    assert_eq!(config.platform_url, "https://community.example.com");
    assert!(config.platform_token.is_none());
    assert_eq!(config.tile_refresh_interval_secs, 60);
    assert_eq!(config.recent_issues_limit, 10);
    assert_eq!(config.log_file, "logs/tracker-bridge.log");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    set_required();
    env::set_var("GITHUB_API_URL", "http://127.0.0.1:9999");
    env::set_var("PLATFORM_TOKEN", "secret");
    env::set_var("TILE_REFRESH_INTERVAL_SECS", "5");
    env::set_var("RECENT_ISSUES_LIMIT", "3");
    env::set_var("LOG_FILE", "/tmp/bridge.log");

    let config = BridgeConfig::load().unwrap();

    assert_eq!(config.github_api_url, "http://127.0.0.1:9999");
    assert_eq!(config.platform_token.as_deref(), Some("secret"));
    assert_eq!(config.tile_refresh_interval().as_secs(), 5);
    assert_eq!(config.recent_issues_limit, 3);
    assert_eq!(config.log_file, "/tmp/bridge.log");

    clear_env();
}

#[test]
#[serial]
fn test_load_config_requires_platform_url() {
    clear_env();
    env::set_var("WEBHOOK_CALLBACK_URL", "https://bridge.example.com/hook");

    let err = BridgeConfig::load().unwrap_err();
    assert!(err.to_string().contains("PLATFORM_URL"));
}

#[test]
#[serial]
fn test_validate_rejects_bad_url_and_zero_interval() {
    clear_env();
    set_required();
    env::set_var("GITHUB_API_URL", "not-a-valid-url");
    let config = BridgeConfig::load().unwrap();
    assert!(config.validate().is_err());

    clear_env();
    set_required();
    env::set_var("TILE_REFRESH_INTERVAL_SECS", "0");
    let config = BridgeConfig::load().unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
fn test_load_places_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"place_url":"https://community.example.com/api/core/v3/places/1001",
            "tile_url":"https://community.example.com/api/tiles/7/data",
            "owner":"acme","repo":"widgets","access_token":"tok"}}]"#
    )
    .unwrap();

    let places = load_places(file.path()).unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].tile_name, "github-issues-recent");
    assert_eq!(places[0].repo_ref().to_string(), "acme/widgets");
}

#[test]
fn test_load_places_missing_file() {
    assert!(load_places("/nonexistent/places.json").is_err());
}
