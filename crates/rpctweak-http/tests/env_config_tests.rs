//! Integration tests for environment-based configuration

use rpctweak_core::ResponseMode;
use rpctweak_http::runtime::{ConfigError, RuntimeConfigBuilder};
use serial_test::serial;
use std::env;

/// Helper to set environment variable for test
fn set_env(key: &str, value: &str) {
    unsafe {
        env::set_var(key, value);
    }
}

/// Helper to clear environment variable after test
fn clear_env(key: &str) {
    unsafe {
        env::remove_var(key);
    }
}

fn clear_all_rpctweak_env_vars() {
    for key in [
        "RPCTWEAK_BIND_ADDR",
        "RPCTWEAK_MODE",
        "RPCTWEAK_DEV_USERNAME",
        "RPCTWEAK_DEV_PASSWORD",
        "RPCTWEAK_ENABLE_CORS",
    ] {
        clear_env(key);
    }
}

#[test]
#[serial]
fn test_env_config_default_when_no_vars_set() {
    clear_all_rpctweak_env_vars();

    let config = RuntimeConfigBuilder::from_env()
        .expect("should load defaults when no env vars set")
        .build()
        .expect("should build valid config");

    assert_eq!(config.initial_mode, ResponseMode::Off);
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8090");
    assert!(config.credentials.matches("admin", "password"));
    assert!(config.enable_cors);
}

#[test]
#[serial]
fn test_env_config_mode_and_bind_addr() {
    clear_all_rpctweak_env_vars();
    set_env("RPCTWEAK_MODE", "3");
    set_env("RPCTWEAK_BIND_ADDR", "0.0.0.0:9000");

    let config = RuntimeConfigBuilder::from_env()
        .expect("should load config")
        .build()
        .expect("should build valid config");

    assert_eq!(config.initial_mode, ResponseMode::EmptyAuthResponse);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");

    clear_all_rpctweak_env_vars();
}

#[test]
#[serial]
fn test_env_config_invalid_mode_fails_safe() {
    clear_all_rpctweak_env_vars();

    // Out of range and non-numeric both normalize to Off, never error.
    for value in ["9", "-2", "banana", ""] {
        set_env("RPCTWEAK_MODE", value);
        let config = RuntimeConfigBuilder::from_env()
            .expect("invalid mode must not fail startup")
            .build()
            .expect("should build valid config");
        assert_eq!(
            config.initial_mode,
            ResponseMode::Off,
            "RPCTWEAK_MODE={value} should normalize to Off"
        );
    }

    clear_all_rpctweak_env_vars();
}

#[test]
#[serial]
fn test_env_config_dev_credentials() {
    clear_all_rpctweak_env_vars();
    set_env("RPCTWEAK_DEV_USERNAME", "tester");
    set_env("RPCTWEAK_DEV_PASSWORD", "s3cret");

    let config = RuntimeConfigBuilder::from_env()
        .expect("should load config")
        .build()
        .expect("should build valid config");

    assert!(config.credentials.matches("tester", "s3cret"));
    assert!(!config.credentials.matches("admin", "password"));

    clear_all_rpctweak_env_vars();
}

#[test]
#[serial]
fn test_env_config_cors_disabled() {
    clear_all_rpctweak_env_vars();
    set_env("RPCTWEAK_ENABLE_CORS", "false");

    let config = RuntimeConfigBuilder::from_env()
        .expect("should load config")
        .build()
        .expect("should build valid config");

    assert!(!config.enable_cors);

    clear_all_rpctweak_env_vars();
}

#[test]
#[serial]
fn test_env_config_invalid_bool_is_an_error() {
    clear_all_rpctweak_env_vars();
    set_env("RPCTWEAK_ENABLE_CORS", "maybe");

    let err = RuntimeConfigBuilder::from_env().expect_err("invalid boolean must error");
    assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));

    clear_all_rpctweak_env_vars();
}

#[test]
#[serial]
fn test_env_config_invalid_bind_addr_is_an_error() {
    clear_all_rpctweak_env_vars();
    set_env("RPCTWEAK_BIND_ADDR", "not-an-address");

    let err = RuntimeConfigBuilder::from_env().expect_err("invalid address must error");
    assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));

    clear_all_rpctweak_env_vars();
}
