// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use super::*;

fn clear_env() {
    for key in [
        "DATABASE_URL",
        "CACHE_URL",
        "BUS_BROKERS",
        "PLANNER_ENDPOINT",
        "PLANNER_MODEL_ID",
        "PLANNER_API_KEY",
        "EMAIL_PROVIDER",
        "EMAIL_PROVIDER_API_KEY",
        "MESSAGING_PROVIDER",
        "MESSAGING_PROVIDER_API_KEY",
        "FEATURE_TRACING",
        "FEATURE_TIME_COMPRESSION",
        "SECURITY_SECRET",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    clear_env();
    let config = RuntimeConfig::load(Path::new("/nonexistent/orc.toml")).unwrap();
    assert_eq!(config.database_url, "memory://orc");
    assert!(config.feature_tracing);
    assert_eq!(config.time_compression, TimeCompression::Off);
}

#[test]
#[serial]
fn file_values_are_read() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "database_url = \"postgres://db/orc\"\nplanner_endpoint = \"https://planner.example/v1\"").unwrap();

    let config = RuntimeConfig::load(file.path()).unwrap();
    assert_eq!(config.database_url, "postgres://db/orc");
    assert_eq!(config.planner_endpoint, "https://planner.example/v1");
}

#[test]
#[serial]
fn env_vars_override_file_values() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "database_url = \"postgres://db/orc\"").unwrap();
    std::env::set_var("DATABASE_URL", "postgres://override/orc");

    let config = RuntimeConfig::load(file.path()).unwrap();
    assert_eq!(config.database_url, "postgres://override/orc");
    clear_env();
}

#[test]
#[serial]
fn feature_time_compression_env_flag_selects_compressed_variant() {
    clear_env();
    std::env::set_var("FEATURE_TIME_COMPRESSION", "true");
    let config = RuntimeConfig::load(Path::new("/nonexistent/orc.toml")).unwrap();
    assert_eq!(config.time_compression, TimeCompression::Compressed);
    clear_env();
}

#[test]
#[serial]
fn malformed_file_is_a_parse_error() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "this is not valid toml =====").unwrap();

    let result = RuntimeConfig::load(file.path());
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
