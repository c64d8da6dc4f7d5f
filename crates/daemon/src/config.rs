// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The runtime's immutable global settings singleton (§9 "global settings
//! singleton"): loaded once from a TOML file, merged with environment
//! variables, then handed down as `Arc<RuntimeConfig>`. No daemon re-reads
//! config on a hot path.

use std::path::Path;

use orc_core::TimeCompression;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}

/// On-disk shape (§6 "environment configuration (enumerated)"); every
/// field is optional here because an env var may supply it instead.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database_url: Option<String>,
    cache_url: Option<String>,
    bus_brokers: Option<String>,
    planner_endpoint: Option<String>,
    planner_model_id: Option<String>,
    planner_api_key: Option<String>,
    email_provider: Option<String>,
    email_provider_api_key: Option<String>,
    messaging_provider: Option<String>,
    messaging_provider_api_key: Option<String>,
    feature_tracing: Option<bool>,
    feature_time_compression: Option<bool>,
    security_secret: Option<String>,
}

/// The merged, validated configuration every `orc-daemon` binary loads
/// once at startup (§9 "global settings singleton").
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub database_url: String,
    pub cache_url: String,
    pub bus_brokers: String,
    pub planner_endpoint: String,
    pub planner_model_id: Option<String>,
    pub planner_api_key: Option<String>,
    pub email_provider: Option<String>,
    pub email_provider_api_key: Option<String>,
    pub messaging_provider: Option<String>,
    pub messaging_provider_api_key: Option<String>,
    pub feature_tracing: bool,
    pub time_compression: TimeCompression,
    pub security_secret: Option<String>,
}

impl RuntimeConfig {
    /// Loads `path` (if it exists) as TOML, then overlays environment
    /// variables on top, then applies hardcoded defaults for anything
    /// still unset (§6: `DATABASE_URL`, `CACHE_URL`, `BUS_BROKERS`,
    /// `PLANNER_ENDPOINT`, `PLANNER_MODEL_ID`, `PLANNER_API_KEY`,
    /// `EMAIL_PROVIDER_*`, `MESSAGING_PROVIDER_*`, `FEATURE_TRACING`,
    /// `FEATURE_TIME_COMPRESSION`, `SECURITY_SECRET`).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
            toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })?
        } else {
            FileConfig::default()
        };

        let env_bool = |key: &str| std::env::var(key).ok().map(|v| matches!(v.as_str(), "1" | "true" | "yes"));

        let feature_time_compression = env_bool("FEATURE_TIME_COMPRESSION").or(file.feature_time_compression).unwrap_or(false);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok().or(file.database_url).unwrap_or_else(|| "memory://orc".to_string()),
            cache_url: std::env::var("CACHE_URL").ok().or(file.cache_url).unwrap_or_else(|| "memory://orc-cache".to_string()),
            bus_brokers: std::env::var("BUS_BROKERS").ok().or(file.bus_brokers).unwrap_or_else(|| "inmemory://orc-bus".to_string()),
            planner_endpoint: std::env::var("PLANNER_ENDPOINT").ok().or(file.planner_endpoint).unwrap_or_else(|| "http://localhost:8088/v1/complete".to_string()),
            planner_model_id: std::env::var("PLANNER_MODEL_ID").ok().or(file.planner_model_id),
            planner_api_key: std::env::var("PLANNER_API_KEY").ok().or(file.planner_api_key),
            email_provider: std::env::var("EMAIL_PROVIDER").ok().or(file.email_provider),
            email_provider_api_key: std::env::var("EMAIL_PROVIDER_API_KEY").ok().or(file.email_provider_api_key),
            messaging_provider: std::env::var("MESSAGING_PROVIDER").ok().or(file.messaging_provider),
            messaging_provider_api_key: std::env::var("MESSAGING_PROVIDER_API_KEY").ok().or(file.messaging_provider_api_key),
            feature_tracing: env_bool("FEATURE_TRACING").or(file.feature_tracing).unwrap_or(true),
            time_compression: if feature_time_compression { TimeCompression::Compressed } else { TimeCompression::Off },
            security_secret: std::env::var("SECURITY_SECRET").ok().or(file.security_secret),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
