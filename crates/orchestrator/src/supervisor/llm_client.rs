// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared HTTP transport for the planner and decision-analyzer LLM calls,
//! ported from `app/domain/agents/runtime.py`'s `ExternalHttpRuntime`: a
//! single `reqwest::Client` with a fixed timeout, POSTs a JSON prompt body
//! to `endpoint`, raises on a non-2xx status, and returns the raw text the
//! caller will run through tolerant parsing.

use std::time::Duration;

use orc_core::OrchestratorError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LlmResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    actions: Option<serde_json::Value>,
}

/// Configuration for the external planner/decision endpoint (§9 `RuntimeConfig`:
/// `PLANNER_ENDPOINT`, `PLANNER_MODEL_ID`, `PLANNER_API_KEY`).
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub endpoint: String,
    pub model_id: Option<String>,
    pub api_key: Option<String>,
}

/// Thin POST-and-raise-for-status client, matching
/// `ExternalHttpRuntime.execute`'s `httpx.Client(timeout=30.0)` shape.
pub struct LlmHttpClient {
    client: reqwest::Client,
    config: LlmClientConfig,
}

impl LlmHttpClient {
    pub fn new(config: LlmClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client config is static and always valid");
        Self { client, config }
    }

    /// Sends `request_body` (the caller's prompt payload) and returns the
    /// response's `text` field, falling back to the whole `actions` value
    /// serialized back to a string when `text` is absent (some endpoints
    /// return structured output directly).
    pub async fn complete(&self, request_body: serde_json::Value) -> Result<String, OrchestratorError> {
        let mut request = self.client.post(&self.config.endpoint).json(&request_body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }
        if let Some(model_id) = &self.config.model_id {
            request = request.header("x-model-id", model_id);
        }

        let response = request.send().await.map_err(|e| OrchestratorError::TransientToolError {
            tool: "llm_client".into(),
            reason: e.to_string(),
        })?;

        let response = response.error_for_status().map_err(|e| OrchestratorError::TransientToolError {
            tool: "llm_client".into(),
            reason: e.to_string(),
        })?;

        let body: LlmResponse = response.json().await.map_err(|e| OrchestratorError::PlannerParseError { reason: e.to_string() })?;

        match body.text {
            Some(text) => Ok(text),
            None => match body.actions {
                Some(actions) => Ok(actions.to_string()),
                None => Err(OrchestratorError::PlannerParseError { reason: "response carried neither `text` nor `actions`".into() }),
            },
        }
    }
}

#[cfg(test)]
#[path = "llm_client_tests.rs"]
mod tests;
