// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content-generation contract (§4.9 step 3: "generate content via planner
//! with email-type hint"). Shares the planner/decision-analyzer's LLM
//! transport but asks for prose rather than a structured plan, so the
//! response is used as-is rather than run through tolerant JSON parsing.

use async_trait::async_trait;
use orc_core::OrchestratorError;

use crate::supervisor::llm_client::LlmHttpClient;

/// Everything a content-generation prompt is built from.
pub struct ContentRequest {
    pub channel: String,
    pub stage_name: String,
    pub actions: Vec<String>,
    pub subject_context: serde_json::Value,
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: ContentRequest) -> Result<String, OrchestratorError>;
}

/// Production generator: posts a `generate_content` prompt to the same
/// planner endpoint `HttpPlanner`/`HttpDecisionAnalyzer` use.
pub struct HttpContentGenerator {
    client: LlmHttpClient,
}

impl HttpContentGenerator {
    pub fn new(client: LlmHttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate(&self, request: ContentRequest) -> Result<String, OrchestratorError> {
        let prompt = serde_json::json!({
            "mode": "generate_content",
            "channel": request.channel,
            "stage_name": request.stage_name,
            "actions": request.actions,
            "subject_context": request.subject_context,
        });
        self.client.complete(prompt).await
    }
}

/// Test double returning fixed prose (or failing, to exercise a handler's
/// error path).
pub struct FakeContentGenerator {
    body: Result<String, String>,
}

impl FakeContentGenerator {
    pub fn returning(body: impl Into<String>) -> Self {
        Self { body: Ok(body.into()) }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self { body: Err(reason.into()) }
    }
}

#[async_trait]
impl ContentGenerator for FakeContentGenerator {
    async fn generate(&self, _request: ContentRequest) -> Result<String, OrchestratorError> {
        self.body.clone().map_err(|reason| OrchestratorError::TransientToolError { tool: "content_generator".into(), reason })
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
