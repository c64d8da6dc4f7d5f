// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `get_consumer_context` / `update_consumer_stage` / `search_faq` builtins,
//! ported from `data.py`.

use std::sync::Arc;

use async_trait::async_trait;
use orc_core::{OrchestratorError, SubjectId, TenantId};
use serde::Deserialize;

use crate::context_provider::{parse_stage, ContextProvider};
use crate::tool::Tool;

#[derive(Deserialize)]
struct ContextParams {
    subject_id: SubjectId,
    tenant_id: TenantId,
}

pub struct GetSubjectContextTool {
    provider: Arc<dyn ContextProvider>,
}

impl GetSubjectContextTool {
    pub fn new(provider: Arc<dyn ContextProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for GetSubjectContextTool {
    fn name(&self) -> &str {
        "get_subject_context"
    }

    fn description(&self) -> &str {
        "Get complete subject context including stage, metrics, and engagement counters"
    }

    fn category(&self) -> &str {
        "data"
    }

    fn timeout_seconds(&self) -> u64 {
        10
    }

    fn max_retries(&self) -> u32 {
        0
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "subject_id": {"type": "string"},
                "tenant_id": {"type": "string"},
            },
            "required": ["subject_id", "tenant_id"],
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        let params: ContextParams = serde_json::from_value(params).map_err(|e| OrchestratorError::ValidationError {
            field: "params".into(),
            reason: e.to_string(),
        })?;

        let context = self.provider.get_context(params.tenant_id, params.subject_id).await?;
        Ok(serde_json::to_value(context).expect("SubjectContext always serializes"))
    }
}

#[derive(Deserialize)]
struct UpdateStageParams {
    subject_id: SubjectId,
    tenant_id: TenantId,
    stage: String,
}

pub struct UpdateSubjectStageTool {
    provider: Arc<dyn ContextProvider>,
}

impl UpdateSubjectStageTool {
    pub fn new(provider: Arc<dyn ContextProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for UpdateSubjectStageTool {
    fn name(&self) -> &str {
        "update_subject_stage"
    }

    fn description(&self) -> &str {
        "Update the stage of a subject (new, interested, engaged, converted, churned)"
    }

    fn category(&self) -> &str {
        "data"
    }

    fn timeout_seconds(&self) -> u64 {
        10
    }

    fn max_retries(&self) -> u32 {
        0
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "subject_id": {"type": "string"},
                "tenant_id": {"type": "string"},
                "stage": {"type": "string", "enum": ["new", "interested", "engaged", "converted", "churned"]},
            },
            "required": ["subject_id", "tenant_id", "stage"],
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        let params: UpdateStageParams = serde_json::from_value(params).map_err(|e| OrchestratorError::ValidationError {
            field: "params".into(),
            reason: e.to_string(),
        })?;

        let stage = parse_stage(&params.stage).ok_or_else(|| OrchestratorError::ValidationError {
            field: "stage".into(),
            reason: format!("invalid stage '{}'", params.stage),
        })?;

        let context = self.provider.update_stage(params.tenant_id, params.subject_id, stage).await?;
        Ok(serde_json::to_value(context).expect("SubjectContext always serializes"))
    }
}

/// Stub, matching the original's `SearchFAQTool`: always unavailable so
/// agents log a missing-tool request rather than silently no-op.
pub struct SearchFaqTool;

#[async_trait]
impl Tool for SearchFaqTool {
    fn name(&self) -> &str {
        "search_faq"
    }

    fn description(&self) -> &str {
        "Search FAQ/knowledge base for answers (not yet implemented)"
    }

    fn category(&self) -> &str {
        "knowledge"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {"type": "string"},
                "limit": {"type": "integer", "default": 5},
            },
            "required": ["query"],
        })
    }

    fn check_availability(&self) -> bool {
        false
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        Err(OrchestratorError::PermanentToolError {
            tool: "search_faq".into(),
            reason: "not yet implemented".into(),
        })
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
