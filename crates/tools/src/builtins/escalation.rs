// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `escalate_to_human` builtin, ported from `communication.py`'s
//! `EscalateToHumanTool`.

use std::sync::Arc;

use async_trait::async_trait;
use orc_core::{ExecutionId, OrchestratorError, SubjectId, TenantId};
use serde::Deserialize;

use crate::escalation::{EscalationRequest, EscalationSink};
use crate::tool::Tool;

#[derive(Deserialize)]
struct Params {
    tenant_id: TenantId,
    subject_id: SubjectId,
    execution_id: Option<ExecutionId>,
    reason: String,
    context: serde_json::Value,
    subject_message: Option<String>,
}

pub struct EscalateToHumanTool {
    sink: Arc<dyn EscalationSink>,
}

impl EscalateToHumanTool {
    pub fn new(sink: Arc<dyn EscalationSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Tool for EscalateToHumanTool {
    fn name(&self) -> &str {
        "escalate_to_human"
    }

    fn description(&self) -> &str {
        "Escalate a subject to human intervention when the question or issue is too complex for the worker"
    }

    fn category(&self) -> &str {
        "communication"
    }

    fn timeout_seconds(&self) -> u64 {
        15
    }

    fn max_retries(&self) -> u32 {
        0
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "tenant_id": {"type": "string"},
                "subject_id": {"type": "string"},
                "execution_id": {"type": "string"},
                "reason": {"type": "string"},
                "context": {"type": "object"},
                "subject_message": {"type": "string"},
            },
            "required": ["tenant_id", "subject_id", "reason", "context"],
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        let params: Params = serde_json::from_value(params).map_err(|e| OrchestratorError::ValidationError {
            field: "params".into(),
            reason: e.to_string(),
        })?;

        let outcome = self
            .sink
            .escalate(EscalationRequest {
                tenant_id: params.tenant_id,
                subject_id: params.subject_id,
                execution_id: params.execution_id,
                reason: params.reason,
                context: params.context,
                subject_message: params.subject_message,
            })
            .await?;

        Ok(serde_json::json!({
            "thread_id": outcome.thread_id.to_string(),
            "status": "escalated",
            "workflow_paused": outcome.workflow_paused,
        }))
    }
}

#[cfg(test)]
#[path = "escalation_tests.rs"]
mod tests;
