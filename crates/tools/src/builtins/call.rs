// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `schedule_call` builtin. No standalone call-scheduling tool exists in
//! the original; this follows the same shape as `communication.py`'s
//! `SendWhatsAppTool` since `PolicyService`'s tool-to-channel map treats
//! `schedule_call` as a first-class communication tool against
//! `Channel.CALL`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orc_core::OrchestratorError;
use serde::Deserialize;

use crate::tool::Tool;
use crate::transport::ChannelTransport;

#[derive(Deserialize)]
struct Params {
    to: String,
    at: DateTime<Utc>,
}

pub struct ScheduleCallTool {
    transport: Arc<dyn ChannelTransport>,
}

impl ScheduleCallTool {
    pub fn new(transport: Arc<dyn ChannelTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for ScheduleCallTool {
    fn name(&self) -> &str {
        "schedule_call"
    }

    fn description(&self) -> &str {
        "Schedule an outbound call to a subject"
    }

    fn category(&self) -> &str {
        "communication"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "to": {"type": "string"},
                "at": {"type": "string", "format": "date-time"},
            },
            "required": ["to", "at"],
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        let params: Params = serde_json::from_value(params).map_err(|e| OrchestratorError::ValidationError {
            field: "params".into(),
            reason: e.to_string(),
        })?;

        let receipt = self
            .transport
            .schedule_call(&params.to, params.at)
            .await
            .map_err(|e| OrchestratorError::TransientToolError { tool: "schedule_call".into(), reason: e.0 })?;

        Ok(serde_json::json!({
            "call_id": receipt.provider_message_id,
            "to": params.to,
            "at": params.at,
        }))
    }
}

#[cfg(test)]
#[path = "call_tests.rs"]
mod tests;
