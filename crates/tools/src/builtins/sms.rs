// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `send_sms` builtin, ported from `communication.py`'s `SendSMSTool`. Rate
//! limiting reuses the WhatsApp channel's policy, per the original's
//! `PolicyService.validate_tool_call` tool-to-channel map.

use std::sync::Arc;

use async_trait::async_trait;
use orc_core::OrchestratorError;
use serde::Deserialize;

use crate::tool::Tool;
use crate::transport::ChannelTransport;

#[derive(Deserialize)]
struct Params {
    to: String,
    message: String,
}

pub struct SendSmsTool {
    transport: Arc<dyn ChannelTransport>,
}

impl SendSmsTool {
    pub fn new(transport: Arc<dyn ChannelTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for SendSmsTool {
    fn name(&self) -> &str {
        "send_sms"
    }

    fn description(&self) -> &str {
        "Send an SMS to a subject"
    }

    fn category(&self) -> &str {
        "communication"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "to": {"type": "string"},
                "message": {"type": "string", "maxLength": 1600},
            },
            "required": ["to", "message"],
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        let params: Params = serde_json::from_value(params).map_err(|e| OrchestratorError::ValidationError {
            field: "params".into(),
            reason: e.to_string(),
        })?;

        let receipt = self
            .transport
            .send_sms(&params.to, &params.message)
            .await
            .map_err(|e| OrchestratorError::TransientToolError { tool: "send_sms".into(), reason: e.0 })?;

        Ok(serde_json::json!({
            "message_sid": receipt.provider_message_id,
            "to": params.to,
            "sms_count": (params.message.len() / 160) + 1,
        }))
    }
}

#[cfg(test)]
#[path = "sms_tests.rs"]
mod tests;
