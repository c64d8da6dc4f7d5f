// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `send_whatsapp` builtin, ported from `communication.py`'s `SendWhatsAppTool`.

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

pub struct SendWhatsappTool {
    transport: Arc<dyn ChannelTransport>,
}

impl SendWhatsappTool {
    pub fn new(transport: Arc<dyn ChannelTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for SendWhatsappTool {
    fn name(&self) -> &str {
        "send_whatsapp"
    }

    fn description(&self) -> &str {
        "Send a WhatsApp message to a subject"
    }

    fn category(&self) -> &str {
        "communication"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "to": {"type": "string"},
                "message": {"type": "string"},
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
            .send_whatsapp(&params.to, &params.message)
            .await
            .map_err(|e| OrchestratorError::TransientToolError { tool: "send_whatsapp".into(), reason: e.0 })?;

        Ok(serde_json::json!({
            "message_sid": receipt.provider_message_id,
            "to": params.to,
        }))
    }
}

#[cfg(test)]
#[path = "whatsapp_tests.rs"]
mod tests;
