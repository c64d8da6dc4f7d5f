// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `send_email` builtin, ported from `communication.py`'s `SendEmailTool`.

use std::sync::Arc;

use async_trait::async_trait;
use orc_core::OrchestratorError;
use serde::Deserialize;

use crate::tool::Tool;
use crate::transport::ChannelTransport;

#[derive(Deserialize)]
struct Params {
    to: String,
    subject: String,
    body: String,
}

pub struct SendEmailTool {
    transport: Arc<dyn ChannelTransport>,
}

impl SendEmailTool {
    pub fn new(transport: Arc<dyn ChannelTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for SendEmailTool {
    fn name(&self) -> &str {
        "send_email"
    }

    fn description(&self) -> &str {
        "Send transactional email to a subject"
    }

    fn category(&self) -> &str {
        "communication"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "to": {"type": "string", "format": "email"},
                "subject": {"type": "string"},
                "body": {"type": "string"},
            },
            "required": ["to", "subject", "body"],
        })
    }

    fn max_retries(&self) -> u32 {
        2
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        let params: Params = serde_json::from_value(params).map_err(|e| OrchestratorError::ValidationError {
            field: "params".into(),
            reason: e.to_string(),
        })?;

        let receipt = self
            .transport
            .send_email(&params.to, &params.subject, &params.body)
            .await
            .map_err(|e| OrchestratorError::TransientToolError { tool: "send_email".into(), reason: e.0 })?;

        Ok(serde_json::json!({
            "message_id": receipt.provider_message_id,
            "to": params.to,
            "subject": params.subject,
            "provider": receipt.provider,
        }))
    }
}

#[cfg(test)]
#[path = "email_tests.rs"]
mod tests;
