// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seam between the `escalate_to_human` builtin and the conversation-thread
//! store. The real implementation lives on `orc-threads`/`orc-storage`;
//! this trait keeps `orc-tools` from depending on either directly.

use async_trait::async_trait;
use orc_core::{ExecutionId, OrchestratorError, SubjectId, TenantId, ThreadId};

pub struct EscalationRequest {
    pub tenant_id: TenantId,
    pub subject_id: SubjectId,
    pub execution_id: Option<ExecutionId>,
    pub reason: String,
    pub context: serde_json::Value,
    pub subject_message: Option<String>,
}

pub struct EscalationOutcome {
    pub thread_id: ThreadId,
    pub workflow_paused: bool,
}

#[async_trait]
pub trait EscalationSink: Send + Sync {
    /// Opens a conversation thread in `waiting_human` state and, when an
    /// execution id is present, pauses that workflow execution.
    async fn escalate(&self, request: EscalationRequest) -> Result<EscalationOutcome, OrchestratorError>;
}
