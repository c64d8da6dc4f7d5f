// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete `orc_tools::EscalationSink`, grounded on §4.9 step 6:
//! "Handler may also invoke an `escalate-to-human` tool which (a) creates a
//! ConversationThread in status `waiting-human`, (b) inserts the initial
//! messages, (c) if the task had an execution, calls Workflow Store's
//! `pause`."

use std::sync::Arc;

use async_trait::async_trait;
use orc_core::OrchestratorError;
use orc_storage::WorkflowStore;
use orc_tools::{EscalationOutcome, EscalationRequest, EscalationSink};

use crate::store::ThreadStore;
use crate::thread::{SenderType, ThreadStatus};

/// Wires the `escalate_to_human` builtin to [`ThreadStore`] and
/// [`WorkflowStore`], the seam `orc-tools` leaves abstract so it doesn't
/// depend on either crate directly.
pub struct ThreadEscalationSink {
    threads: Arc<ThreadStore>,
    workflows: Arc<WorkflowStore>,
}

impl ThreadEscalationSink {
    pub fn new(threads: Arc<ThreadStore>, workflows: Arc<WorkflowStore>) -> Self {
        Self { threads, workflows }
    }
}

#[async_trait]
impl EscalationSink for ThreadEscalationSink {
    async fn escalate(&self, request: EscalationRequest) -> Result<EscalationOutcome, OrchestratorError> {
        let thread = self.threads.open(
            request.tenant_id,
            request.subject_id,
            request.execution_id,
            None,
            ThreadStatus::WaitingHuman,
            request.reason.clone(),
            request.context,
        );

        if let Some(subject_message) = request.subject_message {
            self.threads
                .append_message(thread.id, SenderType::Subject, request.subject_id.to_string(), subject_message, serde_json::Value::Null)
                .map_err(|e| OrchestratorError::ValidationError { field: "thread".into(), reason: e.to_string() })?;
        }
        self.threads
            .append_message(thread.id, SenderType::Agent, "worker", format!("escalated: {}", request.reason), serde_json::Value::Null)
            .map_err(|e| OrchestratorError::ValidationError { field: "thread".into(), reason: e.to_string() })?;

        let workflow_paused = if let Some(execution_id) = request.execution_id {
            self.workflows
                .pause_workflow(execution_id, format!("escalated to human: {}", request.reason))
                .map_err(|e| OrchestratorError::ValidationError { field: "execution".into(), reason: e.to_string() })?;
            true
        } else {
            false
        };

        Ok(EscalationOutcome { thread_id: thread.id, workflow_paused })
    }
}

#[cfg(test)]
#[path = "escalation_tests.rs"]
mod tests;
