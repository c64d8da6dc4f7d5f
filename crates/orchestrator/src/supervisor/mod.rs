// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Supervisor (C8): reacts to `tenant-onboarded` and
//! `worker-task-completed` envelopes on the bus, driving the onboarded
//! and task-completed flows of §4.8.

pub mod decision;
pub mod delegate;
pub mod llm_client;
pub mod onboarding;
pub mod parsing;
pub mod planner;
pub mod task_completed;
pub mod tenant_profile;

use std::sync::Arc;

use async_trait::async_trait;
use orc_bus::{Broker, Delivered, GroupHandler, Topic};
use orc_core::{EventType, OrchestratorError, TaskId, TenantId};
use orc_storage::{MissingToolStore, TaskStore, WorkflowStore};
use orc_tools::ToolRegistry;
use tracing::debug;

use self::decision::DecisionAnalyzer;
use self::planner::Planner;
use self::tenant_profile::TenantProfileProvider;

/// Everything the supervisor's flows need, bundled so [`Supervisor`]
/// itself stays a thin `GroupHandler` dispatcher.
#[derive(Clone)]
pub struct SupervisorContext {
    pub profile_provider: Arc<dyn TenantProfileProvider>,
    pub planner: Arc<dyn Planner>,
    pub analyzer: Arc<dyn DecisionAnalyzer>,
    pub tools: Arc<ToolRegistry>,
    pub workflows: Arc<WorkflowStore>,
    pub missing_tools: Arc<MissingToolStore>,
    pub tasks: Arc<TaskStore>,
    pub broker: Arc<dyn Broker>,
}

/// Dispatches envelopes on `events` (for `tenant-onboarded`) and
/// `task_results` (for `worker-task-completed`) to the matching flow.
/// Registered as the handler for both consumer groups; envelopes of any
/// other event type are ignored.
pub struct Supervisor {
    context: SupervisorContext,
}

impl Supervisor {
    pub fn new(context: SupervisorContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl GroupHandler for Supervisor {
    async fn handle(&self, delivered: &Delivered) -> Result<(), OrchestratorError> {
        match delivered.envelope.event_type {
            EventType::TenantOnboarded => {
                let tenant_id = parse_tenant_id(&delivered.envelope.payload)?;
                onboarding::handle_tenant_onboarded(
                    tenant_id,
                    &delivered.envelope.payload,
                    self.context.profile_provider.as_ref(),
                    self.context.planner.as_ref(),
                    self.context.tools.as_ref(),
                    self.context.workflows.as_ref(),
                    self.context.missing_tools.as_ref(),
                    self.context.tasks.as_ref(),
                    &self.context.broker,
                )
                .await
            }
            EventType::WorkerTaskCompleted => {
                let task_id = parse_task_id(&delivered.envelope.payload)?;
                task_completed::handle_task_completed(task_id, self.context.tasks.as_ref(), self.context.workflows.as_ref(), self.context.analyzer.as_ref(), &self.context.broker).await
            }
            other => {
                debug!(event_type = %other, topic = ?delivered.topic, "supervisor ignoring envelope outside its event set");
                Ok(())
            }
        }
    }
}

fn parse_tenant_id(payload: &serde_json::Value) -> Result<TenantId, OrchestratorError> {
    payload
        .get("tenant_id")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .ok_or_else(|| OrchestratorError::ValidationError { field: "tenant_id".into(), reason: "missing or malformed on tenant-onboarded envelope".into() })
}

fn parse_task_id(payload: &serde_json::Value) -> Result<TaskId, OrchestratorError> {
    payload
        .get("task_id")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .ok_or_else(|| OrchestratorError::ValidationError { field: "task_id".into(), reason: "missing or malformed on worker-task-completed envelope".into() })
}

/// Consumer-group topics the supervisor subscribes to (§4.1, §4.2).
pub fn subscribed_topics() -> Vec<Topic> {
    vec![Topic::Events, Topic::TaskResults]
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
