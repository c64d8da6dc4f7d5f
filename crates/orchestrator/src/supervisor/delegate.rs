// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage delegation (§4.8.2): fan a workflow stage out to one `WorkerTask`
//! per subject, publishing a `worker-task-assigned` envelope for each.

use std::sync::Arc;

use orc_bus::{Broker, Envelope, Priority, Topic};
use orc_core::EventType;
use orc_storage::workflow::Workflow;
use orc_storage::{TaskStore, WorkflowExecution};
use tracing::error;

/// Outcome of one delegation call (§4.8.2: "If the bulk insert fails, roll
/// back and do not consider the messages published... if flush fails, the
/// mismatch is logged but not auto-reconciled").
///
/// The in-memory [`TaskStore`] cannot fail a single insert, so the only
/// failure mode left is the bus publish; `PartiallyPublished` surfaces
/// that mismatch rather than silently swallowing it (an explicit decision
/// for the open question in §9, since there is no transactional outbox in
/// scope to make publish-with-persist atomic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationOutcome {
    Published { tasks: usize },
    PartiallyPublished { tasks: usize, published: usize },
}

/// Delegates `stage_name` of `workflow`'s execution to a worker per
/// subject, round-robin over `workflow.worker_pool_ids` (§4.8.2).
pub async fn delegate_stage(
    task_store: &TaskStore,
    broker: &Arc<dyn Broker>,
    workflow: &Workflow,
    execution: &WorkflowExecution,
    stage_name: &str,
) -> DelegationOutcome {
    let stage = workflow.stages.get(stage_name);
    let task_type = format!("{stage_name}_task");
    let mut published = 0usize;
    let mut tasks = 0usize;

    for (index, &subject_id) in execution.subject_ids.iter().enumerate() {
        let worker_id = if workflow.worker_pool_ids.is_empty() {
            "unassigned".to_string()
        } else {
            workflow.worker_pool_ids[index % workflow.worker_pool_ids.len()].clone()
        };

        let payload = serde_json::json!({
            "workflow_id": workflow.id,
            "stage_name": stage_name,
            "actions": stage.map(|s| s.actions.clone()).unwrap_or_default(),
            "required_tools": stage.map(|s| s.required_tools.clone()).unwrap_or_default(),
            "fallback_actions": stage.map(|s| s.fallback_actions.clone()).unwrap_or_default(),
            "tenant_id": workflow.tenant_id,
        });

        let task = task_store.create_task(execution.id, worker_id.clone(), subject_id, task_type.clone(), payload.clone());
        tasks += 1;

        let envelope = Envelope::new(
            EventType::WorkerTaskAssigned,
            Priority::High,
            "orc-orchestrator",
            subject_id.to_string(),
            serde_json::json!({
                "task_id": task.id,
                "execution_id": execution.id,
                "workflow_id": workflow.id,
                "stage_name": stage_name,
                "worker_id": worker_id,
            }),
        );

        match broker.publish(Topic::SupervisorTasks, envelope).await {
            Ok(_) => published += 1,
            Err(e) => error!(task_id = %task.id, execution_id = %execution.id, error = %e, "failed to publish worker-task-assigned"),
        }
    }

    if published == tasks {
        DelegationOutcome::Published { tasks }
    } else {
        DelegationOutcome::PartiallyPublished { tasks, published }
    }
}

#[cfg(test)]
#[path = "delegate_tests.rs"]
mod tests;
