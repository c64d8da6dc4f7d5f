// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Worker Executor (C9, §4.9): consumes `worker-task-assigned`
//! envelopes, dispatches to a per-task-type handler (or the generic
//! fallback), and reports completion back to the supervisor over
//! `task_results`.

pub mod builtin;
pub mod content;
pub mod generic;
pub mod registry;

use std::sync::Arc;

use async_trait::async_trait;
use orc_bus::{Broker, Delivered, Envelope, GroupHandler, Priority, Topic};
use orc_core::{EventType, OrchestratorError, TaskId};
use orc_storage::{TaskStatus, TaskStore, WorkerTask};
use orc_tools::ToolExecutor;
use tracing::{debug, info, warn};

use crate::result_contract::TaskResultPayload;
use crate::worker::generic::GenericHandler;
use crate::worker::registry::HandlerRegistry;

/// Everything a dispatched task needs (§4.9 steps 1-5).
#[derive(Clone)]
pub struct WorkerContext {
    pub tasks: Arc<TaskStore>,
    pub tools: Arc<ToolExecutor>,
    pub handlers: Arc<HandlerRegistry>,
    pub broker: Arc<dyn Broker>,
}

/// Dispatches `worker-task-assigned` envelopes on `supervisor_tasks`.
/// Registered as the handler for the worker-task consumer group.
pub struct WorkerExecutor {
    context: WorkerContext,
}

impl WorkerExecutor {
    pub fn new(context: WorkerContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl GroupHandler for WorkerExecutor {
    async fn handle(&self, delivered: &Delivered) -> Result<(), OrchestratorError> {
        if delivered.envelope.event_type != EventType::WorkerTaskAssigned {
            debug!(event_type = %delivered.envelope.event_type, "worker executor ignoring envelope outside its event set");
            return Ok(());
        }
        let task_id = parse_task_id(&delivered.envelope.payload)?;
        run_task(task_id, &self.context).await
    }
}

/// Runs one `WorkerTask` end to end (§4.9). Re-delivery of an id already
/// `in_progress`/`completed` is a no-op (§4.12, §8 property 7).
pub async fn run_task(task_id: TaskId, ctx: &WorkerContext) -> Result<(), OrchestratorError> {
    let task = ctx
        .tasks
        .get_task(task_id)
        .ok_or_else(|| OrchestratorError::ValidationError { field: "task_id".into(), reason: format!("no such task: {task_id}") })?;

    if matches!(task.status, TaskStatus::InProgress | TaskStatus::Completed) {
        debug!(task_id = %task_id, status = %task.status, "duplicate worker-task-assigned delivery, no-op");
        return Ok(());
    }

    let task = ctx.tasks.mark_in_progress(task_id).map_err(task_store_error)?;

    let handler = ctx.handlers.get(&task.task_type);
    let outcome = match &handler {
        Some(handler) => handler.handle(&task, ctx.tools.as_ref()).await,
        None => GenericHandler.handle(&task, ctx.tools.as_ref()).await,
    };

    match outcome {
        Ok(payload) => {
            let completed = ctx.tasks.mark_completed(task_id, payload.to_value()).map_err(task_store_error)?;
            publish_completion(ctx, &completed, true, None, &payload).await;
            Ok(())
        }
        Err(err) => {
            let should_retry = err.is_retryable();
            let updated = ctx.tasks.mark_failed(task_id, err.to_string(), should_retry).map_err(task_store_error)?;
            if updated.status == TaskStatus::Pending {
                // Retry budget remains: re-publish so the next consumer-group
                // poll picks the task back up (§4.9 step 4 "retry if attempts
                // remain"). No completion envelope yet, the task is not done.
                republish_assignment(ctx, &updated).await;
                return Ok(());
            }

            warn!(task_id = %task_id, error = %err, "worker task failed terminally");
            publish_completion(ctx, &updated, false, Some(err.to_string()), &TaskResultPayload::default()).await;
            Err(OrchestratorError::TaskTerminalFailure { task_id: task_id.to_string(), attempts: updated.retry_count, reason: err.to_string() })
        }
    }
}

async fn publish_completion(ctx: &WorkerContext, task: &WorkerTask, success: bool, error: Option<String>, payload: &TaskResultPayload) {
    let envelope = Envelope::new(
        EventType::WorkerTaskCompleted,
        Priority::High,
        "orc-orchestrator",
        task.subject_id.to_string(),
        serde_json::json!({
            "task_id": task.id,
            "workflow_execution_id": task.execution_id,
            "subject_id": task.subject_id,
            "success": success,
            "error": error,
            "execution_time_ms": task.completed_at.and_then(|c| task.started_at.map(|s| (c - s).num_milliseconds())),
            "missing_tools": payload.missing_tools,
        }),
    );
    if let Err(e) = ctx.broker.publish(Topic::TaskResults, envelope).await {
        warn!(task_id = %task.id, error = %e, "failed to publish worker-task-completed");
    } else {
        info!(task_id = %task.id, success, "worker-task-completed published");
    }
}

async fn republish_assignment(ctx: &WorkerContext, task: &WorkerTask) {
    let envelope = Envelope::new(
        EventType::WorkerTaskAssigned,
        Priority::High,
        "orc-orchestrator",
        task.subject_id.to_string(),
        serde_json::json!({"task_id": task.id}),
    );
    if let Err(e) = ctx.broker.publish(Topic::SupervisorTasks, envelope).await {
        warn!(task_id = %task.id, error = %e, "failed to republish retryable worker-task-assigned");
    }
}

fn task_store_error(err: orc_storage::StorageError) -> OrchestratorError {
    OrchestratorError::ValidationError { field: "task_id".into(), reason: err.to_string() }
}

fn parse_task_id(payload: &serde_json::Value) -> Result<TaskId, OrchestratorError> {
    payload
        .get("task_id")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .ok_or_else(|| OrchestratorError::ValidationError { field: "task_id".into(), reason: "missing or malformed on worker-task-assigned envelope".into() })
}

/// Consumer-group topics the worker executor subscribes to (§4.1, §4.2).
pub fn subscribed_topics() -> Vec<Topic> {
    vec![Topic::SupervisorTasks]
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
