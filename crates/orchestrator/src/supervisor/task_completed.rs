// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The task-completed flow (§4.8): reacts to a `worker-task-completed`
//! envelope by merging the task's metrics delta, checking per-subject
//! stage completion, consulting the decision analyzer, and acting on the
//! decision it returns.

use std::collections::HashMap;
use std::sync::Arc;

use orc_bus::Broker;
use orc_core::{OrchestratorError, TaskId};
use orc_storage::{TaskStore, WorkflowStore};

use crate::result_contract::TaskResultPayload;
use crate::supervisor::decision::{fallback_decision, Decision, DecisionAnalyzer, DecisionRequest};
use crate::supervisor::delegate::delegate_stage;

/// Runs the seven-step task-completed flow (§4.8) for the task named in
/// a `worker-task-completed` envelope.
pub async fn handle_task_completed(
    task_id: TaskId,
    task_store: &TaskStore,
    workflows: &WorkflowStore,
    analyzer: &dyn DecisionAnalyzer,
    broker: &Arc<dyn Broker>,
) -> Result<(), OrchestratorError> {
    // 1. Load the WorkerTask and its execution; fail fast if absent.
    let task = task_store.get_task(task_id).ok_or_else(|| OrchestratorError::ValidationError {
        field: "task_id".into(),
        reason: format!("no such task: {task_id}"),
    })?;
    let execution = workflows.get_execution(task.execution_id).ok_or_else(|| OrchestratorError::ValidationError {
        field: "execution_id".into(),
        reason: format!("no such execution: {}", task.execution_id),
    })?;
    let workflow = workflows.get_workflow(execution.workflow_id).ok_or_else(|| OrchestratorError::StageProgressionError {
        subject_id: task.subject_id.to_string(),
        reason: format!("workflow {} for execution {} no longer exists", execution.workflow_id, execution.id),
    })?;

    // 2. Extract a metrics delta from the task's result and merge it.
    let result = TaskResultPayload::from_value(task.result.as_ref());
    let metrics_update: HashMap<String, serde_json::Value> = result.metrics_delta.clone();
    if !metrics_update.is_empty() {
        workflows.update_metrics(execution.id, metrics_update)?;
    }

    // 3. Log tool usage and missing-tool attempts reported by the worker.
    for usage in &result.tool_usage {
        workflows.log_tool_usage(execution.id, usage.tool.clone(), usage.success, usage.latency_ms, Some(task.subject_id));
    }
    for missing in &result.missing_tools {
        workflows.log_missing_tool_attempt(execution.id, missing.tool.clone(), missing.alternative_used.clone(), missing.impact.clone(), Some(task.subject_id));
    }

    // Re-fetch the execution so the decision sees the metrics/logs just
    // written (§5: "steps 1-7 execute atomically from the perspective of
    // the execution row").
    let execution = workflows.get_execution(execution.id).ok_or_else(|| OrchestratorError::ValidationError {
        field: "execution_id".into(),
        reason: format!("execution {} vanished mid-flow", execution.id),
    })?;

    // 4. Determine stage completion for this subject.
    let stage_tasks = task_store.tasks_for_execution(execution.id, None);
    let stage_complete = execution.stage_complete_for_subject(task.subject_id, &stage_tasks);

    // 5. Call the decision analyzer, falling back on failure.
    let request = DecisionRequest {
        goal: workflow.goal.clone(),
        purpose: workflow.purpose.clone(),
        current_stage: execution.current_stage.clone(),
        stage_complete,
        metrics: execution.metrics.clone(),
        thresholds: workflow.metric_thresholds.clone(),
        available_stages: workflow.stages.keys().cloned().collect(),
    };
    let decisions = match analyzer.analyze(request).await {
        Ok(decisions) => decisions,
        Err(e) => {
            tracing::info!(execution_id = %execution.id, error = %e, "decision analyzer failed, using fallback");
            fallback_decision(stage_complete)
        }
    };

    // 6. Execute each decision.
    for decision in &decisions {
        execute_decision(*decision, task_store, workflows, broker, &workflow, &execution).await?;
    }

    // 7. Append a decision log entry with the full metrics snapshot.
    let metrics_snapshot = serde_json::to_value(&execution.metrics).unwrap_or_default();
    let reasoning = decisions.iter().map(Decision::to_string).collect::<Vec<_>>().join(", ");
    workflows.log_decision(execution.id, decisions.first().copied().unwrap_or(Decision::ContinueCurrentStage).to_string(), reasoning, metrics_snapshot)?;

    Ok(())
}

async fn execute_decision(
    decision: Decision,
    task_store: &TaskStore,
    workflows: &WorkflowStore,
    broker: &Arc<dyn Broker>,
    workflow: &orc_storage::Workflow,
    execution: &orc_storage::WorkflowExecution,
) -> Result<(), OrchestratorError> {
    match decision {
        Decision::ContinueCurrentStage => Ok(()),
        Decision::AdjustWorkflow => {
            tracing::info!(execution_id = %execution.id, "adjust-workflow decision deferred, no automated handling yet");
            Ok(())
        }
        Decision::CompleteWorkflow => {
            workflows.complete_workflow(execution.id)?;
            Ok(())
        }
        Decision::ProgressToNextStage => {
            match workflow.next_stage_after(&execution.current_stage) {
                Some(next_stage) => {
                    let next_stage = next_stage.to_string();
                    let updated = workflows.advance_stage(execution.id, next_stage.clone())?;
                    delegate_stage(task_store, broker, workflow, &updated, &next_stage).await;
                    Ok(())
                }
                None => {
                    workflows.complete_workflow(execution.id)?;
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "task_completed_tests.rs"]
mod tests;
