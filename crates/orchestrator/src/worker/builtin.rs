// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in stage handlers (§4.9 step 3): "fetch subject context via
//! `get-subject-context` tool → generate content via planner with
//! email-type hint → send via channel tool → update stage via
//! `update-subject-stage`. Each step is a tool call; any failure produces
//! a structured error result."

use std::sync::Arc;

use async_trait::async_trait;
use orc_core::{OrchestratorError, Stage, TenantId};
use orc_storage::{SubjectStore, WorkerTask};
use orc_tools::{ToolExecutionError, ToolExecutor, ToolResult};

use crate::result_contract::{MissingToolReport, TaskResultPayload, ToolUsageReport};
use crate::worker::content::{ContentGenerator, ContentRequest};
use crate::worker::registry::TaskHandler;

/// Runs the four-step email pipeline for one subject, then advances the
/// subject to `target_stage` (the stage the handler's owning workflow
/// stage represents, e.g. an "intro" stage lands subjects on `interested`).
pub struct EmailStageHandler {
    content: Arc<dyn ContentGenerator>,
    subjects: Arc<SubjectStore>,
    target_stage: Stage,
}

impl EmailStageHandler {
    pub fn new(content: Arc<dyn ContentGenerator>, subjects: Arc<SubjectStore>, target_stage: Stage) -> Self {
        Self { content, subjects, target_stage }
    }
}

fn tenant_id_from_task(task: &WorkerTask) -> Result<TenantId, OrchestratorError> {
    task.payload
        .get("tenant_id")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .ok_or_else(|| OrchestratorError::ValidationError { field: "tenant_id".into(), reason: "missing on task payload".into() })
}

fn stage_and_actions(task: &WorkerTask) -> (String, Vec<String>) {
    let stage_name = task.payload.get("stage_name").and_then(|v| v.as_str()).unwrap_or_default().to_string();
    let actions = task
        .payload
        .get("actions")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    (stage_name, actions)
}

fn as_tool_execution_error(err: ToolExecutionError) -> OrchestratorError {
    match err {
        ToolExecutionError::NotFound(tool) | ToolExecutionError::Unavailable(tool) => OrchestratorError::MissingTool { tool },
    }
}

fn failure_from(step: &str, result: &ToolResult) -> TaskResultPayload {
    let mut payload = TaskResultPayload::default();
    payload.tool_usage.push(ToolUsageReport { tool: step.to_string(), success: false, latency_ms: result.execution_time_ms });
    payload.metrics_delta.insert("failed_tasks".into(), serde_json::json!(1));
    payload
}

#[async_trait]
impl TaskHandler for EmailStageHandler {
    async fn handle(&self, task: &WorkerTask, tools: &ToolExecutor) -> Result<TaskResultPayload, OrchestratorError> {
        let tenant_id = tenant_id_from_task(task)?;
        let (stage_name, actions) = stage_and_actions(task);

        // 1. fetch subject context
        let context_result = tools
            .execute("get_subject_context", Some(tenant_id), None, serde_json::json!({"subject_id": task.subject_id, "tenant_id": tenant_id}))
            .await
            .map_err(as_tool_execution_error)?;
        if !context_result.success {
            return Ok(failure_from("get_subject_context", &context_result));
        }

        // 2. generate content
        let body = self
            .content
            .generate(ContentRequest {
                channel: "email".into(),
                stage_name: stage_name.clone(),
                actions,
                subject_context: context_result.data.clone().unwrap_or(serde_json::Value::Null),
            })
            .await?;

        let subject = self
            .subjects
            .get(task.subject_id)
            .map_err(|e| OrchestratorError::ValidationError { field: "subject_id".into(), reason: e.to_string() })?;

        let Some(to) = subject.email.clone() else {
            let mut payload = TaskResultPayload::default();
            payload.missing_tools.push(MissingToolReport {
                tool: "send_email".into(),
                alternative_used: None,
                impact: "subject has no email address on file".into(),
            });
            return Ok(payload);
        };

        // 3. send via channel tool
        let send_result = tools
            .execute("send_email", Some(tenant_id), Some(&subject), serde_json::json!({"to": to, "subject": format!("{stage_name} update"), "body": body}))
            .await
            .map_err(as_tool_execution_error)?;
        if !send_result.success {
            return Ok(failure_from("send_email", &send_result));
        }

        // 4. update stage
        let update_result = tools
            .execute(
                "update_subject_stage",
                Some(tenant_id),
                Some(&subject),
                serde_json::json!({"subject_id": task.subject_id, "tenant_id": tenant_id, "stage": self.target_stage.to_string()}),
            )
            .await
            .map_err(as_tool_execution_error)?;

        let mut result = TaskResultPayload::default();
        result.metrics_delta.insert("tasks_completed".into(), serde_json::json!(1));
        result.metrics_delta.insert("messages_sent".into(), serde_json::json!(1));
        result.metrics_delta.insert("email_sent".into(), serde_json::json!(1));
        result.tool_usage.push(ToolUsageReport { tool: "get_subject_context".into(), success: true, latency_ms: context_result.execution_time_ms });
        result.tool_usage.push(ToolUsageReport { tool: "send_email".into(), success: true, latency_ms: send_result.execution_time_ms });
        result.tool_usage.push(ToolUsageReport { tool: "update_subject_stage".into(), success: update_result.success, latency_ms: update_result.execution_time_ms });
        Ok(result)
    }
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
