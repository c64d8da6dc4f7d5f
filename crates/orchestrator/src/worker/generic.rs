// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fallback handler for task types with no registered [`TaskHandler`]
//! (§4.9 step 2): "runs the generic handler, which inspects required-tools
//! against the registry and emits a result noting which are missing."

use async_trait::async_trait;
use orc_core::OrchestratorError;
use orc_storage::WorkerTask;
use orc_tools::ToolExecutor;

use crate::result_contract::{MissingToolReport, TaskResultPayload};
use crate::worker::registry::TaskHandler;

pub struct GenericHandler;

#[async_trait]
impl TaskHandler for GenericHandler {
    async fn handle(&self, task: &WorkerTask, tools: &ToolExecutor) -> Result<TaskResultPayload, OrchestratorError> {
        let required_tools: Vec<String> = task
            .payload
            .get("required_tools")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default();

        let mut missing = Vec::new();
        for tool in &required_tools {
            if !tools.registry().is_tool_available(tool) {
                missing.push(MissingToolReport {
                    tool: tool.clone(),
                    alternative_used: None,
                    impact: format!("task type '{}' has no registered handler and '{}' is unavailable", task.task_type, tool),
                });
            }
        }

        let mut result = TaskResultPayload::default();
        result.metrics_delta.insert("tasks_completed".into(), serde_json::json!(1));
        result.missing_tools = missing;
        Ok(result)
    }
}

#[cfg(test)]
#[path = "generic_tests.rs"]
mod tests;
