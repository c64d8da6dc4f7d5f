// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shape a `WorkerTask.result` JSON document carries (§4.8
//! task-completed step 2, §4.9 step 3): a metrics delta the supervisor
//! merges into execution metrics, plus the tool-usage and missing-tool
//! reports the worker gathered while running its handler pipeline. Both
//! `worker::builtin` (producer) and `supervisor::task_completed`
//! (consumer) share this type so neither side re-derives the wire shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUsageReport {
    pub tool: String,
    pub success: bool,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingToolReport {
    pub tool: String,
    #[serde(default)]
    pub alternative_used: Option<String>,
    #[serde(default)]
    pub impact: String,
}

/// A completed task's result payload. `metrics_delta` keys are
/// task-type-specific counters (`tasks_completed`, `messages_sent`,
/// per-channel sent counts, stage-specific completions, engagement
/// score, success/failure counts, §4.8 step 2).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskResultPayload {
    #[serde(default)]
    pub metrics_delta: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub tool_usage: Vec<ToolUsageReport>,
    #[serde(default)]
    pub missing_tools: Vec<MissingToolReport>,
}

impl TaskResultPayload {
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Tolerant parse: a task result with no recognizable shape (or no
    /// result at all, on a bare-failure task) still yields an empty
    /// payload rather than failing the whole task-completed flow.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        value.and_then(|v| serde_json::from_value(v.clone()).ok()).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "result_contract_tests.rs"]
mod tests;
