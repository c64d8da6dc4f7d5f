// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime execution state (§3 `WorkflowExecution`/`WorkerTask`), ported
//! from `workflow/models.py`'s `WorkflowExecution` and the worker-task shape
//! implied by §4.8.2/§4.9.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use orc_core::{ExecutionId, SubjectId, TaskId, TenantId, WorkflowId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Running,
    Paused,
    Completed,
    Failed,
}

orc_core::simple_display! {
    ExecutionStatus {
        Running => "running",
        Paused => "paused",
        Completed => "completed",
        Failed => "failed",
    }
}

/// A logged supervisor decision with the metrics snapshot that motivated it
/// (§3, §4.8 "every transition appends a decision entry").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub timestamp: DateTime<Utc>,
    pub decision: String,
    pub reasoning: String,
    pub metrics_snapshot: serde_json::Value,
}

/// A logged tool invocation (§4.7 `log_tool_usage`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUsageEntry {
    pub tool: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub latency_ms: f64,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
}

/// A worker's attempt to use an unavailable tool, with whatever fallback it
/// took (§3 `missing_tool_attempts`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingToolAttempt {
    pub tool: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub alternative_used: Option<String>,
    pub impact: String,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
}

/// Runtime instance of a workflow pinned to a specific version (§3
/// `WorkflowExecution`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub id: ExecutionId,
    pub workflow_id: WorkflowId,
    pub workflow_version: u32,
    pub tenant_id: TenantId,
    pub subject_ids: Vec<SubjectId>,
    pub current_stage: String,
    pub status: ExecutionStatus,
    pub metrics: HashMap<String, serde_json::Value>,
    pub decisions_log: Vec<DecisionEntry>,
    pub tool_usage_log: Vec<ToolUsageEntry>,
    pub missing_tool_attempts: Vec<MissingToolAttempt>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkflowExecution {
    pub fn new(
        workflow_id: WorkflowId,
        workflow_version: u32,
        tenant_id: TenantId,
        subject_ids: Vec<SubjectId>,
        current_stage: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExecutionId::new(),
            workflow_id,
            workflow_version,
            tenant_id,
            subject_ids,
            current_stage: current_stage.into(),
            status: ExecutionStatus::Running,
            metrics: HashMap::new(),
            decisions_log: Vec::new(),
            tool_usage_log: Vec::new(),
            missing_tool_attempts: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// True once every task for `subject_id` at this execution's current
    /// stage has completed, the primitive the supervisor polls to decide
    /// whether a stage can advance (§4.8 task-completed flow).
    pub fn stage_complete_for_subject(&self, subject_id: SubjectId, tasks: &[WorkerTask]) -> bool {
        let stage_task_type = format!("{}_task", self.current_stage);
        tasks
            .iter()
            .filter(|task| task.execution_id == self.id && task.subject_id == subject_id && task.task_type == stage_task_type)
            .all(|task| task.status == TaskStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Failed,
}

orc_core::simple_display! {
    TaskStatus {
        Pending => "pending",
        Assigned => "assigned",
        InProgress => "in_progress",
        Completed => "completed",
        Failed => "failed",
    }
}

impl TaskStatus {
    /// `completed` and terminal `failed` accept no further forward
    /// transitions (§3 "completed and failed (terminal) are absorbing").
    pub fn is_absorbing(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// A unit of delegation from the supervisor to a worker (§3 `WorkerTask`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerTask {
    pub id: TaskId,
    pub execution_id: ExecutionId,
    pub assigned_worker_id: String,
    pub subject_id: SubjectId,
    pub task_type: String,
    pub payload: serde_json::Value,
    pub status: TaskStatus,
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
    pub retry_count: u32,
    pub max_retries: u32,
    pub timeout_seconds: u64,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkerTask {
    pub fn new(
        execution_id: ExecutionId,
        assigned_worker_id: impl Into<String>,
        subject_id: SubjectId,
        task_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: TaskId::new(),
            execution_id,
            assigned_worker_id: assigned_worker_id.into(),
            subject_id,
            task_type: task_type.into(),
            payload,
            status: TaskStatus::Pending,
            result: None,
            error: None,
            retry_count: 0,
            max_retries: 3,
            // Budget for the whole task, not a single tool call (those
            // default to 30s in the tool registry); a task may invoke
            // several tools in sequence.
            timeout_seconds: 300,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Transition to `in_progress`, stamping `started_at` (§4.9 step 1).
    pub fn start(&mut self) {
        self.status = TaskStatus::InProgress;
        self.started_at = Some(Utc::now());
    }

    pub fn complete(&mut self, result: serde_json::Value) {
        self.status = TaskStatus::Completed;
        self.result = Some(result);
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
    }

    /// Reset to `pending` for an explicit retry, clearing `started_at` (§3
    /// invariant: "transitions are only forward unless an explicit retry
    /// resets to pending with started-at cleared").
    pub fn retry(&mut self) {
        self.status = TaskStatus::Pending;
        self.started_at = None;
        self.retry_count += 1;
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
