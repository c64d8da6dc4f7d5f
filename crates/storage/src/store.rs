// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workflow store (§4.7), ported method-for-method from
//! `workflow/service.py::WorkflowService`.

use std::collections::HashMap;

use chrono::Utc;
use indexmap::IndexMap;
use orc_core::{ExecutionId, SubjectId, TenantId, WorkflowId};
use parking_lot::Mutex;
use tracing::info;

use crate::cache::ExecutionCache;
use crate::dirty::{DirtyTracker, StorageOp};
use crate::error::{Result, StorageError};
use crate::execution::{DecisionEntry, ExecutionStatus, MissingToolAttempt, ToolUsageEntry, WorkflowExecution};
use crate::workflow::{FieldDiff, Workflow, WorkflowVersion};

/// A per-key update to an existing [`Workflow`]: every field is optional so
/// callers only name what they're changing, matching `changes.items()` in
/// the original `update_workflow`.
#[derive(Debug, Clone, Default)]
pub struct WorkflowChanges {
    pub worker_pool_ids: Option<Vec<String>>,
    pub purpose: Option<String>,
    pub stages: Option<IndexMap<String, crate::workflow::WorkflowStage>>,
    pub metric_thresholds: Option<IndexMap<String, crate::workflow::MetricThreshold>>,
    pub available_tools: Option<Vec<String>>,
    pub missing_tools: Option<Vec<crate::workflow::MissingToolEntry>>,
}

impl WorkflowChanges {
    /// JSON description of which top-level fields are present, matching the
    /// original's `changes` dict stored verbatim on the version record.
    fn describe(&self) -> serde_json::Value {
        let mut names = Vec::new();
        if self.worker_pool_ids.is_some() {
            names.push("worker_pool_ids");
        }
        if self.purpose.is_some() {
            names.push("purpose");
        }
        if self.stages.is_some() {
            names.push("stages");
        }
        if self.metric_thresholds.is_some() {
            names.push("metric_thresholds");
        }
        if self.available_tools.is_some() {
            names.push("available_tools");
        }
        if self.missing_tools.is_some() {
            names.push("missing_tools");
        }
        serde_json::json!({ "changed_fields": names })
    }
}

/// Versioned workflow store plus execution runtime state (§4.7).
pub struct WorkflowStore {
    workflows: Mutex<HashMap<WorkflowId, Workflow>>,
    versions: Mutex<Vec<WorkflowVersion>>,
    executions: Mutex<HashMap<ExecutionId, WorkflowExecution>>,
    cache: ExecutionCache,
    journal: DirtyTracker,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self {
            workflows: Mutex::new(HashMap::new()),
            versions: Mutex::new(Vec::new()),
            executions: Mutex::new(HashMap::new()),
            cache: ExecutionCache::new(),
            journal: DirtyTracker::new(),
        }
    }

    /// Number of journaled storage operations so far — exposed for tests
    /// and daemon diagnostics, not a public replay API.
    pub fn journal_len(&self) -> usize {
        self.journal.len()
    }

    /// Create a new workflow at version 1, with an initial version record
    /// (§4.7 "persists row with version = 1, appends an initial Version
    /// record").
    #[allow(clippy::too_many_arguments)]
    pub fn create_workflow(
        &self,
        tenant_id: TenantId,
        worker_pool_ids: Vec<String>,
        purpose: impl Into<String>,
        workflow_type: crate::workflow::WorkflowType,
        start_date: chrono::DateTime<Utc>,
        end_date: chrono::DateTime<Utc>,
        goal: impl Into<String>,
        stages: IndexMap<String, crate::workflow::WorkflowStage>,
        metric_thresholds: IndexMap<String, crate::workflow::MetricThreshold>,
        available_tools: Vec<String>,
        missing_tools: Vec<crate::workflow::MissingToolEntry>,
        created_by: impl Into<String>,
    ) -> Workflow {
        let now = Utc::now();
        let workflow = Workflow {
            id: WorkflowId::new(),
            tenant_id,
            worker_pool_ids,
            purpose: purpose.into(),
            workflow_type,
            start_date,
            end_date,
            goal: goal.into(),
            version: 1,
            stages,
            metric_thresholds,
            available_tools,
            missing_tools,
            created_at: now,
            created_by: created_by.into(),
            updated_at: now,
        };

        self.journal.touch(StorageOp::WorkflowCreated { workflow_id: workflow.id });
        self.versions.lock().push(WorkflowVersion {
            workflow_id: workflow.id,
            version: 1,
            previous_version: None,
            changes: serde_json::json!({"action": "created"}),
            reason: "Initial workflow creation".to_string(),
            changed_by: workflow.created_by.clone(),
            diff: IndexMap::new(),
            created_at: now,
        });

        info!(workflow_id = %workflow.id, purpose = %workflow.purpose, "created workflow v1");
        self.workflows.lock().insert(workflow.id, workflow.clone());
        workflow
    }

    pub fn get_workflow(&self, id: WorkflowId) -> Option<Workflow> {
        self.workflows.lock().get(&id).cloned()
    }

    /// Apply `changes`, compute a per-key diff against the prior state,
    /// bump the version, and append a [`WorkflowVersion`] record (§4.7
    /// "Update: computes a per-key diff, writes new current-version row
    /// with version+=1").
    pub fn update_workflow(
        &self,
        id: WorkflowId,
        changes: WorkflowChanges,
        reason: impl Into<String>,
        changed_by: impl Into<String>,
    ) -> Result<Workflow> {
        let reason = reason.into();
        let changed_by = changed_by.into();
        let mut workflows = self.workflows.lock();
        let workflow = workflows.get_mut(&id).ok_or(StorageError::WorkflowNotFound(id))?;

        let mut diff = IndexMap::new();
        if let Some(v) = changes.worker_pool_ids.clone() {
            diff.insert(
                "worker_pool_ids".to_string(),
                FieldDiff { old: serde_json::to_value(&workflow.worker_pool_ids).unwrap_or_default(), new: serde_json::to_value(&v).unwrap_or_default() },
            );
            workflow.worker_pool_ids = v;
        }
        if let Some(v) = changes.purpose.clone() {
            diff.insert(
                "purpose".to_string(),
                FieldDiff { old: serde_json::to_value(&workflow.purpose).unwrap_or_default(), new: serde_json::to_value(&v).unwrap_or_default() },
            );
            workflow.purpose = v;
        }
        if let Some(v) = changes.stages.clone() {
            diff.insert(
                "stages".to_string(),
                FieldDiff { old: serde_json::to_value(&workflow.stages).unwrap_or_default(), new: serde_json::to_value(&v).unwrap_or_default() },
            );
            workflow.stages = v;
        }
        if let Some(v) = changes.metric_thresholds.clone() {
            diff.insert(
                "metric_thresholds".to_string(),
                FieldDiff {
                    old: serde_json::to_value(&workflow.metric_thresholds).unwrap_or_default(),
                    new: serde_json::to_value(&v).unwrap_or_default(),
                },
            );
            workflow.metric_thresholds = v;
        }
        if let Some(v) = changes.available_tools.clone() {
            diff.insert(
                "available_tools".to_string(),
                FieldDiff { old: serde_json::to_value(&workflow.available_tools).unwrap_or_default(), new: serde_json::to_value(&v).unwrap_or_default() },
            );
            workflow.available_tools = v;
        }
        if let Some(v) = changes.missing_tools.clone() {
            diff.insert(
                "missing_tools".to_string(),
                FieldDiff { old: serde_json::to_value(&workflow.missing_tools).unwrap_or_default(), new: serde_json::to_value(&v).unwrap_or_default() },
            );
            workflow.missing_tools = v;
        }

        let old_version = workflow.version;
        workflow.version += 1;
        workflow.updated_at = Utc::now();

        self.journal.touch(StorageOp::WorkflowUpdated { workflow_id: id, version: workflow.version });
        self.versions.lock().push(WorkflowVersion {
            workflow_id: id,
            version: workflow.version,
            previous_version: Some(old_version),
            changes: changes.describe(),
            reason,
            changed_by,
            diff,
            created_at: workflow.updated_at,
        });

        info!(workflow_id = %id, old_version, new_version = workflow.version, "updated workflow");
        Ok(workflow.clone())
    }

    pub fn get_workflow_version(&self, workflow_id: WorkflowId, version: u32) -> Option<WorkflowVersion> {
        self.versions.lock().iter().find(|v| v.workflow_id == workflow_id && v.version == version).cloned()
    }

    /// All versions for a workflow, ordered oldest-first.
    pub fn get_workflow_history(&self, workflow_id: WorkflowId) -> Vec<WorkflowVersion> {
        let mut history: Vec<_> = self.versions.lock().iter().filter(|v| v.workflow_id == workflow_id).cloned().collect();
        history.sort_by_key(|v| v.version);
        history
    }

    /// Rollback is implemented as a replay: the target version's captured
    /// `changes` become a brand-new `update_workflow` call, so history
    /// remains strictly append-only (§4.7, §9 decision 3).
    pub fn rollback_workflow(&self, workflow_id: WorkflowId, to_version: u32, reason: impl Into<String>) -> Result<Workflow> {
        let reason = reason.into();
        let current_version =
            self.workflows.lock().get(&workflow_id).ok_or(StorageError::WorkflowNotFound(workflow_id))?.version;
        let target = self
            .get_workflow_version(workflow_id, to_version)
            .ok_or(StorageError::VersionNotFound { workflow_id, version: to_version })?;

        let changes = changes_from_version_snapshot(&target);
        self.update_workflow(
            workflow_id,
            changes,
            format!("{reason} (rolled back from v{current_version} to v{to_version})"),
            "System",
        )
    }

    /// Create a new execution pinned to the workflow's current version,
    /// starting at its first stage (§4.8 onboarded flow step 4).
    pub fn create_execution(&self, workflow_id: WorkflowId, subject_ids: Vec<SubjectId>) -> Result<WorkflowExecution> {
        let workflow = self.workflows.lock().get(&workflow_id).cloned().ok_or(StorageError::WorkflowNotFound(workflow_id))?;
        let first_stage = workflow.first_stage().unwrap_or("unknown").to_string();
        let execution = WorkflowExecution::new(workflow.id, workflow.version, workflow.tenant_id, subject_ids, first_stage);

        self.journal.touch(StorageOp::ExecutionCreated { execution_id: execution.id });
        info!(workflow_id = %workflow_id, execution_id = %execution.id, "created workflow execution");
        self.executions.lock().insert(execution.id, execution.clone());
        Ok(execution)
    }

    /// Checks the cache first (5-minute TTL, §4.7), falling back to the
    /// primary map and repopulating the cache on a miss.
    pub fn get_execution(&self, id: ExecutionId) -> Option<WorkflowExecution> {
        if let Some(cached) = self.cache.get(id) {
            return Some(cached);
        }
        let execution = self.executions.lock().get(&id).cloned()?;
        self.cache.put(execution.clone());
        Some(execution)
    }

    pub fn update_metrics(&self, id: ExecutionId, metrics_update: HashMap<String, serde_json::Value>) -> Result<WorkflowExecution> {
        let mut executions = self.executions.lock();
        let execution = executions.get_mut(&id).ok_or(StorageError::ExecutionNotFound(id))?;
        execution.metrics.extend(metrics_update);
        execution.updated_at = Utc::now();

        self.journal.touch(StorageOp::MetricsTouched { execution_id: id });
        self.cache.invalidate(id);
        Ok(execution.clone())
    }

    pub fn log_decision(&self, id: ExecutionId, decision: impl Into<String>, reasoning: impl Into<String>, metrics_snapshot: serde_json::Value) -> Result<()> {
        let mut executions = self.executions.lock();
        let execution = executions.get_mut(&id).ok_or(StorageError::ExecutionNotFound(id))?;
        execution.decisions_log.push(DecisionEntry {
            timestamp: Utc::now(),
            decision: decision.into(),
            reasoning: reasoning.into(),
            metrics_snapshot,
        });
        execution.updated_at = Utc::now();

        self.journal.touch(StorageOp::DecisionLogged { execution_id: id });
        self.cache.invalidate(id);
        Ok(())
    }

    pub fn log_tool_usage(&self, id: ExecutionId, tool: impl Into<String>, success: bool, latency_ms: f64, subject_id: Option<SubjectId>) {
        // Matches the original's `log_tool_usage`: swallow missing executions
        // rather than failing the caller, since this is best-effort telemetry.
        let mut executions = self.executions.lock();
        let Some(execution) = executions.get_mut(&id) else { return };
        execution.tool_usage_log.push(ToolUsageEntry { tool: tool.into(), timestamp: Utc::now(), success, latency_ms, subject_id });
        execution.updated_at = Utc::now();

        self.journal.touch(StorageOp::ToolUsageLogged { execution_id: id });
        self.cache.invalidate(id);
    }

    pub fn log_missing_tool_attempt(&self, id: ExecutionId, tool: impl Into<String>, alternative_used: Option<String>, impact: impl Into<String>, subject_id: Option<SubjectId>) {
        let mut executions = self.executions.lock();
        let Some(execution) = executions.get_mut(&id) else { return };
        execution.missing_tool_attempts.push(MissingToolAttempt { tool: tool.into(), timestamp: Utc::now(), alternative_used, impact: impact.into(), subject_id });
        execution.updated_at = Utc::now();

        self.journal.touch(StorageOp::MissingToolAttemptLogged { execution_id: id });
        self.cache.invalidate(id);
    }

    /// Advance `current_stage` to `next_stage`, without touching status.
    pub fn advance_stage(&self, id: ExecutionId, next_stage: impl Into<String>) -> Result<WorkflowExecution> {
        let mut executions = self.executions.lock();
        let execution = executions.get_mut(&id).ok_or(StorageError::ExecutionNotFound(id))?;
        execution.current_stage = next_stage.into();
        execution.updated_at = Utc::now();
        self.cache.invalidate(id);
        Ok(execution.clone())
    }

    pub fn pause_workflow(&self, id: ExecutionId, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        self.set_status(id, ExecutionStatus::Paused)?;
        let metrics_snapshot = self.metrics_snapshot(id)?;
        self.log_decision(id, "pause_workflow", reason, metrics_snapshot)?;
        info!(execution_id = %id, "paused workflow execution");
        Ok(())
    }

    pub fn resume_workflow(&self, id: ExecutionId, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        self.set_status(id, ExecutionStatus::Running)?;
        let metrics_snapshot = self.metrics_snapshot(id)?;
        self.log_decision(id, "resume_workflow", reason, metrics_snapshot)?;
        info!(execution_id = %id, "resumed workflow execution");
        Ok(())
    }

    pub fn complete_workflow(&self, id: ExecutionId) -> Result<()> {
        let mut executions = self.executions.lock();
        let execution = executions.get_mut(&id).ok_or(StorageError::ExecutionNotFound(id))?;
        execution.status = ExecutionStatus::Completed;
        let now = Utc::now();
        execution.completed_at = Some(now);
        execution.updated_at = now;
        drop(executions);

        self.journal.touch(StorageOp::StatusChanged { execution_id: id, status: ExecutionStatus::Completed });
        self.cache.invalidate(id);
        info!(execution_id = %id, "completed workflow execution");
        Ok(())
    }

    fn set_status(&self, id: ExecutionId, status: ExecutionStatus) -> Result<()> {
        let mut executions = self.executions.lock();
        let execution = executions.get_mut(&id).ok_or(StorageError::ExecutionNotFound(id))?;
        execution.status = status;
        execution.updated_at = Utc::now();
        drop(executions);

        self.journal.touch(StorageOp::StatusChanged { execution_id: id, status });
        self.cache.invalidate(id);
        Ok(())
    }

    fn metrics_snapshot(&self, id: ExecutionId) -> Result<serde_json::Value> {
        let executions = self.executions.lock();
        let execution = executions.get(&id).ok_or(StorageError::ExecutionNotFound(id))?;
        Ok(serde_json::to_value(&execution.metrics).unwrap_or_default())
    }
}

impl Default for WorkflowStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a version's captured `changes` snapshot back into a
/// [`WorkflowChanges`] for rollback-as-replay. The snapshot only ever
/// contains the subset of fields that were actually modified at that
/// version, mirroring the original's `rollback_changes = target_version.changes`.
fn changes_from_version_snapshot(version: &WorkflowVersion) -> WorkflowChanges {
    let diff = &version.diff;
    let mut changes = WorkflowChanges::default();
    if let Some(entry) = diff.get("worker_pool_ids") {
        changes.worker_pool_ids = serde_json::from_value(entry.new.clone()).ok();
    }
    if let Some(entry) = diff.get("purpose") {
        changes.purpose = serde_json::from_value(entry.new.clone()).ok();
    }
    if let Some(entry) = diff.get("stages") {
        changes.stages = serde_json::from_value(entry.new.clone()).ok();
    }
    if let Some(entry) = diff.get("metric_thresholds") {
        changes.metric_thresholds = serde_json::from_value(entry.new.clone()).ok();
    }
    if let Some(entry) = diff.get("available_tools") {
        changes.available_tools = serde_json::from_value(entry.new.clone()).ok();
    }
    if let Some(entry) = diff.get("missing_tools") {
        changes.missing_tools = serde_json::from_value(entry.new.clone()).ok();
    }
    changes
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
