// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned workflow definition (§3 `Workflow`/`WorkflowVersion`), ported
//! from `workflow/models.py`'s `Workflow`/`WorkflowVersion`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use orc_core::{TenantId, WorkflowId};
use serde::{Deserialize, Serialize};

/// A tool the plan calls for but that isn't registered, as recorded on the
/// workflow itself (distinct from `orc-tools::MissingToolStore`'s
/// process-wide accumulator, which this entry is also logged to when the
/// workflow is created).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingToolEntry {
    pub name: String,
    pub reason: String,
    #[serde(default)]
    pub alternative_action: Option<String>,
    #[serde(default)]
    pub priority: String,
}

/// §3 `workflow_type`: sequential, parallel, conditional, event-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    Sequential,
    Parallel,
    Conditional,
    EventDriven,
}

orc_core::simple_display! {
    WorkflowType {
        Sequential => "sequential",
        Parallel => "parallel",
        Conditional => "conditional",
        EventDriven => "event_driven",
    }
}

/// One stage of a workflow plan: day offset, actions, entry/exit
/// conditions, required tools, fallback actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowStage {
    pub day: i64,
    pub actions: Vec<String>,
    #[serde(default)]
    pub entry_conditions: serde_json::Value,
    #[serde(default)]
    pub exit_conditions: serde_json::Value,
    pub required_tools: Vec<String>,
    #[serde(default)]
    pub fallback_actions: Vec<String>,
}

/// A decision rule keyed by metric name (§3 `metric-thresholds`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricThreshold {
    pub threshold: f64,
    pub comparator: Comparator,
    pub action: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Ge,
    Le,
    Eq,
    Gt,
    Lt,
}

impl Comparator {
    pub fn evaluate(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparator::Ge => lhs >= rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Eq => (lhs - rhs).abs() < f64::EPSILON,
            Comparator::Gt => lhs > rhs,
            Comparator::Lt => lhs < rhs,
        }
    }
}

/// Purpose-agnostic, versioned workflow plan (§3 `Workflow`). Exactly one
/// `Workflow` row is ever current for a given [`WorkflowId`]; history lives
/// in [`WorkflowVersion`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: WorkflowId,
    pub tenant_id: TenantId,
    pub worker_pool_ids: Vec<String>,
    pub purpose: String,
    pub workflow_type: WorkflowType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub goal: String,
    pub version: u32,
    pub stages: IndexMap<String, WorkflowStage>,
    pub metric_thresholds: IndexMap<String, MetricThreshold>,
    pub available_tools: Vec<String>,
    pub missing_tools: Vec<MissingToolEntry>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Name of the first stage in declared order, or `None` if the plan has
    /// no stages — mirrors `list(workflow.stages.keys())[0]` in the original.
    pub fn first_stage(&self) -> Option<&str> {
        self.stages.keys().next().map(String::as_str)
    }

    /// Name of the stage declared immediately after `current`, if any.
    pub fn next_stage_after(&self, current: &str) -> Option<&str> {
        let index = self.stages.get_index_of(current)?;
        self.stages.get_index(index + 1).map(|(name, _)| name.as_str())
    }
}

/// Per-key `{old, new}` diff entry (supplemented from the original's
/// `update_workflow` diff construction, named in spec.md §9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDiff {
    pub old: serde_json::Value,
    pub new: serde_json::Value,
}

/// Immutable history record (§3 `WorkflowVersion`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowVersion {
    pub workflow_id: WorkflowId,
    pub version: u32,
    pub previous_version: Option<u32>,
    pub changes: serde_json::Value,
    pub reason: String,
    pub changed_by: String,
    pub diff: IndexMap<String, FieldDiff>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
