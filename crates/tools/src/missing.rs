// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracks requests for tools agents need that don't exist yet, ported from
//! `missing_tools.py`'s `MissingToolRequest` / `MissingToolLogger`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use orc_core::{TaskId, TenantId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolPriority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingToolRequest {
    pub tool_name: String,
    pub category: Option<String>,
    pub use_case: String,
    pub tenant_id: Option<TenantId>,
    pub workflow_id: Option<TaskId>,
    pub priority: ToolPriority,
    pub request_count: u32,
    pub first_requested_at: DateTime<Utc>,
    pub last_requested_at: DateTime<Utc>,
    pub implemented: bool,
    pub notes: Option<String>,
}

/// Collapsing store: requests for the same unimplemented tool bump a
/// counter and upgrade priority rather than accumulate duplicate rows,
/// matching `log_missing_tool`'s "update existing request" branch.
#[derive(Clone, Default)]
pub struct MissingToolStore {
    requests: Arc<Mutex<HashMap<String, MissingToolRequest>>>,
}

impl MissingToolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_missing_tool(
        &self,
        tool_name: impl Into<String>,
        use_case: impl Into<String>,
        priority: ToolPriority,
        category: Option<String>,
        tenant_id: Option<TenantId>,
        workflow_id: Option<TaskId>,
        notes: Option<String>,
    ) {
        let tool_name = tool_name.into();
        let mut requests = self.requests.lock();
        match requests.get_mut(&tool_name) {
            Some(existing) if !existing.implemented => {
                existing.request_count += 1;
                existing.last_requested_at = Utc::now();
                if priority > existing.priority {
                    existing.priority = priority;
                }
                if let Some(notes) = notes {
                    existing.notes = Some(match existing.notes.take() {
                        Some(prior) => format!("{prior}\n---\n{notes}"),
                        None => notes,
                    });
                }
            }
            _ => {
                let now = Utc::now();
                requests.insert(
                    tool_name.clone(),
                    MissingToolRequest {
                        tool_name,
                        category,
                        use_case: use_case.into(),
                        tenant_id,
                        workflow_id,
                        priority,
                        request_count: 1,
                        first_requested_at: now,
                        last_requested_at: now,
                        implemented: false,
                        notes,
                    },
                );
            }
        }
    }

    pub fn get_top_requested(&self, limit: usize) -> Vec<MissingToolRequest> {
        let mut requests: Vec<_> =
            self.requests.lock().values().filter(|r| !r.implemented).cloned().collect();
        requests.sort_by(|a, b| b.request_count.cmp(&a.request_count));
        requests.truncate(limit);
        requests
    }

    pub fn get_high_priority(&self) -> Vec<MissingToolRequest> {
        self.requests
            .lock()
            .values()
            .filter(|r| !r.implemented && r.priority >= ToolPriority::High)
            .cloned()
            .collect()
    }

    /// Marks the request for `tool_name` as implemented. Requests collapse
    /// to one row per tool name here, unlike the original's append-only
    /// table, so this is a single lookup rather than a bulk update.
    pub fn mark_tool_implemented(&self, tool_name: &str) {
        if let Some(request) = self.requests.lock().get_mut(tool_name) {
            request.implemented = true;
        }
    }

    pub fn summary_by_category(&self) -> HashMap<String, u32> {
        let mut summary = HashMap::new();
        for request in self.requests.lock().values().filter(|r| !r.implemented) {
            let category = request.category.clone().unwrap_or_else(|| "uncategorized".to_string());
            *summary.entry(category).or_insert(0) += request.request_count;
        }
        summary
    }
}

#[cfg(test)]
#[path = "missing_tests.rs"]
mod tests;
