// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only operation journal and dirty-field tracking (§4.7, §9),
//! ported from `oj-storage`'s `MaterializedState` + WAL-apply idiom: state
//! lives in memory, reconstructed in principle by replaying this journal.
//! There is no on-disk WAL here (no persistence requirement is in scope),
//! but every mutation still records the "this field was modified" flag
//! before the in-memory map is updated, the way the original's
//! `flag_modified(execution, "metrics")` calls precede each commit.

use chrono::{DateTime, Utc};
use orc_core::{ExecutionId, WorkflowId};
use serde::{Deserialize, Serialize};

use crate::execution::ExecutionStatus;

/// One durable-on-commit operation, in the order it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageOp {
    WorkflowCreated { workflow_id: WorkflowId },
    WorkflowUpdated { workflow_id: WorkflowId, version: u32 },
    ExecutionCreated { execution_id: ExecutionId },
    MetricsTouched { execution_id: ExecutionId },
    DecisionLogged { execution_id: ExecutionId },
    ToolUsageLogged { execution_id: ExecutionId },
    MissingToolAttemptLogged { execution_id: ExecutionId },
    StatusChanged { execution_id: ExecutionId, status: ExecutionStatus },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JournalEntry {
    recorded_at: DateTime<Utc>,
    op: StorageOp,
}

/// Journal of every mutation applied to the store, in commit order.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    entries: parking_lot::Mutex<Vec<JournalEntry>>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `op` was applied. Mutation helpers call this
    /// immediately before writing the corresponding field into the
    /// in-memory map, matching the original's flag-then-commit ordering.
    pub fn touch(&self, op: StorageOp) {
        self.entries.lock().push(JournalEntry { recorded_at: Utc::now(), op });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn ops(&self) -> Vec<StorageOp> {
        self.entries.lock().iter().map(|entry| entry.op.clone()).collect()
    }
}

#[cfg(test)]
#[path = "dirty_tests.rs"]
mod tests;
