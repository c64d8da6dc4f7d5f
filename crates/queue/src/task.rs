// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task descriptors for the in-process durable job queue (§4.3).
//!
//! Distinct from `WorkerTask` (the cross-service delegation unit owned by
//! `orc-storage`): the job queue is "a secondary delivery mechanism for
//! in-process work", used for agent-invocation fan-out from an ingested
//! event and periodic scheduled-action execution.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default retry cap before a task's DLQ entry is written (§4.3).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// A unit of work enqueued by name + arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub id: Uuid,
    pub queue_name: String,
    pub task_name: String,
    pub args: serde_json::Value,
    pub retry_count: u32,
    pub max_retries: u32,
}

impl TaskDescriptor {
    pub fn new(queue_name: impl Into<String>, task_name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            queue_name: queue_name.into(),
            task_name: task_name.into(),
            args,
            retry_count: 0,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exponential backoff delay before the next attempt, seeded from the
    /// current retry count (§4.3 "retry is exponential").
    pub fn backoff(&self) -> std::time::Duration {
        std::time::Duration::from_millis(200 * 2u64.pow(self.retry_count))
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
