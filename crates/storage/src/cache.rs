// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution read cache (§4.7 "get-execution checks a cache keyed by
//! execution id, 5-minute TTL"), ported from `WorkflowService`'s Redis-backed
//! `get("workflow_exec", execution_id)`/`set(..., ttl=300)` calls, collapsed
//! to an in-process map since no external cache is in scope.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use orc_core::ExecutionId;
use parking_lot::Mutex;

use crate::execution::WorkflowExecution;

const TTL: Duration = Duration::from_secs(300);

struct CachedExecution {
    execution: WorkflowExecution,
    cached_at: DateTime<Utc>,
}

/// TTL cache over [`WorkflowExecution`] reads. `invalidate` is called by
/// every mutation (§4.7: "mutations invalidate the cache").
#[derive(Default)]
pub struct ExecutionCache {
    entries: Mutex<HashMap<ExecutionId, CachedExecution>>,
}

impl ExecutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ExecutionId) -> Option<WorkflowExecution> {
        let mut entries = self.entries.lock();
        let stale = entries
            .get(&id)
            .map(|cached| Utc::now().signed_duration_since(cached.cached_at).to_std().unwrap_or_default() >= TTL)
            .unwrap_or(false);
        if stale {
            entries.remove(&id);
            return None;
        }
        entries.get(&id).map(|cached| cached.execution.clone())
    }

    pub fn put(&self, execution: WorkflowExecution) {
        self.entries.lock().insert(execution.id, CachedExecution { execution, cached_at: Utc::now() });
    }

    pub fn invalidate(&self, id: ExecutionId) {
        self.entries.lock().remove(&id);
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
