// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dead-letter queue store (§4.3), ported field-for-field from the
//! original `DeadLetterQueueEntry` model and `DLQService`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orc_bus::{Delivered, DeadLetterSink};
use orc_core::DlqEntryId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A terminal failure record (§3 `DeadLetterEntry`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlqEntry {
    pub id: DlqEntryId,
    pub queue_name: String,
    pub original_job_id: String,
    pub task_name: String,
    pub payload: serde_json::Value,
    pub error_message: String,
    pub failed_at: DateTime<Utc>,
    pub retry_count: u32,
    pub processed: bool,
}

/// Aggregate counts per queue, for the scheduler daemon's housekeeping
/// pass (`dlq_service.get_stats`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DlqStats {
    pub unprocessed_by_queue: HashMap<String, u64>,
    pub processed_by_queue: HashMap<String, u64>,
}

/// Terminal store for permanently failed jobs, shared by the job queue
/// (§4.3) and the bus consumer-group runtime (§4.2) via [`DeadLetterSink`].
#[derive(Clone)]
pub struct DlqStore {
    entries: Arc<Mutex<HashMap<DlqEntryId, DlqEntry>>>,
}

impl DlqStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_failed_task(
        &self,
        queue_name: impl Into<String>,
        original_job_id: impl Into<String>,
        task_name: impl Into<String>,
        payload: serde_json::Value,
        error_message: impl Into<String>,
    ) -> DlqEntryId {
        let entry = DlqEntry {
            id: DlqEntryId::new(),
            queue_name: queue_name.into(),
            original_job_id: original_job_id.into(),
            task_name: task_name.into(),
            payload,
            error_message: error_message.into(),
            failed_at: Utc::now(),
            retry_count: 0,
            processed: false,
        };
        let id = entry.id;
        info!(queue = %entry.queue_name, task = %entry.task_name, "task added to dead letter queue");
        self.entries.lock().insert(id, entry);
        id
    }

    pub fn get_entry(&self, id: DlqEntryId) -> Option<DlqEntry> {
        self.entries.lock().get(&id).cloned()
    }

    pub fn get_unprocessed_entries(&self, queue_name: Option<&str>, limit: usize) -> Vec<DlqEntry> {
        let entries = self.entries.lock();
        let mut matched: Vec<_> = entries
            .values()
            .filter(|e| !e.processed)
            .filter(|e| queue_name.map_or(true, |q| e.queue_name == q))
            .cloned()
            .collect();
        matched.sort_by_key(|e| e.failed_at);
        matched.truncate(limit);
        matched
    }

    pub fn get_entries_by_queue(&self, queue_name: &str) -> Vec<DlqEntry> {
        self.entries.lock().values().filter(|e| e.queue_name == queue_name).cloned().collect()
    }

    pub fn get_entries_by_task(&self, task_name: &str) -> Vec<DlqEntry> {
        self.entries.lock().values().filter(|e| e.task_name == task_name).cloned().collect()
    }

    /// Marks processed=true. Notably also bumps retry_count, matching the
    /// original `DLQService.mark_processed`.
    pub fn mark_processed(&self, id: DlqEntryId) -> bool {
        let mut entries = self.entries.lock();
        match entries.get_mut(&id) {
            Some(entry) => {
                entry.processed = true;
                entry.retry_count += 1;
                true
            }
            None => false,
        }
    }

    pub fn delete_entry(&self, id: DlqEntryId) -> bool {
        self.entries.lock().remove(&id).is_some()
    }

    /// Any entry retried 3 or more times is marked processed without
    /// re-enqueue (§8 property 8).
    pub fn auto_mark_stale(&self) {
        let stale: Vec<DlqEntryId> = self
            .entries
            .lock()
            .values()
            .filter(|e| !e.processed && e.retry_count >= 3)
            .map(|e| e.id)
            .collect();
        for id in stale {
            self.mark_processed(id);
        }
    }

    pub fn stats(&self) -> DlqStats {
        let entries = self.entries.lock();
        let mut stats = DlqStats::default();
        for entry in entries.values() {
            let bucket = if entry.processed {
                &mut stats.processed_by_queue
            } else {
                &mut stats.unprocessed_by_queue
            };
            *bucket.entry(entry.queue_name.clone()).or_insert(0) += 1;
        }
        stats
    }
}

impl Default for DlqStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes bus consumer-group handler failures (§4.2) into the same DLQ
/// store used by the job queue (§4.3) — one terminal-failure table for
/// both delivery paths.
#[async_trait]
impl DeadLetterSink for DlqStore {
    async fn dead_letter(&self, group_id: &str, delivered: &Delivered, error: &str) {
        self.add_failed_task(
            group_id,
            delivered.envelope.event_id.to_string(),
            delivered.envelope.event_type.to_string(),
            delivered.envelope.payload.clone(),
            error,
        );
    }
}

#[cfg(test)]
#[path = "dlq_tests.rs"]
mod tests;
