// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn add_failed_task_is_unprocessed_by_default() {
    let store = DlqStore::new();
    let id = store.add_failed_task("worker_tasks", "job-1", "send_email", serde_json::json!({}), "boom");
    let entry = store.get_entry(id).unwrap();
    assert!(!entry.processed);
    assert_eq!(entry.retry_count, 0);
}

#[test]
fn mark_processed_sets_flag_and_bumps_retry_count() {
    let store = DlqStore::new();
    let id = store.add_failed_task("worker_tasks", "job-1", "send_email", serde_json::json!({}), "boom");
    assert!(store.mark_processed(id));
    let entry = store.get_entry(id).unwrap();
    assert!(entry.processed);
    assert_eq!(entry.retry_count, 1);
}

#[test]
fn get_unprocessed_entries_filters_by_queue_and_limit() {
    let store = DlqStore::new();
    store.add_failed_task("worker_tasks", "job-1", "send_email", serde_json::json!({}), "e1");
    store.add_failed_task("agent_invocations", "job-2", "invoke", serde_json::json!({}), "e2");
    let id3 = store.add_failed_task("worker_tasks", "job-3", "send_email", serde_json::json!({}), "e3");
    store.mark_processed(id3);

    let unprocessed = store.get_unprocessed_entries(Some("worker_tasks"), 10);
    assert_eq!(unprocessed.len(), 1);
    assert_eq!(unprocessed[0].original_job_id, "job-1");
}

#[test]
fn get_unprocessed_entries_respects_limit() {
    let store = DlqStore::new();
    for i in 0..5 {
        store.add_failed_task("worker_tasks", format!("job-{i}"), "send_email", serde_json::json!({}), "e");
    }
    assert_eq!(store.get_unprocessed_entries(None, 2).len(), 2);
}

#[test]
fn auto_mark_stale_processes_entries_with_three_or_more_retries() {
    let store = DlqStore::new();
    let id = store.add_failed_task("worker_tasks", "job-1", "send_email", serde_json::json!({}), "e");
    store.mark_processed(id); // retry_count -> 1
    store.entries.lock().get_mut(&id).unwrap().processed = false;
    store.entries.lock().get_mut(&id).unwrap().retry_count = 3;

    store.auto_mark_stale();
    assert!(store.get_entry(id).unwrap().processed);
}

#[test]
fn stats_buckets_by_queue_and_processed_flag() {
    let store = DlqStore::new();
    let id = store.add_failed_task("worker_tasks", "job-1", "send_email", serde_json::json!({}), "e");
    store.add_failed_task("worker_tasks", "job-2", "send_email", serde_json::json!({}), "e");
    store.mark_processed(id);

    let stats = store.stats();
    assert_eq!(stats.unprocessed_by_queue.get("worker_tasks"), Some(&1));
    assert_eq!(stats.processed_by_queue.get("worker_tasks"), Some(&1));
}

#[test]
fn delete_entry_removes_it() {
    let store = DlqStore::new();
    let id = store.add_failed_task("worker_tasks", "job-1", "send_email", serde_json::json!({}), "e");
    assert!(store.delete_entry(id));
    assert!(store.get_entry(id).is_none());
}
