// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use orc_core::ExecutionId;

fn new_task(store: &TaskStore) -> WorkerTask {
    store.create_task(ExecutionId::new(), "worker-1", SubjectId::new(), "intro_task", serde_json::json!({"k": "v"}))
}

#[test]
fn create_task_starts_pending() {
    let store = TaskStore::new();
    let task = new_task(&store);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(store.get_task(task.id).unwrap().status, TaskStatus::Pending);
}

#[test]
fn assign_task_sets_worker_and_status() {
    let store = TaskStore::new();
    let task = new_task(&store);
    let assigned = store.assign_task(task.id, "worker-9").unwrap();
    assert_eq!(assigned.status, TaskStatus::Assigned);
    assert_eq!(assigned.assigned_worker_id, "worker-9");
}

#[test]
fn assign_task_missing_id_errors() {
    let store = TaskStore::new();
    let err = store.assign_task(TaskId::new(), "worker-1").unwrap_err();
    assert!(matches!(err, StorageError::TaskNotFound(_)));
}

#[test]
fn pending_tasks_filters_by_worker_and_respects_limit() {
    let store = TaskStore::new();
    store.create_task(ExecutionId::new(), "worker-a", SubjectId::new(), "intro_task", serde_json::json!({}));
    store.create_task(ExecutionId::new(), "worker-b", SubjectId::new(), "intro_task", serde_json::json!({}));
    store.create_task(ExecutionId::new(), "worker-a", SubjectId::new(), "intro_task", serde_json::json!({}));

    let for_a = store.pending_tasks(Some("worker-a"), 100);
    assert_eq!(for_a.len(), 2);
    assert!(for_a.iter().all(|t| t.assigned_worker_id == "worker-a"));

    let capped = store.pending_tasks(None, 2);
    assert_eq!(capped.len(), 2);
}

#[test]
fn mark_in_progress_then_completed_round_trip() {
    let store = TaskStore::new();
    let task = new_task(&store);
    store.mark_in_progress(task.id).unwrap();
    let completed = store.mark_completed(task.id, serde_json::json!({"ok": true})).unwrap();
    assert_eq!(completed.status, TaskStatus::Completed);
    assert_eq!(completed.result, Some(serde_json::json!({"ok": true})));
}

#[test]
fn mark_failed_retries_while_budget_remains() {
    let store = TaskStore::new();
    let task = new_task(&store);
    for expected_retry_count in 1..=3 {
        let retried = store.mark_failed(task.id, "transient", true).unwrap();
        assert_eq!(retried.status, TaskStatus::Pending);
        assert_eq!(retried.retry_count, expected_retry_count);
    }
    // max_retries is 3: the fourth failure exhausts the budget and fails terminally.
    let failed = store.mark_failed(task.id, "transient", true).unwrap();
    assert_eq!(failed.status, TaskStatus::Failed);
}

#[test]
fn mark_failed_without_retry_fails_immediately() {
    let store = TaskStore::new();
    let task = new_task(&store);
    let failed = store.mark_failed(task.id, "fatal", false).unwrap();
    assert_eq!(failed.status, TaskStatus::Failed);
    assert_eq!(failed.error, Some("fatal".to_string()));
}

#[test]
fn tasks_for_execution_filters_by_status() {
    let store = TaskStore::new();
    let execution_id = ExecutionId::new();
    let a = store.create_task(execution_id, "worker-1", SubjectId::new(), "intro_task", serde_json::json!({}));
    store.create_task(execution_id, "worker-1", SubjectId::new(), "intro_task", serde_json::json!({}));
    store.mark_in_progress(a.id).unwrap();

    let in_progress = store.tasks_for_execution(execution_id, Some(TaskStatus::InProgress));
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].id, a.id);

    let all = store.tasks_for_execution(execution_id, None);
    assert_eq!(all.len(), 2);
}

#[test]
fn tasks_for_subject_orders_newest_first_and_caps() {
    let store = TaskStore::new();
    let subject_id = SubjectId::new();
    for _ in 0..3 {
        store.create_task(ExecutionId::new(), "worker-1", subject_id, "intro_task", serde_json::json!({}));
    }
    let recent = store.tasks_for_subject(subject_id, None, 2);
    assert_eq!(recent.len(), 2);
}

#[test]
fn task_stats_counts_by_status() {
    let store = TaskStore::new();
    let execution_id = ExecutionId::new();
    let a = store.create_task(execution_id, "worker-1", SubjectId::new(), "intro_task", serde_json::json!({}));
    let b = store.create_task(execution_id, "worker-1", SubjectId::new(), "intro_task", serde_json::json!({}));
    store.mark_in_progress(a.id).unwrap();
    store.mark_completed(a.id, serde_json::json!({})).unwrap();
    store.mark_failed(b.id, "err", false).unwrap();

    let stats = store.task_stats(Some(execution_id));
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.pending, 0);
}
