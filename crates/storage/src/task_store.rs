// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker task store, ported from `tasks/service.py::TaskService`.

use std::collections::HashMap;

use orc_core::{ExecutionId, SubjectId, TaskId};
use parking_lot::Mutex;
use tracing::warn;

use crate::error::{Result, StorageError};
use crate::execution::{TaskStatus, WorkerTask};

/// Count of tasks per [`TaskStatus`] (`tasks/service.py::get_task_stats`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub pending: usize,
    pub assigned: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

/// Worker task queue and history, keyed by [`TaskId`].
#[derive(Default)]
pub struct TaskStore {
    tasks: Mutex<HashMap<TaskId, WorkerTask>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task in `pending` state (`create_task`).
    pub fn create_task(
        &self,
        execution_id: ExecutionId,
        assigned_worker_id: impl Into<String>,
        subject_id: SubjectId,
        task_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> WorkerTask {
        let task = WorkerTask::new(execution_id, assigned_worker_id, subject_id, task_type, payload);
        self.tasks.lock().insert(task.id, task.clone());
        task
    }

    pub fn get_task(&self, id: TaskId) -> Option<WorkerTask> {
        self.tasks.lock().get(&id).cloned()
    }

    /// Assign `task_id` to `worker_id`, moving it to `assigned` (`assign_task`).
    pub fn assign_task(&self, task_id: TaskId, worker_id: impl Into<String>) -> Result<WorkerTask> {
        let mut tasks = self.tasks.lock();
        let task = tasks.get_mut(&task_id).ok_or(StorageError::TaskNotFound(task_id))?;
        task.assigned_worker_id = worker_id.into();
        task.status = TaskStatus::Assigned;
        Ok(task.clone())
    }

    /// Pending tasks, optionally filtered to one worker, oldest first,
    /// capped at `limit` (`get_pending_tasks`).
    pub fn pending_tasks(&self, worker_id: Option<&str>, limit: usize) -> Vec<WorkerTask> {
        let tasks = self.tasks.lock();
        let mut pending: Vec<_> = tasks
            .values()
            .filter(|task| task.status == TaskStatus::Pending)
            .filter(|task| worker_id.map_or(true, |w| task.assigned_worker_id == w))
            .cloned()
            .collect();
        pending.sort_by_key(|task| task.created_at);
        pending.truncate(limit);
        pending
    }

    /// Transition to `in_progress`, stamping `started_at` (`mark_in_progress`).
    pub fn mark_in_progress(&self, task_id: TaskId) -> Result<WorkerTask> {
        let mut tasks = self.tasks.lock();
        let task = tasks.get_mut(&task_id).ok_or(StorageError::TaskNotFound(task_id))?;
        task.start();
        Ok(task.clone())
    }

    pub fn mark_completed(&self, task_id: TaskId, result: serde_json::Value) -> Result<WorkerTask> {
        let mut tasks = self.tasks.lock();
        let task = tasks.get_mut(&task_id).ok_or(StorageError::TaskNotFound(task_id))?;
        task.complete(result);
        Ok(task.clone())
    }

    /// On failure, retry while budget remains (reset to `pending`, started-at
    /// cleared), else transition to the terminal `failed` state
    /// (`mark_failed`, `should_retry=True` branch vs. else branch).
    pub fn mark_failed(&self, task_id: TaskId, error: impl Into<String>, should_retry: bool) -> Result<WorkerTask> {
        let error = error.into();
        let mut tasks = self.tasks.lock();
        let task = tasks.get_mut(&task_id).ok_or(StorageError::TaskNotFound(task_id))?;
        if should_retry && task.retry_count < task.max_retries {
            task.retry();
        } else {
            if should_retry {
                warn!(task_id = %task_id, retry_count = task.retry_count, max_retries = task.max_retries, "task retries exhausted");
            }
            task.fail(error);
        }
        Ok(task.clone())
    }

    /// Tasks belonging to an execution, optionally filtered by status
    /// (`get_tasks_for_workflow`).
    pub fn tasks_for_execution(&self, execution_id: ExecutionId, status: Option<TaskStatus>) -> Vec<WorkerTask> {
        self.tasks
            .lock()
            .values()
            .filter(|task| task.execution_id == execution_id)
            .filter(|task| status.map_or(true, |s| task.status == s))
            .cloned()
            .collect()
    }

    /// Tasks belonging to a subject, optionally filtered by status, newest
    /// first, capped at `limit` (`get_tasks_for_consumer`).
    pub fn tasks_for_subject(&self, subject_id: SubjectId, status: Option<TaskStatus>, limit: usize) -> Vec<WorkerTask> {
        let tasks = self.tasks.lock();
        let mut matches: Vec<_> = tasks
            .values()
            .filter(|task| task.subject_id == subject_id)
            .filter(|task| status.map_or(true, |s| task.status == s))
            .cloned()
            .collect();
        matches.sort_by_key(|task| std::cmp::Reverse(task.created_at));
        matches.truncate(limit);
        matches
    }

    /// Status breakdown, optionally scoped to one execution (`get_task_stats`).
    pub fn task_stats(&self, execution_id: Option<ExecutionId>) -> TaskStats {
        let tasks = self.tasks.lock();
        let mut stats = TaskStats::default();
        for task in tasks.values().filter(|task| execution_id.map_or(true, |id| task.execution_id == id)) {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::Assigned => stats.assigned += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "task_store_tests.rs"]
mod tests;
