// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable job queue (§4.3): a worker pool dequeues `TaskDescriptor`s
//! and invokes the registered handler, retrying with exponential backoff
//! and routing exhausted tasks to the DLQ.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::dlq::DlqStore;
use crate::handler::HandlerRegistry;
use crate::task::TaskDescriptor;

/// A pool of workers dequeuing and invoking tasks for one named queue.
#[derive(Clone)]
pub struct JobQueue {
    queue_name: String,
    sender: mpsc::UnboundedSender<TaskDescriptor>,
}

/// Handle to stop a job queue's worker pool.
pub struct JobQueueHandle {
    cancel: CancellationToken,
    joins: Vec<tokio::task::JoinHandle<()>>,
}

impl JobQueueHandle {
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for join in self.joins {
            let _ = join.await;
        }
    }
}

impl JobQueue {
    /// Spawn `pool_size` workers for `queue_name`, each pulling from a
    /// shared channel and dispatching to `registry` by task name.
    pub fn spawn(
        queue_name: impl Into<String>,
        pool_size: usize,
        registry: Arc<HandlerRegistry>,
        dlq: DlqStore,
    ) -> (Self, JobQueueHandle) {
        let queue_name = queue_name.into();
        let (tx, rx) = mpsc::unbounded_channel::<TaskDescriptor>();
        let rx = Arc::new(AsyncMutex::new(rx));
        let cancel = CancellationToken::new();

        let mut joins = Vec::with_capacity(pool_size);
        for worker_id in 0..pool_size.max(1) {
            let rx = Arc::clone(&rx);
            let registry = Arc::clone(&registry);
            let dlq = dlq.clone();
            let resend = tx.clone();
            let cancel = cancel.clone();
            let queue_name = queue_name.clone();

            joins.push(tokio::spawn(async move {
                loop {
                    let next = tokio::select! {
                        _ = cancel.cancelled() => None,
                        received = async { rx.lock().await.recv().await } => received,
                    };
                    let Some(task) = next else {
                        break;
                    };
                    run_task(&queue_name, task, &registry, &dlq, &resend).await;
                }
                info!(queue = %queue_name, worker_id, "worker stopped");
            }));
        }

        (Self { queue_name, sender: tx }, JobQueueHandle { cancel, joins })
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Enqueue a task for processing. Returns `Err` only if every worker
    /// in the pool has already stopped.
    pub fn enqueue(&self, task: TaskDescriptor) -> Result<(), TaskDescriptor> {
        self.sender.send(task).map_err(|e| e.0)
    }
}

async fn run_task(
    queue_name: &str,
    mut task: TaskDescriptor,
    registry: &HandlerRegistry,
    dlq: &DlqStore,
    resend: &mpsc::UnboundedSender<TaskDescriptor>,
) {
    let Some(handler) = registry.get(&task.task_name) else {
        warn!(queue = queue_name, task = %task.task_name, "no handler registered, routing to dlq");
        dlq.add_failed_task(
            queue_name,
            task.id.to_string(),
            task.task_name.clone(),
            task.args.clone(),
            "no handler registered for task name",
        );
        return;
    };

    match handler.handle(&task.args).await {
        Ok(()) => {}
        Err(e) => {
            task.retry_count += 1;
            if task.retry_count < task.max_retries {
                let delay = task.backoff();
                let resend = resend.clone();
                warn!(
                    queue = queue_name,
                    task = %task.task_name,
                    attempt = task.retry_count,
                    error = %e,
                    "task failed, retrying after backoff"
                );
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = resend.send(task);
                });
            } else {
                error!(
                    queue = queue_name,
                    task = %task.task_name,
                    attempts = task.retry_count,
                    error = %e,
                    "task exhausted retries, routing to dlq"
                );
                dlq.add_failed_task(
                    queue_name,
                    task.id.to_string(),
                    task.task_name.clone(),
                    task.args.clone(),
                    e.to_string(),
                );
            }
        }
    }
}

/// Re-enqueue up to `limit` unprocessed DLQ entries for `queue_name` with a
/// reduced retry cap (to avoid loops), marking each processed on success
/// (§4.3 "re-processing is a supervised action").
pub fn reprocess(queue: &JobQueue, dlq: &DlqStore, limit: usize, reduced_max_retries: u32) {
    dlq.auto_mark_stale();
    let entries = dlq.get_unprocessed_entries(Some(queue.queue_name()), limit);
    for entry in entries {
        let task = TaskDescriptor::new(entry.queue_name.clone(), entry.task_name.clone(), entry.payload.clone())
            .with_max_retries(reduced_max_retries);
        if queue.enqueue(task).is_ok() {
            dlq.mark_processed(entry.id);
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
