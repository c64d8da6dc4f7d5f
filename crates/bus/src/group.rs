// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer Group Runtime (§4.2): long-lived pullers per group, batch
//! dispatch, offset commit discipline, graceful shutdown.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use orc_core::{OrchestratorError, Priority};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::broker::Broker;
use crate::envelope::{Delivered, Topic};

/// What a consumer group does with a delivered message. Implementations
/// live in `orc-ingress`/`orc-orchestrator` (materializer+router, supervisor
/// reaction, worker dispatch); this trait is the seam between them and the
/// group runtime.
#[async_trait]
pub trait GroupHandler: Send + Sync {
    async fn handle(&self, delivered: &Delivered) -> Result<(), OrchestratorError>;
}

/// Where a message goes when its handler raises (§4.2: "the failing
/// message is sent to DLQ and the remainder of the batch proceeds").
/// `orc-queue`'s `DlqStore` implements this; kept as a trait so `orc-bus`
/// does not depend on `orc-queue`.
#[async_trait]
pub trait DeadLetterSink: Send + Sync {
    async fn dead_letter(&self, group_id: &str, delivered: &Delivered, error: &str);
}

/// A sink that drops failures on the floor. Only for tests where DLQ
/// routing is not under test.
pub struct NoopDeadLetterSink;

#[async_trait]
impl DeadLetterSink for NoopDeadLetterSink {
    async fn dead_letter(&self, group_id: &str, delivered: &Delivered, error: &str) {
        warn!(group_id, topic = ?delivered.topic, partition = delivered.partition, error, "dropped (noop dlq)");
    }
}

/// Configuration for one consumer group (§4.2).
#[derive(Debug, Clone)]
pub struct ConsumerGroupConfig {
    pub name: String,
    pub topics: Vec<Topic>,
    /// Number of partitions processed concurrently.
    pub concurrency: usize,
    pub max_batch: usize,
    pub poll_timeout: Duration,
    pub session_timeout: Duration,
    pub heartbeat_interval: Duration,
    /// When set, only envelopes at or above this priority are handled;
    /// others are left unpolled (used by the critical+high group, §4.2).
    pub priority_floor: Option<Priority>,
}

impl ConsumerGroupConfig {
    pub fn new(name: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self {
            name: name.into(),
            topics,
            concurrency: 4,
            max_batch: 50,
            poll_timeout: Duration::from_secs(1),
            session_timeout: Duration::from_secs(30),
            heartbeat_interval: Duration::from_secs(10),
            priority_floor: None,
        }
    }
}

/// A handle to a running consumer group. Dropping it does not stop the
/// group; call [`ConsumerGroupHandle::shutdown`] explicitly.
pub struct ConsumerGroupHandle {
    cancel: CancellationToken,
    join: tokio::task::JoinHandle<()>,
    deadline: Duration,
}

impl ConsumerGroupHandle {
    /// Signal shutdown: no new polls after this returns, in-flight
    /// handlers drain up to the group's session timeout, then the loop
    /// forces exit (§4.2, §5).
    pub async fn shutdown(self) {
        self.cancel.cancel();
        match tokio::time::timeout(self.deadline, self.join).await {
            Ok(Ok(())) => info!("consumer group drained cleanly"),
            Ok(Err(e)) => error!(error = %e, "consumer group task panicked"),
            Err(_) => warn!("consumer group drain deadline elapsed, forcing exit"),
        }
    }
}

/// Spawn a consumer group's fetch loop: poll with a bounded timeout,
/// deliver up to `max_batch`, process partitions in parallel (serially
/// within a partition), commit at batch end, repeat until shutdown.
pub fn spawn(
    broker: Arc<dyn Broker>,
    config: ConsumerGroupConfig,
    handler: Arc<dyn GroupHandler>,
    dlq: Arc<dyn DeadLetterSink>,
) -> ConsumerGroupHandle {
    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let deadline = config.session_timeout;

    let join = tokio::spawn(async move {
        info!(group = %config.name, topics = ?config.topics, "consumer group started");
        loop {
            tokio::select! {
                _ = loop_cancel.cancelled() => {
                    info!(group = %config.name, "shutdown signal received, stopping poll loop");
                    break;
                }
                _ = tokio::time::sleep(config.poll_timeout) => {}
            }

            let delivered = match broker.poll(&config.topics, &config.name, config.max_batch).await {
                Ok(d) => d,
                Err(e) => {
                    error!(group = %config.name, error = %e, "poll failed");
                    continue;
                }
            };
            if delivered.is_empty() {
                continue;
            }

            let delivered = match &config.priority_floor {
                Some(floor) => delivered.into_iter().filter(|d| d.envelope.priority >= *floor).collect(),
                None => delivered,
            };

            process_batch(&config, Arc::clone(&handler), Arc::clone(&dlq), delivered.clone()).await;

            if let Err(e) = broker.commit(&config.name, &delivered).await {
                error!(group = %config.name, error = %e, "commit failed");
            }
        }
    });

    ConsumerGroupHandle { cancel, join, deadline }
}

async fn process_batch(
    config: &ConsumerGroupConfig,
    handler: Arc<dyn GroupHandler>,
    dlq: Arc<dyn DeadLetterSink>,
    delivered: Vec<Delivered>,
) {
    let mut by_partition: HashMap<u32, Vec<Delivered>> = HashMap::new();
    for d in delivered {
        by_partition.entry(d.partition).or_default().push(d);
    }

    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut tasks = JoinSet::new();
    for (_partition, messages) in by_partition {
        let handler = Arc::clone(&handler);
        let dlq = Arc::clone(&dlq);
        let semaphore = Arc::clone(&semaphore);
        let group_name = config.name.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            // Serial within a partition preserves per-subject FIFO (§4.2, §5).
            for message in messages {
                if let Err(e) = handler.handle(&message).await {
                    debug!(group = %group_name, error = %e, "handler failed, routing to dlq");
                    dlq.dead_letter(&group_name, &message, &e.to_string()).await;
                }
            }
        });
    }
    while tasks.join_next().await.is_some() {}
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
