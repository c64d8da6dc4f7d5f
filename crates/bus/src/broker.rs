// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Broker` trait and its in-memory reference implementation (§4.1).
//!
//! `Broker` is the seam `orc-daemon` would swap for a durable broker
//! client (Kafka/NATS/etc); `InMemoryBroker` is what tests and
//! single-node deployments use, mirroring the backend-swap pattern the
//! teacher uses for its agent adapters.

use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::envelope::{Delivered, Envelope, Topic};

/// Number of partitions per topic. Fixed for the in-memory broker; a real
/// broker client would read this from the topic's configuration.
pub const NUM_PARTITIONS: u32 = 8;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("failed to flush publish to {topic:?}: {reason}")]
    PublishFailed { topic: Topic, reason: String },
}

/// Partition assignment for a partition key (§4.1: "partition key is the
/// subject id... tenant id without one").
pub fn partition_for(partition_key: &str) -> u32 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    partition_key.hash(&mut hasher);
    (hasher.finish() % NUM_PARTITIONS as u64) as u32
}

/// A typed publish/consume substrate over partitioned, at-least-once
/// topics with a consumer-group offset protocol.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Publish `envelope` to `topic`, partitioned by `envelope.partition_key`.
    /// Returns the offset it was written at.
    async fn publish(&self, topic: Topic, envelope: Envelope) -> Result<u64, BusError>;

    /// Poll for up to `max_batch` undelivered messages across `topics` for
    /// `group_id`. Does not advance committed offsets; call [`Broker::commit`]
    /// after processing.
    async fn poll(
        &self,
        topics: &[Topic],
        group_id: &str,
        max_batch: usize,
    ) -> Result<Vec<Delivered>, BusError>;

    /// Commit offsets for the given delivered batch (or a prefix of it, if
    /// the consumer group only wants to acknowledge what succeeded).
    async fn commit(&self, group_id: &str, delivered: &[Delivered]) -> Result<(), BusError>;
}

type Partition = VecDeque<Envelope>;

#[derive(Default)]
struct TopicLog {
    partitions: Vec<Partition>,
}

impl TopicLog {
    fn new() -> Self {
        Self {
            partitions: (0..NUM_PARTITIONS).map(|_| VecDeque::new()).collect(),
        }
    }
}

/// In-memory reference `Broker`. Single-process, not durable across
/// restarts — suitable for tests and single-node deployments (§4.1
/// "durable broker" is a property of the real backend this seam would
/// plug in; the in-memory implementation fulfils the same interface for
/// everything upstream of the transport).
#[derive(Clone)]
pub struct InMemoryBroker {
    logs: Arc<Mutex<HashMap<Topic, TopicLog>>>,
    // (group_id, topic, partition) -> next offset to deliver
    offsets: Arc<Mutex<HashMap<(String, Topic, u32), u64>>>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(HashMap::new())),
            offsets: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broker for InMemoryBroker {
    async fn publish(&self, topic: Topic, envelope: Envelope) -> Result<u64, BusError> {
        let partition = partition_for(&envelope.partition_key);
        let mut logs = self.logs.lock();
        let log = logs.entry(topic).or_insert_with(TopicLog::new);
        let part = &mut log.partitions[partition as usize];
        let offset = part.len() as u64;
        debug!(
            topic = %topic,
            partition_key = %envelope.partition_key,
            event_type = %envelope.event_type,
            partition,
            offset,
            "publish"
        );
        part.push_back(envelope);
        Ok(offset)
    }

    async fn poll(
        &self,
        topics: &[Topic],
        group_id: &str,
        max_batch: usize,
    ) -> Result<Vec<Delivered>, BusError> {
        let logs = self.logs.lock();
        let mut offsets = self.offsets.lock();
        let mut out = Vec::new();

        'topics: for &topic in topics {
            let Some(log) = logs.get(&topic) else { continue };
            for (partition, part) in log.partitions.iter().enumerate() {
                let partition = partition as u32;
                let key = (group_id.to_string(), topic, partition);
                let next = *offsets.get(&key).unwrap_or(&0);
                let mut idx = next;
                while (idx as usize) < part.len() {
                    out.push(Delivered {
                        topic,
                        partition,
                        offset: idx,
                        envelope: part[idx as usize].clone(),
                    });
                    idx += 1;
                    if out.len() >= max_batch {
                        break 'topics;
                    }
                }
            }
        }
        debug!(group_id, delivered = out.len(), "poll");
        Ok(out)
    }

    async fn commit(&self, group_id: &str, delivered: &[Delivered]) -> Result<(), BusError> {
        let mut offsets = self.offsets.lock();
        for d in delivered {
            let key = (group_id.to_string(), d.topic, d.partition);
            let next = d.offset + 1;
            let entry = offsets.entry(key).or_insert(0);
            if next > *entry {
                *entry = next;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "broker_tests.rs"]
mod tests;
