// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::broker::InMemoryBroker;
use orc_core::EventType;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct CountingHandler {
    count: Arc<AtomicUsize>,
    fail_on: Option<String>,
}

#[async_trait]
impl GroupHandler for CountingHandler {
    async fn handle(&self, delivered: &Delivered) -> Result<(), OrchestratorError> {
        if self.fail_on.as_deref() == Some(delivered.envelope.partition_key.as_str()) {
            return Err(OrchestratorError::TransientToolError {
                tool: "test".into(),
                reason: "forced failure".into(),
            });
        }
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct RecordingDlq {
    errors: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl DeadLetterSink for RecordingDlq {
    async fn dead_letter(&self, _group_id: &str, _delivered: &Delivered, error: &str) {
        self.errors.lock().push(error.to_string());
    }
}

fn fast_config(name: &str) -> ConsumerGroupConfig {
    let mut config = ConsumerGroupConfig::new(name, vec![Topic::SupervisorTasks]);
    config.poll_timeout = Duration::from_millis(10);
    config
}

#[tokio::test]
async fn processes_published_messages() {
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let count = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(CountingHandler { count: Arc::clone(&count), fail_on: None });
    let dlq = Arc::new(NoopDeadLetterSink);

    let env = crate::envelope::Envelope::new(
        EventType::WorkerTaskAssigned,
        orc_core::Priority::High,
        "test",
        "sbj-1",
        serde_json::json!({}),
    );
    broker.publish(Topic::SupervisorTasks, env).await.unwrap();

    let handle = spawn(Arc::clone(&broker), fast_config("g1"), handler, dlq);
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.shutdown().await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_handler_routes_to_dlq_and_commits_anyway() {
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let count = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(CountingHandler {
        count: Arc::clone(&count),
        fail_on: Some("sbj-bad".to_string()),
    });
    let errors = Arc::new(Mutex::new(Vec::new()));
    let dlq = Arc::new(RecordingDlq { errors: Arc::clone(&errors) });

    let bad = crate::envelope::Envelope::new(
        EventType::WorkerTaskAssigned,
        orc_core::Priority::High,
        "test",
        "sbj-bad",
        serde_json::json!({}),
    );
    broker.publish(Topic::SupervisorTasks, bad).await.unwrap();

    let handle = spawn(Arc::clone(&broker), fast_config("g2"), handler, dlq);
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.shutdown().await;

    assert_eq!(errors.lock().len(), 1);
    // Commit still advances past the failing message — it does not block the group.
    let remaining = broker.poll(&[Topic::SupervisorTasks], "g2", 10).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn shutdown_stops_further_polling() {
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let count = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(CountingHandler { count: Arc::clone(&count), fail_on: None });
    let dlq = Arc::new(NoopDeadLetterSink);

    let handle = spawn(Arc::clone(&broker), fast_config("g3"), handler, dlq);
    handle.shutdown().await;

    let env = crate::envelope::Envelope::new(
        EventType::WorkerTaskAssigned,
        orc_core::Priority::High,
        "test",
        "sbj-1",
        serde_json::json!({}),
    );
    broker.publish(Topic::SupervisorTasks, env).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
