// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topics and the envelope wire shape (§4.1, §6).

use chrono::{DateTime, Utc};
use orc_core::{EventType, Priority};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of bus topics (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Ingress fan-out of domain events.
    Events,
    /// Task assignments from Supervisor to Workers.
    SupervisorTasks,
    /// Completion reports from Workers to Supervisor.
    TaskResults,
    /// State-change and metric-update events.
    WorkflowEvents,
    AnalyticsEvents,
    AuditEvents,
    CriticalAlerts,
    ScheduledTasks,
}

orc_core::simple_display! {
    Topic {
        Events => "events",
        SupervisorTasks => "supervisor_tasks",
        TaskResults => "task_results",
        WorkflowEvents => "workflow_events",
        AnalyticsEvents => "analytics_events",
        AuditEvents => "audit_events",
        CriticalAlerts => "critical_alerts",
        ScheduledTasks => "scheduled_tasks",
    }
}

/// A typed, priority-tagged message on the bus (§4.1, §6).
///
/// `partition_key` is the subject id when one exists, else the tenant id
/// (preserves per-subject FIFO, §5). Common wire fields are top-level;
/// envelope-kind-specific fields live in `payload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub occurred_at: DateTime<Utc>,
    pub priority: Priority,
    pub source: String,
    pub partition_key: String,
    pub metadata: serde_json::Value,
    pub payload: serde_json::Value,
}

impl Envelope {
    pub fn new(
        event_type: EventType,
        priority: Priority,
        source: impl Into<String>,
        partition_key: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type,
            occurred_at: Utc::now(),
            priority,
            source: source.into(),
            partition_key: partition_key.into(),
            metadata: serde_json::json!({}),
            payload,
        }
    }
}

/// A delivered envelope, carrying the topic/partition/offset metadata a
/// consumer group needs to commit (§4.2).
#[derive(Debug, Clone)]
pub struct Delivered {
    pub topic: Topic,
    pub partition: u32,
    pub offset: u64,
    pub envelope: Envelope,
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
