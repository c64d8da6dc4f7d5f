// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event — immutable observation (§3), and the bus envelope priority tag
//! shared by every topic in `orc-bus`.

use crate::ids::{EventId, SubjectId, TenantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bus envelope priority (§4.1, §6). Ordered loosest-first so
/// `Priority::Critical < Priority::Batch` is false and sort-by-priority
/// reads naturally as "critical first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Batch,
    Low,
    Normal,
    High,
    Critical,
}

crate::simple_display! {
    Priority {
        Critical => "critical",
        High => "high",
        Normal => "normal",
        Low => "low",
        Batch => "batch",
    }
}

/// Domain event types, spanning ingress-observed events (§4.6) and
/// supervisor/worker lifecycle events (§4.1's fixed topic set, §6's
/// envelope kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    EmailSent,
    WhatsappSent,
    SmsSent,
    EmailOpened,
    WhatsappReceived,
    BookingCreated,
    PaymentSuccess,
    EmailClicked,
    EmailReplied,
    TenantOnboarded,
    WorkerTaskAssigned,
    WorkerTaskCompleted,
    WorkflowMetricUpdate,
    WorkflowStateChange,
    AnalyticsEvent,
    AuditEvent,
    CriticalAlert,
    ScheduledTask,
}

crate::simple_display! {
    EventType {
        PageView => "page_view",
        EmailSent => "email_sent",
        WhatsappSent => "whatsapp_sent",
        SmsSent => "sms_sent",
        EmailOpened => "email_opened",
        WhatsappReceived => "whatsapp_received",
        BookingCreated => "booking_created",
        PaymentSuccess => "payment_success",
        EmailClicked => "email_clicked",
        EmailReplied => "email_replied",
        TenantOnboarded => "tenant-onboarded",
        WorkerTaskAssigned => "worker-task-assigned",
        WorkerTaskCompleted => "worker-task-completed",
        WorkflowMetricUpdate => "workflow-metric-update",
        WorkflowStateChange => "workflow-state-change",
        AnalyticsEvent => "analytics-event",
        AuditEvent => "audit-event",
        CriticalAlert => "critical-alert",
        ScheduledTask => "scheduled-task",
    }
}

/// An immutable ingested observation (§3).
///
/// `fingerprint` is populated by `orc-ingress::dedup` before persistence;
/// two events with equal fingerprint denote the same occurrence and must
/// not both produce side effects (§4.12).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub tenant_id: TenantId,
    pub subject_id: SubjectId,
    pub event_type: EventType,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub payload: serde_json::Value,
    pub fingerprint: Option<String>,
}

impl Event {
    pub fn new(
        tenant_id: TenantId,
        subject_id: SubjectId,
        event_type: EventType,
        source: impl Into<String>,
        timestamp: DateTime<Utc>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            tenant_id,
            subject_id,
            event_type,
            source: source.into(),
            timestamp,
            payload,
            fingerprint: None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
