// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event ingress (§4.11): the admin-API and webhook entry points. Both
//! surfaces converge on [`IngressService::ingest`], which resolves the
//! subject, persists the (deduped) event, runs the §4.6 materializer,
//! enqueues the agent-invocation job, and publishes to the bus.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use orc_bus::{Broker, Envelope, Topic};
use orc_core::{Channel, Event, EventType, Priority, SubjectId, TenantId};
use orc_queue::{JobQueue, TaskDescriptor};
use orc_storage::{ContextStore, SubjectStore};

use crate::error::{IngressError, Result};
use crate::event_store::{EventStore, Persisted};
use crate::materializer;
use crate::provider::{map_email_status, map_whatsapp_status};

/// Caller-supplied handles for resolving an inbound webhook to a subject
/// (§4.11 step 1). At least one field should be present; ingress creates
/// a bare subject from whichever handle it has when none resolve.
#[derive(Debug, Default, Clone)]
pub struct SubjectHandles<'a> {
    pub distinct_id: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Result of one ingest call.
pub struct IngressOutcome {
    pub event_id: orc_core::EventId,
    pub subject_id: SubjectId,
    pub was_duplicate: bool,
}

pub struct IngressService {
    subjects: Arc<SubjectStore>,
    events: Arc<EventStore>,
    contexts: Arc<ContextStore>,
    jobs: Arc<JobQueue>,
    broker: Arc<dyn Broker>,
}

impl IngressService {
    pub fn new(subjects: Arc<SubjectStore>, events: Arc<EventStore>, contexts: Arc<ContextStore>, jobs: Arc<JobQueue>, broker: Arc<dyn Broker>) -> Self {
        Self { subjects, events, contexts, jobs, broker }
    }

    /// Admin-API ingress (§4.11): the caller already knows the subject,
    /// used by tests/integration to inject an event directly.
    pub async fn ingest_admin_event(&self, tenant_id: TenantId, subject_id: SubjectId, event_type: EventType, source: impl Into<String>, payload: serde_json::Value, now: DateTime<Utc>) -> Result<IngressOutcome> {
        self.ingest(tenant_id, subject_id, event_type, source, payload, now).await
    }

    /// Webhook ingress (§4.11): a channel provider reports delivery,
    /// open, click, or booking status. Resolves the subject from
    /// whichever handle the provider payload carries, maps the
    /// provider's status vocabulary to a domain [`EventType`], then
    /// ingests like any other event.
    pub async fn ingest_webhook_event(&self, tenant_id: TenantId, channel: Channel, handles: SubjectHandles<'_>, status: &str, payload: serde_json::Value, now: DateTime<Utc>) -> Result<IngressOutcome> {
        if handles.distinct_id.is_none() && handles.email.is_none() && handles.phone.is_none() {
            return Err(IngressError::UnresolvableSubject);
        }

        let subject = self.subjects.resolve_or_create(tenant_id, handles.distinct_id, handles.email, handles.phone);
        let event_type = match channel {
            Channel::Email => map_email_status(status),
            Channel::Whatsapp => map_whatsapp_status(status),
            // §4.11 only documents provider webhooks for email and
            // WhatsApp; other channels pass their status straight
            // through as a send acknowledgement.
            _ => EventType::SmsSent,
        };

        self.ingest(tenant_id, subject.id, event_type, "webhook", payload, now).await
    }

    async fn ingest(&self, tenant_id: TenantId, subject_id: SubjectId, event_type: EventType, source: impl Into<String>, payload: serde_json::Value, now: DateTime<Utc>) -> Result<IngressOutcome> {
        let event = Event::new(tenant_id, subject_id, event_type, source, now, payload);
        let persisted = self.events.persist(event);
        let was_duplicate = !persisted.is_new();
        let event = persisted.event();

        if was_duplicate {
            tracing::debug!(event_id = %event.id, fingerprint = ?event.fingerprint, "duplicate event short-circuited");
            return Ok(IngressOutcome { event_id: event.id, subject_id, was_duplicate });
        }

        let mut context = self.contexts.get_or_create(tenant_id, subject_id);
        materializer::apply(&mut context, event_type, &event.payload, event.timestamp);
        self.contexts.save(tenant_id, context);

        let task = TaskDescriptor::new(
            "agent_invocations",
            "invoke_agent",
            serde_json::json!({
                "tenant_id": tenant_id,
                "subject_id": subject_id,
                "event_id": event.id,
                "event_type": event_type,
            }),
        );
        self.jobs.enqueue(task).map_err(|_| IngressError::EnqueueFailed)?;

        let envelope = Envelope::new(event_type, Priority::Normal, "orc-ingress", subject_id.to_string(), serde_json::json!({"event_id": event.id, "tenant_id": tenant_id}));
        self.broker.publish(Topic::Events, envelope).await?;

        Ok(IngressOutcome { event_id: event.id, subject_id, was_duplicate: false })
    }
}

#[cfg(test)]
#[path = "ingress_tests.rs"]
mod tests;
