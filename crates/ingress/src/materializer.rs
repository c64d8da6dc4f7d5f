// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The §4.6 reducer: folds one ingested event into a [`SubjectContext`].
//! Ported from `ConsumerContextService.update_context_from_event`'s
//! per-event-type metrics mutation and `_update_stage_from_engagement`'s
//! stage heuristic, generalized onto `orc_core::context`'s typed
//! `SubjectContext`/`Stage` lattice.

use chrono::{DateTime, Utc};
use orc_core::{EventType, Stage, SubjectContext};

/// Apply `event_type` (with its payload, for the amount-bearing events)
/// to `context` in place, then reevaluate stage from the engagement
/// score — mirroring the original's "update counters, then re-derive
/// stage" two-step, except stickiness and lattice order are enforced by
/// [`Stage::advance`] rather than re-implemented here.
pub fn apply(context: &mut SubjectContext, event_type: EventType, payload: &serde_json::Value, occurred_at: DateTime<Utc>) {
    match event_type {
        EventType::PageView => {
            context.views += 1;
            context.last_seen = Some(occurred_at);
        }
        EventType::EmailSent => {
            context.sends.email_sent += 1;
            context.sends.last_email_sent_at = Some(occurred_at);
        }
        EventType::WhatsappSent => {
            context.sends.whatsapp_sent += 1;
            context.sends.last_whatsapp_sent_at = Some(occurred_at);
        }
        EventType::SmsSent => {
            context.sends.sms_sent += 1;
            context.sends.last_sms_sent_at = Some(occurred_at);
        }
        EventType::EmailOpened => {
            context.opens += 1;
        }
        EventType::WhatsappReceived => {
            context.whatsapp_received += 1;
        }
        EventType::BookingCreated => {
            context.stage = context.stage.advance(Stage::Engaged);
        }
        EventType::PaymentSuccess => {
            let amount = payload.get("amount").and_then(serde_json::Value::as_f64).unwrap_or(0.0);
            context.revenue += amount;
            context.stage = context.stage.advance(Stage::Converted);
        }
        EventType::EmailClicked => {
            context.clicks += 1;
        }
        EventType::EmailReplied => {
            context.replies += 1;
        }
        // Supervisor/worker lifecycle events (§4.1) never reach the
        // materializer; ingress only routes §4.6's engagement event set
        // here. Anything else is a no-op.
        _ => {}
    }

    // §4.6: "reevaluate stage" arms above already call `advance` for the
    // stage-setting events; engagement-counter events still need a
    // post-hoc reevaluation from the new score.
    if matches!(
        event_type,
        EventType::PageView | EventType::EmailOpened | EventType::WhatsappReceived
    ) {
        context.reevaluate_stage();
    }
}

#[cfg(test)]
#[path = "materializer_tests.rs"]
mod tests;
