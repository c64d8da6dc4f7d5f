// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider status-code mapping (§4.11 step 2), ported from
//! `email_webhooks.py`'s `event_type_map`: channel providers report their
//! own status vocabulary, which ingress normalizes to the domain
//! [`EventType`] set before persisting.

use orc_core::EventType;

/// Map an email-channel provider status to a domain event type. Unknown
/// statuses fall back to `EmailSent`, the same default the original uses
/// for its unmapped-status case.
pub fn map_email_status(status: &str) -> EventType {
    match status.to_ascii_lowercase().as_str() {
        "delivered" | "unread" => EventType::EmailSent,
        "read" | "opened" => EventType::EmailOpened,
        "replied" => EventType::EmailReplied,
        "click_cta" | "clicked" | "booking_click" => EventType::EmailClicked,
        "booking_done" => EventType::BookingCreated,
        _ => EventType::EmailSent,
    }
}

/// Map a WhatsApp-channel provider status to a domain event type.
pub fn map_whatsapp_status(status: &str) -> EventType {
    match status.to_ascii_lowercase().as_str() {
        "sent" => EventType::WhatsappSent,
        "received" | "replied" => EventType::WhatsappReceived,
        _ => EventType::WhatsappSent,
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
