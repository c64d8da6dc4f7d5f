// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Communication channels, shared between subject consent, policy, and tools.

use serde::{Deserialize, Serialize};

/// A channel a tool can send through, and a consent/rate-limit bucket can
/// be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Whatsapp,
    Sms,
    Call,
    /// Payment links are exempt from consent checks (§4.4).
    PaymentLink,
}

crate::simple_display! {
    Channel {
        Email => "email",
        Whatsapp => "whatsapp",
        Sms => "sms",
        Call => "call",
        PaymentLink => "payment_link",
    }
}
