// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event fingerprinting (§4.12), ported from
//! `EventDeduplicator.generate_idempotency_key`: a SHA-256 digest over a
//! key-sorted JSON encoding of the fields that define "the same
//! occurrence" — tenant, subject, event type, and payload.

use std::collections::BTreeMap;

use orc_core::{EventType, SubjectId, TenantId};
use sha2::{Digest, Sha256};

/// Fingerprint an event's identity fields. `BTreeMap` gives us the
/// sorted-keys JSON encoding the original achieves with
/// `json.dumps(..., sort_keys=True)`; serde_json preserves insertion
/// order for maps otherwise, so the sort is load-bearing here.
pub fn fingerprint(tenant_id: TenantId, subject_id: SubjectId, event_type: EventType, payload: &serde_json::Value) -> String {
    let mut fields = BTreeMap::new();
    fields.insert("tenant_id", serde_json::Value::String(tenant_id.to_string()));
    fields.insert("subject_id", serde_json::Value::String(subject_id.to_string()));
    fields.insert("event_type", serde_json::Value::String(event_type.to_string()));
    fields.insert("payload", payload.clone());

    // BTreeMap<&str, Value> serializes its keys in sorted order already;
    // no separate key-sort step is needed the way the original needs
    // `sort_keys=True`.
    let canonical = serde_json::to_string(&fields).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
