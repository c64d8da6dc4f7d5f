// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn same_identity_fields_produce_the_same_fingerprint() {
    let tenant_id = TenantId::new();
    let subject_id = SubjectId::new();
    let payload = serde_json::json!({"b": 1, "a": 2});

    let first = fingerprint(tenant_id, subject_id, EventType::PageView, &payload);
    let second = fingerprint(tenant_id, subject_id, EventType::PageView, &payload);
    assert_eq!(first, second);
}

#[test]
fn payload_key_order_does_not_affect_the_fingerprint() {
    let tenant_id = TenantId::new();
    let subject_id = SubjectId::new();

    let a = fingerprint(tenant_id, subject_id, EventType::PageView, &serde_json::json!({"a": 1, "b": 2}));
    let b = fingerprint(tenant_id, subject_id, EventType::PageView, &serde_json::json!({"b": 2, "a": 1}));
    assert_eq!(a, b);
}

#[test]
fn different_event_type_changes_the_fingerprint() {
    let tenant_id = TenantId::new();
    let subject_id = SubjectId::new();
    let payload = serde_json::json!({});

    let page_view = fingerprint(tenant_id, subject_id, EventType::PageView, &payload);
    let email_sent = fingerprint(tenant_id, subject_id, EventType::EmailSent, &payload);
    assert_ne!(page_view, email_sent);
}

#[test]
fn different_subject_changes_the_fingerprint() {
    let tenant_id = TenantId::new();
    let payload = serde_json::json!({});

    let a = fingerprint(tenant_id, SubjectId::new(), EventType::PageView, &payload);
    let b = fingerprint(tenant_id, SubjectId::new(), EventType::PageView, &payload);
    assert_ne!(a, b);
}

#[test]
fn fingerprint_is_a_64_char_hex_digest() {
    let fp = fingerprint(TenantId::new(), SubjectId::new(), EventType::PageView, &serde_json::json!({}));
    assert_eq!(fp.len(), 64);
    assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
}
