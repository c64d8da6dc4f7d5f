// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn each_id_type_carries_its_own_prefix() {
    assert!(TenantId::new().as_str().starts_with("tnt-"));
    assert!(SubjectId::new().as_str().starts_with("sbj-"));
    assert!(EventId::new().as_str().starts_with("evt-"));
    assert!(WorkflowId::new().as_str().starts_with("wfl-"));
    assert!(ExecutionId::new().as_str().starts_with("exe-"));
    assert!(TaskId::new().as_str().starts_with("tsk-"));
    assert!(ThreadId::new().as_str().starts_with("thr-"));
    assert!(MessageId::new().as_str().starts_with("msg-"));
    assert!(DlqEntryId::new().as_str().starts_with("dlq-"));
}

#[test]
fn ids_of_the_same_type_are_distinct() {
    assert_ne!(TenantId::new(), TenantId::new());
}

#[test]
fn id_round_trips_through_serde() {
    let id = SubjectId::new();
    let json = serde_json::to_string(&id).unwrap();
    let back: SubjectId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}
