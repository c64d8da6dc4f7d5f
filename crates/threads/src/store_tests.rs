// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use orc_core::TenantId;

fn open_thread(store: &ThreadStore) -> ConversationThread {
    store.open(TenantId::new(), SubjectId::new(), None, None, ThreadStatus::WaitingHuman, "complex_question", serde_json::json!({}))
}

#[test]
fn open_then_get_round_trips() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    assert_eq!(store.get(thread.id).unwrap().id, thread.id);
}

#[test]
fn subject_reply_moves_waiting_human_thread_to_waiting_human_status() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    store.append_message(thread.id, SenderType::Subject, "subj-1", "I have another question", serde_json::json!({})).unwrap();
    assert_eq!(store.get(thread.id).unwrap().status, ThreadStatus::WaitingHuman);
}

#[test]
fn human_reply_moves_thread_to_waiting_subject() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    store.append_message(thread.id, SenderType::Human, "human-1", "here's the answer", serde_json::json!({})).unwrap();
    assert_eq!(store.get(thread.id).unwrap().status, ThreadStatus::WaitingSubject);
}

#[test]
fn agent_note_does_not_change_status() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    store.append_message(thread.id, SenderType::Agent, "agent-1", "flagged for billing review", serde_json::json!({})).unwrap();
    assert_eq!(store.get(thread.id).unwrap().status, ThreadStatus::WaitingHuman);
}

#[test]
fn messages_accumulate_in_order() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    store.append_message(thread.id, SenderType::Human, "human-1", "first", serde_json::json!({})).unwrap();
    store.append_message(thread.id, SenderType::Subject, "subj-1", "second", serde_json::json!({})).unwrap();

    let messages = store.messages(thread.id);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "first");
    assert_eq!(messages[1].content, "second");
}

#[test]
fn resolve_sets_terminal_state_and_rejects_further_messages() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    let resolved = store.resolve(thread.id, "answered by support", "human-1").unwrap();
    assert_eq!(resolved.status, ThreadStatus::Resolved);
    assert_eq!(resolved.resolution, Some("answered by support".to_string()));

    let err = store.append_message(thread.id, SenderType::Subject, "subj-1", "thanks", serde_json::json!({})).unwrap_err();
    assert!(matches!(err, ThreadError::ThreadTerminal(_)));
}

#[test]
fn resolve_twice_errors() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    store.resolve(thread.id, "done", "human-1").unwrap();
    let err = store.resolve(thread.id, "done again", "human-1").unwrap_err();
    assert!(matches!(err, ThreadError::AlreadyResolved(_)));
}

#[test]
fn mark_resumed_transitions_from_resolved() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    store.resolve(thread.id, "done", "human-1").unwrap();
    let resumed = store.mark_resumed(thread.id).unwrap();
    assert_eq!(resumed.status, ThreadStatus::Resumed);
}

#[test]
fn abandon_marks_non_terminal_thread_abandoned() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    let abandoned = store.abandon(thread.id).unwrap();
    assert_eq!(abandoned.status, ThreadStatus::Abandoned);
}

#[test]
fn abandon_already_terminal_thread_errors() {
    let store = ThreadStore::new();
    let thread = open_thread(&store);
    store.resolve(thread.id, "done", "human-1").unwrap();
    let err = store.abandon(thread.id).unwrap_err();
    assert!(matches!(err, ThreadError::AlreadyResolved(_)));
}

#[test]
fn active_threads_excludes_terminal_ones() {
    let store = ThreadStore::new();
    let active = open_thread(&store);
    let resolved = open_thread(&store);
    store.resolve(resolved.id, "done", "human-1").unwrap();

    let actives = store.active_threads();
    assert_eq!(actives.len(), 1);
    assert_eq!(actives[0].id, active.id);
}
