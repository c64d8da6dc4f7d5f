// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversation thread and message entities (§3, §4.10), grounded on
//! `oj-core::decision`'s `Decision`/`DecisionSource` shape (a record with a
//! source, resolution, and terminal-state rule) generalized to the
//! escalation state machine.

use chrono::{DateTime, Utc};
use orc_core::{ExecutionId, SubjectId, TenantId, ThreadId};
use serde::{Deserialize, Serialize};

/// Escalation state machine (§4.10):
///
/// ```text
/// active ──human replies──> waiting-subject
/// active ──subject replies──> waiting-human
/// waiting-human ──human sends──> waiting-subject
/// waiting-subject ──subject replies──> waiting-human
/// (any non-terminal) ──human resolves──> resolved ──(resume=true)──> resumed
/// (any non-terminal) ──timeout──> abandoned
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Active,
    WaitingHuman,
    WaitingSubject,
    Resolved,
    Resumed,
    Abandoned,
}

orc_core::simple_display! {
    ThreadStatus {
        Active => "active",
        WaitingHuman => "waiting_human",
        WaitingSubject => "waiting_subject",
        Resolved => "resolved",
        Resumed => "resumed",
        Abandoned => "abandoned",
    }
}

impl ThreadStatus {
    /// `resolved`/`resumed`/`abandoned` are terminal for message intake
    /// (§3 invariant).
    pub fn is_terminal(self) -> bool {
        matches!(self, ThreadStatus::Resolved | ThreadStatus::Resumed | ThreadStatus::Abandoned)
    }
}

/// §3 `Message`: sender-type ∈ {subject, agent, human}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    Subject,
    Agent,
    Human,
}

orc_core::simple_display! {
    SenderType {
        Subject => "subject",
        Agent => "agent",
        Human => "human",
    }
}

/// An immutable thread entry (§3 `Message`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: orc_core::MessageId,
    pub thread_id: ThreadId,
    pub sender_type: SenderType,
    pub sender_id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(thread_id: ThreadId, sender_type: SenderType, sender_id: impl Into<String>, content: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            id: orc_core::MessageId::new(),
            thread_id,
            sender_type,
            sender_id: sender_id.into(),
            content: content.into(),
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// §3 `ConversationThread`: an escalation from a worker to a human, or a
/// subject-initiated conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationThread {
    pub id: ThreadId,
    pub tenant_id: TenantId,
    pub subject_id: SubjectId,
    pub execution_id: Option<ExecutionId>,
    pub agent_id: Option<String>,
    pub status: ThreadStatus,
    pub reason: String,
    pub context: serde_json::Value,
    pub resolution: Option<String>,
    pub resolved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ConversationThread {
    pub fn open(
        tenant_id: TenantId,
        subject_id: SubjectId,
        execution_id: Option<ExecutionId>,
        agent_id: Option<String>,
        status: ThreadStatus,
        reason: impl Into<String>,
        context: serde_json::Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ThreadId::new(),
            tenant_id,
            subject_id,
            execution_id,
            agent_id,
            status,
            reason: reason.into(),
            context,
            resolution: None,
            resolved_by: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod tests;
