// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversation thread store (§4.10), grounded on the lookup-then-validate-
//! then-transition shape of `daemon/listener/decisions.rs::handle_decision_resolve`
//! (fetch by id, reject if already resolved, drop the lock before emitting
//! follow-on effects) generalized to the escalation state machine.

use std::collections::HashMap;

use chrono::Utc;
use orc_core::{ExecutionId, SubjectId, TenantId, ThreadId};
use parking_lot::Mutex;
use tracing::info;

use crate::error::{Result, ThreadError};
use crate::thread::{ConversationThread, Message, SenderType, ThreadStatus};

/// In-process store for [`ConversationThread`]s and their [`Message`] logs.
#[derive(Default)]
pub struct ThreadStore {
    threads: Mutex<HashMap<ThreadId, ConversationThread>>,
    messages: Mutex<HashMap<ThreadId, Vec<Message>>>,
}

impl ThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new thread in `status` (§4.9 step 6: escalation opens
    /// `waiting_human`; a subject-initiated conversation opens `active`).
    pub fn open(
        &self,
        tenant_id: TenantId,
        subject_id: SubjectId,
        execution_id: Option<ExecutionId>,
        agent_id: Option<String>,
        status: ThreadStatus,
        reason: impl Into<String>,
        context: serde_json::Value,
    ) -> ConversationThread {
        let thread = ConversationThread::open(tenant_id, subject_id, execution_id, agent_id, status, reason, context);
        info!(thread_id = %thread.id, status = %thread.status, "opened conversation thread");
        self.threads.lock().insert(thread.id, thread.clone());
        thread
    }

    pub fn get(&self, id: ThreadId) -> Option<ConversationThread> {
        self.threads.lock().get(&id).cloned()
    }

    pub fn messages(&self, id: ThreadId) -> Vec<Message> {
        self.messages.lock().get(&id).cloned().unwrap_or_default()
    }

    /// Append a message and follow the state machine's reply edges: a
    /// `human` sender moves a non-terminal thread to `waiting_subject`; a
    /// `subject` sender moves it to `waiting_human` (§4.10). `agent` replies
    /// (worker notes) do not change status.
    pub fn append_message(&self, id: ThreadId, sender_type: SenderType, sender_id: impl Into<String>, content: impl Into<String>, metadata: serde_json::Value) -> Result<Message> {
        let mut threads = self.threads.lock();
        let thread = threads.get_mut(&id).ok_or(ThreadError::ThreadNotFound(id))?;
        if thread.status.is_terminal() {
            return Err(ThreadError::ThreadTerminal(id));
        }

        match sender_type {
            SenderType::Human => thread.status = ThreadStatus::WaitingSubject,
            SenderType::Subject => thread.status = ThreadStatus::WaitingHuman,
            SenderType::Agent => {}
        }
        thread.updated_at = Utc::now();
        drop(threads);

        let message = Message::new(id, sender_type, sender_id, content, metadata);
        self.messages.lock().entry(id).or_default().push(message.clone());
        Ok(message)
    }

    /// Resolve a non-terminal thread with resolution details and a
    /// resolved-by id (§4.10 "Resolve requires a payload with resolution
    /// details and a resolved-by id").
    pub fn resolve(&self, id: ThreadId, resolution: impl Into<String>, resolved_by: impl Into<String>) -> Result<ConversationThread> {
        let mut threads = self.threads.lock();
        let thread = threads.get_mut(&id).ok_or(ThreadError::ThreadNotFound(id))?;
        if thread.status.is_terminal() {
            return Err(ThreadError::AlreadyResolved(id));
        }

        thread.status = ThreadStatus::Resolved;
        thread.resolution = Some(resolution.into());
        thread.resolved_by = Some(resolved_by.into());
        let now = Utc::now();
        thread.updated_at = now;
        thread.resolved_at = Some(now);
        info!(thread_id = %id, "resolved conversation thread");
        Ok(thread.clone())
    }

    /// Mark a resolved thread `resumed` once the linked workflow execution
    /// has actually been resumed (§4.10 "resolved ──(resume=true)──> resumed").
    pub fn mark_resumed(&self, id: ThreadId) -> Result<ConversationThread> {
        let mut threads = self.threads.lock();
        let thread = threads.get_mut(&id).ok_or(ThreadError::ThreadNotFound(id))?;
        thread.status = ThreadStatus::Resumed;
        thread.updated_at = Utc::now();
        Ok(thread.clone())
    }

    /// Abandon any non-terminal thread on timeout (§4.10 "(any non-terminal)
    /// ──timeout──> abandoned").
    pub fn abandon(&self, id: ThreadId) -> Result<ConversationThread> {
        let mut threads = self.threads.lock();
        let thread = threads.get_mut(&id).ok_or(ThreadError::ThreadNotFound(id))?;
        if thread.status.is_terminal() {
            return Err(ThreadError::AlreadyResolved(id));
        }
        thread.status = ThreadStatus::Abandoned;
        thread.updated_at = Utc::now();
        info!(thread_id = %id, "abandoned conversation thread on timeout");
        Ok(thread.clone())
    }

    /// All non-terminal threads, for the scheduler's timeout sweep.
    pub fn active_threads(&self) -> Vec<ConversationThread> {
        self.threads.lock().values().filter(|thread| !thread.status.is_terminal()).cloned().collect()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
