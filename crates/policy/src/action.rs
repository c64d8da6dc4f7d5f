// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action log for rate-limit window counting (§4.4), ported from the
//! original `Action` model and `PolicyService._count_recent_actions`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use orc_core::{Channel, SubjectId, TenantId};
use parking_lot::Mutex;

/// A single executed communication, recorded for rate-limit accounting.
/// Only "executed" actions count against a limit, matching the original's
/// `Action.status == "executed"` filter.
#[derive(Debug, Clone)]
pub struct Action {
    pub tenant_id: TenantId,
    pub subject_id: SubjectId,
    pub channel: Channel,
    pub created_at: DateTime<Utc>,
}

/// In-memory log of executed actions, queried by the policy engine to
/// enforce per-channel rate limits.
#[derive(Clone)]
pub struct ActionLog {
    actions: Arc<Mutex<HashMap<(TenantId, SubjectId), Vec<Action>>>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self { actions: Arc::new(Mutex::new(HashMap::new())) }
    }

    pub fn record(&self, tenant_id: TenantId, subject_id: SubjectId, channel: Channel) {
        let action = Action { tenant_id, subject_id, channel, created_at: Utc::now() };
        self.actions.lock().entry((tenant_id, subject_id)).or_default().push(action);
    }

    /// Count of actions on `channel` for the subject since `since` (inclusive).
    pub fn count_recent_actions(
        &self,
        tenant_id: TenantId,
        subject_id: SubjectId,
        channel: Channel,
        since: DateTime<Utc>,
    ) -> u64 {
        self.actions
            .lock()
            .get(&(tenant_id, subject_id))
            .map(|actions| {
                actions.iter().filter(|a| a.channel == channel && a.created_at >= since).count() as u64
            })
            .unwrap_or(0)
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
