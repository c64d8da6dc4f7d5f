// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SubjectContext — materialized per-(tenant, subject) rollup (§3, §4.6).
//!
//! The reducer that folds events into a [`SubjectContext`] lives in
//! `orc-ingress::materializer`; this module only owns the entity shape and
//! the stage lattice ordering so every crate agrees on what "stage can only
//! move forward" means.

use crate::ids::SubjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subject's position in the engagement lattice.
///
/// Ordering is the lattice order, not declaration order:
/// `new < interested < engaged`, and `converted`/`churned` are terminal —
/// comparisons against them are meaningless for "has this subject
/// progressed" purposes, which is why [`Stage::can_advance_to`] special-cases
/// them instead of relying on derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    New,
    Interested,
    Engaged,
    Converted,
    Churned,
}

crate::simple_display! {
    Stage {
        New => "new",
        Interested => "interested",
        Engaged => "engaged",
        Converted => "converted",
        Churned => "churned",
    }
}

impl Stage {
    /// Whether this stage is sticky: once reached, engagement signals must
    /// not move the subject to any other stage (§3, §4.6).
    pub fn is_sticky(self) -> bool {
        matches!(self, Stage::Converted | Stage::Churned)
    }

    /// The lattice stage implied by an engagement score alone, ignoring
    /// stickiness. Callers combine this with the subject's current stage
    /// via [`Stage::advance`].
    pub fn from_score(score: u64) -> Stage {
        if score >= 5 {
            Stage::Engaged
        } else if score >= 2 {
            Stage::Interested
        } else {
            Stage::New
        }
    }

    /// Numeric rank used only to compare non-sticky stages; sticky stages
    /// are handled separately by [`Stage::advance`].
    fn rank(self) -> u8 {
        match self {
            Stage::New => 0,
            Stage::Interested => 1,
            Stage::Engaged => 2,
            Stage::Converted => 3,
            Stage::Churned => 3,
        }
    }

    /// Apply the lattice rule: never move backward, never move off a
    /// sticky stage.
    pub fn advance(self, candidate: Stage) -> Stage {
        if self.is_sticky() {
            return self;
        }
        if candidate.is_sticky() {
            return candidate;
        }
        if candidate.rank() > self.rank() {
            candidate
        } else {
            self
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::New
    }
}

/// Per-channel send counters, keyed the same way the policy engine keys
/// rate-limit windows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelCounters {
    pub email_sent: u64,
    pub whatsapp_sent: u64,
    pub sms_sent: u64,
    pub last_email_sent_at: Option<DateTime<Utc>>,
    pub last_whatsapp_sent_at: Option<DateTime<Utc>>,
    pub last_sms_sent_at: Option<DateTime<Utc>>,
}

/// Materialized rollup for one (tenant, subject) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectContext {
    pub subject_id: SubjectId,
    pub stage: Stage,
    pub last_seen: Option<DateTime<Utc>>,
    pub views: u64,
    pub opens: u64,
    pub whatsapp_received: u64,
    pub clicks: u64,
    pub replies: u64,
    pub revenue: f64,
    pub sends: ChannelCounters,
}

impl SubjectContext {
    pub fn new(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            stage: Stage::default(),
            last_seen: None,
            views: 0,
            opens: 0,
            whatsapp_received: 0,
            clicks: 0,
            replies: 0,
            revenue: 0.0,
            sends: ChannelCounters::default(),
        }
    }

    /// Engagement score = views + 2·opens + 3·whatsapp_received (§4.6).
    pub fn engagement_score(&self) -> u64 {
        self.views + 2 * self.opens + 3 * self.whatsapp_received
    }

    /// Reevaluate `self.stage` from the current engagement score, honoring
    /// the lattice rule. Does not touch sticky stages.
    pub fn reevaluate_stage(&mut self) {
        let candidate = Stage::from_score(self.engagement_score());
        self.stage = self.stage.advance(candidate);
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
