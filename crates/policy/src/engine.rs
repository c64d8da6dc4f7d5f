// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The policy engine itself (§4.4): consent, rate-limit, and quiet-hours
//! guardrails over a proposed communication, ported from
//! `PolicyService.validate_action` / `validate_tool_call`.

use chrono::{DateTime, Duration, Timelike, Utc};
use orc_core::{Channel, SubjectId, TenantId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::ActionLog;
use crate::rules::{PolicyKey, PolicyRuleStore};

/// A proposed communication awaiting approval.
#[derive(Debug, Clone)]
pub struct PlannedAction {
    pub channel: Channel,
    pub scheduled_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl PlannedAction {
    pub fn new(channel: Channel, scheduled_at: DateTime<Utc>, payload: serde_json::Value) -> Self {
        Self { channel, scheduled_at, payload }
    }
}

/// Outcome of a policy check (§4.4): `{approved, violations}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub approved: bool,
    pub violations: Vec<String>,
}

impl PolicyDecision {
    fn from_violations(violations: Vec<String>) -> Self {
        Self { approved: violations.is_empty(), violations }
    }

    /// `"; "`-joined violation list, or `None` when approved.
    pub fn reason(&self) -> Option<String> {
        if self.approved {
            None
        } else {
            Some(self.violations.join("; "))
        }
    }
}

/// Maps a tool name to the channel it sends through, for tool-call mode.
/// `send_sms` reuses the WhatsApp channel's policy, matching the original.
fn tool_to_channel(tool_name: &str) -> Option<Channel> {
    match tool_name {
        "send_email" => Some(Channel::Email),
        "send_whatsapp" => Some(Channel::Whatsapp),
        "send_sms" => Some(Channel::Whatsapp),
        "schedule_call" => Some(Channel::Call),
        _ => None,
    }
}

pub struct PolicyEngine {
    rules: PolicyRuleStore,
    actions: ActionLog,
}

impl PolicyEngine {
    pub fn new(rules: PolicyRuleStore, actions: ActionLog) -> Self {
        Self { rules, actions }
    }

    /// Full validation: consent, rate limits, and quiet hours.
    pub fn validate_action(
        &self,
        tenant_id: TenantId,
        subject_id: SubjectId,
        subject: &orc_core::Subject,
        action: &PlannedAction,
    ) -> PolicyDecision {
        let mut violations = Vec::new();

        if let Some(v) = self.check_consent(tenant_id, subject, action.channel) {
            violations.push(v);
        }
        if let Some(v) = self.check_rate_limits(tenant_id, subject_id, action) {
            violations.push(v);
        }
        if let Some(v) = self.check_quiet_hours(tenant_id, subject, action) {
            violations.push(v);
        }

        PolicyDecision::from_violations(violations)
    }

    /// Tool-call mode (§4.4): consent + rate limits only, quiet hours
    /// skipped for immediate invocations. Non-communication tools are
    /// always approved (no channel mapping).
    pub fn validate_tool_call(
        &self,
        tenant_id: TenantId,
        subject_id: SubjectId,
        subject: &orc_core::Subject,
        tool_name: &str,
        params: serde_json::Value,
    ) -> PolicyDecision {
        let Some(channel) = tool_to_channel(tool_name) else {
            return PolicyDecision::from_violations(Vec::new());
        };

        let mut violations = Vec::new();
        if let Some(v) = self.check_consent(tenant_id, subject, channel) {
            violations.push(v);
        }
        let mock_action = PlannedAction::new(channel, Utc::now(), params);
        if let Some(v) = self.check_rate_limits(tenant_id, subject_id, &mock_action) {
            violations.push(v);
        }

        PolicyDecision::from_violations(violations)
    }

    fn check_consent(
        &self,
        tenant_id: TenantId,
        subject: &orc_core::Subject,
        channel: Channel,
    ) -> Option<String> {
        if !self.rules.get_bool(tenant_id, PolicyKey::RequireConsent) {
            return None;
        }
        // Payment links carry no consent type and are exempt (§4.4).
        if channel == Channel::PaymentLink {
            return None;
        }
        if subject.has_consent(channel) {
            None
        } else {
            Some(format!("No consent for {channel}"))
        }
    }

    fn check_rate_limits(
        &self,
        tenant_id: TenantId,
        subject_id: SubjectId,
        action: &PlannedAction,
    ) -> Option<String> {
        let now = Utc::now();
        let windows: &[(PolicyKey, Duration, &str)] = match action.channel {
            Channel::Email => &[
                (PolicyKey::RateLimitEmailDaily, Duration::days(1), "Email daily"),
                (PolicyKey::RateLimitEmailWeekly, Duration::days(7), "Email weekly"),
            ],
            Channel::Whatsapp => &[
                (PolicyKey::RateLimitWhatsappDaily, Duration::days(1), "WhatsApp daily"),
                (PolicyKey::RateLimitWhatsappWeekly, Duration::days(7), "WhatsApp weekly"),
            ],
            Channel::Call => &[(PolicyKey::RateLimitCallWeekly, Duration::days(7), "Call weekly")],
            Channel::Sms | Channel::PaymentLink => &[],
        };

        for (key, window, label) in windows {
            let limit = self.rules.get_u64(tenant_id, *key);
            let since = now - *window;
            let count = self.actions.count_recent_actions(tenant_id, subject_id, action.channel, since);
            if count >= limit {
                return Some(format!("{label} limit ({limit}) exceeded"));
            }
        }
        None
    }

    /// Quiet hours can span midnight (e.g. 21:00-09:00): `is_quiet = hour >=
    /// start || hour < end`. Skipped when the subject has no timezone or it
    /// fails to parse.
    fn check_quiet_hours(
        &self,
        tenant_id: TenantId,
        subject: &orc_core::Subject,
        action: &PlannedAction,
    ) -> Option<String> {
        let tz_name = subject.timezone.as_deref()?;
        let tz: chrono_tz::Tz = tz_name.parse().ok()?;

        let local_time = action.scheduled_at.with_timezone(&tz);
        let quiet_start = self.rules.get_u64(tenant_id, PolicyKey::QuietHoursStart) as u32;
        let quiet_end = self.rules.get_u64(tenant_id, PolicyKey::QuietHoursEnd) as u32;
        let current_hour = local_time.hour();

        let is_quiet = if quiet_start > quiet_end {
            current_hour >= quiet_start || current_hour < quiet_end
        } else {
            current_hour >= quiet_start && current_hour < quiet_end
        };

        if is_quiet {
            debug!(%tenant_id, channel = %action.channel, "action scheduled during quiet hours");
            Some(format!(
                "Action scheduled during quiet hours ({quiet_start}:00 - {quiet_end}:00 in subject timezone)"
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
