// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use orc_core::Subject;

fn engine() -> PolicyEngine {
    PolicyEngine::new(PolicyRuleStore::new(), ActionLog::new())
}

fn consenting_subject(tenant: TenantId, channel: Channel) -> Subject {
    let mut subject = Subject::new(SubjectId::new(), tenant);
    subject.set_consent(channel, true);
    subject
}

#[test]
fn denies_when_consent_missing() {
    let engine = engine();
    let tenant = TenantId::new();
    let subject = Subject::new(SubjectId::new(), tenant);
    let action = PlannedAction::new(Channel::Email, Utc::now(), serde_json::json!({}));

    let decision = engine.validate_action(tenant, subject.id, &subject, &action);
    assert!(!decision.approved);
    assert!(decision.violations[0].contains("No consent for email"));
}

#[test]
fn approves_when_consent_granted_and_within_limits() {
    let engine = engine();
    let tenant = TenantId::new();
    let subject = consenting_subject(tenant, Channel::Email);
    let action = PlannedAction::new(Channel::Email, Utc::now(), serde_json::json!({}));

    let decision = engine.validate_action(tenant, subject.id, &subject, &action);
    assert!(decision.approved);
    assert!(decision.reason().is_none());
}

#[test]
fn payment_link_exempt_from_consent() {
    let engine = engine();
    let tenant = TenantId::new();
    let subject = Subject::new(SubjectId::new(), tenant);
    let action = PlannedAction::new(Channel::PaymentLink, Utc::now(), serde_json::json!({}));

    let decision = engine.validate_action(tenant, subject.id, &subject, &action);
    assert!(decision.approved);
}

#[test]
fn denies_when_daily_email_limit_exceeded() {
    let rules = PolicyRuleStore::new();
    let actions = ActionLog::new();
    let tenant = TenantId::new();
    let subject = consenting_subject(tenant, Channel::Email);

    actions.record(tenant, subject.id, Channel::Email);
    let engine = PolicyEngine::new(rules, actions);
    let action = PlannedAction::new(Channel::Email, Utc::now(), serde_json::json!({}));

    let decision = engine.validate_action(tenant, subject.id, &subject, &action);
    assert!(!decision.approved);
    assert!(decision.violations.iter().any(|v| v.contains("Email daily limit (1) exceeded")));
}

#[test]
fn override_raises_daily_limit() {
    let rules = PolicyRuleStore::new();
    let actions = ActionLog::new();
    let tenant = TenantId::new();
    let subject = consenting_subject(tenant, Channel::Email);
    actions.record(tenant, subject.id, Channel::Email);
    rules.set_policy_value(tenant, PolicyKey::RateLimitEmailDaily, serde_json::json!(5));

    let engine = PolicyEngine::new(rules, actions);
    let action = PlannedAction::new(Channel::Email, Utc::now(), serde_json::json!({}));
    let decision = engine.validate_action(tenant, subject.id, &subject, &action);
    assert!(decision.approved);
}

#[test]
fn quiet_hours_spanning_midnight_denies_late_night_send() {
    let engine = engine();
    let tenant = TenantId::new();
    let mut subject = consenting_subject(tenant, Channel::Whatsapp);
    subject.timezone = Some("America/Sao_Paulo".to_string());

    // Sao_Paulo is UTC-3 year-round (DST abolished 2019); 01:00 UTC is
    // 22:00 local the prior day, inside the 21-09 quiet window.
    let scheduled = "2026-07-28T01:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let action = PlannedAction::new(Channel::Whatsapp, scheduled, serde_json::json!({}));

    let decision = engine.validate_action(tenant, subject.id, &subject, &action);
    assert!(!decision.approved);
    assert!(decision.violations.iter().any(|v| v.contains("quiet hours")));
}

#[test]
fn quiet_hours_skipped_when_timezone_unknown() {
    let engine = engine();
    let tenant = TenantId::new();
    let subject = consenting_subject(tenant, Channel::Whatsapp);
    let scheduled = "2026-07-27T23:30:00Z".parse::<DateTime<Utc>>().unwrap();
    let action = PlannedAction::new(Channel::Whatsapp, scheduled, serde_json::json!({}));

    let decision = engine.validate_action(tenant, subject.id, &subject, &action);
    assert!(decision.approved);
}

#[test]
fn tool_call_mode_maps_send_sms_to_whatsapp_policy() {
    let rules = PolicyRuleStore::new();
    let actions = ActionLog::new();
    let tenant = TenantId::new();
    let subject = consenting_subject(tenant, Channel::Whatsapp);
    actions.record(tenant, subject.id, Channel::Whatsapp);
    actions.record(tenant, subject.id, Channel::Whatsapp);
    let engine = PolicyEngine::new(rules, actions);

    let decision = engine.validate_tool_call(tenant, subject.id, &subject, "send_sms", serde_json::json!({}));
    assert!(!decision.approved);
    assert!(decision.violations.iter().any(|v| v.contains("WhatsApp daily limit (2) exceeded")));
}

#[test]
fn tool_call_mode_ignores_non_communication_tools() {
    let engine = engine();
    let tenant = TenantId::new();
    let subject = Subject::new(SubjectId::new(), tenant);
    let decision = engine.validate_tool_call(tenant, subject.id, &subject, "fetch_context", serde_json::json!({}));
    assert!(decision.approved);
}
