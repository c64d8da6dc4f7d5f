// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Duration;

#[test]
fn counts_only_matching_channel_since_cutoff() {
    let log = ActionLog::new();
    let tenant = TenantId::new();
    let subject = SubjectId::new();

    log.record(tenant, subject, Channel::Email);
    log.record(tenant, subject, Channel::Whatsapp);

    let since = Utc::now() - Duration::hours(1);
    assert_eq!(log.count_recent_actions(tenant, subject, Channel::Email, since), 1);
    assert_eq!(log.count_recent_actions(tenant, subject, Channel::Whatsapp, since), 1);
    assert_eq!(log.count_recent_actions(tenant, subject, Channel::Call, since), 0);
}

#[test]
fn excludes_actions_before_cutoff() {
    let log = ActionLog::new();
    let tenant = TenantId::new();
    let subject = SubjectId::new();
    log.record(tenant, subject, Channel::Email);

    let since = Utc::now() + Duration::hours(1);
    assert_eq!(log.count_recent_actions(tenant, subject, Channel::Email, since), 0);
}

#[test]
fn isolated_per_subject() {
    let log = ActionLog::new();
    let tenant = TenantId::new();
    let subject_a = SubjectId::new();
    let subject_b = SubjectId::new();
    log.record(tenant, subject_a, Channel::Email);

    let since = Utc::now() - Duration::hours(1);
    assert_eq!(log.count_recent_actions(tenant, subject_b, Channel::Email, since), 0);
}
