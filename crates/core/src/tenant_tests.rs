// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_tenant_has_empty_settings() {
    let tenant = Tenant::new(TenantId::new());
    assert!(tenant.settings.is_empty());
    assert!(tenant.setting("anything").is_none());
}

#[test]
fn setting_lookup_reads_inserted_value() {
    let mut tenant = Tenant::new(TenantId::new());
    tenant
        .settings
        .insert("quiet_hours_start".into(), serde_json::json!(21));
    assert_eq!(tenant.setting("quiet_hours_start"), Some(&serde_json::json!(21)));
}
