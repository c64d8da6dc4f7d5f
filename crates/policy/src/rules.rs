// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Policy keys, their defaults, and per-tenant overrides (§4.4), ported
//! from `app/domain/policy/service.py`'s `DEFAULT_POLICIES`.

use orc_core::TenantId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKey {
    RateLimitEmailDaily,
    RateLimitEmailWeekly,
    RateLimitWhatsappDaily,
    RateLimitWhatsappWeekly,
    RateLimitCallWeekly,
    QuietHoursStart,
    QuietHoursEnd,
    RequireConsent,
}

impl PolicyKey {
    /// The default value, matching `DEFAULT_POLICIES` exactly.
    pub fn default_value(self) -> serde_json::Value {
        match self {
            PolicyKey::RateLimitEmailDaily => serde_json::json!(1),
            PolicyKey::RateLimitEmailWeekly => serde_json::json!(3),
            PolicyKey::RateLimitWhatsappDaily => serde_json::json!(2),
            PolicyKey::RateLimitWhatsappWeekly => serde_json::json!(5),
            PolicyKey::RateLimitCallWeekly => serde_json::json!(1),
            PolicyKey::QuietHoursStart => serde_json::json!(21),
            PolicyKey::QuietHoursEnd => serde_json::json!(9),
            PolicyKey::RequireConsent => serde_json::json!(true),
        }
    }
}

/// Per-tenant policy overrides, falling back to [`PolicyKey::default_value`].
#[derive(Default)]
pub struct PolicyRuleStore {
    overrides: RwLock<HashMap<(TenantId, PolicyKey), serde_json::Value>>,
}

impl PolicyRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_policy_value(&self, tenant_id: TenantId, key: PolicyKey) -> serde_json::Value {
        self.overrides
            .read()
            .get(&(tenant_id, key))
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    pub fn set_policy_value(&self, tenant_id: TenantId, key: PolicyKey, value: serde_json::Value) {
        self.overrides.write().insert((tenant_id, key), value);
    }

    pub fn get_u64(&self, tenant_id: TenantId, key: PolicyKey) -> u64 {
        self.get_policy_value(tenant_id, key).as_u64().unwrap_or(0)
    }

    pub fn get_bool(&self, tenant_id: TenantId, key: PolicyKey) -> bool {
        self.get_policy_value(tenant_id, key).as_bool().unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
