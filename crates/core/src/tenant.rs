// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tenant — owner of a campaign.

use crate::ids::TenantId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owner of a campaign. Created externally (onboarding is out of scope,
/// §1); never deleted while dependent state (subjects, workflows,
/// policies) exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub settings: HashMap<String, serde_json::Value>,
}

impl Tenant {
    pub fn new(id: TenantId) -> Self {
        Self {
            id,
            settings: HashMap::new(),
        }
    }

    pub fn setting(&self, key: &str) -> Option<&serde_json::Value> {
        self.settings.get(key)
    }
}

#[cfg(test)]
#[path = "tenant_tests.rs"]
mod tests;
