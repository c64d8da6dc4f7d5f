// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The onboarded flow's external collaborator (§4.8 step 1: "Fetch tenant
//! profile (external collaborator). If absent, synthesize a minimal
//! profile from event payload."). Only the interface is in scope (SPEC_FULL
//! Non-goals: "no onboarding-enrichment service implementation"); a
//! production deployment plugs a real CRM/enrichment lookup in behind
//! this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orc_core::{SubjectId, TenantId};

/// Everything the planner needs about the tenant's campaign, whether
/// fetched from an external collaborator or synthesized from the
/// onboarding event's own payload.
#[derive(Debug, Clone)]
pub struct TenantProfile {
    pub tenant_id: TenantId,
    pub purpose: String,
    pub goal: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub worker_pool_ids: Vec<String>,
    pub subject_ids: Vec<SubjectId>,
}

#[async_trait]
pub trait TenantProfileProvider: Send + Sync {
    async fn fetch_profile(&self, tenant_id: TenantId) -> Option<TenantProfile>;
}

/// Builds a minimal [`TenantProfile`] straight from the `tenant-onboarded`
/// event payload (§4.8 step 1's fallback branch), used whenever the
/// configured [`TenantProfileProvider`] has nothing for this tenant.
pub fn synthesize_profile(tenant_id: TenantId, payload: &serde_json::Value, now: DateTime<Utc>) -> TenantProfile {
    let purpose = payload.get("purpose").and_then(serde_json::Value::as_str).unwrap_or("general outreach").to_string();
    let goal = payload.get("goal").and_then(serde_json::Value::as_str).unwrap_or("increase engagement").to_string();
    let start_date = payload
        .get("start_date")
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);
    let end_date = payload
        .get("end_date")
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| start_date + chrono::Duration::days(30));
    let worker_pool_ids = payload
        .get("worker_agent_ids")
        .or_else(|| payload.get("worker_pool_ids"))
        .and_then(serde_json::Value::as_array)
        .map(|ids| ids.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_else(|| vec!["worker-1".to_string()]);
    let subject_ids = payload
        .get("subjects")
        .or_else(|| payload.get("subject_ids"))
        .and_then(serde_json::Value::as_array)
        .map(|ids| ids.iter().filter_map(|v| serde_json::from_value(v.clone()).ok()).collect())
        .unwrap_or_default();

    TenantProfile { tenant_id, purpose, goal, start_date, end_date, worker_pool_ids, subject_ids }
}

/// Always returns `None`, forcing every call through [`synthesize_profile`].
/// The real enrichment-service adapter is out of scope (Non-goals).
pub struct NullTenantProfileProvider;

#[async_trait]
impl TenantProfileProvider for NullTenantProfileProvider {
    async fn fetch_profile(&self, _tenant_id: TenantId) -> Option<TenantProfile> {
        None
    }
}

/// Test double returning a canned profile for a specific tenant.
pub struct FakeTenantProfileProvider {
    profile: Option<TenantProfile>,
}

impl FakeTenantProfileProvider {
    pub fn returning(profile: TenantProfile) -> Self {
        Self { profile: Some(profile) }
    }

    pub fn empty() -> Self {
        Self { profile: None }
    }
}

#[async_trait]
impl TenantProfileProvider for FakeTenantProfileProvider {
    async fn fetch_profile(&self, tenant_id: TenantId) -> Option<TenantProfile> {
        self.profile.clone().filter(|p| p.tenant_id == tenant_id)
    }
}

#[cfg(test)]
#[path = "tenant_profile_tests.rs"]
mod tests;
