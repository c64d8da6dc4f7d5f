// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ContextStore` — the materialized-rollup store backing
//! `orc_tools::ContextProvider` (§3 SubjectContext, §4.6).
//!
//! The reducer that folds an ingested event into a [`SubjectContext`]
//! lives in `orc-ingress::materializer`; this store only owns the
//! keyed-by-(tenant, subject) persistence and the `ContextProvider` seam
//! the `get-subject-context`/`update-subject-stage` tools call through.

use std::collections::HashMap;

use async_trait::async_trait;
use orc_core::{OrchestratorError, Stage, SubjectContext, SubjectId, TenantId};
use orc_tools::ContextProvider;
use parking_lot::Mutex;

pub struct ContextStore {
    contexts: Mutex<HashMap<(TenantId, SubjectId), SubjectContext>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self { contexts: Mutex::new(HashMap::new()) }
    }

    /// Fetch the context for (tenant, subject), creating a fresh
    /// `Stage::New` row on first contact.
    pub fn get_or_create(&self, tenant_id: TenantId, subject_id: SubjectId) -> SubjectContext {
        let mut contexts = self.contexts.lock();
        contexts.entry((tenant_id, subject_id)).or_insert_with(|| SubjectContext::new(subject_id)).clone()
    }

    pub fn save(&self, tenant_id: TenantId, context: SubjectContext) {
        self.contexts.lock().insert((tenant_id, context.subject_id), context);
    }

    /// Force the subject to `stage`, honoring the lattice (stage cannot be
    /// lowered off a sticky stage, §3/§4.6). Used by the
    /// `update-subject-stage` tool and by §4.6's `booking-created`/
    /// `payment-success` reducer arms.
    pub fn set_stage(&self, tenant_id: TenantId, subject_id: SubjectId, stage: Stage) -> SubjectContext {
        let mut contexts = self.contexts.lock();
        let context = contexts.entry((tenant_id, subject_id)).or_insert_with(|| SubjectContext::new(subject_id));
        context.stage = context.stage.advance(stage);
        context.clone()
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContextProvider for ContextStore {
    async fn get_context(&self, tenant_id: TenantId, subject_id: SubjectId) -> Result<SubjectContext, OrchestratorError> {
        Ok(self.get_or_create(tenant_id, subject_id))
    }

    async fn update_stage(&self, tenant_id: TenantId, subject_id: SubjectId, stage: Stage) -> Result<SubjectContext, OrchestratorError> {
        Ok(self.set_stage(tenant_id, subject_id, stage))
    }
}

#[cfg(test)]
#[path = "context_store_tests.rs"]
mod tests;
