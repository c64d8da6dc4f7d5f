// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seam between the data builtins and the subject-context store. The real
//! implementation lives on `orc-storage`'s `ContextStore`; this trait keeps
//! `orc-tools` from depending on it directly.

use async_trait::async_trait;
use orc_core::{OrchestratorError, Stage, SubjectContext, SubjectId, TenantId};

#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn get_context(&self, tenant_id: TenantId, subject_id: SubjectId) -> Result<SubjectContext, OrchestratorError>;

    async fn update_stage(
        &self,
        tenant_id: TenantId,
        subject_id: SubjectId,
        stage: Stage,
    ) -> Result<SubjectContext, OrchestratorError>;
}

/// Parses the wire stage strings accepted by `update_consumer_stage`.
pub fn parse_stage(value: &str) -> Option<Stage> {
    match value {
        "new" => Some(Stage::New),
        "interested" => Some(Stage::Interested),
        "engaged" => Some(Stage::Engaged),
        "converted" => Some(Stage::Converted),
        "churned" => Some(Stage::Churned),
        _ => None,
    }
}
