// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use async_trait::async_trait;
use orc_core::{ExecutionId, OrchestratorError, SubjectContext, SubjectId, Stage, TenantId, ThreadId};
use orc_storage::SubjectStore;
use orc_tools::builtins::discover;
use orc_tools::escalation::{EscalationOutcome, EscalationRequest, EscalationSink};
use orc_tools::transport::NoopTransport;
use orc_tools::{ContextProvider, ToolExecutor, ToolRegistry};

use super::*;
use crate::worker::content::FakeContentGenerator;

struct FakeContextProvider;

#[async_trait]
impl ContextProvider for FakeContextProvider {
    async fn get_context(&self, _tenant_id: TenantId, subject_id: SubjectId) -> Result<SubjectContext, OrchestratorError> {
        Ok(SubjectContext::new(subject_id))
    }

    async fn update_stage(&self, _tenant_id: TenantId, subject_id: SubjectId, _stage: Stage) -> Result<SubjectContext, OrchestratorError> {
        Ok(SubjectContext::new(subject_id))
    }
}

struct FakeEscalationSink;

#[async_trait]
impl EscalationSink for FakeEscalationSink {
    async fn escalate(&self, _request: EscalationRequest) -> Result<EscalationOutcome, OrchestratorError> {
        Ok(EscalationOutcome { thread_id: ThreadId::new(), workflow_paused: false })
    }
}

fn executor() -> ToolExecutor {
    let registry = ToolRegistry::new();
    discover(&registry, Arc::new(NoopTransport), Arc::new(FakeContextProvider), Arc::new(FakeEscalationSink));
    ToolExecutor::new(Arc::new(registry), None)
}

fn task(tenant_id: TenantId, subject_id: SubjectId) -> WorkerTask {
    let mut t = WorkerTask::new(ExecutionId::new(), "worker-1", subject_id, "intro_task", serde_json::json!({}));
    t.payload = serde_json::json!({
        "tenant_id": tenant_id,
        "stage_name": "intro",
        "actions": ["send_intro_message"],
    });
    t
}

#[tokio::test]
async fn sends_email_and_advances_stage_when_subject_has_email() {
    let tenant_id = TenantId::new();
    let subject_id = SubjectId::new();
    let subjects = Arc::new(SubjectStore::new());
    let mut subject = orc_core::Subject::new(subject_id, tenant_id);
    subject.email = Some("lead@example.com".into());
    subjects.upsert(subject);

    let handler = EmailStageHandler::new(Arc::new(FakeContentGenerator::returning("hello")), subjects, Stage::Interested);
    let tools = executor();

    let result = handler.handle(&task(tenant_id, subject_id), &tools).await.unwrap();

    assert_eq!(result.metrics_delta["messages_sent"], serde_json::json!(1));
    assert!(result.missing_tools.is_empty());
    assert_eq!(result.tool_usage.len(), 3);
}

#[tokio::test]
async fn reports_missing_tool_when_subject_has_no_email() {
    let tenant_id = TenantId::new();
    let subject_id = SubjectId::new();
    let subjects = Arc::new(SubjectStore::new());
    subjects.upsert(orc_core::Subject::new(subject_id, tenant_id));

    let handler = EmailStageHandler::new(Arc::new(FakeContentGenerator::returning("hello")), subjects, Stage::Interested);
    let tools = executor();

    let result = handler.handle(&task(tenant_id, subject_id), &tools).await.unwrap();

    assert_eq!(result.missing_tools.len(), 1);
    assert_eq!(result.missing_tools[0].tool, "send_email");
}

#[tokio::test]
async fn content_generation_failure_bubbles_up() {
    let tenant_id = TenantId::new();
    let subject_id = SubjectId::new();
    let subjects = Arc::new(SubjectStore::new());
    subjects.upsert(orc_core::Subject::new(subject_id, tenant_id));

    let handler = EmailStageHandler::new(Arc::new(FakeContentGenerator::failing("llm down")), subjects, Stage::Interested);
    let tools = executor();

    let err = handler.handle(&task(tenant_id, subject_id), &tools).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::TransientToolError { .. }));
}
