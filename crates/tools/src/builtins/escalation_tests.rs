// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use orc_core::ThreadId;

struct FakeSink;

#[async_trait]
impl EscalationSink for FakeSink {
    async fn escalate(&self, request: EscalationRequest) -> Result<crate::escalation::EscalationOutcome, OrchestratorError> {
        Ok(crate::escalation::EscalationOutcome {
            thread_id: ThreadId::new(),
            workflow_paused: request.execution_id.is_some(),
        })
    }
}

#[tokio::test]
async fn escalation_pauses_workflow_when_execution_id_present() {
    let tool = EscalateToHumanTool::new(Arc::new(FakeSink));
    let result = tool
        .execute(serde_json::json!({
            "tenant_id": TenantId::new().to_string(),
            "subject_id": SubjectId::new().to_string(),
            "execution_id": ExecutionId::new().to_string(),
            "reason": "complex_question",
            "context": {},
        }))
        .await
        .unwrap();
    assert_eq!(result["workflow_paused"], true);
}

#[tokio::test]
async fn escalation_without_execution_id_does_not_pause() {
    let tool = EscalateToHumanTool::new(Arc::new(FakeSink));
    let result = tool
        .execute(serde_json::json!({
            "tenant_id": TenantId::new().to_string(),
            "subject_id": SubjectId::new().to_string(),
            "reason": "complaint",
            "context": {},
        }))
        .await
        .unwrap();
    assert_eq!(result["workflow_paused"], false);
}
