// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use async_trait::async_trait;
use orc_bus::InMemoryBroker;
use orc_core::{OrchestratorError, SubjectContext, SubjectId, ThreadId};
use orc_storage::{MissingToolStore, TaskStore, WorkflowStore};
use orc_tools::builtins::discover;
use orc_tools::escalation::{EscalationOutcome, EscalationRequest, EscalationSink};
use orc_tools::transport::NoopTransport;
use orc_tools::ContextProvider;

use super::*;
use crate::supervisor::planner::fallback_plan;
use crate::supervisor::tenant_profile::FakeTenantProfileProvider;

struct FakeContextProvider;

#[async_trait]
impl ContextProvider for FakeContextProvider {
    async fn get_context(&self, _tenant_id: TenantId, subject_id: SubjectId) -> Result<SubjectContext, OrchestratorError> {
        Ok(SubjectContext::new(subject_id))
    }

    async fn update_stage(&self, _tenant_id: TenantId, subject_id: SubjectId, _stage: orc_core::Stage) -> Result<SubjectContext, OrchestratorError> {
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

fn registry_with_builtins() -> ToolRegistry {
    let registry = ToolRegistry::new();
    discover(&registry, Arc::new(NoopTransport), Arc::new(FakeContextProvider), Arc::new(FakeEscalationSink));
    registry
}

#[tokio::test]
async fn onboarding_persists_workflow_and_delegates_first_stage() {
    let workflows = WorkflowStore::new();
    let tasks = TaskStore::new();
    let missing = MissingToolStore::new();
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let registry = registry_with_builtins();
    let tenant_id = TenantId::new();

    let subjects = vec![SubjectId::new(), SubjectId::new(), SubjectId::new()];
    let payload = serde_json::json!({
        "purpose": "sales",
        "goal": "convert 3 subjects",
        "worker_agent_ids": ["worker-1"],
        "subjects": subjects,
    });

    let profile_provider = FakeTenantProfileProvider::empty();
    let plan = fallback_plan(&["send_email".to_string(), "send_whatsapp".to_string(), "send_sms".to_string()]);
    let planner = crate::supervisor::planner::FakePlanner::returning(plan);

    handle_tenant_onboarded(tenant_id, &payload, &profile_provider, &planner, &registry, &workflows, &missing, &tasks, &broker)
        .await
        .unwrap();

    let all_tasks = tasks.task_stats(None);
    assert_eq!(all_tasks.pending, 3);
}

#[tokio::test]
async fn onboarding_falls_back_when_planner_fails() {
    let workflows = WorkflowStore::new();
    let tasks = TaskStore::new();
    let missing = MissingToolStore::new();
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let registry = registry_with_builtins();
    let tenant_id = TenantId::new();

    let payload = serde_json::json!({
        "purpose": "sales",
        "goal": "convert 3 subjects",
        "worker_agent_ids": ["worker-1"],
        "subjects": [SubjectId::new()],
    });

    let profile_provider = FakeTenantProfileProvider::empty();
    let planner = crate::supervisor::planner::FakePlanner::failing("endpoint unreachable");

    handle_tenant_onboarded(tenant_id, &payload, &profile_provider, &planner, &registry, &workflows, &missing, &tasks, &broker)
        .await
        .unwrap();

    let stats = tasks.task_stats(None);
    assert_eq!(stats.pending, 1);
}

#[tokio::test]
async fn onboarding_logs_planner_declared_missing_tools() {
    let workflows = WorkflowStore::new();
    let tasks = TaskStore::new();
    let missing = MissingToolStore::new();
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let registry = registry_with_builtins();
    let tenant_id = TenantId::new();

    let payload = serde_json::json!({
        "purpose": "sales",
        "goal": "convert",
        "worker_agent_ids": ["worker-1"],
        "subjects": [SubjectId::new()],
    });

    let profile_provider = FakeTenantProfileProvider::empty();
    let mut plan = fallback_plan(&["send_email".to_string()]);
    plan.missing_tools = vec![orc_storage::workflow::MissingToolEntry {
        name: "send_linkedin_dm".into(),
        reason: "no provider configured".into(),
        alternative_action: Some("send_email".into()),
        priority: "high".into(),
    }];
    let planner = crate::supervisor::planner::FakePlanner::returning(plan);

    handle_tenant_onboarded(tenant_id, &payload, &profile_provider, &planner, &registry, &workflows, &missing, &tasks, &broker)
        .await
        .unwrap();

    let top = missing.get_top_requested(10);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].tool_name, "send_linkedin_dm");
}
