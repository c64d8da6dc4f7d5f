// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use indexmap::IndexMap;
use orc_bus::InMemoryBroker;
use orc_core::{SubjectId, TenantId};
use orc_storage::workflow::WorkflowStage;
use orc_storage::WorkflowStore;

use super::*;

fn workflow_with_two_workers(store: &WorkflowStore, tenant_id: TenantId) -> Workflow {
    let mut stages = IndexMap::new();
    stages.insert(
        "intro".to_string(),
        WorkflowStage {
            day: 1,
            actions: vec!["send_intro_message".into()],
            entry_conditions: serde_json::Value::Null,
            exit_conditions: serde_json::Value::Null,
            required_tools: vec!["send_email".into()],
            fallback_actions: vec![],
        },
    );

    store.create_workflow(
        tenant_id,
        vec!["worker-a".into(), "worker-b".into()],
        "onboarding",
        orc_storage::WorkflowType::Sequential,
        chrono::Utc::now(),
        chrono::Utc::now() + chrono::Duration::days(30),
        "grow revenue",
        stages,
        IndexMap::new(),
        vec!["send_email".into()],
        vec![],
        "system",
    )
}

#[tokio::test]
async fn delegates_one_task_per_subject_round_robin() {
    let workflows = WorkflowStore::new();
    let tasks = TaskStore::new();
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let tenant_id = TenantId::new();
    let workflow = workflow_with_two_workers(&workflows, tenant_id);

    let subject_ids: Vec<SubjectId> = (0..4).map(|_| SubjectId::new()).collect();
    let execution = workflows.create_execution(workflow.id, subject_ids.clone()).unwrap();

    let outcome = delegate_stage(&tasks, &broker, &workflow, &execution, "intro").await;
    assert_eq!(outcome, DelegationOutcome::Published { tasks: 4 });

    let created = tasks.tasks_for_execution(execution.id, None);
    assert_eq!(created.len(), 4);
    assert_eq!(created[0].assigned_worker_id, "worker-a");
    assert_eq!(created[1].assigned_worker_id, "worker-b");
    assert_eq!(created[2].assigned_worker_id, "worker-a");
    assert!(created.iter().all(|t| t.task_type == "intro_task"));
}

#[tokio::test]
async fn missing_stage_still_creates_tasks_with_empty_actions() {
    let workflows = WorkflowStore::new();
    let tasks = TaskStore::new();
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let tenant_id = TenantId::new();
    let workflow = workflow_with_two_workers(&workflows, tenant_id);
    let execution = workflows.create_execution(workflow.id, vec![SubjectId::new()]).unwrap();

    let outcome = delegate_stage(&tasks, &broker, &workflow, &execution, "no-such-stage").await;
    assert_eq!(outcome, DelegationOutcome::Published { tasks: 1 });
    assert_eq!(tasks.tasks_for_execution(execution.id, None)[0].task_type, "no-such-stage_task");
}
