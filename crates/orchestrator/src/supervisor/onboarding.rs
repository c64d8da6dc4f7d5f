// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The onboarded flow (§4.8): reacts to a `tenant-onboarded` envelope by
//! planning a workflow, persisting it, creating its first execution, and
//! delegating the first stage.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use orc_bus::Broker;
use orc_core::{OrchestratorError, TenantId};
use orc_storage::workflow::WorkflowStage;
use orc_storage::{MissingToolStore, WorkflowStore};
use orc_tools::{ToolPriority, ToolRegistry};
use tracing::info;

use crate::supervisor::delegate::delegate_stage;
use crate::supervisor::planner::{fallback_plan, PlanRequest, Planner};
use crate::supervisor::tenant_profile::{synthesize_profile, TenantProfileProvider};

/// Runs the six-step onboarded flow (§4.8) to completion. `tenant_id` and
/// `payload` come straight off the `tenant-onboarded` envelope.
pub async fn handle_tenant_onboarded(
    tenant_id: TenantId,
    payload: &serde_json::Value,
    profile_provider: &dyn TenantProfileProvider,
    planner: &dyn Planner,
    tool_registry: &ToolRegistry,
    workflows: &WorkflowStore,
    missing_tools: &MissingToolStore,
    task_store: &orc_storage::TaskStore,
    broker: &Arc<dyn Broker>,
) -> Result<(), OrchestratorError> {
    // 1. Fetch tenant profile, falling back to synthesis from the event payload.
    let profile = match profile_provider.fetch_profile(tenant_id).await {
        Some(profile) => profile,
        None => synthesize_profile(tenant_id, payload, Utc::now()),
    };

    // 2. Snapshot available tools and their schemas.
    let available_tools: Vec<String> = tool_registry.get_available().iter().map(|t| t.name().to_string()).collect();
    let tool_schemas = tool_registry.schemas(true);

    // 3. Call the planner; fall back to the hardcoded plan on failure.
    let request = PlanRequest {
        profile: serde_json::json!({"tenant_id": tenant_id}),
        purpose: profile.purpose.clone(),
        goal: profile.goal.clone(),
        start_date: profile.start_date,
        end_date: profile.end_date,
        subject_count: profile.subject_ids.len(),
        available_tools: available_tools.clone(),
        tool_schemas,
    };
    let plan = match planner.plan(request).await {
        Ok(plan) => plan,
        Err(e) => {
            info!(tenant_id = %tenant_id, error = %e, "planner failed, using fallback plan");
            fallback_plan(&available_tools)
        }
    };

    // 4. Persist workflow v1, create its execution.
    let stages: indexmap::IndexMap<String, WorkflowStage> = plan.stages;
    let workflow = workflows.create_workflow(
        tenant_id,
        profile.worker_pool_ids.clone(),
        profile.purpose.clone(),
        plan.workflow_type,
        profile.start_date,
        profile.end_date,
        profile.goal.clone(),
        stages,
        plan.metric_thresholds,
        available_tools,
        plan.missing_tools.clone(),
        "supervisor",
    );
    let execution = workflows.create_execution(workflow.id, profile.subject_ids.clone())?;

    // 5. Log declared-missing tools to the collapsing store.
    for missing in &plan.missing_tools {
        missing_tools.log_missing_tool(
            missing.name.clone(),
            missing.reason.clone(),
            priority_from_str(&missing.priority),
            None,
            Some(tenant_id),
            None,
            missing.alternative_action.clone(),
        );
    }

    // 6. Delegate the initial stage.
    let Some(first_stage) = workflow.first_stage() else {
        return Err(OrchestratorError::StageProgressionError {
            subject_id: tenant_id.to_string(),
            reason: "planned workflow has no stages".into(),
        });
    };
    let outcome = delegate_stage(task_store, broker, &workflow, &execution, first_stage).await;
    info!(tenant_id = %tenant_id, workflow_id = %workflow.id, execution_id = %execution.id, ?outcome, "delegated initial stage");

    Ok(())
}

fn priority_from_str(s: &str) -> ToolPriority {
    match s {
        "critical" => ToolPriority::Critical,
        "high" => ToolPriority::High,
        "medium" => ToolPriority::Medium,
        _ => ToolPriority::Low,
    }
}

#[cfg(test)]
#[path = "onboarding_tests.rs"]
mod tests;
