// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Planner contract (§4.8.1): invokes the LLM with a system prompt
//! enforcing a JSON schema, returns `{workflow-type, stages,
//! metric-thresholds, missing-tools}`. Parsing is tolerant of markdown
//! code fences and of the response arriving as an array of text chunks
//! instead of one string. A hardcoded fallback plan is used whenever
//! parsing fails.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use orc_core::OrchestratorError;
use serde::Deserialize;

use orc_storage::workflow::{Comparator, MetricThreshold, MissingToolEntry, WorkflowStage, WorkflowType};

use crate::supervisor::llm_client::LlmHttpClient;
use crate::supervisor::parsing::{join_if_string_array, strip_code_fences};

/// Everything the planner's prompt is built from (§4.8 step 3: "profile,
/// purpose, goal, start/end, subject count, available tools, first-N tool
/// schemas").
pub struct PlanRequest {
    pub profile: serde_json::Value,
    pub purpose: String,
    pub goal: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub subject_count: usize,
    pub available_tools: Vec<String>,
    pub tool_schemas: Vec<serde_json::Value>,
}

/// The planner's output contract (§4.8.1).
#[derive(Debug, Clone, Deserialize)]
pub struct PlanOutput {
    pub workflow_type: WorkflowType,
    pub stages: IndexMap<String, WorkflowStage>,
    pub metric_thresholds: IndexMap<String, MetricThreshold>,
    #[serde(default)]
    pub missing_tools: Vec<MissingToolEntry>,
}

#[async_trait]
pub trait Planner: Send + Sync {
    async fn plan(&self, request: PlanRequest) -> Result<PlanOutput, OrchestratorError>;
}

/// Hardcoded fallback plan (§4.8.1): "a single `intro` stage at day 1
/// using the first three available tools, with one threshold
/// (`engagement-rate ≥ 0.1 → continue`)".
pub fn fallback_plan(available_tools: &[String]) -> PlanOutput {
    let mut stages = IndexMap::new();
    stages.insert(
        "intro".to_string(),
        WorkflowStage {
            day: 1,
            actions: vec!["send_intro_message".to_string()],
            entry_conditions: serde_json::Value::Null,
            exit_conditions: serde_json::Value::Null,
            required_tools: available_tools.iter().take(3).cloned().collect(),
            fallback_actions: Vec::new(),
        },
    );

    let mut metric_thresholds = IndexMap::new();
    metric_thresholds.insert(
        "engagement_rate".to_string(),
        MetricThreshold { threshold: 0.1, comparator: Comparator::Ge, action: "continue-current-stage".to_string(), priority: "low".to_string() },
    );

    PlanOutput { workflow_type: WorkflowType::Sequential, stages, metric_thresholds, missing_tools: Vec::new() }
}

/// Parses the planner's raw response text into a [`PlanOutput`], tolerant
/// of a surrounding code fence and of the response arriving pre-chunked as
/// a JSON array of strings (§4.8.1).
pub fn parse_plan(raw: &str) -> Result<PlanOutput, OrchestratorError> {
    let stripped = strip_code_fences(raw);
    match serde_json::from_str::<PlanOutput>(stripped) {
        Ok(plan) => Ok(plan),
        Err(first_error) => match join_if_string_array(stripped) {
            Some(joined) => {
                let joined = strip_code_fences(&joined);
                serde_json::from_str(joined).map_err(|e| OrchestratorError::PlannerParseError { reason: e.to_string() })
            }
            None => Err(OrchestratorError::PlannerParseError { reason: first_error.to_string() }),
        },
    }
}

/// Production planner: posts the prompt described in §4.8 step 3 to
/// `PLANNER_ENDPOINT` and tolerantly parses the response.
pub struct HttpPlanner {
    client: LlmHttpClient,
}

impl HttpPlanner {
    pub fn new(client: LlmHttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Planner for HttpPlanner {
    async fn plan(&self, request: PlanRequest) -> Result<PlanOutput, OrchestratorError> {
        let prompt = serde_json::json!({
            "mode": "plan",
            "profile": request.profile,
            "purpose": request.purpose,
            "goal": request.goal,
            "start_date": request.start_date,
            "end_date": request.end_date,
            "subject_count": request.subject_count,
            "available_tools": request.available_tools,
            "tool_schemas": request.tool_schemas,
        });

        let text = self.client.complete(prompt).await?;
        parse_plan(&text)
    }
}

/// Test double returning a fixed plan (or failing, to exercise the
/// fallback path).
pub struct FakePlanner {
    plan: Result<PlanOutput, String>,
}

impl FakePlanner {
    pub fn returning(plan: PlanOutput) -> Self {
        Self { plan: Ok(plan) }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self { plan: Err(reason.into()) }
    }
}

#[async_trait]
impl Planner for FakePlanner {
    async fn plan(&self, _request: PlanRequest) -> Result<PlanOutput, OrchestratorError> {
        self.plan.clone().map_err(|reason| OrchestratorError::PlannerParseError { reason })
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
