// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decision analyzer contract (§4.8.3): builds a prompt from goal, purpose,
//! current stage, stage-complete bit, metrics, and thresholds; returns a
//! list of decisions. Parsing is tolerant the same way the planner's is
//! (§4.8.1), with the same code-fence/array normalization.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use orc_core::OrchestratorError;
use orc_storage::workflow::MetricThreshold;

use crate::supervisor::llm_client::LlmHttpClient;
use crate::supervisor::parsing::strip_code_fences;

/// One of the four outcomes the supervisor's task-completed flow can act
/// on (§4.8 "Decisions ∈ {progress-to-next-stage, continue-current-stage,
/// adjust-workflow, complete-workflow}").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    ProgressToNextStage,
    ContinueCurrentStage,
    AdjustWorkflow,
    CompleteWorkflow,
}

orc_core::simple_display! {
    Decision {
        ProgressToNextStage => "progress-to-next-stage",
        ContinueCurrentStage => "continue-current-stage",
        AdjustWorkflow => "adjust-workflow",
        CompleteWorkflow => "complete-workflow",
    }
}

impl Decision {
    fn from_str(s: &str) -> Option<Decision> {
        match s.trim() {
            "progress-to-next-stage" => Some(Decision::ProgressToNextStage),
            "continue-current-stage" => Some(Decision::ContinueCurrentStage),
            "adjust-workflow" => Some(Decision::AdjustWorkflow),
            "complete-workflow" => Some(Decision::CompleteWorkflow),
            _ => None,
        }
    }
}

/// Everything the decision analyzer's prompt is built from (§4.8.3).
pub struct DecisionRequest {
    pub goal: String,
    pub purpose: String,
    pub current_stage: String,
    pub stage_complete: bool,
    pub metrics: HashMap<String, serde_json::Value>,
    pub thresholds: IndexMap<String, MetricThreshold>,
    pub available_stages: Vec<String>,
}

#[async_trait]
pub trait DecisionAnalyzer: Send + Sync {
    async fn analyze(&self, request: DecisionRequest) -> Result<Vec<Decision>, OrchestratorError>;
}

/// Fallback used whenever the analyzer fails or returns something
/// unparseable (§4.8.3): "if stage complete → progress-to-next-stage, else
/// → continue-current-stage".
pub fn fallback_decision(stage_complete: bool) -> Vec<Decision> {
    if stage_complete {
        vec![Decision::ProgressToNextStage]
    } else {
        vec![Decision::ContinueCurrentStage]
    }
}

/// Parses the analyzer's raw response text into a list of [`Decision`]s,
/// tolerant of markdown code fences and of a bare string where an array
/// was expected. Unrecognized decision strings are dropped rather than
/// failing the whole batch, since a partial valid list is still useful.
pub fn parse_decisions(raw: &str) -> Result<Vec<Decision>, OrchestratorError> {
    let stripped = strip_code_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(stripped).map_err(|e| OrchestratorError::PlannerParseError { reason: e.to_string() })?;

    let strings: Vec<String> = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        serde_json::Value::String(s) => vec![s],
        other => return Err(OrchestratorError::PlannerParseError { reason: format!("expected array or string, got {other}") }),
    };

    let decisions: Vec<Decision> = strings.iter().filter_map(|s| Decision::from_str(s)).collect();
    if decisions.is_empty() {
        return Err(OrchestratorError::PlannerParseError { reason: "no recognizable decisions in response".into() });
    }
    Ok(decisions)
}

/// Production decision analyzer: posts the prompt described in §4.8.3 to
/// the same planner endpoint and tolerantly parses the response.
pub struct HttpDecisionAnalyzer {
    client: LlmHttpClient,
}

impl HttpDecisionAnalyzer {
    pub fn new(client: LlmHttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DecisionAnalyzer for HttpDecisionAnalyzer {
    async fn analyze(&self, request: DecisionRequest) -> Result<Vec<Decision>, OrchestratorError> {
        let prompt = serde_json::json!({
            "mode": "decision",
            "goal": request.goal,
            "purpose": request.purpose,
            "current_stage": request.current_stage,
            "stage_complete": request.stage_complete,
            "metrics": request.metrics,
            "thresholds": request.thresholds,
            "available_stages": request.available_stages,
        });

        let text = self.client.complete(prompt).await?;
        parse_decisions(&text)
    }
}

/// Test double returning a fixed decision list (or the fallback, via
/// [`FakeDecisionAnalyzer::failing`]).
pub struct FakeDecisionAnalyzer {
    decisions: Result<Vec<Decision>, String>,
}

impl FakeDecisionAnalyzer {
    pub fn returning(decisions: Vec<Decision>) -> Self {
        Self { decisions: Ok(decisions) }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self { decisions: Err(reason.into()) }
    }
}

#[async_trait]
impl DecisionAnalyzer for FakeDecisionAnalyzer {
    async fn analyze(&self, _request: DecisionRequest) -> Result<Vec<Decision>, OrchestratorError> {
        self.decisions.clone().map_err(|reason| OrchestratorError::PlannerParseError { reason })
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
