// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_a_plain_array_of_decisions() {
    let decisions = parse_decisions("[\"progress-to-next-stage\"]").unwrap();
    assert_eq!(decisions, vec![Decision::ProgressToNextStage]);
}

#[test]
fn parses_a_fenced_array() {
    let decisions = parse_decisions("```json\n[\"continue-current-stage\", \"adjust-workflow\"]\n```").unwrap();
    assert_eq!(decisions, vec![Decision::ContinueCurrentStage, Decision::AdjustWorkflow]);
}

#[test]
fn parses_a_bare_string_as_a_single_element_list() {
    let decisions = parse_decisions("\"complete-workflow\"").unwrap();
    assert_eq!(decisions, vec![Decision::CompleteWorkflow]);
}

#[test]
fn unrecognized_strings_are_dropped_not_fatal() {
    let decisions = parse_decisions("[\"progress-to-next-stage\", \"do-a-backflip\"]").unwrap();
    assert_eq!(decisions, vec![Decision::ProgressToNextStage]);
}

#[test]
fn all_unrecognized_is_an_error() {
    assert!(parse_decisions("[\"do-a-backflip\"]").is_err());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(parse_decisions("not json at all").is_err());
}

#[test]
fn fallback_decision_follows_stage_complete_bit() {
    assert_eq!(fallback_decision(true), vec![Decision::ProgressToNextStage]);
    assert_eq!(fallback_decision(false), vec![Decision::ContinueCurrentStage]);
}

#[tokio::test]
async fn fake_analyzer_returns_configured_decisions() {
    let analyzer = FakeDecisionAnalyzer::returning(vec![Decision::CompleteWorkflow]);
    let request = DecisionRequest {
        goal: "grow revenue".into(),
        purpose: "onboarding".into(),
        current_stage: "intro".into(),
        stage_complete: true,
        metrics: HashMap::new(),
        thresholds: IndexMap::new(),
        available_stages: vec!["intro".into()],
    };
    let decisions = analyzer.analyze(request).await.unwrap();
    assert_eq!(decisions, vec![Decision::CompleteWorkflow]);
}

#[tokio::test]
async fn fake_analyzer_can_simulate_failure() {
    let analyzer = FakeDecisionAnalyzer::failing("planner down");
    let request = DecisionRequest {
        goal: String::new(),
        purpose: String::new(),
        current_stage: "intro".into(),
        stage_complete: false,
        metrics: HashMap::new(),
        thresholds: IndexMap::new(),
        available_stages: vec![],
    };
    assert!(analyzer.analyze(request).await.is_err());
}
