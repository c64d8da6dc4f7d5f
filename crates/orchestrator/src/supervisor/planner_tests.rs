// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample_plan_json() -> &'static str {
    r#"{
        "workflow_type": "sequential",
        "stages": {
            "intro": {
                "day": 1,
                "actions": ["send_intro_message"],
                "entry_conditions": null,
                "exit_conditions": null,
                "required_tools": ["send_email"],
                "fallback_actions": []
            }
        },
        "metric_thresholds": {
            "engagement_rate": {"threshold": 0.1, "comparator": "ge", "action": "continue-current-stage", "priority": "low"}
        },
        "missing_tools": []
    }"#
}

#[test]
fn parses_a_well_formed_plan() {
    let plan = parse_plan(sample_plan_json()).unwrap();
    assert_eq!(plan.workflow_type, WorkflowType::Sequential);
    assert!(plan.stages.contains_key("intro"));
}

#[test]
fn parses_a_fenced_plan() {
    let fenced = format!("```json\n{}\n```", sample_plan_json());
    let plan = parse_plan(&fenced).unwrap();
    assert_eq!(plan.stages.len(), 1);
}

#[test]
fn parses_a_chunked_array_response() {
    let whole = sample_plan_json();
    let mid = whole.len() / 2;
    let chunks = serde_json::json!([&whole[..mid], &whole[mid..]]).to_string();
    let plan = parse_plan(&chunks).unwrap();
    assert_eq!(plan.workflow_type, WorkflowType::Sequential);
}

#[test]
fn malformed_plan_is_an_error() {
    assert!(parse_plan("not a plan").is_err());
}

#[test]
fn fallback_plan_has_a_single_intro_stage_and_one_threshold() {
    let tools = vec!["send_email".to_string(), "send_whatsapp".to_string(), "send_sms".to_string(), "schedule_call".to_string()];
    let plan = fallback_plan(&tools);

    assert_eq!(plan.stages.len(), 1);
    let intro = &plan.stages["intro"];
    assert_eq!(intro.day, 1);
    assert_eq!(intro.required_tools, vec!["send_email", "send_whatsapp", "send_sms"]);

    assert_eq!(plan.metric_thresholds.len(), 1);
    let threshold = &plan.metric_thresholds["engagement_rate"];
    assert_eq!(threshold.threshold, 0.1);
    assert_eq!(threshold.comparator, Comparator::Ge);
}

#[tokio::test]
async fn fake_planner_returns_configured_plan() {
    let plan = fallback_plan(&[]);
    let planner = FakePlanner::returning(plan.clone());
    let request = PlanRequest {
        profile: serde_json::json!({}),
        purpose: "onboarding".into(),
        goal: "grow revenue".into(),
        start_date: Utc::now(),
        end_date: Utc::now(),
        subject_count: 1,
        available_tools: vec![],
        tool_schemas: vec![],
    };
    let result = planner.plan(request).await.unwrap();
    assert_eq!(result.stages.len(), plan.stages.len());
}

#[tokio::test]
async fn fake_planner_can_simulate_failure() {
    let planner = FakePlanner::failing("endpoint unreachable");
    let request = PlanRequest {
        profile: serde_json::json!({}),
        purpose: String::new(),
        goal: String::new(),
        start_date: Utc::now(),
        end_date: Utc::now(),
        subject_count: 0,
        available_tools: vec![],
        tool_schemas: vec![],
    };
    assert!(planner.plan(request).await.is_err());
}
