// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn stage(day: i64) -> WorkflowStage {
    WorkflowStage { day, ..Default::default() }
}

fn sample_workflow(stages: IndexMap<String, WorkflowStage>) -> Workflow {
    let now = Utc::now();
    Workflow {
        id: WorkflowId::new(),
        tenant_id: TenantId::new(),
        worker_pool_ids: vec!["worker-1".into()],
        purpose: "cohort_conversion".into(),
        workflow_type: WorkflowType::Sequential,
        start_date: now,
        end_date: now,
        goal: "convert leads".into(),
        version: 1,
        stages,
        metric_thresholds: IndexMap::new(),
        available_tools: vec![],
        missing_tools: vec![],
        created_at: now,
        created_by: "MainAgent".into(),
        updated_at: now,
    }
}

#[test]
fn first_stage_is_none_when_empty() {
    let workflow = sample_workflow(IndexMap::new());
    assert_eq!(workflow.first_stage(), None);
}

#[test]
fn first_stage_and_next_stage_follow_insertion_order() {
    let mut stages = IndexMap::new();
    stages.insert("intro".to_string(), stage(1));
    stages.insert("engagement".to_string(), stage(3));
    stages.insert("closing".to_string(), stage(7));
    let workflow = sample_workflow(stages);

    assert_eq!(workflow.first_stage(), Some("intro"));
    assert_eq!(workflow.next_stage_after("intro"), Some("engagement"));
    assert_eq!(workflow.next_stage_after("engagement"), Some("closing"));
    assert_eq!(workflow.next_stage_after("closing"), None);
}

#[test]
fn next_stage_after_unknown_stage_is_none() {
    let mut stages = IndexMap::new();
    stages.insert("intro".to_string(), stage(1));
    let workflow = sample_workflow(stages);
    assert_eq!(workflow.next_stage_after("nonexistent"), None);
}

#[yare::parameterized(
    ge_true = { Comparator::Ge, 5.0, 5.0, true },
    ge_false = { Comparator::Ge, 4.0, 5.0, false },
    le_true = { Comparator::Le, 4.0, 5.0, true },
    gt_true = { Comparator::Gt, 6.0, 5.0, true },
    lt_false = { Comparator::Lt, 6.0, 5.0, false },
    eq_true = { Comparator::Eq, 0.1, 0.1, true },
)]
fn comparator_evaluates(comparator: Comparator, lhs: f64, rhs: f64, expected: bool) {
    assert_eq!(comparator.evaluate(lhs, rhs), expected);
}
