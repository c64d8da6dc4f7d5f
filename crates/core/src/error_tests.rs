// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn transient_tool_error_is_retryable() {
    let err = OrchestratorError::TransientToolError {
        tool: "send_email".into(),
        reason: "timeout".into(),
    };
    assert!(err.is_retryable());
    assert!(!err.is_terminal());
}

#[test]
fn permanent_tool_error_is_terminal_not_retryable() {
    let err = OrchestratorError::PermanentToolError {
        tool: "send_email".into(),
        reason: "invalid address".into(),
    };
    assert!(!err.is_retryable());
    assert!(err.is_terminal());
}

#[test]
fn missing_tool_is_terminal() {
    let err = OrchestratorError::MissingTool {
        tool: "send_carrier_pigeon".into(),
    };
    assert!(err.is_terminal());
    assert!(!err.is_retryable());
}

#[test]
fn validation_error_is_neither() {
    let err = OrchestratorError::ValidationError {
        field: "email".into(),
        reason: "missing @".into(),
    };
    assert!(!err.is_retryable());
    assert!(!err.is_terminal());
}

#[test]
fn task_terminal_failure_message_includes_attempts() {
    let err = OrchestratorError::TaskTerminalFailure {
        task_id: "tsk-abc".into(),
        attempts: 3,
        reason: "dlq".into(),
    };
    assert!(err.to_string().contains("3 attempts"));
    assert!(err.is_terminal());
}

#[test]
fn stage_progression_error_is_terminal() {
    let err = OrchestratorError::StageProgressionError {
        subject_id: "sub-1".into(),
        reason: "cannot move from churned".into(),
    };
    assert!(err.is_terminal());
}
