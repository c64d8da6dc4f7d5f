// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use orc_core::{ExecutionId, SubjectId, TaskId, WorkflowId};

#[test]
fn workflow_not_found_display() {
    let id = WorkflowId::new();
    let err = StorageError::WorkflowNotFound(id);
    assert_eq!(err.to_string(), format!("workflow not found: {id}"));
}

#[test]
fn version_not_found_display() {
    let workflow_id = WorkflowId::new();
    let err = StorageError::VersionNotFound { workflow_id, version: 3 };
    assert_eq!(err.to_string(), format!("version 3 not found for workflow {workflow_id}"));
}

#[test]
fn execution_not_found_display() {
    let id = ExecutionId::new();
    assert_eq!(StorageError::ExecutionNotFound(id).to_string(), format!("execution not found: {id}"));
}

#[test]
fn task_not_found_display() {
    let id = TaskId::new();
    assert_eq!(StorageError::TaskNotFound(id).to_string(), format!("task not found: {id}"));
}

#[test]
fn subject_not_found_display() {
    let id = SubjectId::new();
    assert_eq!(StorageError::SubjectNotFound(id).to_string(), format!("subject not found: {id}"));
}
