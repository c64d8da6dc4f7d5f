// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage-local error type, ported from the `ValueError(f"... not found")`
//! raises scattered through `workflow/service.py` and `tasks/service.py`.

use orc_core::{ExecutionId, SubjectId, TaskId, WorkflowId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),

    #[error("version {version} not found for workflow {workflow_id}")]
    VersionNotFound { workflow_id: WorkflowId, version: u32 },

    #[error("execution not found: {0}")]
    ExecutionNotFound(ExecutionId),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("subject not found: {0}")]
    SubjectNotFound(SubjectId),
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
