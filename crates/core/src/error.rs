// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error type for the orchestration runtime.
//!
//! One variant per error kind named in the runtime's error handling design;
//! every crate in the workspace returns `OrchestratorError` (or wraps it)
//! rather than `anyhow::Error` from library code.

use thiserror::Error;

/// The runtime's shared error type.
///
/// Carries enough context to log structurally and to decide whether the
/// failing operation should be retried, sent to the DLQ, or surfaced to a
/// human via a conversation thread.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Malformed or out-of-range input caught before any side effect ran.
    #[error("validation error for {field}: {reason}")]
    ValidationError { field: String, reason: String },

    /// A policy check rejected an action (consent, rate limit, quiet hours).
    #[error("policy denied: {reason}")]
    PolicyDenied { reason: String },

    /// A tool call failed in a way expected to succeed on retry (timeout,
    /// transport hiccup, rate limiting upstream).
    #[error("transient tool error calling {tool}: {reason}")]
    TransientToolError { tool: String, reason: String },

    /// A tool call failed in a way that will not succeed on retry.
    #[error("permanent tool error calling {tool}: {reason}")]
    PermanentToolError { tool: String, reason: String },

    /// The requested tool is not registered.
    #[error("tool not found: {tool}")]
    MissingTool { tool: String },

    /// The planner or decision analyzer returned text that could not be
    /// parsed into a usable plan/decision after tolerant-parsing fallbacks.
    #[error("failed to parse planner output: {reason}")]
    PlannerParseError { reason: String },

    /// A worker task exhausted its retry budget and was routed to the DLQ.
    #[error("task {task_id} failed terminally after {attempts} attempts: {reason}")]
    TaskTerminalFailure {
        task_id: String,
        attempts: u32,
        reason: String,
    },

    /// A stage transition was attempted that the stage lattice does not
    /// allow (e.g. skipping ahead, or moving a converted/churned subject).
    #[error("invalid stage progression for subject {subject_id}: {reason}")]
    StageProgressionError { subject_id: String, reason: String },
}

impl OrchestratorError {
    /// Whether the operation that produced this error is expected to
    /// succeed if retried unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrchestratorError::TransientToolError { .. })
    }

    /// Whether this error represents a terminal failure that should stop
    /// retrying and route to the DLQ / surface to a human.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrchestratorError::PermanentToolError { .. }
                | OrchestratorError::MissingTool { .. }
                | OrchestratorError::TaskTerminalFailure { .. }
                | OrchestratorError::StageProgressionError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
