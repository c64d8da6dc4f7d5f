// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool execution with timeout, retry, and policy validation (§4.5),
//! ported from `executor.py`'s `ToolExecutor`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use orc_core::{Subject, TenantId};
use orc_policy::PolicyEngine;
use tracing::{info, warn};

use crate::registry::ToolRegistry;
use crate::result::ToolResult;

#[derive(Debug, thiserror::Error)]
pub enum ToolExecutionError {
    #[error("tool '{0}' not found in registry")]
    NotFound(String),
    #[error("tool '{0}' is registered but unavailable")]
    Unavailable(String),
}

pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    policy: Option<Arc<PolicyEngine>>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>, policy: Option<Arc<PolicyEngine>>) -> Self {
        Self { registry, policy }
    }

    /// Execute a tool with safety checks. `tenant_id`/`subject` are only
    /// used for policy validation when a [`PolicyEngine`] is configured.
    pub async fn execute(
        &self,
        tool_name: &str,
        tenant_id: Option<TenantId>,
        subject: Option<&Subject>,
        params: serde_json::Value,
    ) -> Result<ToolResult, ToolExecutionError> {
        let start = Instant::now();

        let tool = self.registry.get(tool_name).ok_or_else(|| ToolExecutionError::NotFound(tool_name.to_string()))?;
        if !tool.check_availability() {
            return Err(ToolExecutionError::Unavailable(tool_name.to_string()));
        }

        if let (Some(policy), Some(tenant_id), Some(subject)) = (&self.policy, tenant_id, subject) {
            let decision = policy.validate_tool_call(tenant_id, subject.id, subject, tool_name, params.clone());
            if !decision.approved {
                let reason = decision.reason().unwrap_or_default();
                warn!(tool = tool_name, %reason, "tool execution blocked by policy");
                return Ok(ToolResult::failure(
                    tool_name,
                    format!("Policy violation: {reason}"),
                    start.elapsed().as_secs_f64() * 1000.0,
                ));
            }
        }

        let max_retries = tool.max_retries();
        let timeout = Duration::from_secs(tool.timeout_seconds());
        let mut last_error = String::from("tool execution failed");

        for attempt in 0..=max_retries {
            match tokio::time::timeout(timeout, tool.execute(params.clone())).await {
                Ok(Ok(data)) => {
                    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                    info!(tool = tool_name, attempt = attempt + 1, execution_time_ms = elapsed, "tool executed successfully");
                    return Ok(ToolResult::success(tool_name, data, elapsed));
                }
                Ok(Err(err)) => {
                    last_error = err.to_string();
                    warn!(tool = tool_name, attempt = attempt + 1, error = %last_error, "tool execution error");
                }
                Err(_) => {
                    last_error = format!("tool execution timed out after {} seconds", tool.timeout_seconds());
                    warn!(tool = tool_name, attempt = attempt + 1, "tool execution timeout");
                }
            }
        }

        Ok(ToolResult::failure(tool_name, last_error, start.elapsed().as_secs_f64() * 1000.0))
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
