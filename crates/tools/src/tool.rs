// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Tool` trait (§4.5), ported from `BaseTool`.

use async_trait::async_trait;
use orc_core::OrchestratorError;

/// A capability agents can invoke during worker execution. Unlike a
/// `PlannedAction` (scheduled for later), a tool executes immediately.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;

    /// JSON Schema for parameters (OpenAPI-compatible).
    fn schema(&self) -> serde_json::Value;

    fn timeout_seconds(&self) -> u64 {
        30
    }

    fn max_retries(&self) -> u32 {
        2
    }

    /// Whether the tool's dependencies (credentials, transports) are
    /// configured. Re-checked by [`crate::registry::ToolRegistry::refresh_availability`].
    fn check_availability(&self) -> bool {
        true
    }

    /// Execute the tool with validated parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError>;
}

/// Combined schema + metadata for LLM tool binding (`get_schema`).
pub fn describe(tool: &dyn Tool) -> serde_json::Value {
    serde_json::json!({
        "name": tool.name(),
        "description": tool.description(),
        "category": tool.category(),
        "parameters": tool.schema(),
        "timeout_seconds": tool.timeout_seconds(),
        "is_available": tool.check_availability(),
    })
}
