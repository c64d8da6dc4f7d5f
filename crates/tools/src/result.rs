// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Standardized tool execution result, ported from `BaseTool`'s
//! `ToolResult` (§4.5).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub execution_time_ms: f64,
    pub tool_name: String,
    pub timestamp: DateTime<Utc>,
}

impl ToolResult {
    pub fn success(tool_name: impl Into<String>, data: serde_json::Value, execution_time_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            execution_time_ms,
            tool_name: tool_name.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>, execution_time_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            execution_time_ms,
            tool_name: tool_name.into(),
            timestamp: Utc::now(),
        }
    }
}
