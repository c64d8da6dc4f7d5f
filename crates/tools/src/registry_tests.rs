// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use orc_core::OrchestratorError;

struct StubTool {
    name: &'static str,
    category: &'static str,
    available: bool,
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "stub"
    }
    fn category(&self) -> &str {
        self.category
    }
    fn schema(&self) -> serde_json::Value {
        serde_json::json!({})
    }
    fn check_availability(&self) -> bool {
        self.available
    }
    async fn execute(&self, _params: serde_json::Value) -> Result<serde_json::Value, OrchestratorError> {
        Ok(serde_json::json!({}))
    }
}

#[test]
fn get_returns_registered_tool() {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(StubTool { name: "send_email", category: "communication", available: true }));
    assert!(registry.get("send_email").is_some());
    assert!(registry.tool_exists("send_email"));
}

#[test]
fn unavailable_tool_excluded_from_available_list() {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(StubTool { name: "send_email", category: "communication", available: true }));
    registry.register(Arc::new(StubTool { name: "send_fax", category: "communication", available: false }));

    let available = registry.get_available();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].name(), "send_email");
    assert!(!registry.is_tool_available("send_fax"));
}

#[test]
fn get_missing_reports_unavailable_tools() {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(StubTool { name: "send_fax", category: "communication", available: false }));
    let missing = registry.get_missing();
    assert!(missing.contains_key("send_fax"));
}

#[test]
fn by_category_filters() {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(StubTool { name: "send_email", category: "communication", available: true }));
    registry.register(Arc::new(StubTool { name: "get_context", category: "data", available: true }));
    assert_eq!(registry.get_by_category("data").len(), 1);
}

#[test]
fn statistics_counts_by_category_and_availability() {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(StubTool { name: "send_email", category: "communication", available: true }));
    registry.register(Arc::new(StubTool { name: "send_fax", category: "communication", available: false }));
    let stats = registry.statistics();
    assert_eq!(stats.total_tools, 2);
    assert_eq!(stats.available_tools, 1);
    assert_eq!(stats.unavailable_tools, 1);
    assert_eq!(stats.tools_by_category.get("communication"), Some(&2));
}

#[test]
fn re_registering_same_name_overwrites() {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(StubTool { name: "send_email", category: "communication", available: true }));
    registry.register(Arc::new(StubTool { name: "send_email", category: "communication", available: false }));
    assert!(!registry.is_tool_available("send_email"));
    assert_eq!(registry.statistics().total_tools, 1);
}
