// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Central tool registry (§4.5), ported from `registry.py`'s `ToolRegistry`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, warn};

use crate::tool::{describe, Tool};

#[derive(Debug, Default, Serialize)]
pub struct RegistryStatistics {
    pub total_tools: usize,
    pub available_tools: usize,
    pub unavailable_tools: usize,
    pub tools_by_category: HashMap<String, usize>,
}

/// Registry of all tools available to workers. Tools self-register at
/// `discover()` time; the registry itself holds no opinion on what a tool
/// does.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        let mut tools = self.tools.write();
        if tools.contains_key(&name) {
            warn!(tool = %name, "tool already registered, overwriting");
        }
        debug!(tool = %name, available = tool.check_availability(), "registered tool");
        tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    pub fn tool_exists(&self, name: &str) -> bool {
        self.tools.read().contains_key(name)
    }

    pub fn is_tool_available(&self, name: &str) -> bool {
        self.tools.read().get(name).map(|t| t.check_availability()).unwrap_or(false)
    }

    pub fn get_available(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.read().values().filter(|t| t.check_availability()).cloned().collect()
    }

    pub fn get_missing(&self) -> HashMap<String, String> {
        self.tools
            .read()
            .values()
            .filter(|t| !t.check_availability())
            .map(|t| (t.name().to_string(), "dependencies missing or not configured".to_string()))
            .collect()
    }

    pub fn get_by_category(&self, category: &str) -> Vec<Arc<dyn Tool>> {
        self.tools.read().values().filter(|t| t.category() == category).cloned().collect()
    }

    pub fn schemas(&self, available_only: bool) -> Vec<serde_json::Value> {
        self.tools
            .read()
            .values()
            .filter(|t| !available_only || t.check_availability())
            .map(|t| describe(t.as_ref()))
            .collect()
    }

    pub fn statistics(&self) -> RegistryStatistics {
        let tools = self.tools.read();
        let mut stats = RegistryStatistics { total_tools: tools.len(), ..Default::default() };
        for tool in tools.values() {
            if tool.check_availability() {
                stats.available_tools += 1;
            } else {
                stats.unavailable_tools += 1;
            }
            *stats.tools_by_category.entry(tool.category().to_string()).or_insert(0) += 1;
        }
        stats
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
