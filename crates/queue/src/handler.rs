// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named job handlers, registered by task name (§9 "replace runtime
//! attribute lookup with a registry keyed by string name").

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use orc_core::OrchestratorError;
use parking_lot::RwLock;

#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, args: &serde_json::Value) -> Result<(), OrchestratorError>;
}

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn JobHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, task_name: impl Into<String>, handler: Arc<dyn JobHandler>) {
        self.handlers.write().insert(task_name.into(), handler);
    }

    pub fn get(&self, task_name: &str) -> Option<Arc<dyn JobHandler>> {
        self.handlers.read().get(task_name).cloned()
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
