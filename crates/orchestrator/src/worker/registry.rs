// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task-type handler registry (§9 "replace runtime attribute lookup
//! with a registry keyed by string name"), mirroring `orc-queue`'s
//! `HandlerRegistry` one layer up: a `TaskHandler` runs a [`WorkerTask`]
//! to completion and returns the result payload the supervisor will
//! later fold into execution metrics.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use orc_core::OrchestratorError;
use orc_storage::WorkerTask;
use orc_tools::ToolExecutor;
use parking_lot::RwLock;

use crate::result_contract::TaskResultPayload;

#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(&self, task: &WorkerTask, tools: &ToolExecutor) -> Result<TaskResultPayload, OrchestratorError>;
}

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn TaskHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, task_type: impl Into<String>, handler: Arc<dyn TaskHandler>) {
        self.handlers.write().insert(task_type.into(), handler);
    }

    pub fn get(&self, task_type: &str) -> Option<Arc<dyn TaskHandler>> {
        self.handlers.read().get(task_type).cloned()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
