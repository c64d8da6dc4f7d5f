// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

struct EchoHandler;

#[async_trait]
impl JobHandler for EchoHandler {
    async fn handle(&self, _args: &serde_json::Value) -> Result<(), OrchestratorError> {
        Ok(())
    }
}

#[test]
fn registered_handler_is_retrievable_by_name() {
    let registry = HandlerRegistry::new();
    registry.register("invoke_agent", Arc::new(EchoHandler));
    assert!(registry.get("invoke_agent").is_some());
}

#[test]
fn unregistered_name_returns_none() {
    let registry = HandlerRegistry::new();
    assert!(registry.get("nope").is_none());
}
