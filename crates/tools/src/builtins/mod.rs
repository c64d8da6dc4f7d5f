// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete tool implementations, one submodule per channel/category,
//! mirroring `app/domain/tools/{communication,data}.py`.

pub mod call;
pub mod data;
pub mod email;
pub mod escalation;
pub mod sms;
pub mod whatsapp;

use std::sync::Arc;

use crate::context_provider::ContextProvider;
use crate::escalation::EscalationSink;
use crate::registry::ToolRegistry;
use crate::transport::ChannelTransport;

/// Registers every builtin tool, mirroring `registry.py`'s
/// `_discover_tools` self-registration step.
pub fn discover(
    registry: &ToolRegistry,
    transport: Arc<dyn ChannelTransport>,
    context_provider: Arc<dyn ContextProvider>,
    escalation_sink: Arc<dyn EscalationSink>,
) {
    registry.register(Arc::new(email::SendEmailTool::new(Arc::clone(&transport))));
    registry.register(Arc::new(whatsapp::SendWhatsappTool::new(Arc::clone(&transport))));
    registry.register(Arc::new(sms::SendSmsTool::new(Arc::clone(&transport))));
    registry.register(Arc::new(call::ScheduleCallTool::new(transport)));
    registry.register(Arc::new(data::GetSubjectContextTool::new(Arc::clone(&context_provider))));
    registry.register(Arc::new(data::UpdateSubjectStageTool::new(context_provider)));
    registry.register(Arc::new(data::SearchFaqTool));
    registry.register(Arc::new(escalation::EscalateToHumanTool::new(escalation_sink)));
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
