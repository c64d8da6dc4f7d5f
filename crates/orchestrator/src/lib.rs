// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! orc-orchestrator: the Supervisor (C8) and Worker Executor (C9) — the
//! plan/delegate/react feedback loop and the per-task-type dispatch that
//! carries it out.

pub mod result_contract;
pub mod supervisor;
pub mod worker;

pub use result_contract::{MissingToolReport, TaskResultPayload, ToolUsageReport};
pub use supervisor::{Supervisor, SupervisorContext};
pub use worker::{WorkerContext, WorkerExecutor};
