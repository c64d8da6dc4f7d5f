// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! orc-daemon: the four long-running processes the runtime ships as (§6)
//! — `run-ingress`, `run-high-priority-consumer`,
//! `run-worker-task-consumer`, `run-scheduler` — plus the shared config
//! and wiring they're all built from.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod shutdown;
pub mod wiring;

pub use config::RuntimeConfig;
pub use wiring::AppState;

/// Initializes the process-wide tracing subscriber (§9 "structured
/// logging"). Every binary calls this once before doing anything else.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
}
