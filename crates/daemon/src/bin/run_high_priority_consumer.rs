// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `run-high-priority-consumer` (§6): the Supervisor's consumer group —
//! `tenant-onboarded` off `events` and `worker-task-completed` off
//! `task_results` (§4.1, §4.2, §4.8).

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use orc_bus::{group, ConsumerGroupConfig};
use orc_daemon::{init_tracing, shutdown, RuntimeConfig};
use orc_orchestrator::supervisor;
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "orc.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let config = RuntimeConfig::load(&args.config)?;
    let state = orc_daemon::wiring::build(config);

    let group_config = ConsumerGroupConfig::new("supervisor", supervisor::subscribed_topics());
    let handle = group::spawn(state.broker.clone(), group_config, state.supervisor.clone(), Arc::new(state.dlq.clone()));

    info!("run-high-priority-consumer started");
    shutdown::wait_for_shutdown_signal().await;
    handle.shutdown().await;
    state.job_queue_handle.shutdown().await;
    info!("run-high-priority-consumer stopped");
    Ok(())
}
