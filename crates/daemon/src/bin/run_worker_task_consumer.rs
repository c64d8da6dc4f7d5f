// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `run-worker-task-consumer` (§6): the Worker Executor's consumer group
//! — `worker-task-assigned` off `supervisor_tasks` (§4.1, §4.2, §4.9).

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use orc_bus::{group, ConsumerGroupConfig};
use orc_daemon::{init_tracing, shutdown, RuntimeConfig};
use orc_orchestrator::worker;
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

    let group_config = ConsumerGroupConfig::new("worker-executor", worker::subscribed_topics());
    let handle = group::spawn(state.broker.clone(), group_config, state.worker_executor.clone(), Arc::new(state.dlq.clone()));

    info!("run-worker-task-consumer started");
    shutdown::wait_for_shutdown_signal().await;
    handle.shutdown().await;
    state.job_queue_handle.shutdown().await;
    info!("run-worker-task-consumer stopped");
    Ok(())
}
