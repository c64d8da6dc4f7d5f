// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `run-scheduler` (§6): periodic DLQ housekeeping — stale-entry
//! retirement and bounded re-processing (§4.3, §8 property 8) — and
//! conversation-thread timeout sweeping (§4.10 "(any non-terminal)
//! timeout -> abandoned").

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use orc_daemon::{init_tracing, shutdown, RuntimeConfig};
use orc_queue::reprocess;
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "orc.toml")]
    config: PathBuf,

    /// How often to sweep the DLQ (§4.3 "re-processing is a supervised,
    /// periodic action").
    #[arg(long, default_value = "60")]
    interval_seconds: u64,

    /// Max DLQ entries re-enqueued per sweep.
    #[arg(long, default_value = "50")]
    batch_limit: usize,

    /// Retry cap applied to re-enqueued tasks, lower than the original
    /// cap so a systemic failure does not loop forever.
    #[arg(long, default_value = "1")]
    reduced_max_retries: u32,

    /// A conversation thread idle this long with no resolution is
    /// abandoned (§4.10). Default 24h.
    #[arg(long, default_value = "86400")]
    thread_timeout_seconds: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let config = RuntimeConfig::load(&args.config)?;
    let state = orc_daemon::wiring::build(config);

    info!(interval_seconds = args.interval_seconds, "run-scheduler started");

    let thread_timeout = chrono::Duration::seconds(args.thread_timeout_seconds);
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_seconds));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                reprocess(&state.jobs, &state.dlq, args.batch_limit, args.reduced_max_retries);
                let stats = state.dlq.stats();
                info!(?stats, "dlq sweep complete");

                let now = Utc::now();
                let mut abandoned = 0u64;
                for thread in state.threads.active_threads() {
                    if now - thread.updated_at >= thread_timeout {
                        if state.threads.abandon(thread.id).is_ok() {
                            abandoned += 1;
                        }
                    }
                }
                if abandoned > 0 {
                    info!(abandoned, "conversation thread timeout sweep complete");
                }
            }
            _ = shutdown::wait_for_shutdown_signal() => break,
        }
    }

    state.job_queue_handle.shutdown().await;
    info!("run-scheduler stopped");
    Ok(())
}
