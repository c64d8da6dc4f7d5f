// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graceful shutdown signal (SIGINT/SIGTERM on unix, Ctrl-C elsewhere):
//! every `orc-daemon` binary awaits this future as the arm that stops its
//! main loop and begins a drain.

use tracing::info;

#[cfg(unix)]
pub async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, starting graceful shutdown"),
        _ = sigint.recv() => info!("received SIGINT, starting graceful shutdown"),
    }
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("received ctrl-c, starting graceful shutdown");
}
