// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `run-ingress` (§6): the webhook/admin HTTP surface in front of
//! [`orc_ingress::IngressService`]. The surface itself is reference only
//! (§6 "HTTP surface (reference only; not the core)" scopes the admin
//! API, not this listener — ingestion is this binary's entire job); the
//! core is the ingest/materialize/enqueue/publish pipeline it calls into.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use clap::Parser;
use orc_core::{Channel, EventType, SubjectId, TenantId, ThreadId};
use orc_daemon::wiring::AppState;
use orc_daemon::{init_tracing, shutdown, RuntimeConfig};
use orc_ingress::SubjectHandles;
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
struct Args {
    /// Path to the TOML config file (§9 "global settings singleton").
    #[arg(long, default_value = "orc.toml")]
    config: PathBuf,

    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    distinct_id: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    status: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AdminEventPayload {
    subject_id: String,
    event_type: EventType,
    #[serde(default = "default_source")]
    source: String,
    #[serde(default)]
    payload: serde_json::Value,
}

fn default_source() -> String {
    "admin".to_string()
}

async fn webhook_handler(State(state): State<Arc<AppState>>, Path((tenant_id, channel)): Path<(String, String)>, Json(body): Json<WebhookPayload>) -> StatusCode {
    let tenant_id: TenantId = tenant_id.as_str().into();
    let channel = match channel.as_str() {
        "email" => Channel::Email,
        "whatsapp" => Channel::Whatsapp,
        "sms" => Channel::Sms,
        "call" => Channel::Call,
        other => {
            warn!(channel = other, "webhook for unknown channel rejected");
            return StatusCode::BAD_REQUEST;
        }
    };

    let handles = SubjectHandles { distinct_id: body.distinct_id.as_deref(), email: body.email.as_deref(), phone: body.phone.as_deref() };

    match state.ingress.ingest_webhook_event(tenant_id, channel, handles, &body.status, body.payload, Utc::now()).await {
        Ok(outcome) => {
            info!(event_id = %outcome.event_id, was_duplicate = outcome.was_duplicate, "webhook event ingested");
            StatusCode::ACCEPTED
        }
        Err(e) => {
            error!(error = %e, "webhook ingest failed");
            StatusCode::BAD_REQUEST
        }
    }
}

async fn admin_event_handler(State(state): State<Arc<AppState>>, Path(tenant_id): Path<String>, Json(body): Json<AdminEventPayload>) -> StatusCode {
    let tenant_id: TenantId = tenant_id.as_str().into();
    let subject_id: SubjectId = body.subject_id.as_str().into();

    match state.ingress.ingest_admin_event(tenant_id, subject_id, body.event_type, body.source, body.payload, Utc::now()).await {
        Ok(outcome) => {
            info!(event_id = %outcome.event_id, "admin event ingested");
            StatusCode::ACCEPTED
        }
        Err(e) => {
            error!(error = %e, "admin ingest failed");
            StatusCode::BAD_REQUEST
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResolveThreadPayload {
    resolution: String,
    resolved_by: String,
    #[serde(default)]
    resume: bool,
}

/// Resolve a conversation thread (§4.10 "resolve requires a payload with
/// resolution details and a resolved-by id"). With `resume: true`, also
/// moves the thread to `resumed` and, if it carries a linked execution,
/// resumes that workflow — the only path by which §4.10's
/// `resolved ──(resume=true)──> resumed` edge and the workflow's matching
/// `resume_workflow` call are reachable in the running system.
async fn resolve_thread_handler(State(state): State<Arc<AppState>>, Path(thread_id): Path<String>, Json(body): Json<ResolveThreadPayload>) -> StatusCode {
    let thread_id: ThreadId = thread_id.as_str().into();

    let thread = match state.threads.resolve(thread_id, body.resolution, body.resolved_by) {
        Ok(thread) => thread,
        Err(e) => {
            error!(error = %e, "thread resolve failed");
            return StatusCode::BAD_REQUEST;
        }
    };

    if !body.resume {
        return StatusCode::OK;
    }

    if let Some(execution_id) = thread.execution_id {
        if let Err(e) = state.workflows.resume_workflow(execution_id, format!("thread {thread_id} resolved and resumed")) {
            error!(error = %e, "workflow resume failed after thread resolve");
            return StatusCode::BAD_REQUEST;
        }
    }

    match state.threads.mark_resumed(thread_id) {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            error!(error = %e, "thread resume failed");
            StatusCode::BAD_REQUEST
        }
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let config = RuntimeConfig::load(&args.config)?;
    let state = Arc::new(orc_daemon::wiring::build(config));

    let app = Router::new()
        .route("/healthz", axum::routing::get(healthz))
        .route("/webhooks/{tenant_id}/{channel}", post(webhook_handler))
        .route("/admin/tenants/{tenant_id}/events", post(admin_event_handler))
        .route("/admin/threads/{thread_id}/resolve", post(resolve_thread_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(addr = %args.listen, "run-ingress listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown::wait_for_shutdown_signal()).await?;

    info!("run-ingress stopped");
    Ok(())
}
