// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ingress-local error type (§4.11, §4.12's "fatal: unparseable envelopes
//! ... routed to DLQ with error text" and §7's failure taxonomy).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngressError {
    /// No subject could be resolved and no handle (email/phone/distinct
    /// id) was present to create one from (§4.11 step 1).
    #[error("cannot resolve subject: no distinct id, email, or phone present in payload")]
    UnresolvableSubject,

    #[error("failed to publish to the events topic: {0}")]
    PublishFailed(#[from] orc_bus::BusError),

    #[error("failed to enqueue agent-invocation job: queue is shut down")]
    EnqueueFailed,
}

pub type Result<T> = std::result::Result<T, IngressError>;
