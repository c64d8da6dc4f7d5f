// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-store-local error type, distinct from `OrchestratorError` for the
//! same reason `orc-storage::StorageError` is: these are lookup/state
//! failures, not runtime/retry-classified errors.

use orc_core::ThreadId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThreadError {
    #[error("conversation thread not found: {0}")]
    ThreadNotFound(ThreadId),

    #[error("thread {0} is already terminal and cannot accept new messages")]
    ThreadTerminal(ThreadId),

    #[error("thread {0} is already resolved")]
    AlreadyResolved(ThreadId),
}

pub type Result<T> = std::result::Result<T, ThreadError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
