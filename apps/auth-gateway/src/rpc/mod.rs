// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Remote Authentication Service Port
//!
//! The gateway never talks to the SSO service directly. Handlers go through
//! the [`AuthService`] trait, which has one production implementation
//! ([`client::SsoClient`], gRPC over a shared tonic channel) and any number
//! of test doubles.
//!
//! ## Failure Taxonomy
//!
//! Every failed call is reduced to an [`RpcFailure`] carrying a
//! [`FailureKind`] from a small closed set. The HTTP layer switches on the
//! kind only; the message is passed through for observability.
//!
//! ## Call Scope
//!
//! Outbound calls run inside a [`CallScope`]: a child of the inbound
//! request's cancellation token plus a fixed deadline. Whichever fires first
//! (call completion, client disconnect, deadline) decides the outcome.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub mod client;
pub mod proto;

pub use client::SsoClient;

/// Default per-call time budget for outbound SSO calls.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Failure categories reported by the SSO service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidArgument,
    Unauthenticated,
    AlreadyExists,
    NotFound,
    Internal,
    Unavailable,
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidArgument => "invalid_argument",
            FailureKind::Unauthenticated => "unauthenticated",
            FailureKind::AlreadyExists => "already_exists",
            FailureKind::NotFound => "not_found",
            FailureKind::Internal => "internal",
            FailureKind::Unavailable => "unavailable",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed failure returned by the SSO service (or by the call scope).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RpcFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RpcFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unavailable, message)
    }
}

impl From<tonic::Status> for RpcFailure {
    fn from(status: tonic::Status) -> Self {
        use tonic::Code;

        let kind = match status.code() {
            Code::InvalidArgument => FailureKind::InvalidArgument,
            Code::Unauthenticated => FailureKind::Unauthenticated,
            Code::AlreadyExists => FailureKind::AlreadyExists,
            Code::NotFound => FailureKind::NotFound,
            Code::Internal => FailureKind::Internal,
            Code::Unavailable | Code::DeadlineExceeded => FailureKind::Unavailable,
            _ => FailureKind::Unknown,
        };
        Self::new(kind, status.message())
    }
}

/// Bounded-time scope for a single outbound call.
///
/// The scope owns a child of the inbound request's token, so cancelling the
/// request cancels the call, while dropping the scope cancels only the call.
#[derive(Debug)]
pub struct CallScope {
    cancel: CancellationToken,
    deadline: Instant,
}

impl CallScope {
    /// Derive a scope from the inbound request's cancellation token.
    pub fn new(parent: &CancellationToken, budget: Duration) -> Self {
        Self {
            cancel: parent.child_token(),
            deadline: Instant::now() + budget,
        }
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Run `call` until it completes, the scope is cancelled, or the deadline
    /// passes.
    pub async fn run<T, F>(&self, call: F) -> Result<T, RpcFailure>
    where
        F: Future<Output = Result<T, RpcFailure>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                Err(RpcFailure::new(FailureKind::Unknown, "request cancelled"))
            }
            outcome = tokio::time::timeout_at(self.deadline, call) => {
                outcome.unwrap_or_else(|_| Err(RpcFailure::unavailable("deadline exceeded")))
            }
        }
    }
}

impl Drop for CallScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Capability exposed by the remote authentication service.
///
/// Implementations must be safe to share between concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account, returning the new user id.
    async fn register(
        &self,
        scope: &CallScope,
        email: &str,
        password: &str,
    ) -> Result<i64, RpcFailure>;

    /// Exchange credentials for a signed token scoped to `app_id`.
    async fn login(
        &self,
        scope: &CallScope,
        email: &str,
        password: &str,
        app_id: i32,
    ) -> Result<String, RpcFailure>;
}
