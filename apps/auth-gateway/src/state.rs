// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenVerifier;
use crate::rpc::{AuthService, DEFAULT_CALL_TIMEOUT};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the remote authentication service
    pub auth_service: Arc<dyn AuthService>,
    pub verifier: Arc<TokenVerifier>,
    /// Application id sent with every login
    pub app_id: i32,
    /// Time budget for one outbound call
    pub call_timeout: Duration,
}

impl AppState {
    pub fn new(auth_service: Arc<dyn AuthService>, verifier: TokenVerifier, app_id: i32) -> Self {
        Self {
            auth_service,
            verifier: Arc::new(verifier),
            app_id,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}
