// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! The extractor only reads what [`require_auth`](super::require_auth) put in
//! the request extensions. It never parses the `Authorization` header, so a
//! route mounted outside the gate rejects every request.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, AuthenticatedUser};

/// Identity of the caller, as verified by the auth gate.
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedUser>().cloned() {
            Some(user) => Ok(Auth(user)),
            None => {
                tracing::error!(
                    op = "auth.extractor",
                    path = %parts.uri.path(),
                    "protected handler reached without auth gate"
                );
                Err(AuthError::NotAuthenticated)
            }
        }
    }
}
