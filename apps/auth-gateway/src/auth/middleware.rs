// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth gate middleware for Axum.
//!
//! Applied to the protected router subtree:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/profile", get(profile::get_profile))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         require_auth,
//!     ));
//! ```
//!
//! The gate runs once per request. Handlers behind it read the identity via
//! the [`Auth`](super::Auth) extractor and never touch the token.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::AuthError;
use crate::state::AppState;

/// Extract the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

/// Authentication middleware function.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = bearer_token(request.headers()).and_then(|t| state.verifier.authenticate(t));

    match outcome {
        Ok(user) => {
            tracing::debug!(op = "auth.require_auth", user_id = user.user_id, "request authorized");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(
                op = "auth.require_auth",
                reason = e.reason(),
                path = %request.uri().path(),
                "request rejected"
            );
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{test_tokens, AuthenticatedUser};
    use crate::rpc::MockAuthService;
    use crate::state::AppState;
    use crate::auth::TokenVerifier;
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Extension, Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn gated_app() -> Router {
        let state = AppState::new(
            Arc::new(MockAuthService::new()),
            TokenVerifier::new(test_tokens::SECRET),
            1,
        );
        Router::new()
            .route(
                "/protected",
                get(|Extension(user): Extension<AuthenticatedUser>| async move {
                    format!("{}:{}", user.user_id, user.email)
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    async fn call(app: Router, auth: Option<String>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn bearer_token_requires_header() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingAuthHeader));
    }

    #[test]
    fn bearer_token_requires_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert_eq!(bearer_token(&headers), Err(AuthError::InvalidAuthHeader));

        headers.insert(AUTHORIZATION, "Bearer   ".parse().unwrap());
        assert_eq!(bearer_token(&headers), Err(AuthError::InvalidAuthHeader));
    }

    #[test]
    fn bearer_token_strips_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[tokio::test]
    async fn missing_header_never_reaches_handler() {
        let (status, body) = call(gated_app(), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"message":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn wrongly_signed_token_is_rejected() {
        let token = test_tokens::mint(1, "a@b.c", 3600, b"other-secret");
        let (status, body) = call(gated_app(), Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"message":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn valid_token_injects_identity_from_claims() {
        let token = test_tokens::mint(77, "seven@example.com", 3600, test_tokens::SECRET);
        let (status, body) = call(gated_app(), Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "77:seven@example.com");
    }
}
