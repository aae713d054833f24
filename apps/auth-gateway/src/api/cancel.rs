// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped cancellation.
//!
//! Hyper drops the handler future when the client goes away. The middleware
//! here turns that drop into an explicit [`CancellationToken`] that handlers
//! pass down to outbound calls.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tokio_util::sync::CancellationToken;

/// Cancellation token of the inbound request.
#[derive(Debug, Clone)]
pub struct RequestCancellation(pub CancellationToken);

/// Attach a token that is cancelled once the request is finished or dropped.
pub async fn cancel_on_disconnect(mut request: Request, next: Next) -> Response {
    let token = CancellationToken::new();
    let _guard = token.clone().drop_guard();
    request
        .extensions_mut()
        .insert(RequestCancellation(token));
    next.run(request).await
}

impl<S> FromRequestParts<S> for RequestCancellation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Handlers mounted without the layer still get a live, never-cancelled token.
        Ok(parts
            .extensions
            .get::<RequestCancellation>()
            .cloned()
            .unwrap_or_else(|| RequestCancellation(CancellationToken::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[tokio::test]
    async fn token_is_cancelled_after_request_completes() {
        let seen: Arc<Mutex<Option<CancellationToken>>> = Arc::default();
        let captured = seen.clone();

        let app = Router::new()
            .route(
                "/",
                get(move |RequestCancellation(token): RequestCancellation| {
                    let captured = captured.clone();
                    async move {
                        assert!(!token.is_cancelled());
                        *captured.lock().unwrap() = Some(token);
                        StatusCode::OK
                    }
                }),
            )
            .layer(axum::middleware::from_fn(cancel_on_disconnect));

        let response = app
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let token = seen.lock().unwrap().take().expect("handler ran");
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn extractor_falls_back_to_fresh_token() {
        let mut parts = HttpRequest::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let RequestCancellation(token) =
            RequestCancellation::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(!token.is_cancelled());
    }
}
