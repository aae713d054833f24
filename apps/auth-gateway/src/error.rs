// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use crate::rpc::{FailureKind, RpcFailure};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden")
    }

    /// Generic 500; the cause is logged where it is detected, never sent.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }

    /// Local rejection of blank credentials.
    pub fn blank_credentials() -> Self {
        Self::bad_request("invalid arguments").with_details("blank password or email")
    }
}

impl From<RpcFailure> for ApiError {
    fn from(failure: RpcFailure) -> Self {
        let (status, message) = match failure.kind {
            FailureKind::InvalidArgument => (StatusCode::BAD_REQUEST, "invalid arguments"),
            FailureKind::AlreadyExists => (StatusCode::CONFLICT, "already exists"),
            FailureKind::NotFound => (StatusCode::NOT_FOUND, "not found"),
            FailureKind::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            FailureKind::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "service unavailable"),
            FailureKind::Internal | FailureKind::Unknown => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        let error = Self::new(status, message);
        if failure.message.is_empty() {
            error
        } else {
            error.with_details(failure.message)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            message: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn failure_kinds_map_to_statuses() {
        let cases = [
            (FailureKind::InvalidArgument, StatusCode::BAD_REQUEST, "invalid arguments"),
            (FailureKind::AlreadyExists, StatusCode::CONFLICT, "already exists"),
            (FailureKind::NotFound, StatusCode::NOT_FOUND, "not found"),
            (FailureKind::Unauthenticated, StatusCode::UNAUTHORIZED, "unauthenticated"),
            (FailureKind::Unavailable, StatusCode::SERVICE_UNAVAILABLE, "service unavailable"),
            (FailureKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
            (FailureKind::Unknown, StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        ];

        for (kind, status, message) in cases {
            let error = ApiError::from(RpcFailure::new(kind, "upstream said no"));
            assert_eq!(error.status, status, "{kind}");
            assert_eq!(error.message, message);
            assert_eq!(error.details.as_deref(), Some("upstream said no"));
        }
    }

    #[test]
    fn empty_upstream_message_omits_details() {
        let error = ApiError::from(RpcFailure::new(FailureKind::NotFound, ""));
        assert!(error.details.is_none());
    }

    #[tokio::test]
    async fn blank_credentials_body() {
        let response = ApiError::blank_credentials().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(
            body,
            r#"{"message":"invalid arguments","details":"blank password or email"}"#
        );
    }

    #[tokio::test]
    async fn internal_error_has_no_details() {
        let response = ApiError::internal().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"message":"internal error"}"#);
    }
}
