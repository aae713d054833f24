// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Register and login endpoints.
//!
//! Each handler decodes [`Credentials`], rejects blank ones locally, makes a
//! single bounded-time call to the SSO service and maps the outcome to HTTP.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::AUTHORIZATION, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use super::cancel::RequestCancellation;
use crate::{
    error::ApiError,
    models::{Credentials, ErrorResponse, LoginResponse, RegisterResponse},
    rpc::{CallScope, RpcFailure},
    state::AppState,
};

/// Read and validate the request body.
///
/// Read and decode failures are infrastructure faults on our side of the
/// proxy and surface as 500.
fn decode_credentials(
    op: &'static str,
    body: Result<Bytes, BytesRejection>,
) -> Result<Credentials, ApiError> {
    let bytes = body.map_err(|e| {
        tracing::error!(op, error = %e, "cannot read body");
        ApiError::internal()
    })?;

    let credentials: Credentials = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(op, error = %e, "cannot decode body");
        ApiError::internal()
    })?;

    if credentials.is_blank() {
        tracing::warn!(op, "blank password or email");
        return Err(ApiError::blank_credentials());
    }
    Ok(credentials)
}

fn upstream_failure(op: &'static str, failure: RpcFailure) -> ApiError {
    tracing::error!(op, kind = %failure.kind, error = %failure.message, "auth service call failed");
    failure.into()
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = Credentials,
    tag = "Auth",
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Blank or invalid credentials", body = ErrorResponse),
        (status = 409, description = "Account already exists", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse),
        (status = 503, description = "Auth service unavailable", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    RequestCancellation(cancel): RequestCancellation,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    const OP: &str = "api.register";
    tracing::info!(op = OP, "register user");

    let credentials = decode_credentials(OP, body)?;
    let scope = CallScope::new(&cancel, state.call_timeout);
    let user_id = scope
        .run(
            state
                .auth_service
                .register(&scope, &credentials.login, &credentials.password),
        )
        .await
        .map_err(|failure| upstream_failure(OP, failure))?;

    tracing::info!(op = OP, user_id, "register success");
    Ok(Json(RegisterResponse {
        message: "register success".to_string(),
        user_id,
    }))
}

/// Log in and receive the token in the `Authorization` response header.
///
/// Credentials travel in the body even though the verb is GET.
#[utoipa::path(
    get,
    path = "/login",
    request_body = Credentials,
    tag = "Auth",
    responses(
        (status = 200, description = "Logged in; token in Authorization header", body = LoginResponse),
        (status = 400, description = "Blank or invalid credentials", body = ErrorResponse),
        (status = 401, description = "Rejected by auth service", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse),
        (status = 503, description = "Auth service unavailable", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    RequestCancellation(cancel): RequestCancellation,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    const OP: &str = "api.login";
    tracing::info!(op = OP, "login user");

    let credentials = decode_credentials(OP, body)?;
    let scope = CallScope::new(&cancel, state.call_timeout);
    let token = scope
        .run(state.auth_service.login(
            &scope,
            &credentials.login,
            &credentials.password,
            state.app_id,
        ))
        .await
        .map_err(|failure| upstream_failure(OP, failure))?;

    if token.is_empty() {
        tracing::error!(op = OP, "auth service returned an empty token");
        return Err(ApiError::internal());
    }
    let header = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
        tracing::error!(op = OP, error = %e, "token is not a valid header value");
        ApiError::internal()
    })?;

    tracing::info!(op = OP, "login success");
    Ok((
        [(AUTHORIZATION, header)],
        Json(LoginResponse {
            message: "login success".to_string(),
        }),
    )
        .into_response())
}
