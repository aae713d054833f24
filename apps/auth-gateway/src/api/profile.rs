// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Protected profile endpoints.

use axum::{extract::Path, Json};

use crate::{
    auth::{Auth, AuthenticatedUser},
    error::ApiError,
    models::{ErrorResponse, ProfileResponse},
};

impl From<AuthenticatedUser> for ProfileResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            message: "This is your profile".to_string(),
            user_id: user.user_id,
            email: user.email,
        }
    }
}

/// Get the caller's profile.
///
/// Identity comes from the verified token, not from the request.
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profile",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn get_profile(Auth(user): Auth) -> Json<ProfileResponse> {
    tracing::info!(op = "api.profile", user_id = user.user_id, "profile requested");
    Json(user.into())
}

#[utoipa::path(
    get,
    path = "/profile/{user_id}",
    tag = "Profile",
    params(("user_id" = i64, Path, description = "Subject id; must match the token")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Token belongs to another user", body = ErrorResponse),
    )
)]
pub async fn get_profile_by_id(
    Auth(user): Auth,
    Path(user_id): Path<i64>,
) -> Result<Json<ProfileResponse>, ApiError> {
    if user_id != user.user_id {
        tracing::warn!(
            op = "api.profile",
            user_id = user.user_id,
            requested = user_id,
            "profile of another user requested"
        );
        return Err(ApiError::forbidden());
    }

    tracing::info!(op = "api.profile", user_id, "profile requested");
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{app_with, send_with_auth};
    use crate::auth::test_tokens::{mint, SECRET};
    use crate::rpc::MockAuthService;
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn profile_without_token_is_401() {
        let (status, body) =
            send_with_auth(app_with(Arc::new(MockAuthService::new())), "/profile", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"message":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn profile_with_foreign_signature_is_401() {
        let token = mint(1, "a@b.c", 3600, b"not-our-secret");
        let (status, _) = send_with_auth(
            app_with(Arc::new(MockAuthService::new())),
            "/profile",
            Some(format!("Bearer {token}")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn profile_with_expired_token_is_401() {
        let token = mint(1, "a@b.c", -3600, SECRET);
        let (status, body) = send_with_auth(
            app_with(Arc::new(MockAuthService::new())),
            "/profile",
            Some(format!("Bearer {token}")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"message":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn profile_returns_identity_from_token() {
        let token = mint(12345, "test@example.com", 3600, SECRET);
        let (status, body) = send_with_auth(
            app_with(Arc::new(MockAuthService::new())),
            "/profile",
            Some(format!("Bearer {token}")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["message"], "This is your profile");
        assert_eq!(body["userID"], 12345);
        assert_eq!(body["email"], "test@example.com");
    }

    #[tokio::test]
    async fn profile_by_id_matches_subject() {
        let token = mint(9, "nine@example.com", 3600, SECRET);
        let app = app_with(Arc::new(MockAuthService::new()));

        let (status, _) =
            send_with_auth(app.clone(), "/profile/9", Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            send_with_auth(app, "/profile/10", Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, r#"{"message":"forbidden"}"#);
    }

    #[tokio::test]
    async fn profile_by_id_without_token_is_401() {
        let (status, _) =
            send_with_auth(app_with(Arc::new(MockAuthService::new())), "/profile/9", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
