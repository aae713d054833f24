// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    models::{Credentials, ErrorResponse, LoginResponse, ProfileResponse, RegisterResponse},
    state::AppState,
};

pub mod auth;
pub mod cancel;
pub mod health;
pub mod profile;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/profile", get(profile::get_profile))
        .route("/profile/{user_id}", get(profile::get_profile_by_id))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", get(auth::login))
        .route("/health/live", get(health::liveness))
        .merge(protected)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(cancel::cancel_on_disconnect))
        // Failures are logged by the handler that detects them.
        .layer(TraceLayer::new_for_http().on_failure(()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        profile::get_profile,
        profile::get_profile_by_id,
        health::liveness
    ),
    components(
        schemas(
            Credentials,
            RegisterResponse,
            LoginResponse,
            ProfileResponse,
            ErrorResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login via the SSO service"),
        (name = "Profile", description = "Bearer-token protected profile"),
        (name = "Health", description = "Liveness probe")
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by the protected routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
