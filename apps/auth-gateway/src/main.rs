// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use auth_gateway::{
    api::router,
    auth::TokenVerifier,
    config::{Args, Config},
    logging,
    rpc::SsoClient,
    state::AppState,
};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init();

    // Misconfiguration is fatal: never serve traffic without a signing secret.
    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "cannot load config");
            std::process::exit(1);
        }
    };

    tracing::info!(
        listen_addr = %config.listen_addr,
        auth_service = %config.auth_service.address,
        app_id = config.auth_service.app_id,
        "starting auth gateway"
    );

    let client = match SsoClient::connect_lazy(&config.auth_service.client_config()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "invalid auth service address");
            std::process::exit(1);
        }
    };
    tracing::info!("auth service channel created");

    let state = AppState::new(
        Arc::new(client),
        TokenVerifier::new(config.jwt_secret.as_bytes()),
        config.auth_service.app_id,
    )
    .with_call_timeout(config.auth_service.call_timeout());
    let app = router(state);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!("Auth gateway listening on http://{} (docs at /docs)", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    // The router, and with it the shared channel, is dropped by now.
    tracing::info!("auth service channel closed, shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
