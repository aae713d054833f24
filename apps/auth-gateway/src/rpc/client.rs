// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! gRPC client for the SSO service.
//!
//! One [`Channel`] is created at startup and shared by every request. Tonic
//! channels multiplex calls over HTTP/2, so cloning the inner client per call
//! is cheap and needs no locking.

use std::time::Duration;

use async_trait::async_trait;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

use super::proto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use super::{AuthService, CallScope, RpcFailure};

const REGISTER_PATH: &str = "/auth.Auth/Register";
const LOGIN_PATH: &str = "/auth.Auth/Login";

/// Connection settings for the SSO service.
#[derive(Debug, Clone)]
pub struct SsoClientConfig {
    /// Endpoint URI, e.g. `http://app:44044`
    pub address: String,
    /// TCP connect timeout for the underlying channel
    pub connect_timeout: Duration,
}

/// Tonic-backed [`AuthService`].
#[derive(Clone)]
pub struct SsoClient {
    inner: tonic::client::Grpc<Channel>,
}

impl SsoClient {
    /// Build a lazily-connected client.
    ///
    /// Only the endpoint URI is validated here; the connection itself is
    /// established on first use, and an unreachable service surfaces as an
    /// `Unavailable` failure on that call.
    pub fn connect_lazy(config: &SsoClientConfig) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(config.address.clone())?
            .connect_timeout(config.connect_timeout)
            .connect_lazy();
        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    async fn unary<Req, Resp>(
        &self,
        scope: &CallScope,
        path: &'static str,
        message: Req,
    ) -> Result<Resp, RpcFailure>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|e| RpcFailure::unavailable(format!("auth service not ready: {e}")))?;

        let mut request = tonic::Request::new(message);
        request.set_timeout(scope.remaining());

        let response = grpc
            .unary(
                request,
                PathAndQuery::from_static(path),
                ProstCodec::<Req, Resp>::default(),
            )
            .await?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl AuthService for SsoClient {
    async fn register(
        &self,
        scope: &CallScope,
        email: &str,
        password: &str,
    ) -> Result<i64, RpcFailure> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: RegisterResponse = self.unary(scope, REGISTER_PATH, request).await?;
        Ok(response.user_id)
    }

    async fn login(
        &self,
        scope: &CallScope,
        email: &str,
        password: &str,
        app_id: i32,
    ) -> Result<String, RpcFailure> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            app_id,
        };
        let response: LoginResponse = self.unary(scope, LOGIN_PATH, request).await?;
        Ok(response.token)
    }
}
