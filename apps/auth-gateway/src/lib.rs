// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth Gateway - REST front for the SSO authentication service
//!
//! This crate exposes register/login/profile over HTTP and translates each
//! call into a gRPC request against the remote SSO service, mapping typed
//! failures back to HTTP statuses.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer-token gate (HS256 JWT)
//! - `config` - YAML config, flag/env path resolution
//! - `rpc` - SSO service port and its tonic client

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod rpc;
pub mod state;
