// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the gateway's REST surface. All types
//! derive `ToSchema` for the OpenAPI document.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Login/password pair accepted by `POST /register` and `GET /login`.
///
/// Missing and `null` fields decode as empty strings and are then rejected
/// as blank.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct Credentials {
    /// Account email
    #[serde(default, deserialize_with = "null_as_empty")]
    pub login: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Credentials {
    pub fn is_blank(&self) -> bool {
        self.login.trim().is_empty() || self.password.trim().is_empty()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub email: String,
}

/// Error body shared by every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
