// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthError;

/// Claims carried by tokens minted by the SSO service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (user id)
    pub uid: i64,

    /// Account email
    pub email: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Application the token was issued for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i32>,
}

/// Identity attached to a request that passed the auth gate.
///
/// Only [`AuthenticatedUser::from_claims`] builds one, and only the gate
/// calls it after verification succeeded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Subject id (`uid` claim)
    pub user_id: i64,

    /// Account email
    pub email: String,

    /// Token expiration
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: IdentityClaims) -> Result<Self, AuthError> {
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::MalformedToken)?;

        Ok(Self {
            user_id: claims.uid,
            email: claims.email,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> IdentityClaims {
        IdentityClaims {
            uid: 42,
            email: "user@example.com".to_string(),
            exp: 1_700_003_600,
            app_id: Some(1),
        }
    }

    #[test]
    fn from_claims_extracts_identity() {
        let user = AuthenticatedUser::from_claims(sample_claims()).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.expires_at.timestamp(), 1_700_003_600);
    }

    #[test]
    fn from_claims_rejects_out_of_range_expiry() {
        let mut claims = sample_claims();
        claims.exp = i64::MAX;
        assert!(matches!(
            AuthenticatedUser::from_claims(claims),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn claims_deserialize_without_app_id() {
        let claims: IdentityClaims =
            serde_json::from_str(r#"{"uid":7,"email":"a@b.c","exp":1}"#).unwrap();
        assert_eq!(claims.uid, 7);
        assert!(claims.app_id.is_none());
    }
}
