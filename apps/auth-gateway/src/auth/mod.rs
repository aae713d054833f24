// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token gate for protected routes.
//!
//! ## Auth Flow
//!
//! 1. Client logs in through `GET /login`; the SSO service mints an HS256 JWT
//!    and the gateway returns it in the `Authorization` response header
//! 2. Client sends `Authorization: Bearer <token>` on protected requests
//! 3. Gateway (`require_auth` middleware):
//!    - Verifies signature against the shared secret and checks expiry
//!    - Extracts:
//!      - `uid` → subject id
//!      - `email`
//!    - Stores an [`AuthenticatedUser`] in the request extensions
//! 4. Handlers read the user through the [`Auth`] extractor only
//!
//! ## Security
//!
//! - Stateless: verification needs only the configured secret
//! - Every rejection is a 401 with the same body; the reason is logged only
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod verifier;

pub use claims::{AuthenticatedUser, IdentityClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::require_auth;
pub use verifier::TokenVerifier;
