// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the authenticated user.
//!
//! Use `Auth` in handlers that require a signed-in user and `OptionalAuth`
//! where anonymous access is fine:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::bridge::authenticate;
use super::{AuthContext, AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Context set by the middleware, or computed on the spot when the route
/// is not behind it.
fn request_context(parts: &Parts, state: &AppState) -> AuthContext {
    parts
        .extensions
        .get::<AuthContext>()
        .cloned()
        .unwrap_or_else(|| authenticate(&parts.headers, &state.codec))
}

/// Extractor for authenticated users.
///
/// Rejects anonymous requests with `401 Unauthorized`.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        request_context(parts, state)
            .into_user()
            .map(Auth)
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Optional authentication extractor.
///
/// Returns `None` for anonymous requests instead of rejecting.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(request_context(parts, state).into_user()))
    }
}
