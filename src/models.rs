// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Response bodies returned by the HTTP handlers. All types derive
//! `Serialize` and `ToSchema` for JSON handling and OpenAPI documentation.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::{AuthenticatedUser, Role};

/// Landing page payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    /// Whether the request carried a valid auth cookie
    pub authenticated: bool,
    /// Where to send the browser to sign in
    pub login_url: String,
    /// Where to send the browser to sign out
    pub logout_url: String,
    /// Email of the signed-in user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Greeting for the current visitor.
#[derive(Debug, Serialize, ToSchema)]
pub struct HelloResponse {
    pub message: String,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl HelloResponse {
    pub fn guest() -> Self {
        Self {
            message: "Hello, Guest!".to_string(),
            authenticated: false,
            email: None,
            name: None,
            picture: None,
        }
    }
}

impl From<&AuthenticatedUser> for HelloResponse {
    fn from(user: &AuthenticatedUser) -> Self {
        let claims = &user.claims;
        let display_name = claims.name().unwrap_or(claims.subject());
        Self {
            message: format!("Hello, {display_name}!"),
            authenticated: true,
            email: Some(claims.subject().to_string()),
            name: claims.name().map(str::to_string),
            picture: claims.picture().map(str::to_string),
        }
    }
}

/// Identity attributes of the signed-in user, as carried by the token.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserAttributes {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Response for `GET /api/user`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub attributes: UserAttributes,
    pub authorities: Vec<Role>,
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        let claims = user.claims;
        Self {
            attributes: UserAttributes {
                email: claims.subject().to_string(),
                name: claims.name().map(str::to_string),
                picture: claims.picture().map(str::to_string),
            },
            authorities: vec![user.role],
        }
    }
}

/// Query parameters the identity provider appends to the callback URL.
#[derive(Debug, Deserialize, IntoParams)]
pub struct OAuthCallbackQuery {
    /// Authorization code to exchange
    pub code: Option<String>,
    /// Opaque value echoed back from the authorization request
    pub state: Option<String>,
    /// Error reported by the provider (e.g. `access_denied`)
    pub error: Option<String>,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
