// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// The token and envelope variants are internal: codecs log them and hand
/// callers the uniform [`Invalid`] outcome instead. Only `Unauthenticated`
/// is ever rendered to a client.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Cookie value is not decodable or lacks `access_token`
    #[error("Cookie envelope is malformed")]
    MalformedEnvelope,
    /// Token is not a decodable JWT or uses an unexpected algorithm
    #[error("Token is malformed")]
    MalformedToken,
    /// Token signature does not verify under the process key
    #[error("Token signature is invalid")]
    SignatureInvalid,
    /// Token has expired
    #[error("Token has expired")]
    Expired,
    /// Signing a token failed
    #[error("Token signing failed: {0}")]
    Signing(String),
    /// Route requires a signed-in user and the request is anonymous
    #[error("Authentication is required")]
    Unauthenticated,
}

/// Uniform rejection returned by the token and envelope codecs.
///
/// Callers cannot tell a forged token from an expired one; every failure
/// degrades the request to anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid credentials")]
pub struct Invalid;

impl From<AuthError> for Invalid {
    fn from(_: AuthError) -> Self {
        Invalid
    }
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MalformedEnvelope => "malformed_envelope",
            AuthError::MalformedToken => "malformed_token",
            AuthError::SignatureInvalid => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::Signing(_) => "signing_failed",
            AuthError::Unauthenticated => "unauthenticated",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MalformedEnvelope
            | AuthError::MalformedToken
            | AuthError::SignatureInvalid
            | AuthError::Expired
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
