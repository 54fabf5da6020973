// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login completion and logout.
//!
//! ## Login Flow
//!
//! 1. The identity provider returns the user's attributes
//! 2. Claims are built with the email as subject
//! 3. The claims are signed and wrapped into the `auth_token` cookie
//! 4. A random `session_id` cookie is issued alongside it
//! 5. The browser is redirected to the post-login destination
//!
//! Nothing is retried: a failure at any step fails the login request.

use std::collections::HashMap;

use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use cookie::{time::Duration, Cookie, SameSite};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::bridge::AUTH_COOKIE;
use super::claims::{Claims, TOKEN_VALIDITY_SECS};
use super::envelope;
use super::provider::ProviderError;
use super::token::TokenCodec;
use crate::config::LoginSettings;

/// Correlation cookie issued at login. Never consulted for authentication.
pub const SESSION_COOKIE: &str = "session_id";

/// User attributes asserted by the identity provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityAttributes(HashMap<String, Value>);

impl IdentityAttributes {
    pub fn new(attributes: HashMap<String, Value>) -> Self {
        Self(attributes)
    }

    /// Non-empty string attribute.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.string("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.string("name")
    }

    pub fn picture(&self) -> Option<&str> {
        self.string("picture")
    }
}

impl From<HashMap<String, Value>> for IdentityAttributes {
    fn from(value: HashMap<String, Value>) -> Self {
        Self(value)
    }
}

impl From<Map<String, Value>> for IdentityAttributes {
    fn from(value: Map<String, Value>) -> Self {
        Self(value.into_iter().collect())
    }
}

/// Login failed and cannot fall back to anything.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("identity provider denied the login: {0}")]
    Denied(String),

    #[error("authorization code is missing")]
    MissingCode,

    #[error("identity provider did not supply `{0}`")]
    MissingAttribute(&'static str),

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Serialize)]
struct LoginErrorBody {
    error: String,
    error_code: String,
}

impl LoginError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LoginError::Denied(_) => "login_denied",
            LoginError::MissingCode => "missing_code",
            LoginError::MissingAttribute(_) => "missing_attribute",
            LoginError::Signing(_) => "signing_failed",
            LoginError::Provider(_) => "provider_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            LoginError::Denied(_) => StatusCode::UNAUTHORIZED,
            LoginError::MissingCode => StatusCode::BAD_REQUEST,
            LoginError::MissingAttribute(_) | LoginError::Provider(_) => StatusCode::BAD_GATEWAY,
            LoginError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, error_code = self.error_code(), "login failed");
        let status = self.status_code();
        let body = Json(LoginErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

/// Cookies and redirect produced by a successful login.
#[derive(Debug, Clone)]
pub struct LoginCompletion {
    pub auth_cookie: Cookie<'static>,
    pub session_cookie: Cookie<'static>,
    pub redirect_to: String,
}

impl IntoResponse for LoginCompletion {
    fn into_response(self) -> Response {
        redirect_with_cookies(&self.redirect_to, &[self.auth_cookie, self.session_cookie])
    }
}

/// Finish a login for the user described by `attributes`.
pub fn complete_login(
    attributes: &IdentityAttributes,
    codec: &TokenCodec,
    settings: &LoginSettings,
) -> Result<LoginCompletion, LoginError> {
    let email = attributes
        .email()
        .ok_or(LoginError::MissingAttribute("email"))?;

    let claims = Claims::new(
        email,
        attributes.name().map(str::to_string),
        attributes.picture().map(str::to_string),
    );
    let token = codec
        .sign(&claims)
        .map_err(|e| LoginError::Signing(e.to_string()))?;

    let max_age = Duration::seconds(TOKEN_VALIDITY_SECS);
    let auth_cookie = build_cookie(AUTH_COOKIE, envelope::wrap(&token), max_age, settings);
    let session_cookie = build_cookie(SESSION_COOKIE, new_session_id(), max_age, settings);

    tracing::info!(subject = claims.subject(), "login completed");

    Ok(LoginCompletion {
        auth_cookie,
        session_cookie,
        redirect_to: settings.post_login_redirect.clone(),
    })
}

/// Cookies that overwrite and expire both login cookies.
pub fn logout_cookies(settings: &LoginSettings) -> [Cookie<'static>; 2] {
    [
        build_cookie(AUTH_COOKIE, String::new(), Duration::ZERO, settings),
        build_cookie(SESSION_COOKIE, String::new(), Duration::ZERO, settings),
    ]
}

/// Redirect response carrying one `Set-Cookie` header per cookie.
pub fn redirect_with_cookies(location: &str, cookies: &[Cookie<'_>]) -> Response {
    let mut response = Redirect::to(location).into_response();
    for cookie in cookies {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => {
                tracing::error!(cookie = cookie.name(), error = %e, "cookie is not a valid header value");
            }
        }
    }
    response
}

/// 32 lowercase hex characters, no hyphens.
fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn build_cookie(
    name: &'static str,
    value: String,
    max_age: Duration,
    settings: &LoginSettings,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies)
        .max_age(max_age)
        .build()
}
