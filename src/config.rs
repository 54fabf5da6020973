// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HMAC secret for signing tokens (at least 32 bytes) | Development secret |
//! | `GOOGLE_CLIENT_ID` | Google OAuth client ID | Required |
//! | `GOOGLE_CLIENT_SECRET` | Google OAuth client secret | Required |
//! | `OAUTH_REDIRECT_URI` | OAuth callback URL registered with Google | `http://localhost:8080/login/oauth2/code/google` |
//! | `POST_LOGIN_REDIRECT` | Where the browser lands after login | `/swagger-ui/index.html` |
//! | `COOKIE_SECURE` | Mark auth cookies `Secure` | `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const GOOGLE_CLIENT_ID_ENV: &str = "GOOGLE_CLIENT_ID";
pub const GOOGLE_CLIENT_SECRET_ENV: &str = "GOOGLE_CLIENT_SECRET";
pub const OAUTH_REDIRECT_URI_ENV: &str = "OAUTH_REDIRECT_URI";
pub const POST_LOGIN_REDIRECT_ENV: &str = "POST_LOGIN_REDIRECT";
pub const COOKIE_SECURE_ENV: &str = "COOKIE_SECURE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OAUTH_REDIRECT_URI: &str = "http://localhost:8080/login/oauth2/code/google";
pub const DEFAULT_POST_LOGIN_REDIRECT: &str = "/swagger-ui/index.html";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Secret used when `JWT_SECRET` is unset.
///
/// Only suitable for local development: anyone holding the source can mint
/// tokens accepted by a server running with it.
pub const DEVELOPMENT_JWT_SECRET: &str =
    "my-secret-key-for-jwt-token-generation-must-be-at-least-256-bits-long";

/// Errors raised while loading configuration. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("signing secret is {len} bytes, at least {min} required")]
    WeakSecret { len: usize, min: usize },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match env_optional(LOG_FORMAT_ENV).as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Google OAuth client settings.
#[derive(Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

/// Settings applied when finishing a login.
#[derive(Debug, Clone)]
pub struct LoginSettings {
    /// Destination of the post-login redirect
    pub post_login_redirect: String,
    /// Whether cookies carry the `Secure` attribute
    pub secure_cookies: bool,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            post_login_redirect: DEFAULT_POST_LOGIN_REDIRECT.to_string(),
            secure_cookies: false,
        }
    }
}

/// Full service configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Raw HMAC secret; handed to the token codec once and not read again
    pub jwt_secret: String,
    /// True when no `JWT_SECRET` was provided
    pub using_development_secret: bool,
    pub google: GoogleConfig,
    pub login: LoginSettings,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default(HOST_ENV, DEFAULT_HOST);
        let port = match env_optional(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let (jwt_secret, using_development_secret) = match env_optional(JWT_SECRET_ENV) {
            Some(secret) => (secret, false),
            None => (DEVELOPMENT_JWT_SECRET.to_string(), true),
        };

        let google = GoogleConfig {
            client_id: env_required(GOOGLE_CLIENT_ID_ENV)?,
            client_secret: env_required(GOOGLE_CLIENT_SECRET_ENV)?,
            redirect_uri: env_or_default(OAUTH_REDIRECT_URI_ENV, DEFAULT_OAUTH_REDIRECT_URI),
        };

        let login = LoginSettings {
            post_login_redirect: env_or_default(POST_LOGIN_REDIRECT_ENV, DEFAULT_POST_LOGIN_REDIRECT),
            secure_cookies: env_flag(COOKIE_SECURE_ENV)?,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            using_development_secret,
            google,
            login,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("using_development_secret", &self.using_development_secret)
            .field("google_client_id", &self.google.client_id)
            .field("login", &self.login)
            .finish()
    }
}

fn env_required(name: &'static str) -> Result<String, ConfigError> {
    env_optional(name).ok_or(ConfigError::Missing(name))
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}

fn env_flag(name: &'static str) -> Result<bool, ConfigError> {
    match env_optional(name) {
        None => Ok(false),
        Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
            name,
            reason: format!("expected true/false, got {raw:?}"),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::MIN_SECRET_LEN;

    #[test]
    fn development_secret_is_long_enough() {
        assert!(DEVELOPMENT_JWT_SECRET.len() >= MIN_SECRET_LEN);
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn default_login_settings_redirect_to_docs() {
        let settings = LoginSettings::default();
        assert_eq!(settings.post_login_redirect, "/swagger-ui/index.html");
        assert!(!settings.secure_cookies);
    }

    #[test]
    fn config_error_messages_name_the_variable() {
        let err = ConfigError::Missing(GOOGLE_CLIENT_ID_ENV);
        assert_eq!(
            err.to_string(),
            "missing required environment variable: GOOGLE_CLIENT_ID"
        );
    }
}
