// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! External identity provider (OAuth2 authorization code flow).
//!
//! The provider's job ends once it hands back the user's attributes; the
//! login completion step trusts them as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use super::login::IdentityAttributes;
use crate::config::GoogleConfig;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const GOOGLE_SCOPES: &str = "openid email profile";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("identity provider configuration is invalid: {0}")]
    Config(String),

    #[error("identity provider request failed: {0}")]
    Request(String),

    #[error("identity provider rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("identity provider response was invalid: {0}")]
    InvalidResponse(String),
}

/// Source of verified user attributes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to in order to start a login.
    fn authorization_url(&self, state: &str) -> String;

    /// Trade an authorization code for the user's attributes.
    async fn exchange(&self, code: &str) -> Result<IdentityAttributes, ProviderError>;
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth2 / OpenID Connect client.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    config: GoogleConfig,
    auth_url: Url,
    http: Client,
}

impl GoogleProvider {
    pub fn new(config: GoogleConfig) -> Result<Self, ProviderError> {
        let auth_url = Url::parse(GOOGLE_AUTH_URL).map_err(|e| ProviderError::Config(e.to_string()))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            auth_url,
            http,
        })
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&TokenRequest {
                code,
                client_id: &self.config.client_id,
                client_secret: &self.config.client_secret,
                redirect_uri: &self.config.redirect_uri,
                grant_type: "authorization_code",
            })
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(tokens.access_token)
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<Map<String, Value>, ProviderError> {
        let response = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Rejected {
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", GOOGLE_SCOPES)
            .append_pair("state", state);
        url.into()
    }

    async fn exchange(&self, code: &str) -> Result<IdentityAttributes, ProviderError> {
        let access_token = self.fetch_access_token(code).await?;
        let userinfo = self.fetch_userinfo(&access_token).await?;
        Ok(IdentityAttributes::from(userinfo))
    }
}
