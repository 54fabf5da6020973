// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed token codec.
//!
//! Tokens are compact HS256 JWTs. The payload carries the subject, the
//! optional `name` and `picture` claims, and the `iat`/`exp` pair.
//!
//! ## Security
//!
//! - Only HS256 is accepted; tokens announcing any other algorithm are rejected
//! - No clock skew tolerance: a token is valid strictly before `exp`
//! - `exp` must equal `iat` plus the fixed validity window
//! - Every failure is reported as the same [`Invalid`] outcome

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::claims::{Claims, TOKEN_VALIDITY_SECS};
use super::error::{AuthError, Invalid};
use crate::config::ConfigError;

/// Minimum HMAC secret length (256 bits).
pub const MIN_SECRET_LEN: usize = 32;

/// Wire representation of [`Claims`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JwtClaims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    iat: i64,
    exp: i64,
}

impl From<&Claims> for JwtClaims {
    fn from(claims: &Claims) -> Self {
        Self {
            sub: claims.subject().to_string(),
            name: claims.name().map(str::to_string),
            picture: claims.picture().map(str::to_string),
            iat: claims.issued_at_time().timestamp(),
            exp: claims.expires_at().timestamp(),
        }
    }
}

/// Opaque signed token string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Wrap a compact JWT string.
    ///
    /// Only strings in the JWT alphabet (base64url segments and `.`) survive
    /// the cookie envelope, so the constructor stays inside the crate where
    /// every caller holds either a freshly signed token or one just read
    /// back out of an envelope.
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Token(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key material derived once from the process secret.
struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Signs claims into tokens and verifies tokens back into claims.
///
/// Holds the only copy of the signing key. Immutable after construction,
/// so one instance is shared by every request behind an `Arc`.
pub struct TokenCodec {
    key: SigningKey,
    validation: Validation,
}

impl TokenCodec {
    /// Derive the signing key from `secret`.
    ///
    /// Secrets shorter than [`MIN_SECRET_LEN`] bytes are refused.
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                len: secret.len(),
                min: MIN_SECRET_LEN,
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Ok(Self {
            key: SigningKey {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            },
            validation,
        })
    }

    /// Sign `claims` into a compact token.
    pub fn sign(&self, claims: &Claims) -> Result<Token, AuthError> {
        encode(
            &Header::new(Algorithm::HS256),
            &JwtClaims::from(claims),
            &self.key.encoding,
        )
        .map(Token)
        .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify `token` and rebuild the claims it carries.
    pub fn verify(&self, token: &str) -> Result<Claims, Invalid> {
        self.decode_claims(token, Utc::now()).map_err(|e| {
            tracing::debug!(reason = e.error_code(), "token rejected");
            Invalid
        })
    }

    fn decode_claims(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let token_data = decode::<JwtClaims>(token, &self.key.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
                _ => AuthError::MalformedToken,
            })?;

        let wire = token_data.claims;
        if wire.exp != wire.iat.saturating_add(TOKEN_VALIDITY_SECS) {
            return Err(AuthError::MalformedToken);
        }
        let issued_at = DateTime::from_timestamp(wire.iat, 0).ok_or(AuthError::MalformedToken)?;

        let claims = Claims::issued_at(wire.sub, wire.name, wire.picture, issued_at);
        if claims.is_expired_at(now) {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
