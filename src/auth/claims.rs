// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity claims and the request-scoped authentication context.

use chrono::{DateTime, Duration, Utc};

use super::roles::Role;

/// Lifetime of a token, in seconds (7 days).
pub const TOKEN_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

/// Identity carried inside a token.
///
/// Claims are immutable once built. The expiry is always derived from the
/// issue time, so there is no way to construct a value with an arbitrary
/// validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    subject: String,
    name: Option<String>,
    picture: Option<String>,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Claims {
    /// Build claims issued now.
    pub fn new(subject: impl Into<String>, name: Option<String>, picture: Option<String>) -> Self {
        Self::issued_at(subject, name, picture, Utc::now())
    }

    /// Build claims issued at the given instant.
    ///
    /// Sub-second precision is dropped: tokens carry whole seconds and a
    /// decoded token must compare equal to the claims it was signed from.
    pub fn issued_at(
        subject: impl Into<String>,
        name: Option<String>,
        picture: Option<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let issued_at = DateTime::from_timestamp(issued_at.timestamp(), 0).unwrap_or(issued_at);
        Self {
            subject: subject.into(),
            name,
            picture,
            issued_at,
            expires_at: issued_at + Duration::seconds(TOKEN_VALIDITY_SECS),
        }
    }

    /// Identity email.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    pub fn issued_at_time(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A token is usable strictly before its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Principal reconstructed from a verified token.
///
/// Lives in the request extensions for one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub claims: Claims,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Wrap verified claims with the fixed user role.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            claims,
            role: Role::User,
        }
    }

    pub fn email(&self) -> &str {
        self.claims.subject()
    }
}

/// Outcome of the per-request authentication step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthContext {
    /// No usable token: missing, malformed, forged or expired.
    #[default]
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl AuthContext {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated(user) => Some(user),
        }
    }

    pub fn into_user(self) -> Option<AuthenticatedUser> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::Authenticated(_))
    }
}
