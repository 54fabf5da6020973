// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless cookie authentication backed by a signed JWT.
//!
//! ## Auth Flow
//!
//! 1. The user signs in with Google (OAuth2 authorization code)
//! 2. The server signs a JWT holding email, name and picture
//! 3. The JWT is wrapped in a JSON envelope and set as the `auth_token` cookie
//! 4. On every request the middleware:
//!    - Reads the `auth_token` cookie
//!    - Unwraps the envelope and verifies the JWT (HS256, expiry)
//!    - Stores an [`AuthContext`] in the request extensions
//!
//! ## Security
//!
//! - No server-side session: the cookie is the only credential
//! - Tokens are valid for 7 days and cannot be revoked early
//! - Any verification failure silently downgrades the request to anonymous
//! - Cookies are `HttpOnly`, `SameSite=Lax`, optionally `Secure`

pub mod bridge;
pub mod claims;
pub mod envelope;
pub mod error;
pub mod extractor;
pub mod login;
pub mod provider;
pub mod roles;
pub mod token;

pub use bridge::{auth_middleware, authenticate, AUTH_COOKIE};
pub use claims::{AuthContext, AuthenticatedUser, Claims, TOKEN_VALIDITY_SECS};
pub use error::{AuthError, Invalid};
pub use extractor::{Auth, OptionalAuth};
pub use login::{complete_login, logout_cookies, IdentityAttributes, LoginCompletion, LoginError, SESSION_COOKIE};
pub use provider::{GoogleProvider, IdentityProvider, ProviderError};
pub use roles::Role;
pub use token::{Token, TokenCodec};
