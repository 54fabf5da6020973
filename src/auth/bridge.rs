// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request authentication from the `auth_token` cookie.
//!
//! The bridge never fails a request. A missing cookie, an undecodable
//! envelope, a forged or an expired token all yield
//! [`AuthContext::Anonymous`]; whether anonymous access is acceptable is
//! decided by the handler through the [`Auth`](super::Auth) and
//! [`OptionalAuth`](super::OptionalAuth) extractors.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/hello", get(hello))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware))
//!     .with_state(state);
//! ```

use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::Response,
};
use cookie::Cookie;

use super::claims::{AuthContext, AuthenticatedUser};
use super::envelope;
use super::token::TokenCodec;
use crate::state::AppState;

/// Cookie carrying the token envelope.
pub const AUTH_COOKIE: &str = "auth_token";

/// Raw value of the first cookie called `name`, across all `Cookie` headers.
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| Cookie::parse(pair.trim()).ok())
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Derive the authentication context for a request.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> AuthContext {
    let Some(cookie_value) = find_cookie(headers, AUTH_COOKIE) else {
        return AuthContext::Anonymous;
    };

    match envelope::unwrap(&cookie_value).and_then(|token| codec.verify(token.as_str())) {
        Ok(claims) => AuthContext::Authenticated(AuthenticatedUser::from_claims(claims)),
        Err(_) => AuthContext::Anonymous,
    }
}

/// Middleware storing the request's [`AuthContext`] in its extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = authenticate(request.headers(), &state.codec);
    if let Some(user) = context.user() {
        tracing::debug!(subject = user.email(), role = %user.role, "request authenticated");
    }

    request.extensions_mut().insert(context);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::Claims;
    use crate::auth::roles::Role;
    use axum::http::HeaderValue;
    use chrono::{Duration, Utc};

    const SECRET: &[u8] = b"test-secret-key-for-the-auth-bridge-32b";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET).unwrap()
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    fn auth_cookie_for(codec: &TokenCodec, claims: &Claims) -> String {
        let token = codec.sign(claims).unwrap();
        format!("{AUTH_COOKIE}={}", envelope::wrap(&token))
    }

    #[test]
    fn valid_cookie_authenticates_with_user_role() {
        let codec = codec();
        let claims = Claims::new("a@b.com", Some("A".to_string()), Some("p.png".to_string()));
        let headers = headers_with_cookie(&auth_cookie_for(&codec, &claims));

        let context = authenticate(&headers, &codec);
        let user = context.user().expect("should be authenticated");
        assert_eq!(user.claims.subject(), "a@b.com");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn auth_cookie_is_found_among_other_cookies() {
        let codec = codec();
        let claims = Claims::new("a@b.com", None, None);
        let cookie = format!(
            "theme=dark; session_id=0123456789abcdef0123456789abcdef; {}",
            auth_cookie_for(&codec, &claims)
        );

        assert!(authenticate(&headers_with_cookie(&cookie), &codec).is_authenticated());
    }

    #[test]
    fn auth_cookie_is_found_in_second_cookie_header() {
        let codec = codec();
        let claims = Claims::new("a@b.com", None, None);
        let mut headers = headers_with_cookie("theme=dark");
        headers.append(
            COOKIE,
            HeaderValue::from_str(&auth_cookie_for(&codec, &claims)).unwrap(),
        );

        assert!(authenticate(&headers, &codec).is_authenticated());
    }

    #[test]
    fn missing_cookie_is_anonymous() {
        assert_eq!(authenticate(&HeaderMap::new(), &codec()), AuthContext::Anonymous);
        assert_eq!(
            authenticate(&headers_with_cookie("theme=dark"), &codec()),
            AuthContext::Anonymous
        );
    }

    #[test]
    fn unparsable_cookie_is_anonymous() {
        let headers = headers_with_cookie("auth_token=not%20json");
        assert_eq!(authenticate(&headers, &codec()), AuthContext::Anonymous);
    }

    #[test]
    fn envelope_without_access_token_is_anonymous() {
        let json = r#"{"token_type":"Bearer","expires_in":604800}"#;
        let headers = headers_with_cookie(&format!("auth_token={}", urlencoding::encode(json)));
        assert_eq!(authenticate(&headers, &codec()), AuthContext::Anonymous);
    }

    #[test]
    fn cleared_cookie_is_anonymous() {
        let headers = headers_with_cookie("auth_token=");
        assert_eq!(authenticate(&headers, &codec()), AuthContext::Anonymous);
    }

    #[test]
    fn expired_token_is_anonymous() {
        let codec = codec();
        let claims = Claims::issued_at("a@b.com", None, None, Utc::now() - Duration::days(30));
        let headers = headers_with_cookie(&auth_cookie_for(&codec, &claims));

        assert_eq!(authenticate(&headers, &codec), AuthContext::Anonymous);
    }

    #[test]
    fn token_from_other_key_is_anonymous() {
        let foreign = TokenCodec::new(b"a-completely-different-secret-of-32-bytes").unwrap();
        let claims = Claims::new("a@b.com", None, None);
        let headers = headers_with_cookie(&auth_cookie_for(&foreign, &claims));

        assert_eq!(authenticate(&headers, &codec()), AuthContext::Anonymous);
    }

    #[test]
    fn bare_token_without_envelope_is_anonymous() {
        let codec = codec();
        let token = codec.sign(&Claims::new("a@b.com", None, None)).unwrap();
        let headers = headers_with_cookie(&format!("auth_token={token}"));

        assert_eq!(authenticate(&headers, &codec), AuthContext::Anonymous);
    }

    #[test]
    fn find_cookie_returns_raw_value() {
        let headers = headers_with_cookie("a=1; auth_token=%7Bx%7D; b=2");
        assert_eq!(find_cookie(&headers, "auth_token"), Some("%7Bx%7D".to_string()));
        assert_eq!(find_cookie(&headers, "missing"), None);
    }
}
