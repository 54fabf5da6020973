// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and logout endpoints.

use axum::{
    extract::{Query, State},
    response::{Redirect, Response},
};
use uuid::Uuid;

use crate::{
    auth::{complete_login, login::redirect_with_cookies, logout_cookies, LoginCompletion, LoginError},
    models::OAuthCallbackQuery,
    state::AppState,
};

/// Start the Google login.
///
/// Redirects the browser to the provider's consent screen.
#[utoipa::path(
    get,
    path = "/oauth2/authorization/google",
    tag = "Session",
    responses((status = 303, description = "Redirect to the identity provider"))
)]
pub async fn start_login(State(state): State<AppState>) -> Redirect {
    let request_state = Uuid::new_v4().simple().to_string();
    Redirect::to(&state.provider.authorization_url(&request_state))
}

/// OAuth2 callback.
///
/// Exchanges the authorization code, sets the `auth_token` and `session_id`
/// cookies and redirects to the post-login destination.
#[utoipa::path(
    get,
    path = "/login/oauth2/code/google",
    params(OAuthCallbackQuery),
    tag = "Session",
    responses(
        (status = 303, description = "Login completed, cookies set"),
        (status = 400, description = "Authorization code missing"),
        (status = 401, description = "Login denied by the identity provider"),
        (status = 502, description = "Identity provider failed or returned unusable attributes")
    )
)]
pub async fn login_callback(
    State(state): State<AppState>,
    Query(params): Query<OAuthCallbackQuery>,
) -> Result<LoginCompletion, LoginError> {
    if let Some(error) = params.error {
        return Err(LoginError::Denied(error));
    }
    let code = params.code.ok_or(LoginError::MissingCode)?;

    let attributes = state.provider.exchange(&code).await?;
    complete_login(&attributes, &state.codec, &state.login)
}

/// Clear the login cookies and redirect to `/`.
#[utoipa::path(
    get,
    path = "/api/logout",
    tag = "Session",
    responses((status = 303, description = "Cookies cleared"))
)]
pub async fn logout(State(state): State<AppState>) -> Response {
    redirect_with_cookies("/", &logout_cookies(&state.login))
}
