// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Greeting and current-user endpoints.

use axum::Json;

use crate::{
    auth::{Auth, OptionalAuth},
    models::{HelloResponse, IndexResponse, UserResponse},
};

/// Landing page.
#[utoipa::path(
    get,
    path = "/",
    tag = "Hello",
    responses((status = 200, description = "Login state and links", body = IndexResponse))
)]
pub async fn index(OptionalAuth(user): OptionalAuth) -> Json<IndexResponse> {
    Json(IndexResponse {
        authenticated: user.is_some(),
        login_url: "/oauth2/authorization/google".to_string(),
        logout_url: "/logout".to_string(),
        email: user.map(|u| u.email().to_string()),
    })
}

/// Personalized greeting.
///
/// Anonymous visitors are greeted as guests.
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "Hello",
    security((), ("cookie_auth" = [])),
    responses((status = 200, description = "Greeting", body = HelloResponse))
)]
pub async fn hello(OptionalAuth(user): OptionalAuth) -> Json<HelloResponse> {
    Json(match user {
        Some(user) => HelloResponse::from(&user),
        None => HelloResponse::guest(),
    })
}

/// Details of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Hello",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, description = "User attributes and authorities", body = UserResponse),
        (status = 401, description = "No valid auth cookie")
    )
)]
pub async fn user(Auth(user): Auth) -> Json<UserResponse> {
    Json(user.into())
}
