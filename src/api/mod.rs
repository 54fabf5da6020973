// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{auth_middleware, Role, AUTH_COOKIE},
    models::{HealthResponse, HelloResponse, IndexResponse, UserAttributes, UserResponse},
    state::AppState,
};

pub mod health;
pub mod hello;
pub mod session;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(hello::index))
        .route("/health", get(health::liveness))
        .route("/oauth2/authorization/google", get(session::start_login))
        .route("/login/oauth2/code/google", get(session::login_callback))
        .route("/api/hello", get(hello::hello))
        .route("/api/user", get(hello::user))
        .route("/api/logout", get(session::logout))
        .route("/logout", get(session::logout))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// Registers the `auth_token` cookie as an API key scheme.
struct CookieAuthAddon;

impl Modify for CookieAuthAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(AUTH_COOKIE))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Google OAuth2 API",
        version = "1.0",
        description = "API secured with Google OAuth2 login and a signed `auth_token` cookie.

**How to test the protected endpoints:**

1. Open a new tab and visit `/oauth2/authorization/google`
2. Complete the Google login flow; the browser is sent back here with the `auth_token` cookie set
3. Return to this Swagger UI tab
4. Try the endpoints below; the browser sends the cookie automatically

Visit `/logout` to clear the cookie."
    ),
    paths(
        hello::index,
        hello::hello,
        hello::user,
        session::start_login,
        session::login_callback,
        session::logout,
        health::liveness
    ),
    components(
        schemas(
            IndexResponse,
            HelloResponse,
            UserResponse,
            UserAttributes,
            HealthResponse,
            Role
        )
    ),
    modifiers(&CookieAuthAddon),
    tags(
        (name = "Hello", description = "Endpoints personalized by the auth cookie"),
        (name = "Session", description = "Google login and logout"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;
