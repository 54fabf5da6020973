// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use cookie_auth_bridge::{
    api::router,
    auth::{GoogleProvider, TokenCodec},
    config::{AppConfig, LogFormat},
    state::AppState,
    telemetry,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    telemetry::init(LogFormat::from_env());

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let AppConfig {
        bind_addr,
        jwt_secret,
        using_development_secret,
        google,
        login,
    } = AppConfig::from_env()?;

    if using_development_secret {
        tracing::warn!("JWT_SECRET not set, signing tokens with the built-in development secret");
    }

    // The codec keeps the only copy of the key from here on.
    let codec = TokenCodec::new(jwt_secret.as_bytes())?;
    drop(jwt_secret);

    let provider = GoogleProvider::new(google)?;
    let state = AppState::new(codec, login, Arc::new(provider));
    let app = router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening (docs at /swagger-ui)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
