// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cookie Auth Bridge - Stateless OAuth2 Login with Cookie-Borne JWTs
//!
//! After Google confirms a user's identity this service signs a JWT
//! describing that user and stores it in an HTTP-only cookie. Every later
//! request is authenticated from that cookie alone; there is no session
//! store.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and OpenAPI documentation
//! - `auth` - Token codec, cookie envelope, authentication bridge, login
//! - `config` - Environment configuration
//! - `models` - Response bodies
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod state;
pub mod telemetry;
