// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role granted to a request whose cookie carried a valid token.
///
/// Every authenticated principal holds exactly one role. There is no role
/// claim inside the token; the role is assigned by the bridge on
/// successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Signed-in user
    #[serde(rename = "ROLE_USER")]
    User,
}

impl Role {
    /// Authority string as exposed to API consumers.
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.authority())
    }
}
