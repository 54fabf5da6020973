// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{IdentityProvider, TokenCodec};
use crate::config::LoginSettings;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub login: Arc<LoginSettings>,
    pub provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        codec: TokenCodec,
        login: LoginSettings,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            codec: Arc::new(codec),
            login: Arc::new(login),
            provider,
        }
    }
}

#[cfg(test)]
pub(crate) use testing::{test_state, test_state_with_provider, StubProvider};

#[cfg(test)]
mod testing {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::AppState;
    use crate::auth::{IdentityAttributes, IdentityProvider, ProviderError, TokenCodec};
    use crate::config::LoginSettings;

    pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-for-app-state-at-least-32-bytes";

    /// Provider that returns canned attributes for one known code.
    pub(crate) struct StubProvider {
        pub attributes: IdentityAttributes,
    }

    #[async_trait]
    impl IdentityProvider for StubProvider {
        fn authorization_url(&self, state: &str) -> String {
            format!("https://idp.example.com/authorize?state={state}")
        }

        async fn exchange(&self, code: &str) -> Result<IdentityAttributes, ProviderError> {
            if code == "good-code" {
                Ok(self.attributes.clone())
            } else {
                Err(ProviderError::Rejected { status: 400 })
            }
        }
    }

    pub(crate) fn test_state_with_provider(provider: StubProvider) -> AppState {
        AppState::new(
            TokenCodec::new(TEST_SECRET).expect("test secret is long enough"),
            LoginSettings::default(),
            Arc::new(provider),
        )
    }

    pub(crate) fn test_state() -> AppState {
        test_state_with_provider(StubProvider {
            attributes: IdentityAttributes::default(),
        })
    }
}
