//! Scoreboard builder with dependency injection pattern.

use std::sync::Arc;

use anyhow::{Context, Result};
use client_core::{ClientConfig, DataFetcher, GameService, HttpTransport, ResultCache, Transport};
use client_frontend_core::FrontendConfig;

use crate::Scoreboard;

/// Builder for constructing a [`Scoreboard`].
///
/// The client configuration is required. The frontend configuration defaults
/// to no export, and the transport defaults to HTTP against
/// `ClientConfig::backend`.
#[derive(Default)]
pub struct ScoreboardBuilder {
    client_config: Option<ClientConfig>,
    frontend_config: Option<FrontendConfig>,
    transport: Option<Arc<dyn Transport>>,
}

impl ScoreboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client configuration (required).
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = Some(config);
        self
    }

    pub fn frontend_config(mut self, config: FrontendConfig) -> Self {
        self.frontend_config = Some(config);
        self
    }

    /// Replace the HTTP transport, e.g. with an in-memory backend.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the Scoreboard.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Client configuration is not set
    /// - The HTTP client cannot be constructed
    pub fn build(self) -> Result<Scoreboard> {
        let client_config = self
            .client_config
            .context("Client configuration is required. Use .client_config() to set it.")?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http = HttpTransport::new(
                    &client_config.backend.api_url,
                    client_config.backend.request_timeout,
                )
                .context("Failed to build HTTP transport")?;
                tracing::info!("Backend: {}", http.base_url());
                Arc::new(http)
            }
        };

        let fetcher = DataFetcher::new(transport);
        let service = GameService::new(fetcher, ResultCache::new(client_config.cache.capacity));

        Ok(Scoreboard {
            service: Arc::new(service),
            teams: Default::default(),
            client_config,
            frontend_config: self.frontend_config.unwrap_or_default(),
        })
    }
}
