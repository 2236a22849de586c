//! Typed access to every backend route.

use std::sync::Arc;

use game_core::{GameRecord, GameResults, LaunchData, OngoingMatch, RawGameRecord, Stats};

use crate::transport::{FetchError, Transport, fetch_json};

/// Typed backend client. Each call returns a classified result.
#[derive(Clone)]
pub struct DataFetcher {
    transport: Arc<dyn Transport>,
}

impl DataFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the raw record for `id` without decoding its payload.
    pub async fn raw_game(&self, id: &str) -> Result<RawGameRecord, FetchError> {
        fetch_json(self.transport.as_ref(), "game/get", &[("id", id.to_string())]).await
    }

    /// Fetch and decode the record for `id`.
    pub async fn game(&self, id: &str) -> Result<GameRecord, FetchError> {
        let raw = self.raw_game(id).await?;
        let record = GameRecord::assemble(raw);

        if let Some(error) = record.error() {
            tracing::debug!("Game {} resolved to error kind {}", record.id(), error.kind());
        }

        Ok(record)
    }

    /// Fetch one leaderboard page. `page` is zero-based.
    pub async fn leaderboard(&self, limit: u32, page: u32) -> Result<GameResults, FetchError> {
        fetch_json(
            self.transport.as_ref(),
            "game/list",
            &[("limit", limit.to_string()), ("page", page.to_string())],
        )
        .await
    }

    pub async fn ongoing_matches(&self) -> Result<Vec<OngoingMatch>, FetchError> {
        fetch_json(self.transport.as_ref(), "ongoing_matches", &[]).await
    }

    pub async fn launch_data(&self) -> Result<LaunchData, FetchError> {
        fetch_json(self.transport.as_ref(), "launch_data", &[]).await
    }

    pub async fn stats(&self) -> Result<Stats, FetchError> {
        fetch_json(self.transport.as_ref(), "stats", &[]).await
    }
}
