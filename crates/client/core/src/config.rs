//! Client configuration structures and loaders.
use std::env;
use std::time::Duration;

/// Configuration required to talk to the result backend and poll it.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    pub cache: CacheConfig,
    pub polling: PollingConfig,
    pub leaderboard: LeaderboardConfig,
    /// Game to fetch and display at startup, if any.
    pub game_id: Option<String>,
}

impl ClientConfig {
    pub const fn new(
        backend: BackendConfig,
        cache: CacheConfig,
        polling: PollingConfig,
        leaderboard: LeaderboardConfig,
    ) -> Self {
        Self {
            backend,
            cache,
            polling,
            leaderboard,
            game_id: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SCOREBOARD_API_URL` - Backend base URL, without `/api` (default: http://localhost:8000)
    /// - `SCOREBOARD_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
    /// - `SCOREBOARD_CACHE_CAPACITY` - Cached game records (default: 25)
    /// - `SCOREBOARD_STATS_INTERVAL_SECS` - Stats polling period (default: 10)
    /// - `SCOREBOARD_LEADERBOARD_INTERVAL_SECS` - Leaderboard polling period (default: 30)
    /// - `SCOREBOARD_ONGOING_INTERVAL_SECS` - Ongoing matches polling period (default: 10)
    /// - `SCOREBOARD_LEADERBOARD_LIMIT` - Games per leaderboard page (default: 10)
    /// - `SCOREBOARD_LEADERBOARD_PAGE` - Zero-based leaderboard page (default: 0)
    /// - `SCOREBOARD_GAME_ID` - Game to fetch at startup (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("SCOREBOARD_API_URL") {
            if !url.trim().is_empty() {
                config.backend.api_url = url.trim().to_string();
            }
        }
        if let Some(secs) = read_env::<u64>("SCOREBOARD_REQUEST_TIMEOUT_SECS") {
            config.backend.request_timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(capacity) = read_env::<usize>("SCOREBOARD_CACHE_CAPACITY") {
            config.cache.capacity = capacity.max(1);
        }

        if let Some(secs) = read_env::<u64>("SCOREBOARD_STATS_INTERVAL_SECS") {
            config.polling.stats = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = read_env::<u64>("SCOREBOARD_LEADERBOARD_INTERVAL_SECS") {
            config.polling.leaderboard = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = read_env::<u64>("SCOREBOARD_ONGOING_INTERVAL_SECS") {
            config.polling.ongoing = Duration::from_secs(secs.max(1));
        }

        if let Some(limit) = read_env::<u32>("SCOREBOARD_LEADERBOARD_LIMIT") {
            config.leaderboard.limit = limit.max(1);
        }
        if let Some(page) = read_env::<u32>("SCOREBOARD_LEADERBOARD_PAGE") {
            config.leaderboard.page = page;
        }

        config.game_id = env::var("SCOREBOARD_GAME_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        config
    }
}

#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: crate::cache::DEFAULT_CAPACITY,
        }
    }
}

/// Polling periods for each backend resource.
#[derive(Clone, Debug)]
pub struct PollingConfig {
    pub stats: Duration,
    pub leaderboard: Duration,
    pub ongoing: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            stats: Duration::from_secs(10),
            leaderboard: Duration::from_secs(30),
            ongoing: Duration::from_secs(10),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LeaderboardConfig {
    pub limit: u32,
    pub page: u32,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { limit: 10, page: 0 }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_cadence() {
        let config = ClientConfig::default();
        assert_eq!(config.cache.capacity, 25);
        assert_eq!(config.polling.stats, Duration::from_secs(10));
        assert_eq!(config.polling.leaderboard, Duration::from_secs(30));
        assert_eq!(config.leaderboard.limit, 10);
        assert_eq!(config.backend.api_url, "http://localhost:8000");
        assert!(config.game_id.is_none());
    }
}
