//! Data layer of the scoreboard client.
//!
//! Talks to the result backend through a [`Transport`], classifies every
//! response into a typed result, and keeps recently viewed game records in a
//! bounded FIFO cache behind [`GameService`].
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod format;
pub mod poller;
pub mod service;
pub mod teams;
pub mod transport;

pub use cache::{DEFAULT_CAPACITY, ResultCache};
pub use config::{BackendConfig, CacheConfig, ClientConfig, LeaderboardConfig, PollingConfig};
pub use fetcher::DataFetcher;
pub use format::{format_duration, seconds_since};
pub use poller::{PollEvent, Poller, PollerHandle};
pub use service::GameService;
pub use teams::TeamDirectory;
pub use transport::{
    FetchError, GAME_ENDED_MARKER, HttpTransport, RawResponse, Transport, TransportError,
    classify, fetch_json,
};
