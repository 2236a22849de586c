//! HTTP transport and the classifier that turns its outcomes into results.
//!
//! [`Transport`] is the only seam that performs network I/O. Everything above
//! it consumes the tagged `Result<T, FetchError>` produced by [`classify`],
//! which never panics and never lets a transport failure escape untyped.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Body prefix the backend uses once the competition window has closed.
pub const GAME_ENDED_MARKER: &str = "Forbidden";

/// Response as seen by the transport, before classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Canonical reason phrase of `status` (may be empty).
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures where no response was obtained at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Classified failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No response, or a success response whose body was not the expected JSON.
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// Non-2xx response; worth retrying on the next poll.
    #[error("server error {status}: {reason}")]
    Server { status: u16, reason: String },

    /// Non-2xx response carrying the [`GAME_ENDED_MARKER`]; polling must stop.
    #[error("competition window closed ({status}): {reason}")]
    GameEnded { status: u16, reason: String },
}

impl FetchError {
    pub fn reason(&self) -> &str {
        match self {
            Self::Transport { reason }
            | Self::Server { reason, .. }
            | Self::GameEnded { reason, .. } => reason,
        }
    }

    pub fn game_ended(&self) -> bool {
        matches!(self, Self::GameEnded { .. })
    }
}

/// Minimal GET-only transport against the backend's `/api` routes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `GET <api>/<path>?<query>` and return whatever came back.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, TransportError>;
}

/// Classifies a transport outcome and parses successful bodies as JSON.
pub fn classify<T: DeserializeOwned>(
    outcome: Result<RawResponse, TransportError>,
) -> Result<T, FetchError> {
    let response = outcome.map_err(|err| FetchError::Transport {
        reason: err.to_string(),
    })?;

    if !response.is_success() {
        let reason = if response.status_text.is_empty() {
            response.body.trim().to_string()
        } else {
            response.status_text.clone()
        };

        return Err(if response.body.starts_with(GAME_ENDED_MARKER) {
            FetchError::GameEnded {
                status: response.status,
                reason,
            }
        } else {
            FetchError::Server {
                status: response.status,
                reason,
            }
        });
    }

    serde_json::from_str(&response.body).map_err(|err| FetchError::Transport {
        reason: format!("invalid JSON response: {}", err),
    })
}

/// Sends a GET through `transport` and classifies the outcome.
pub async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    query: &[(&str, String)],
) -> Result<T, FetchError> {
    classify(transport.get(path, query).await)
}

/// reqwest-backed transport.
pub struct HttpTransport {
    /// Base URL including the `/api` suffix.
    base_url: String,

    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for a backend at `api_url` (the `/api` suffix is appended).
    pub fn new(api_url: &str, request_timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self {
            base_url: format!("{}/api", api_url.trim_end_matches('/')),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, TransportError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        tracing::debug!("{} -> {} ({} bytes)", url, status, body.len());

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
