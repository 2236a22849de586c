//! Scoreboard client binary.
//!
//! Composition root: loads configuration from the environment, sets up
//! logging, and hands control to [`Scoreboard::run`].
//!
//! # Examples
//!
//! ```bash
//! # Follow a local backend
//! SCOREBOARD_API_URL=http://localhost:8000 cargo run -p scoreboard-client
//!
//! # Show one game and export its maps as SVG
//! SCOREBOARD_GAME_ID=42 MAP_EXPORT_DIR=./maps cargo run -p scoreboard-client
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use client_core::ClientConfig;
use client_frontend_core::FrontendConfig;
use scoreboard_client::Scoreboard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let client_config = ClientConfig::from_env();
    let frontend_config = FrontendConfig::from_env();
    let session_id = std::env::var("SCOREBOARD_SESSION_ID").ok();

    setup_logging(session_id)?;

    tracing::info!("Starting scoreboard");
    tracing::info!("Cache capacity: {}", client_config.cache.capacity);
    if let Some(dir) = &frontend_config.export_dir {
        tracing::info!("Map export: {}", dir.display());
    }

    Scoreboard::builder()
        .client_config(client_config)
        .frontend_config(frontend_config)
        .build()?
        .run()
        .await
}

/// Setup logging to both stderr and a per-session file.
fn setup_logging(session_id: Option<String>) -> Result<()> {
    let session_id = session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("session_{}", chrono::Utc::now().timestamp()));

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!("Failed to create log directory {}", session_log_dir.display())
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "scoreboard.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/scoreboard.log", session_log_dir.display());

    Ok(())
}

/// Platform-specific log directory, e.g. `~/.cache/scoreboard/logs` on Linux.
fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "scoreboard")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/scoreboard"))
        .join("logs")
}
