//! Top-level scoreboard orchestrating the result service, pollers, and map export.
//!
//! # Architecture
//!
//! ```text
//! Scoreboard (composition root)
//!   ├─→ GameService (cache-first game records over a Transport)
//!   ├─→ Pollers (stats, leaderboard, ongoing matches)
//!   └─→ Map export (SVG per step, optional)
//! ```
//!
//! Every component is built once in [`ScoreboardBuilder::build`] and shared by
//! reference. The run loop stops when the backend reports the competition
//! closed, when any poller exits, or on Ctrl-C.

mod builder;

pub use builder::ScoreboardBuilder;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use client_core::{
    ClientConfig, FetchError, GameService, PollEvent, Poller, TeamDirectory, format_duration,
    seconds_since,
};
use client_frontend_core::{FrontendConfig, export_steps, path_segment};
use game_core::{GameOutcome, GameRecord, GameResults, OngoingMatch, Stats};

/// Whether the run loop keeps going after handling an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Top-level scoreboard container.
pub struct Scoreboard {
    service: Arc<GameService>,
    teams: TeamDirectory,
    client_config: ClientConfig,
    frontend_config: FrontendConfig,
}

impl Scoreboard {
    /// Create a new ScoreboardBuilder.
    pub fn builder() -> ScoreboardBuilder {
        ScoreboardBuilder::new()
    }

    pub fn service(&self) -> &GameService {
        &self.service
    }

    pub fn teams(&self) -> &TeamDirectory {
        &self.teams
    }

    /// Run the scoreboard.
    ///
    /// 1. Loads team names from the launch data
    /// 2. Shows (and optionally exports) the configured game
    /// 3. Polls stats, leaderboard and ongoing matches until the competition
    ///    ends or the process is interrupted
    pub async fn run(mut self) -> Result<()> {
        if self.load_team_names().await == Flow::Stop {
            tracing::info!("Competition has ended; nothing to poll");
            return Ok(());
        }

        if let Some(game_id) = self.client_config.game_id.clone() {
            match self.show_game(&game_id).await {
                Ok(paths) if !paths.is_empty() => {
                    tracing::info!("Wrote {} map file(s) for game {}", paths.len(), game_id);
                }
                Ok(_) => {}
                Err(err) if is_game_ended(&err) => {
                    tracing::info!("Competition has ended: {:#}", err);
                    return Ok(());
                }
                Err(err) => tracing::warn!("{:#}", err),
            }
        }

        self.poll_until_ended().await;

        tracing::info!("Scoreboard shutdown complete");
        Ok(())
    }

    /// Fetch `id` through the cache, log it, and export its maps when an
    /// export directory is configured.
    ///
    /// Maps land in `<export_dir>/<game id>/<offense>_vs_<defense>/map_{n}.svg`,
    /// with each id flattened by [`path_segment`].
    /// Returns the written paths.
    pub async fn show_game(&self, id: &str) -> Result<Vec<PathBuf>> {
        let record = self
            .service
            .fetch_or_get(id)
            .await
            .with_context(|| format!("Failed to load game {}", id))?;

        self.log_record(&record);

        let Some(export_dir) = &self.frontend_config.export_dir else {
            return Ok(Vec::new());
        };
        let Some(payload) = record.success() else {
            return Ok(Vec::new());
        };

        let mut written = Vec::new();
        for game_match in &payload.matches {
            let match_dir = export_dir
                .join(path_segment(record.id()))
                .join(path_segment(&format!(
                    "{}_vs_{}",
                    game_match.offense_team_id, game_match.defense_team_id
                )));
            let paths = export_steps(&game_match.steps, &match_dir, &self.frontend_config.map)
                .with_context(|| format!("Failed to export maps of game {}", record.id()))?;
            written.extend(paths);
        }

        Ok(written)
    }

    async fn load_team_names(&mut self) -> Flow {
        match self.service.fetcher().launch_data().await {
            Ok(launch) => {
                self.teams.set_mapping(&launch.team_id_mapping);
                tracing::info!("Loaded {} team name(s)", self.teams.len());
                if let Some(end) = launch.end_time {
                    tracing::info!("Competition ends at {}", end);
                }
                Flow::Continue
            }
            Err(err) if err.game_ended() => Flow::Stop,
            Err(err) => {
                tracing::warn!("Launch data unavailable, showing raw team ids: {}", err);
                Flow::Continue
            }
        }
    }

    async fn poll_until_ended(&self) {
        let fetcher = self.service.fetcher().clone();
        let polling = &self.client_config.polling;
        let leaderboard = self.client_config.leaderboard.clone();

        let (stats_poller, mut stats_events) = Poller::spawn("stats", polling.stats, {
            let fetcher = fetcher.clone();
            move || {
                let fetcher = fetcher.clone();
                async move { fetcher.stats().await }
            }
        });
        let (leaderboard_poller, mut leaderboard_events) =
            Poller::spawn("leaderboard", polling.leaderboard, {
                let fetcher = fetcher.clone();
                move || {
                    let fetcher = fetcher.clone();
                    let (limit, page) = (leaderboard.limit, leaderboard.page);
                    async move { fetcher.leaderboard(limit, page).await }
                }
            });
        let (ongoing_poller, mut ongoing_events) = Poller::spawn("ongoing", polling.ongoing, {
            let fetcher = fetcher.clone();
            move || {
                let fetcher = fetcher.clone();
                async move { fetcher.ongoing_matches().await }
            }
        });

        loop {
            let flow = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    Flow::Stop
                }
                event = stats_events.recv() => event.map_or(Flow::Stop, |e| self.on_stats(e)),
                event = leaderboard_events.recv() => {
                    event.map_or(Flow::Stop, |e| self.on_leaderboard(e))
                }
                event = ongoing_events.recv() => event.map_or(Flow::Stop, |e| self.on_ongoing(e)),
            };
            if flow == Flow::Stop {
                break;
            }
        }

        stats_poller.shutdown().await;
        leaderboard_poller.shutdown().await;
        ongoing_poller.shutdown().await;
    }

    fn on_stats(&self, event: PollEvent<Stats>) -> Flow {
        let stats = match event {
            PollEvent::Updated(stats) => stats,
            PollEvent::Failed(_) => return Flow::Continue,
            PollEvent::Ended => return ended("stats"),
        };

        tracing::info!(
            "Stats: {} game(s) played, ranking refreshed every {}s",
            stats.total_games,
            stats.ranking_info.update_period
        );
        for (rank, result) in stats.ranking_info.results.iter().enumerate() {
            tracing::info!(
                "  #{} {}: {}W {}D {}L ({:.0}% wins over {} games)",
                rank + 1,
                self.teams.name_or_id(&result.team_id),
                result.total_wins,
                result.total_draws,
                result.total_losses,
                result.win_rate() * 100.0,
                result.total_games
            );
        }

        if stats.is_over(Utc::now()) {
            tracing::info!("Competition end time has passed");
        }
        Flow::Continue
    }

    fn on_leaderboard(&self, event: PollEvent<GameResults>) -> Flow {
        let page = match event {
            PollEvent::Updated(page) => page,
            PollEvent::Failed(_) => return Flow::Continue,
            PollEvent::Ended => return ended("leaderboard"),
        };

        tracing::info!(
            "Leaderboard: {} of {} game(s)",
            page.results.len(),
            page.total_game_count
        );
        for game in &page.results {
            let winner = match &game.winner_id {
                Some(winner) => self.teams.name_or_id(winner),
                None if game.is_error => "error",
                None => "draw",
            };
            tracing::info!(
                "  {} {} vs {} -> {} ({})",
                game.id,
                self.teams.name_or_id(&game.team1_id),
                self.teams.name_or_id(&game.team2_id),
                winner,
                format_duration(game.start_time, game.end_time)
            );
            if let Some(cached) = self.service.peek(&game.id) {
                tracing::debug!("  {} already cached (error: {})", game.id, cached.is_error());
            }
        }
        Flow::Continue
    }

    fn on_ongoing(&self, event: PollEvent<Vec<OngoingMatch>>) -> Flow {
        let matches = match event {
            PollEvent::Updated(matches) => matches,
            PollEvent::Failed(_) => return Flow::Continue,
            PollEvent::Ended => return ended("ongoing matches"),
        };

        let now = Utc::now();
        tracing::info!("{} match(es) in progress", matches.len());
        for ongoing in &matches {
            tracing::info!(
                "  {} {} vs {} running for {}s",
                ongoing.id,
                self.teams.name_or_id(&ongoing.team1_id),
                self.teams.name_or_id(&ongoing.team2_id),
                seconds_since(ongoing.start_time, now)
            );
        }
        Flow::Continue
    }

    fn log_record(&self, record: &GameRecord) {
        let base = record.base();
        tracing::info!(
            "Game {}: {} {} - {} {} in {}",
            record.id(),
            self.teams.name_or_id(&base.team1_id),
            base.team1_score,
            base.team2_score,
            self.teams.name_or_id(&base.team2_id),
            format_duration(base.start_time, base.end_time)
        );

        match record.outcome() {
            GameOutcome::Success(payload) => {
                for game_match in &payload.matches {
                    tracing::info!(
                        "  {} attacking {}: {} step(s), final score {}",
                        self.teams.name_or_id(&game_match.offense_team_id),
                        self.teams.name_or_id(&game_match.defense_team_id),
                        game_match.steps.len(),
                        game_match.final_score().unwrap_or_default()
                    );
                }
            }
            GameOutcome::Failure(error) => {
                tracing::warn!("Game {} [{}]: {}", record.id(), error.kind(), error.describe());
            }
        }
    }
}

fn ended(source: &str) -> Flow {
    tracing::info!("Competition has ended ({} poller)", source);
    Flow::Stop
}

fn is_game_ended(err: &anyhow::Error) -> bool {
    err.downcast_ref::<FetchError>()
        .is_some_and(FetchError::game_ended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::{PollingConfig, RawResponse, Transport, TransportError};
    use client_frontend_core::MapConfig;
    use game_core::payload::{self, Encoding};
    use game_core::{GameMap, GameStep, MatchRecord, SuccessPayload, TeamLogs};
    use serde_json::json;

    /// Serves canned responses per path; unknown paths answer "Forbidden".
    #[derive(Default)]
    struct CannedBackend {
        responses: Mutex<HashMap<&'static str, VecDeque<RawResponse>>>,
        hits: Mutex<Vec<String>>,
    }

    impl CannedBackend {
        fn ok(self, path: &'static str, body: serde_json::Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .entry(path)
                .or_default()
                .push_back(RawResponse::new(200, "OK", body.to_string()));
            self
        }

        fn hits(&self, path: &str) -> usize {
            self.hits.lock().unwrap().iter().filter(|p| *p == path).count()
        }
    }

    #[async_trait]
    impl Transport for CannedBackend {
        async fn get(
            &self,
            path: &str,
            _query: &[(&str, String)],
        ) -> Result<RawResponse, TransportError> {
            self.hits.lock().unwrap().push(path.to_string());
            let canned = self
                .responses
                .lock()
                .unwrap()
                .get_mut(path)
                .and_then(VecDeque::pop_front);
            Ok(canned.unwrap_or_else(|| RawResponse::new(403, "Forbidden", "Forbidden")))
        }
    }

    fn fast_config(game_id: Option<&str>) -> ClientConfig {
        ClientConfig {
            polling: PollingConfig {
                stats: Duration::from_millis(10),
                leaderboard: Duration::from_millis(10),
                ongoing: Duration::from_millis(10),
            },
            game_id: game_id.map(str::to_string),
            ..ClientConfig::default()
        }
    }

    fn game_json(id: &str) -> serde_json::Value {
        let payload = SuccessPayload {
            max_move_count: 1,
            matches: vec![MatchRecord {
                offense_team_id: "t1".into(),
                defense_team_id: "t2".into(),
                logs: TeamLogs::default(),
                steps: vec![
                    GameStep {
                        score: 1.0,
                        vision_radius: Some(2),
                        logs: vec![],
                        map: GameMap::new(vec![vec![2, 0], vec![0, 3]]),
                    },
                    GameStep {
                        score: 2.0,
                        vision_radius: Some(2),
                        logs: vec![],
                        map: GameMap::new(vec![vec![-1, 0], vec![2, 3]]),
                    },
                ],
            }],
        };
        json!({
            "id": id,
            "startTime": "2024-03-01T10:00:00Z",
            "endTime": "2024-03-01T10:01:30Z",
            "team1Id": "t1",
            "team2Id": "t2",
            "winnerId": "t1",
            "team1Score": 2.0,
            "team2Score": 0.0,
            "isError": false,
            "gameData": payload::encode(&payload, Encoding::Base64GzipJson).unwrap(),
        })
    }

    #[tokio::test]
    async fn show_game_exports_every_step() {
        let backend = Arc::new(CannedBackend::default().ok("game/get", game_json("g1")));
        let export_dir = tempfile::tempdir().unwrap();

        let scoreboard = Scoreboard::builder()
            .client_config(fast_config(None))
            .frontend_config(FrontendConfig::new(
                MapConfig::default(),
                Some(export_dir.path().to_path_buf()),
            ))
            .transport(backend.clone())
            .build()
            .unwrap();

        let paths = scoreboard.show_game("g1").await.unwrap();
        let match_dir = export_dir.path().join("g1").join("t1_vs_t2");
        assert_eq!(paths, vec![match_dir.join("map_1.svg"), match_dir.join("map_2.svg")]);
        assert!(paths.iter().all(|p| p.exists()));

        // Served from cache the second time.
        scoreboard.show_game("g1").await.unwrap();
        assert_eq!(backend.hits("game/get"), 1);
    }

    #[tokio::test]
    async fn hostile_game_ids_stay_inside_export_dir() {
        let outside = tempfile::tempdir().unwrap();
        let hostile = outside.path().join("escaped").to_string_lossy().into_owned();
        let backend = Arc::new(CannedBackend::default().ok("game/get", game_json(&hostile)));
        let export_dir = tempfile::tempdir().unwrap();

        let scoreboard = Scoreboard::builder()
            .client_config(fast_config(None))
            .frontend_config(FrontendConfig::new(
                MapConfig::default(),
                Some(export_dir.path().to_path_buf()),
            ))
            .transport(backend)
            .build()
            .unwrap();

        let paths = scoreboard.show_game(&hostile).await.unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.starts_with(export_dir.path())));
        assert!(!outside.path().join("escaped").exists());
    }

    #[tokio::test]
    async fn show_game_surfaces_competition_end() {
        let backend = Arc::new(CannedBackend::default());
        let scoreboard = Scoreboard::builder()
            .client_config(fast_config(None))
            .transport(backend)
            .build()
            .unwrap();

        let err = scoreboard.show_game("g1").await.unwrap_err();
        assert!(is_game_ended(&err));
        assert!(scoreboard.service().peek("g1").is_none());
    }

    #[tokio::test]
    async fn run_stops_once_pollers_report_the_end() {
        let backend = Arc::new(
            CannedBackend::default()
                .ok("launch_data", json!({ "teamIdMapping": { "t1": "Red" } }))
                .ok("game/get", game_json("g1"))
                .ok("ongoing_matches", json!([])),
        );

        let scoreboard = Scoreboard::builder()
            .client_config(fast_config(Some("g1")))
            .transport(backend.clone())
            .build()
            .unwrap();

        tokio::time::timeout(Duration::from_secs(5), scoreboard.run())
            .await
            .expect("run should finish once the backend closes")
            .unwrap();

        assert_eq!(backend.hits("launch_data"), 1);
        assert_eq!(backend.hits("game/get"), 1);
        assert!(backend.hits("stats") >= 1);
    }

    #[tokio::test]
    async fn closed_launch_data_skips_polling() {
        let backend = Arc::new(CannedBackend::default());
        let scoreboard = Scoreboard::builder()
            .client_config(fast_config(Some("g1")))
            .transport(backend.clone())
            .build()
            .unwrap();

        scoreboard.run().await.unwrap();

        assert_eq!(backend.hits("launch_data"), 1);
        assert_eq!(backend.hits("game/get"), 0);
        assert_eq!(backend.hits("stats"), 0);
    }

    #[tokio::test]
    async fn launch_data_fills_team_names() {
        let backend = Arc::new(
            CannedBackend::default().ok("launch_data", json!({ "teamIdMapping": { "t1": "Red" } })),
        );
        let mut scoreboard = Scoreboard::builder()
            .client_config(fast_config(None))
            .transport(backend)
            .build()
            .unwrap();

        assert_eq!(scoreboard.load_team_names().await, Flow::Continue);
        assert_eq!(scoreboard.teams().name_or_id("t1"), "Red");
        assert_eq!(scoreboard.teams().name_or_id("t2"), "t2");
    }

    #[test]
    fn builder_requires_client_config() {
        assert!(Scoreboard::builder().build().is_err());
    }
}
