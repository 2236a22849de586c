//! Leaderboard, ranking and competition-level snapshots.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::GameRecordBase;

/// One page of finished games (`GET /api/game/list`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResults {
    #[serde(default)]
    pub results: Vec<GameRecordBase>,
    #[serde(default)]
    pub total_game_count: u64,
}

/// A game that is currently being played (`GET /api/ongoing_matches`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OngoingMatch {
    pub id: String,
    pub team1_id: String,
    pub team2_id: String,
    pub start_time: DateTime<Utc>,
}

/// Static competition data fetched once at startup (`GET /api/launch_data`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchData {
    #[serde(default)]
    pub team_id_mapping: HashMap<String, String>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// Competition statistics (`GET /api/stats`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_games: u64,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ranking_info: RankingInfo,
}

impl Stats {
    /// True once `now` has passed the competition end time.
    pub fn is_over(&self, now: DateTime<Utc>) -> bool {
        self.end_time.is_some_and(|end| now >= end)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingInfo {
    /// Seconds between ranking recomputations on the backend.
    #[serde(default)]
    pub update_period: u64,
    #[serde(default)]
    pub results: Vec<RankResult>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResult {
    pub team_id: String,
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub total_wins: u32,
    #[serde(default)]
    pub total_draws: u32,
    #[serde(default)]
    pub total_losses: u32,
}

impl RankResult {
    /// Fraction of games won, zero before the first game.
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            f64::from(self.total_wins) / f64::from(self.total_games)
        }
    }
}
