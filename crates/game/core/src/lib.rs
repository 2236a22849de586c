//! Result-service data model shared across clients.
//!
//! `game-core` defines the canonical shapes served by the competition backend
//! (game records, leaderboard pages, ranking snapshots) together with the
//! pure logic that turns raw backend records into typed ones:
//! - [`payload`] decodes the opaque `gameData` / `errorData` strings
//! - [`record`] assembles immutable [`GameRecord`]s from raw records
//! - [`map`] models the per-step grid and its cell codes
//! - [`standings`] holds leaderboard and ranking types
pub mod map;
pub mod payload;
pub mod record;
pub mod standings;

pub use map::{CellKind, GameMap, Position};
pub use payload::{Encoding, PayloadError};
pub use record::{
    GameError, GameOutcome, GameRecord, GameRecordBase, GameStep, MatchLogs, MatchRecord,
    RawGameRecord, SuccessPayload, TeamLogs,
};
pub use standings::{GameResults, LaunchData, OngoingMatch, RankResult, RankingInfo, Stats};
