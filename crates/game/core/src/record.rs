//! Game records: the typed result of one game between two teams.
//!
//! The backend returns a [`RawGameRecord`] whose outcome is hidden inside an
//! opaque string field. [`GameRecord::assemble`] decodes that field and
//! produces an immutable [`GameRecord`] whose [`GameOutcome`] is either the
//! decoded success payload or one of the [`GameError`] kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::map::GameMap;
use crate::payload::{self, PayloadError};

/// Summary fields shared by every record, including leaderboard rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecordBase {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub team1_id: String,
    pub team2_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
    #[serde(default)]
    pub team1_score: f64,
    #[serde(default)]
    pub team2_score: f64,
    #[serde(default)]
    pub is_error: bool,
}

/// Record exactly as served by `GET /api/game/get`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameRecord {
    #[serde(flatten)]
    pub base: GameRecordBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_data: Option<String>,
}

/// Fully decoded game record.
///
/// `base().is_error` always agrees with the outcome variant.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    base: GameRecordBase,
    outcome: GameOutcome,
}

impl GameRecord {
    pub fn new(mut base: GameRecordBase, outcome: GameOutcome) -> Self {
        base.is_error = outcome.is_error();
        Self { base, outcome }
    }

    /// Decodes whichever payload field the transport-level flag selects.
    ///
    /// An absent payload yields [`GameError::NoData`] and a payload that fails
    /// to decode yields [`GameError::Malformed`]; either way the record is
    /// tagged as an error even if the backend flagged it as a success.
    pub fn assemble(raw: RawGameRecord) -> Self {
        let RawGameRecord {
            base,
            error_data,
            game_data,
        } = raw;

        let outcome = if base.is_error {
            match payload::decode::<GameError>(error_data.as_deref()) {
                Ok(error) => GameOutcome::Failure(error),
                Err(err) => GameOutcome::Failure(GameError::from(err)),
            }
        } else {
            match payload::decode::<SuccessPayload>(game_data.as_deref()) {
                Ok(success) => GameOutcome::Success(success),
                Err(err) => GameOutcome::Failure(GameError::from(err)),
            }
        };

        Self::new(base, outcome)
    }

    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn base(&self) -> &GameRecordBase {
        &self.base
    }

    pub fn outcome(&self) -> &GameOutcome {
        &self.outcome
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_error()
    }

    pub fn success(&self) -> Option<&SuccessPayload> {
        match &self.outcome {
            GameOutcome::Success(success) => Some(success),
            GameOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&GameError> {
        match &self.outcome {
            GameOutcome::Success(_) => None,
            GameOutcome::Failure(error) => Some(error),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameOutcome {
    Success(SuccessPayload),
    Failure(GameError),
}

impl GameOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Error payload kinds, tagged on the wire by `errorType`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "errorType", rename_all = "lowercase")]
pub enum GameError {
    /// The game could not be launched.
    Simple { message: String },

    /// The game failed with per-match logs attached.
    Detailed {
        message: String,
        #[serde(default)]
        matches: Vec<MatchLogs>,
    },

    /// The game ran past its time budget.
    Timeout,

    /// The backend supplied no payload at all.
    NoData,

    /// A payload was present but could not be decoded. Never on the wire.
    #[serde(skip)]
    Malformed { reason: String },
}

impl GameError {
    /// Stable identifier of the kind, matching the wire tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "simple",
            Self::Detailed { .. } => "detailed",
            Self::Timeout => "timeout",
            Self::NoData => "nodata",
            Self::Malformed { .. } => "malformed",
        }
    }

    /// One-line description for display.
    pub fn describe(&self) -> String {
        match self {
            Self::Simple { message } => format!("game failed to launch: {}", message),
            Self::Detailed { message, matches } => {
                format!("game failed: {} ({} match logs)", message, matches.len())
            }
            Self::Timeout => "game exceeded its time limit".to_string(),
            Self::NoData => "no information is available for this game".to_string(),
            Self::Malformed { reason } => format!("game payload could not be decoded: {}", reason),
        }
    }
}

impl From<PayloadError> for GameError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Missing => Self::NoData,
            other => Self::Malformed {
                reason: other.to_string(),
            },
        }
    }
}

/// Logs attached to one match of a failed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLogs {
    #[serde(alias = "offenseId")]
    pub offense_team_id: String,
    #[serde(alias = "defenseId")]
    pub defense_team_id: String,
    #[serde(default)]
    pub logs: TeamLogs,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLogs {
    #[serde(default)]
    pub offense: Vec<String>,
    #[serde(default)]
    pub defense: Vec<String>,
}

/// Decoded `gameData` of a successful game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessPayload {
    #[serde(default)]
    pub max_move_count: u32,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl SuccessPayload {
    pub fn find_match(&self, offense_team_id: &str, defense_team_id: &str) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| {
            m.offense_team_id == offense_team_id && m.defense_team_id == defense_team_id
        })
    }
}

/// One offense-vs-defense match inside a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub offense_team_id: String,
    pub defense_team_id: String,
    #[serde(default)]
    pub logs: TeamLogs,
    #[serde(default)]
    pub steps: Vec<GameStep>,
}

impl MatchRecord {
    /// Step at `index`, clamped to the last step. `None` when there are none.
    pub fn step(&self, index: usize) -> Option<&GameStep> {
        let last = self.steps.len().checked_sub(1)?;
        self.steps.get(index.min(last))
    }

    pub fn final_score(&self) -> Option<f64> {
        self.steps.last().map(|step| step.score)
    }
}

/// Snapshot of a match after one move.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStep {
    #[serde(default)]
    pub score: f64,
    /// Chebyshev radius the agent can see. `None` on revisions without fog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_radius: Option<u32>,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub map: GameMap,
}
