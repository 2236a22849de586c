//! Grid map carried by every game step.
//!
//! The backend serialises a map as a list of columns: `map[x][y]` is the cell
//! at column `x`, row `y`. Cell values are small integer codes; negative codes
//! are meta-states rather than terrain.

use serde::{Deserialize, Serialize};

/// Grid coordinate (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance: the larger of the per-axis offsets.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

/// Meaning of a map cell code.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::FromRepr,
    strum::EnumIter,
)]
#[repr(i32)]
pub enum CellKind {
    /// Never observed. Also the fallback for unrecognised codes.
    Unknown = -2,
    /// Previously walked over by the offense player.
    Visited = -1,
    /// Open floor.
    Background = 0,
    Wall = 1,
    /// The controlled agent; its cell anchors the vision radius.
    PlayerOffense = 2,
    Goal = 3,
    TimeBomb = 4,
    TimeBombSecondRound = 5,
    TimeBombThirdRound = 6,
}

impl CellKind {
    /// Cell kind whose position is the agent's point of view.
    pub const VISION_ANCHOR: Self = Self::PlayerOffense;

    /// Resolves a raw code, falling back to [`CellKind::Unknown`].
    pub fn from_code(code: i32) -> Self {
        Self::from_repr(code).unwrap_or(Self::Unknown)
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Background cells are the only ones whose rendering depends on vision.
    pub const fn is_background(self) -> bool {
        matches!(self, Self::Background)
    }
}

/// Column-major grid of cell codes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameMap(Vec<Vec<i32>>);

impl GameMap {
    pub fn new(columns: Vec<Vec<i32>>) -> Self {
        Self(columns)
    }

    pub fn columns(&self) -> &[Vec<i32>] {
        &self.0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Length of the first column; zero for an empty map.
    pub fn height(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True when every column has the same length.
    pub fn is_rectangular(&self) -> bool {
        let height = self.height();
        self.0.iter().all(|column| column.len() == height)
    }

    pub fn code(&self, position: Position) -> Option<i32> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.0.get(x)?.get(y).copied()
    }

    pub fn kind(&self, position: Position) -> Option<CellKind> {
        self.code(position).map(CellKind::from_code)
    }

    /// Iterates cells column by column.
    pub fn cells(&self) -> impl Iterator<Item = (Position, i32)> + '_ {
        self.0.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(y, &code)| (Position::new(x as i32, y as i32), code))
        })
    }

    /// First cell (column-major) holding `code`.
    pub fn find(&self, code: i32) -> Option<Position> {
        self.cells()
            .find(|&(_, cell)| cell == code)
            .map(|(position, _)| position)
    }

    /// Position of the controlled agent, if it is on the map.
    pub fn agent_position(&self) -> Option<Position> {
        self.find(CellKind::VISION_ANCHOR.code())
    }
}

impl From<Vec<Vec<i32>>> for GameMap {
    fn from(columns: Vec<Vec<i32>>) -> Self {
        Self(columns)
    }
}
