//! Square field of view around the offense agent.
use game_core::{GameStep, Position};

/// True when `cell` lies within `radius` of `agent` on both axes.
pub fn is_visible(agent: Position, cell: Position, radius: u32) -> bool {
    agent.chebyshev_distance(cell) <= radius
}

/// Field of view of one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    agent: Option<Position>,
    radius: Option<u32>,
}

impl Visibility {
    pub fn new(agent: Option<Position>, radius: Option<u32>) -> Self {
        Self { agent, radius }
    }

    /// Locates the agent on the step's map and takes its vision radius.
    pub fn from_step(step: &GameStep) -> Self {
        Self::new(step.map.agent_position(), step.vision_radius)
    }

    pub fn agent(&self) -> Option<Position> {
        self.agent
    }

    /// Whether `cell` is revealed.
    ///
    /// Steps without a vision radius have no fog. With fog but no agent on the
    /// map, nothing is revealed.
    pub fn contains(&self, cell: Position) -> bool {
        match (self.radius, self.agent) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(radius), Some(agent)) => is_visible(agent, cell, radius),
        }
    }
}
