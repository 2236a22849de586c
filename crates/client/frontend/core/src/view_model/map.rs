//! Map view types for 2D grid rendering.

use game_core::{CellKind, GameStep, Position};

use super::presentation::PresentationMapper;
use super::tile_size::plan_tile_size;
use super::visibility::Visibility;

/// Laid-out map of one step, ready for a renderer.
///
/// Deterministic for a given step, mapper and width limit. A degenerate or
/// ragged map produces a view with no tiles and a zero tile size.
#[derive(Clone, Debug, PartialEq)]
pub struct MapView<S> {
    /// Columns in the grid.
    pub width: u32,
    /// Rows in the grid.
    pub height: u32,
    pub tile_size: u32,
    pub agent: Option<Position>,
    pub score: ScoreOverlay<S>,
    /// Tiles in column-major order.
    pub tiles: Vec<TileView<S>>,
    pub grid_line: S,
}

impl<S: Clone> MapView<S> {
    pub fn from_step<M>(step: &GameStep, mapper: &M, max_pixel_width: Option<u32>) -> Self
    where
        M: PresentationMapper<Style = S> + ?Sized,
    {
        let score = ScoreOverlay {
            text: format_score(step.score),
            style: mapper.style_score(),
        };
        let grid_line = mapper.style_grid_line();
        let visibility = Visibility::from_step(step);

        let planned = plan_tile_size(step.map.width(), step.map.height(), max_pixel_width);
        let Some(tile_size) = planned.filter(|_| step.map.is_rectangular()) else {
            if !step.map.is_empty() {
                tracing::warn!(
                    "Skipping ragged map: {} column(s), first column has {} cell(s)",
                    step.map.width(),
                    step.map.height()
                );
            }
            return Self {
                width: 0,
                height: 0,
                tile_size: 0,
                agent: None,
                score,
                tiles: Vec::new(),
                grid_line,
            };
        };

        let tiles = step
            .map
            .cells()
            .map(|(position, code)| {
                let kind = CellKind::from_code(code);
                let visible = visibility.contains(position);
                TileView {
                    position,
                    origin: (position.x as u32 * tile_size, position.y as u32 * tile_size),
                    size: tile_size,
                    code,
                    kind,
                    visible,
                    style: mapper.render_cell(kind, visible),
                }
            })
            .collect();

        Self {
            width: step.map.width() as u32,
            height: step.map.height() as u32,
            tile_size,
            agent: visibility.agent(),
            score,
            tiles,
            grid_line,
        }
    }
}

impl<S> MapView<S> {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pixel_width(&self) -> u32 {
        self.width * self.tile_size
    }

    pub fn pixel_height(&self) -> u32 {
        self.height * self.tile_size
    }

    pub fn tile(&self, position: Position) -> Option<&TileView<S>> {
        self.tiles.iter().find(|tile| tile.position == position)
    }
}

/// Single tile in the map view.
#[derive(Clone, Debug, PartialEq)]
pub struct TileView<S> {
    pub position: Position,
    /// Top-left corner in pixels.
    pub origin: (u32, u32),
    pub size: u32,
    /// Raw cell code as received.
    pub code: i32,
    pub kind: CellKind,
    pub visible: bool,
    pub style: S,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreOverlay<S> {
    pub text: String,
    pub style: S,
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.2}", score)
    }
}
