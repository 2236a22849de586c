//! Framework-agnostic presentation mapping.
//!
//! Map views are built against a [`PresentationMapper`] so each output target
//! (SVG, terminal, ...) can resolve cells to its own style type while sharing
//! the layout and visibility logic.

use game_core::CellKind;

/// Resolves map cells to a frontend-specific style.
///
/// # Example
///
/// ```ignore
/// impl PresentationMapper for TerminalTheme {
///     type Style = ratatui::style::Style;
///
///     fn render_cell(&self, kind: CellKind, visible: bool) -> Self::Style {
///         match kind {
///             CellKind::Wall => Style::default().bg(Color::Black),
///             CellKind::Background if !visible => Style::default().bg(Color::Gray),
///             _ => Style::default(),
///         }
///     }
///     // ...
/// }
/// ```
pub trait PresentationMapper {
    /// Style type for this frontend (e.g. a colour string).
    type Style: Clone;

    /// Style of a cell. `visible` is only meaningful for background cells;
    /// every other kind keeps its colour regardless of vision.
    fn render_cell(&self, kind: CellKind, visible: bool) -> Self::Style;

    /// Style of the outline drawn around every tile.
    fn style_grid_line(&self) -> Self::Style;

    /// Style of the score overlay.
    fn style_score(&self) -> Self::Style;
}

/// Hex colour palette used for SVG output.
#[derive(Clone, Copy, Debug, Default)]
pub struct HexPalette;

impl HexPalette {
    pub const UNEXPLORED: &'static str = "#DFDFDF";

    pub const fn color(kind: CellKind) -> &'static str {
        match kind {
            CellKind::Unknown => Self::UNEXPLORED,
            CellKind::Visited | CellKind::Background => "#FFFFFF",
            CellKind::Wall => "#000000",
            CellKind::PlayerOffense => "#FF0000",
            CellKind::Goal => "#FFD700",
            CellKind::TimeBomb => "#FF8C00",
            CellKind::TimeBombSecondRound => "#FF4500",
            CellKind::TimeBombThirdRound => "#8B0000",
        }
    }
}

impl PresentationMapper for HexPalette {
    type Style = &'static str;

    fn render_cell(&self, kind: CellKind, visible: bool) -> Self::Style {
        if kind.is_background() && !visible {
            return Self::UNEXPLORED;
        }
        Self::color(kind)
    }

    fn style_grid_line(&self) -> Self::Style {
        "black"
    }

    fn style_score(&self) -> Self::Style {
        "#1A1A1A"
    }
}
