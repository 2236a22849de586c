//! View-model types derived from a [`game_core::GameStep`].
pub mod map;
pub mod presentation;
pub mod tile_size;
pub mod visibility;

pub use map::{MapView, ScoreOverlay, TileView};
pub use presentation::{HexPalette, PresentationMapper};
pub use tile_size::{MAX_TILE_SIZE, MIN_TILE_SIZE, plan_tile_size};
pub use visibility::{Visibility, is_visible};
