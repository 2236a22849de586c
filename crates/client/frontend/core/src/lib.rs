//! Cross-frontend primitives for presenting game steps.
//!
//! Houses the map view-model (tile sizing, visibility, per-cell styling), the
//! SVG renderer, and step export that any frontend can reuse.
pub mod config;
pub mod export;
pub mod svg;
pub mod view_model;

pub use config::{FrontendConfig, MapConfig};
pub use export::{ExportError, export_steps, path_segment};
pub use view_model::{
    HexPalette, MapView, PresentationMapper, TileView, Visibility, is_visible, plan_tile_size,
};
