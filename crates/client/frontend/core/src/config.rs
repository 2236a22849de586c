//! Frontend configuration structures and loaders.
//!
//! Rendering settings shared by every output target of the map view.

use std::env;
use std::path::PathBuf;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub map: MapConfig,
    /// Directory receiving `map_{n}.svg` files. Export is disabled when unset.
    pub export_dir: Option<PathBuf>,
}

impl FrontendConfig {
    pub const fn new(map: MapConfig, export_dir: Option<PathBuf>) -> Self {
        Self { map, export_dir }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MAP_MAX_PIXEL_WIDTH` - Upper bound on rendered map width (default: none)
    /// - `MAP_EXPORT_DIR` - Export every step of a fetched game here (default: none)
    /// - `MAP_SHOW_SCORE` - Draw the score overlay (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(width) = read_env::<u32>("MAP_MAX_PIXEL_WIDTH") {
            config.map.max_pixel_width = Some(width);
        }
        if let Ok(dir) = env::var("MAP_EXPORT_DIR") {
            if !dir.trim().is_empty() {
                config.export_dir = Some(PathBuf::from(dir.trim()));
            }
        }
        if let Some(show) = read_env_bool("MAP_SHOW_SCORE") {
            config.map.show_score = show;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MapConfig {
    pub max_pixel_width: Option<u32>,
    pub show_score: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_pixel_width: None,
            show_score: true,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
