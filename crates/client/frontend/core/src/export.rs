//! Writes every step of a match to disk as SVG files.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use game_core::GameStep;

use crate::config::MapConfig;
use crate::svg;
use crate::view_model::{HexPalette, MapView};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File name of the step at zero-based `index`.
pub fn file_name(index: usize) -> String {
    format!("map_{}.svg", index + 1)
}

/// Turns a backend-supplied id into a single directory name.
///
/// Separators and drive colons become `_`. `.`, `..` and the empty id collapse
/// to `_`. The result never leaves the directory it is joined onto.
pub fn path_segment(raw: &str) -> String {
    let segment: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();

    match segment.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => segment,
    }
}

/// Renders each step with the hex palette and writes `map_1.svg`,
/// `map_2.svg`, ... into `dir`, creating it if needed.
///
/// Returns the written paths in step order.
pub fn export_steps(
    steps: &[GameStep],
    dir: &Path,
    config: &MapConfig,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let view = MapView::from_step(step, &HexPalette, config.max_pixel_width);
        let path = dir.join(file_name(index));

        fs::write(&path, svg::render(&view, config.show_score)).map_err(|source| {
            ExportError::Write {
                path: path.clone(),
                source,
            }
        })?;
        written.push(path);
    }

    tracing::info!("Exported {} map(s) to {}", written.len(), dir.display());
    Ok(written)
}
