//! Standalone SVG rendering of a [`MapView`].
use std::fmt::Write;

use crate::view_model::MapView;

const STROKE_WIDTH: f32 = 0.25;
const SCORE_FONT_SIZE: u32 = 12;

/// Renders `view` as an SVG document.
///
/// Each tile becomes one outlined `rect`. With `show_score` the score overlay
/// is drawn in the top-left corner. An empty view yields a zero-sized image.
pub fn render<S: AsRef<str>>(view: &MapView<S>, show_score: bool) -> String {
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg width="{}" height="{}" fill="none" xmlns="http://www.w3.org/2000/svg">"#,
        view.pixel_width(),
        view.pixel_height()
    );

    let stroke = escape(view.grid_line.as_ref());
    for tile in &view.tiles {
        let _ = writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            tile.origin.0,
            tile.origin.1,
            tile.size,
            tile.size,
            escape(tile.style.as_ref()),
            stroke,
            STROKE_WIDTH
        );
    }

    if show_score && !view.is_empty() {
        let _ = writeln!(
            svg,
            r#"  <text x="2" y="{}" font-family="monospace" font-size="{}" fill="{}">{}</text>"#,
            SCORE_FONT_SIZE,
            SCORE_FONT_SIZE,
            escape(view.score.style.as_ref()),
            escape(&view.score.text)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
