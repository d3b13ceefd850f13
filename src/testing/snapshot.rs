//! Snapshot rendering helpers.
//!
//! Composite a window straight to text without a renderer, for assertions
//! and `insta` snapshots.

use crate::geometry::{Position, Size};
use crate::render::CellAttributes;
use crate::tree::Window;

/// Size the window, lay it out and composite it to text.
///
/// Each row becomes one line with trailing spaces trimmed; rows are joined
/// with `'\n'`.
pub fn render_to_string(window: &mut Window, width: i32, height: i32) -> String {
    window.set_window_size(Size::new(width, height));
    window.layout_window();
    screen_text(window)
}

/// Composite the window at its current layout.
pub fn screen_text(window: &Window) -> String {
    render_rows(window, |window, position| {
        window.cell_at(position).map_or(' ', |cell| cell.ch)
    })
}

/// Like [`screen_text`], but inverted cells are drawn as `#`, which makes
/// focus highlighting visible in a snapshot.
pub fn highlight_mask(window: &Window) -> String {
    render_rows(window, |window, position| match window.cell_at(position) {
        Some(cell) if cell.attributes.contains(CellAttributes::INVERTED) => '#',
        Some(cell) => cell.ch,
        None => ' ',
    })
}

fn render_rows(window: &Window, glyph: impl Fn(&Window, Position) -> char) -> String {
    let size = window.window_size();
    let (width, height) = (size.width.finite_or(0), size.height.finite_or(0));
    (0..height.max(0))
        .map(|line| {
            let row: String = (0..width.max(0))
                .map(|column| glyph(window, Position::new(column, line)))
                .collect();
            row.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
