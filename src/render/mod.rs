//! Drawing: cells, colors, and the backends that put them on screen.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod renderer;
pub mod terminal;

pub use buffer::BufferRenderer;
pub use cell::{Cell, CellAttributes};
pub use color::{AnsiColor, Color, ParseColorError};
pub use renderer::Renderer;
pub use terminal::{SizeSource, TerminalRenderer};

use std::io;

use crate::geometry::{Position, Rect, Size};
use crate::tree::Window;

/// Take the window's invalidated region, clip it to `screen`, and hand every
/// composited cell in it to `draw`. Positions no layer covers are blank.
pub(crate) fn for_each_invalidated(
    window: &mut Window,
    screen: Size,
    mut draw: impl FnMut(usize, usize, Cell) -> io::Result<()>,
) -> io::Result<()> {
    let Some(invalidated) = window.layers_mut().take_invalidated() else {
        return Ok(());
    };
    let Some(rect) = invalidated.intersection(Rect::from_parts(Position::ZERO, screen)) else {
        return Ok(());
    };
    if rect.is_empty() {
        return Ok(());
    }
    let (Some(top), Some(bottom)) = (rect.min_line().finite(), rect.max_line().finite()) else {
        return Ok(());
    };
    let (Some(left), Some(right)) = (rect.min_column().finite(), rect.max_column().finite()) else {
        return Ok(());
    };
    for line in top.max(0)..=bottom {
        for column in left.max(0)..=right {
            let cell = window.cell_at(Position::new(column, line)).unwrap_or(Cell::blank());
            // Non-negative by the clamps above.
            draw(column as usize, line as usize, cell)?;
        }
    }
    Ok(())
}
