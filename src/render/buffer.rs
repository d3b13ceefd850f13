//! In-memory backend.
//!
//! `BufferRenderer` draws into a grid of cells instead of a terminal. The
//! size is virtual and changed with [`BufferRenderer::set_size`], so headless
//! applications and tests can drive the whole pipeline without a tty.

use crate::error::Result;
use crate::geometry::{Position, Size};
use crate::tree::Window;

use super::cell::Cell;
use super::renderer::Renderer;

#[derive(Debug, Clone)]
pub struct BufferRenderer {
    size: Size,
    grid: Vec<Vec<Cell>>,
    running: bool,
    update_count: usize,
    cells_written: usize,
}

impl BufferRenderer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            grid: Vec::new(),
            running: false,
            update_count: 0,
            cells_written: 0,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Change the virtual screen size. Takes effect on the next
    /// [`Renderer::handle_resize`].
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of `update` calls since creation.
    pub fn update_count(&self) -> usize {
        self.update_count
    }

    /// Number of cells sampled by the last `update`.
    pub fn cells_written(&self) -> usize {
        self.cells_written
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        let column = usize::try_from(position.column.finite()?).ok()?;
        let line = usize::try_from(position.line.finite()?).ok()?;
        self.grid.get(line)?.get(column).copied()
    }

    /// The screen's characters, one line per row, trailing blanks trimmed.
    pub fn to_text(&self) -> String {
        self.grid
            .iter()
            .map(|row| row.iter().map(|cell| cell.ch).collect::<String>().trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn reset_grid(&mut self, window: &mut Window) {
        window.set_window_size(self.size);
        let root = window.layers().root();
        window.layers_mut().invalidate(root);
        let width = usize::try_from(self.size.width.finite_or(0)).unwrap_or(0);
        let height = usize::try_from(self.size.height.finite_or(0)).unwrap_or(0);
        self.grid = vec![vec![Cell::blank(); width]; height];
    }
}

impl Renderer for BufferRenderer {
    fn start(&mut self, window: &mut Window) -> Result<()> {
        self.reset_grid(window);
        self.running = true;
        Ok(())
    }

    fn update(&mut self, window: &mut Window) -> Result<()> {
        let screen = window.window_size();
        let mut written = 0;
        super::for_each_invalidated(window, screen, |column, line, cell| {
            if let Some(slot) = self.grid.get_mut(line).and_then(|row| row.get_mut(column)) {
                *slot = cell;
                written += 1;
            }
            Ok(())
        })?;
        self.cells_written = written;
        self.update_count += 1;
        Ok(())
    }

    fn stop(&mut self, _window: &mut Window) -> Result<()> {
        self.running = false;
        Ok(())
    }

    fn handle_resize(&mut self, window: &mut Window) -> Result<()> {
        self.reset_grid(window);
        Ok(())
    }
}
