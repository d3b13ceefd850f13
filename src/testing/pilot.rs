//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` starts an [`App`] on a [`BufferRenderer`] and feeds it raw
//! terminal input the way a terminal would send it, flushing after every
//! interaction so the screen is always current.

use crate::app::App;
use crate::error::Result;
use crate::event::ArrowKey;
use crate::geometry::{Position, Size};
use crate::render::{BufferRenderer, Cell};
use crate::tree::{WidgetId, Window};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use strata_tui::testing::Pilot;
/// use strata_tui::tree::Window;
/// use strata_tui::widgets::Text;
///
/// let mut window = Window::new();
/// let text = window.create(Text::new("hi"));
/// window.add_control(text);
/// let pilot = Pilot::new(window, 10, 1)?;
/// assert_eq!(pilot.screen(), "hi");
/// ```
pub struct Pilot {
    app: App<BufferRenderer>,
}

impl Pilot {
    /// Start a headless app at the given screen size and draw the first frame.
    pub fn new(window: Window, width: i32, height: i32) -> Result<Self> {
        let mut app = App::headless(window, Size::new(width, height));
        app.start()?;
        Ok(Self { app })
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Send raw input, then flush.
    pub fn send(&mut self, input: &str) {
        self.app.handle_input(input);
        self.flush();
    }

    /// Type text; each character goes to the first responder.
    pub fn type_text(&mut self, text: &str) {
        self.send(text);
    }

    pub fn press_enter(&mut self) {
        self.send("\r");
    }

    pub fn press_arrow(&mut self, key: ArrowKey) {
        let code = match key {
            ArrowKey::Up => 'A',
            ArrowKey::Down => 'B',
            ArrowKey::Right => 'C',
            ArrowKey::Left => 'D',
        };
        self.send(&format!("\x1b[{code}"));
    }

    /// Press and release the left button at a 0-based screen position.
    pub fn click(&mut self, column: u16, line: u16) {
        let (x, y) = (column.saturating_add(1), line.saturating_add(1));
        self.send(&format!("\x1b[<0;{x};{y}M\x1b[<0;{x};{y}m"));
    }

    /// Turn the wheel at a 0-based screen position; positive is down.
    pub fn scroll(&mut self, column: u16, line: u16, lines: i32) {
        let (x, y) = (column.saturating_add(1), line.saturating_add(1));
        let button = if lines > 0 { 65 } else { 64 };
        let report = format!("\x1b[<{button};{x};{y}M");
        self.send(&report.repeat(lines.unsigned_abs() as usize));
    }

    /// Resize the virtual screen.
    pub fn resize(&mut self, width: i32, height: i32) {
        if let Err(err) = self.app.resize(Size::new(width, height)) {
            tracing::error!(%err, "headless resize failed");
        }
    }

    /// Act as if the escape timeout elapsed.
    pub fn escape_timeout(&mut self) {
        self.app.flush_pending_input();
        self.flush();
    }

    fn flush(&mut self) {
        if let Err(err) = self.app.update_if_needed() {
            tracing::error!(%err, "headless update failed");
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn app(&self) -> &App<BufferRenderer> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App<BufferRenderer> {
        &mut self.app
    }

    pub fn window(&self) -> &Window {
        self.app.window()
    }

    /// Edit the tree directly; the next interaction (or [`Pilot::update`])
    /// draws the result.
    pub fn window_mut(&mut self) -> &mut Window {
        self.app.window_mut()
    }

    /// Flush pending invalidations now.
    pub fn update(&mut self) {
        self.flush();
    }

    pub fn is_running(&self) -> bool {
        self.app.is_running()
    }

    pub fn first_responder(&self) -> Option<WidgetId> {
        self.app.window().first_responder()
    }

    pub fn flush_count(&self) -> usize {
        self.app.flush_count()
    }

    // ── Screen ───────────────────────────────────────────────────────

    /// The screen as text, trailing blanks trimmed.
    pub fn screen(&self) -> String {
        self.app.renderer().to_text()
    }

    pub fn cell(&self, column: i32, line: i32) -> Option<Cell> {
        self.app.renderer().cell(Position::new(column, line))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
