//! ANSI terminal backend.
//!
//! `TerminalRenderer` keeps a copy of what is on screen and only writes the
//! cells of the invalidated region that actually changed. Cursor position,
//! colors and attributes are tracked so each is only emitted when it differs
//! from the terminal's current state.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::error::Result;
use crate::geometry::{Position, Size};
use crate::tree::Window;

use super::cell::{Cell, CellAttributes};
use super::color::Color;
use super::renderer::Renderer;

/// Where the renderer learns the screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    /// Ask the controlling terminal.
    Terminal,
    /// A fixed size, for writing to something that is not a terminal.
    Fixed(Size),
}

impl SizeSource {
    fn query(self) -> Result<Size> {
        match self {
            SizeSource::Terminal => crate::terminal::terminal_size(),
            SizeSource::Fixed(size) => Ok(size),
        }
    }
}

// ---------------------------------------------------------------------------
// TerminalRenderer
// ---------------------------------------------------------------------------

pub struct TerminalRenderer<W: Write> {
    writer: W,
    size_source: SizeSource,
    alternate_screen: bool,
    mouse_reporting: bool,
    cache: Vec<Vec<Option<Cell>>>,
    cursor: Position,
    foreground: Option<Color>,
    background: Option<Color>,
    attributes: CellAttributes,
}

impl TerminalRenderer<BufWriter<Stdout>> {
    /// A renderer for the controlling terminal, writing to stdout.
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            size_source: SizeSource::Terminal,
            alternate_screen: true,
            mouse_reporting: true,
            cache: Vec::new(),
            cursor: Position::ZERO,
            foreground: None,
            background: None,
            attributes: CellAttributes::empty(),
        }
    }

    pub fn size_source(mut self, source: SizeSource) -> Self {
        self.size_source = source;
        self
    }

    pub fn alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    pub fn mouse_reporting(mut self, enabled: bool) -> Self {
        self.mouse_reporting = enabled;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn resize(&mut self, window: &mut Window) -> Result<Size> {
        let size = self.size_source.query()?;
        window.set_window_size(size);
        let root = window.layers().root();
        window.layers_mut().invalidate(root);
        let (width, height) = (size.width.finite_or(0), size.height.finite_or(0));
        let width = usize::try_from(width).unwrap_or(0);
        let height = usize::try_from(height).unwrap_or(0);
        self.cache = vec![vec![None; width]; height];
        Ok(size)
    }

    /// Write one cell if it differs from what is on screen.
    pub(crate) fn draw_cell(&mut self, column: usize, line: usize, cell: Cell) -> io::Result<()> {
        let Some(slot) = self.cache.get_mut(line).and_then(|row| row.get_mut(column)) else {
            return Ok(());
        };
        if *slot == Some(cell) {
            return Ok(());
        }
        *slot = Some(cell);

        let position = Position::new(column, line);
        if self.cursor != position {
            let (x, y) = (u16::try_from(column).unwrap_or(u16::MAX), u16::try_from(line).unwrap_or(u16::MAX));
            queue!(self.writer, MoveTo(x, y))?;
            self.cursor = position;
        }
        if self.foreground != Some(cell.foreground) {
            queue!(self.writer, SetForegroundColor(cell.foreground.into()))?;
            self.foreground = Some(cell.foreground);
        }
        let background = cell.effective_background();
        if self.background != Some(background) {
            queue!(self.writer, SetBackgroundColor(background.into()))?;
            self.background = Some(background);
        }
        self.update_attributes(cell.attributes)?;
        queue!(self.writer, Print(cell.ch))?;
        self.cursor.column += 1;
        Ok(())
    }

    fn update_attributes(&mut self, attributes: CellAttributes) -> io::Result<()> {
        const TOGGLES: [(CellAttributes, Attribute, Attribute); 5] = [
            (CellAttributes::BOLD, Attribute::Bold, Attribute::NormalIntensity),
            (CellAttributes::ITALIC, Attribute::Italic, Attribute::NoItalic),
            (CellAttributes::UNDERLINE, Attribute::Underlined, Attribute::NoUnderline),
            (CellAttributes::STRIKETHROUGH, Attribute::CrossedOut, Attribute::NotCrossedOut),
            (CellAttributes::INVERTED, Attribute::Reverse, Attribute::NoReverse),
        ];
        let changed = self.attributes ^ attributes;
        for (flag, on, off) in TOGGLES {
            if changed.contains(flag) {
                let attribute = if attributes.contains(flag) { on } else { off };
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }
        self.attributes = attributes;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn start(&mut self, window: &mut Window) -> Result<()> {
        let size = self.resize(window)?;
        tracing::info!(%size, "starting terminal renderer");
        if self.alternate_screen {
            queue!(self.writer, EnterAlternateScreen)?;
        }
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0), Hide)?;
        if self.mouse_reporting {
            queue!(self.writer, EnableMouseCapture)?;
        }
        self.cursor = Position::ZERO;
        self.foreground = None;
        self.background = None;
        self.attributes = CellAttributes::empty();
        self.writer.flush()?;
        Ok(())
    }

    fn update(&mut self, window: &mut Window) -> Result<()> {
        let screen = window.window_size();
        let mut written = 0usize;
        super::for_each_invalidated(window, screen, |column, line, cell| {
            written += 1;
            self.draw_cell(column, line, cell)
        })?;
        tracing::trace!(cells = written, "terminal update");
        self.writer.flush()?;
        Ok(())
    }

    fn stop(&mut self, _window: &mut Window) -> Result<()> {
        tracing::info!("stopping terminal renderer");
        if self.mouse_reporting {
            queue!(self.writer, DisableMouseCapture)?;
        }
        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        if self.alternate_screen {
            queue!(self.writer, LeaveAlternateScreen)?;
        }
        queue!(self.writer, Show)?;
        self.writer.flush()?;
        Ok(())
    }

    fn handle_resize(&mut self, window: &mut Window) -> Result<()> {
        let size = self.resize(window)?;
        tracing::info!(%size, "terminal resized");
        queue!(self.writer, Clear(ClearType::All))?;
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::widgets::Text;

    fn renderer(width: i32, height: i32) -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::new(Vec::new())
            .size_source(SizeSource::Fixed(Size::new(width, height)))
            .alternate_screen(false)
            .mouse_reporting(false)
    }

    fn take_output(renderer: &mut TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(renderer.writer_mut())).unwrap()
    }

    fn started(text: &str, width: i32) -> (Window, TerminalRenderer<Vec<u8>>, crate::tree::WidgetId) {
        let mut window = Window::new();
        let label = window.create(Text::new(text));
        window.add_control(label);
        let mut renderer = renderer(width, 1);
        renderer.start(&mut window).unwrap();
        window.layout_window();
        take_output(&mut renderer);
        (window, renderer, label)
    }

    #[test]
    fn first_update_draws_everything_once() {
        let (mut window, mut renderer, _) = started("ab", 3);
        renderer.update(&mut window).unwrap();
        assert_eq!(take_output(&mut renderer), "\x1b[39m\x1b[49mab ");

        renderer.update(&mut window).unwrap();
        assert_eq!(take_output(&mut renderer), "");
    }

    #[test]
    fn only_changed_cells_are_written() {
        let (mut window, mut renderer, label) = started("ab", 3);
        renderer.update(&mut window).unwrap();
        take_output(&mut renderer);

        window.control_mut::<Text>(label).unwrap().set_text("ax");
        window.invalidate(label);
        renderer.update(&mut window).unwrap();
        assert_eq!(take_output(&mut renderer), "\x1b[1;2Hx");
    }

    #[test]
    fn attribute_changes_are_toggled() {
        let mut renderer = renderer(2, 1);
        let mut window = Window::new();
        renderer.start(&mut window).unwrap();
        take_output(&mut renderer);

        let underlined = Cell::new('u').with_attributes(CellAttributes::UNDERLINE);
        renderer.draw_cell(0, 0, underlined).unwrap();
        renderer.draw_cell(1, 0, Cell::new('p')).unwrap();
        assert_eq!(take_output(&mut renderer), "\x1b[39m\x1b[49m\x1b[4mu\x1b[24mp");
    }

    #[test]
    fn color_changes_are_emitted_once() {
        let mut renderer = renderer(3, 1);
        let mut window = Window::new();
        renderer.start(&mut window).unwrap();
        take_output(&mut renderer);

        let cell = Cell::new('x').with_background(Color::Xterm(208));
        renderer.draw_cell(0, 0, cell).unwrap();
        renderer.draw_cell(1, 0, cell).unwrap();
        assert_eq!(take_output(&mut renderer), "\x1b[39m\x1b[48;5;208mxx");
    }

    #[test]
    fn out_of_screen_cells_are_ignored() {
        let mut renderer = renderer(1, 1);
        let mut window = Window::new();
        renderer.start(&mut window).unwrap();
        take_output(&mut renderer);
        renderer.draw_cell(5, 0, Cell::new('x')).unwrap();
        assert_eq!(take_output(&mut renderer), "");
    }

    #[test]
    fn start_sizes_window_and_stop_restores() {
        let mut window = Window::new();
        let mut renderer = TerminalRenderer::new(Vec::new())
            .size_source(SizeSource::Fixed(Size::new(10, 4)))
            .mouse_reporting(false);
        renderer.start(&mut window).unwrap();
        assert_eq!(window.window_size(), Size::new(10, 4));
        let output = take_output(&mut renderer);
        assert!(output.starts_with("\x1b[?1049h"));
        assert!(output.ends_with("\x1b[?25l"));

        renderer.stop(&mut window).unwrap();
        let output = take_output(&mut renderer);
        assert!(output.contains("\x1b[?1049l"));
        assert!(output.ends_with("\x1b[?25h"));
    }
}
