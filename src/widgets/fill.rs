//! Background fills: ColorFill and Background.

use std::any::Any;

use crate::geometry::{Position, Size};
use crate::render::cell::Cell;
use crate::render::color::Color;
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind};

// ---------------------------------------------------------------------------
// ColorFill
// ---------------------------------------------------------------------------

/// Fills whatever size it is offered with a background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorFill {
    pub color: Color,
}

impl ColorFill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Control for ColorFill {
    fn kind(&self) -> ControlKind {
        ControlKind::ColorFill
    }

    fn fingerprint(&self) -> u64 {
        color_fingerprint(self.color)
    }

    fn cell(&self, _window: &Window, _id: WidgetId, _position: Position) -> Option<Cell> {
        Some(Cell::filled(self.color))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Background
// ---------------------------------------------------------------------------

/// Draws its child over a background color, taking the child's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Background {
    pub color: Color,
}

impl Background {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Control for Background {
    fn kind(&self) -> ControlKind {
        ControlKind::Background
    }

    fn fingerprint(&self) -> u64 {
        color_fingerprint(self.color)
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        window
            .children(id)
            .first()
            .map_or(Size::ZERO, |&child| window.size(child, proposed))
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        if let Some(&child) = window.children(id).first() {
            window.layout(child, size);
            window.set_frame_position(child, Position::ZERO);
        }
    }

    fn cell(&self, _window: &Window, _id: WidgetId, _position: Position) -> Option<Cell> {
        Some(Cell::filled(self.color))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn color_fingerprint(color: Color) -> u64 {
    use std::hash::{DefaultHasher, Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    color.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::AnsiColor;
    use crate::widgets::Text;

    #[test]
    fn color_fill_takes_proposal() {
        let mut window = Window::new();
        let fill = window.create(ColorFill::new(Color::Ansi(AnsiColor::Red)));
        assert_eq!(window.size(fill, Size::new(6, 2)), Size::new(6, 2));
        let cell = window.cell(fill, Position::new(3, 1)).unwrap();
        assert_eq!(cell.background, Some(Color::Ansi(AnsiColor::Red)));
    }

    #[test]
    fn background_shows_under_text() {
        let mut window = Window::new();
        window.set_window_size(Size::new(5, 1));
        let text = window.create(Text::new("hi"));
        let bg = window.compose(Background::new(Color::Xterm(22)), [text]);
        window.add_control(bg);
        window.layout_window();

        let h = window.cell_at(Position::new(0, 0)).unwrap();
        assert_eq!(h.ch, 'h');
        assert_eq!(h.background, Some(Color::Xterm(22)));
        let past = window.cell_at(Position::new(4, 0)).unwrap();
        assert_eq!(past.ch, ' ');
        assert_eq!(past.background, Some(Color::Xterm(22)));
    }

    #[test]
    fn fingerprint_depends_on_color() {
        assert_eq!(
            Background::new(Color::Xterm(1)).fingerprint(),
            Background::new(Color::Xterm(1)).fingerprint()
        );
        assert_ne!(
            ColorFill::new(Color::Xterm(1)).fingerprint(),
            ColorFill::new(Color::Xterm(2)).fingerprint()
        );
    }
}
