//! Border: a box-drawing frame around a child.

use std::any::Any;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::geometry::{Extended, Position, Size};
use crate::render::cell::Cell;
use crate::render::color::Color;
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind};

// ---------------------------------------------------------------------------
// BorderStyle
// ---------------------------------------------------------------------------

/// The eight characters of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderStyle {
    pub top_left: char,
    pub top: char,
    pub top_right: char,
    pub left: char,
    pub right: char,
    pub bottom_left: char,
    pub bottom: char,
    pub bottom_right: char,
}

impl BorderStyle {
    /// A style from four corners and one horizontal and one vertical edge.
    pub const fn new(
        top_left: char,
        top_right: char,
        bottom_left: char,
        bottom_right: char,
        horizontal: char,
        vertical: char,
    ) -> Self {
        Self {
            top_left,
            top: horizontal,
            top_right,
            left: vertical,
            right: vertical,
            bottom_left,
            bottom: horizontal,
            bottom_right,
        }
    }

    /// `┌──┐`
    pub const DEFAULT: BorderStyle = BorderStyle::new('┌', '┐', '└', '┘', '─', '│');
    /// `╭──╮`
    pub const ROUNDED: BorderStyle = BorderStyle::new('╭', '╮', '╰', '╯', '─', '│');
    /// `┏━━┓`
    pub const HEAVY: BorderStyle = BorderStyle::new('┏', '┓', '┗', '┛', '━', '┃');
    /// `╔══╗`
    pub const DOUBLE: BorderStyle = BorderStyle::new('╔', '╗', '╚', '╝', '═', '║');
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Border
// ---------------------------------------------------------------------------

/// Insets its child by one cell on every side and draws a box around it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Border {
    pub style: BorderStyle,
    pub color: Color,
}

impl Border {
    pub fn new(style: BorderStyle) -> Self {
        Self { style, color: Color::Default }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Control for Border {
    fn kind(&self) -> ControlKind {
        ControlKind::Border
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        let inner = Size { width: proposed.width - 2, height: proposed.height - 2 };
        let content = window
            .children(id)
            .first()
            .map_or(Size::ZERO, |&child| window.size(child, inner));
        Size { width: content.width + 2, height: content.height + 2 }
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        if let Some(&child) = window.children(id).first() {
            let inner = Size {
                width: (size.width - 2).max(Extended::ZERO),
                height: (size.height - 2).max(Extended::ZERO),
            };
            window.layout(child, inner);
            window.set_frame_position(child, Position::new(1, 1));
        }
    }

    fn cell(&self, window: &Window, id: WidgetId, position: Position) -> Option<Cell> {
        let size = window.frame(id).size;
        let last_column = size.width - 1;
        let last_line = size.height - 1;
        let s = &self.style;
        let ch = if position.line == Extended::ZERO {
            if position.column == Extended::ZERO {
                s.top_left
            } else if position.column == last_column {
                s.top_right
            } else {
                s.top
            }
        } else if position.line == last_line {
            if position.column == Extended::ZERO {
                s.bottom_left
            } else if position.column == last_column {
                s.bottom_right
            } else {
                s.bottom
            }
        } else if position.column == Extended::ZERO {
            s.left
        } else if position.column == last_column {
            s.right
        } else {
            return None;
        };
        Some(Cell::new(ch).with_foreground(self.color))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
