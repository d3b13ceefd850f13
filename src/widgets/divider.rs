//! Divider: a one-cell line across the proposed length.

use std::any::Any;

use crate::geometry::{Extended, Position, Size};
use crate::layout::Axis;
use crate::render::cell::Cell;
use crate::render::color::Color;
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind};

use super::border::BorderStyle;

/// A line drawn with the border style's straight characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Divider {
    axis: Axis,
    style: BorderStyle,
    color: Color,
}

impl Divider {
    /// A horizontal rule, for separating rows of a vertical stack.
    pub fn horizontal() -> Self {
        Self { axis: Axis::Horizontal, style: BorderStyle::DEFAULT, color: Color::Default }
    }

    /// A vertical rule, for separating columns of a horizontal stack.
    pub fn vertical() -> Self {
        Self { axis: Axis::Vertical, style: BorderStyle::DEFAULT, color: Color::Default }
    }

    pub fn style(mut self, style: BorderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Control for Divider {
    fn kind(&self) -> ControlKind {
        ControlKind::Divider
    }

    fn fingerprint(&self) -> u64 {
        use std::hash::{DefaultHasher, Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self, _window: &Window, _id: WidgetId, proposed: Size) -> Size {
        self.axis.size(self.axis.main(proposed), Extended::ONE)
    }

    fn cell(&self, _window: &Window, _id: WidgetId, _position: Position) -> Option<Cell> {
        let ch = match self.axis {
            Axis::Horizontal => self.style.top,
            Axis::Vertical => self.style.left,
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
