//! Frame: fixed or bounded size around a child.

use std::any::Any;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::geometry::{Extended, Position, Size};
use crate::layout::{HorizontalAlignment, VerticalAlignment};
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind};

/// Constrains its child's size.
///
/// A fixed dimension always wins. Otherwise the frame takes the proposal
/// clamped to `[min, max]`, where an unset bound is replaced by the child's
/// own size for that proposal (an unset min never exceeds a set max). The
/// child is aligned inside the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    pub width: Option<Extended>,
    pub height: Option<Extended>,
    pub min_width: Option<Extended>,
    pub max_width: Option<Extended>,
    pub min_height: Option<Extended>,
    pub max_height: Option<Extended>,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl Frame {
    /// A frame with fixed dimensions; `None` leaves that dimension to the child.
    pub fn fixed(width: Option<i32>, height: Option<i32>) -> Self {
        Self {
            width: width.map(Extended::new),
            height: height.map(Extended::new),
            ..Self::default()
        }
    }

    /// A frame bounded in each dimension.
    pub fn bounded(
        min_width: Option<Extended>,
        max_width: Option<Extended>,
        min_height: Option<Extended>,
        max_height: Option<Extended>,
    ) -> Self {
        Self { min_width, max_width, min_height, max_height, ..Self::default() }
    }

    pub fn alignment(mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    fn resolve(
        fixed: Option<Extended>,
        min: Option<Extended>,
        max: Option<Extended>,
        proposed: Extended,
        child: Extended,
    ) -> Extended {
        if let Some(fixed) = fixed {
            return fixed;
        }
        if min.is_none() && max.is_none() {
            return child;
        }
        let mut hi = max.unwrap_or(child);
        if let Some(min) = min {
            hi = hi.max(min);
        }
        let lo = min.unwrap_or(child).min(hi);
        proposed.clamp(lo, hi)
    }

    fn proposal(&self, proposed: Size) -> Size {
        Size {
            width: self.width.unwrap_or(proposed.width),
            height: self.height.unwrap_or(proposed.height),
        }
    }
}

impl Control for Frame {
    fn kind(&self) -> ControlKind {
        ControlKind::Frame
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        let child = window
            .children(id)
            .first()
            .map_or(Size::ZERO, |&child| window.size(child, self.proposal(proposed)));
        Size {
            width: Self::resolve(self.width, self.min_width, self.max_width, proposed.width, child.width),
            height: Self::resolve(self.height, self.min_height, self.max_height, proposed.height, child.height),
        }
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        if let Some(&child) = window.children(id).first() {
            let wanted = window.size(child, size);
            let child_size = Size {
                width: wanted.width.min(size.width),
                height: wanted.height.min(size.height),
            };
            window.layout(child, child_size);
            let position = Position {
                column: self.horizontal_alignment.offset(size.width, child_size.width),
                line: self.vertical_alignment.offset(size.height, child_size.height),
            };
            window.set_frame_position(child, position);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{ColorFill, Text};
    use crate::render::color::Color;

    #[test]
    fn fixed_dimensions_win() {
        let mut window = Window::new();
        let text = window.create(Text::new("abc"));
        let frame = window.compose(Frame::fixed(Some(10), None), [text]);
        assert_eq!(window.size(frame, Size::new(40, 40)), Size::new(10, 1));
    }

    #[test]
    fn bounds_clamp_proposal() {
        let mut window = Window::new();
        let fill = window.create(ColorFill::new(Color::Xterm(3)));
        let frame = window.compose(
            Frame::bounded(Some(Extended::new(4)), Some(Extended::new(8)), None, Some(Extended::new(2))),
            [fill],
        );
        assert_eq!(window.size(frame, Size::new(20, 20)), Size::new(8, 2));
        assert_eq!(window.size(frame, Size::new(1, 1)), Size::new(4, 1));
    }

    #[test]
    fn unset_max_falls_back_to_child() {
        let mut window = Window::new();
        let text = window.create(Text::new("abcdef"));
        let frame = window.compose(Frame::bounded(Some(Extended::new(2)), None, None, None), [text]);
        assert_eq!(window.size(frame, Size::new(20, 5)), Size::new(6, 1));
        assert_eq!(window.size(frame, Size::new(3, 5)), Size::new(3, 1));
    }

    #[test]
    fn child_is_centered() {
        let mut window = Window::new();
        let text = window.create(Text::new("ab"));
        let frame = window.compose(Frame::fixed(Some(6), Some(3)), [text]);
        window.layout(frame, Size::new(6, 3));
        assert_eq!(window.frame(text).position, Position::new(2, 1));
    }
}
