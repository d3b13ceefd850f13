//! ScrollView: a vertically scrolling viewport over one content child.
//!
//! The content is measured with an unbounded height and laid out at its full
//! size; the viewport shifts it up by the scroll offset. Layers clip to their
//! parent's frame, so only the visible lines are drawn.

use std::any::Any;

use crate::geometry::{Extended, Position, Size};
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind, ScrollState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollView {
    state: ScrollState,
}

impl ScrollView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn offset(&self) -> i32 {
        self.state.offset
    }

    fn place_content(&self, window: &mut Window, id: WidgetId) {
        if let Some(&content) = window.children(id).first() {
            window.set_frame_position(content, Position::new(0, -self.state.offset));
        }
    }
}

impl Control for ScrollView {
    fn kind(&self) -> ControlKind {
        ControlKind::ScrollView
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        if !proposed.height.is_infinite() {
            return proposed;
        }
        let content = window
            .children(id)
            .first()
            .map_or(Size::ZERO, |&child| window.size(child, proposed));
        Size { width: proposed.width, height: content.height }
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        let Some(&content) = window.children(id).first() else {
            self.state.resize(0, size.height.finite_or(0));
            return;
        };
        let mut content_size = window.size(content, Size { width: size.width, height: Extended::INFINITY });
        if content_size.height.is_infinite() {
            content_size.height = size.height;
        }
        window.layout(content, content_size);
        self.state.resize(content_size.height.finite_or(0), size.height.finite_or(0));
        self.place_content(window, id);
    }

    fn scroll_to(&mut self, window: &mut Window, id: WidgetId, position: Position) {
        let Some(line) = position.line.finite() else {
            return;
        };
        let content_line = line.saturating_add(self.state.offset);
        if self.state.reveal(content_line) {
            self.place_content(window, id);
            window.invalidate(id);
        }
        let visible = Position { column: position.column, line: Extended::new(content_line - self.state.offset) };
        window.scroll_ancestors(id, visible);
    }

    fn scroll_by(&mut self, window: &mut Window, id: WidgetId, lines: i32) -> bool {
        if !self.state.is_scrollable() {
            return false;
        }
        if self.state.scroll_by(lines) {
            self.place_content(window, id);
            window.invalidate(id);
        }
        true
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Button, Stack, Text};

    fn lines(window: &mut Window, count: usize) -> Vec<WidgetId> {
        (0..count)
            .map(|i| window.create(Text::new(format!("line {i}"))))
            .collect()
    }

    fn scroller(window: &mut Window, count: usize) -> (WidgetId, WidgetId) {
        let rows = lines(window, count);
        let content = window.compose(Stack::vertical(), rows);
        let view = window.compose(ScrollView::new(), [content]);
        window.set_window_size(Size::new(10, 3));
        window.add_control(view);
        window.layout_window();
        (view, content)
    }

    #[test]
    fn content_gets_full_height() {
        let mut window = Window::new();
        let (view, content) = scroller(&mut window, 8);
        assert_eq!(window.frame(content).size.height, Extended::new(8));
        let state = window.control::<ScrollView>(view).unwrap().state();
        assert_eq!(state.viewport_height, 3);
        assert_eq!(state.max_offset(), 5);
    }

    #[test]
    fn scroll_by_moves_content_and_clamps() {
        let mut window = Window::new();
        let (view, content) = scroller(&mut window, 8);
        assert!(window.scroll_by(view, 2));
        assert_eq!(window.frame(content).position, Position::new(0, -2));
        assert_eq!(window.cell_at(Position::new(5, 0)).unwrap().ch, '2');

        assert!(window.scroll_by(view, 100));
        assert_eq!(window.control::<ScrollView>(view).unwrap().offset(), 5);
    }

    #[test]
    fn unscrollable_content_declines() {
        let mut window = Window::new();
        let (view, _) = scroller(&mut window, 2);
        assert!(!window.scroll_by(view, 1));
    }

    #[test]
    fn scroll_by_bubbles_from_descendants() {
        let mut window = Window::new();
        let (view, content) = scroller(&mut window, 8);
        let row = window.children(content)[0];
        assert!(window.scroll_by(row, 1));
        assert_eq!(window.control::<ScrollView>(view).unwrap().offset(), 1);
    }

    #[test]
    fn focus_reveals_button() {
        let mut window = Window::new();
        let mut rows = lines(&mut window, 6);
        let button = Button::labeled(&mut window, "bottom", |_| {});
        rows.push(button);
        let content = window.compose(Stack::vertical(), rows);
        let view = window.compose(ScrollView::new(), [content]);
        window.set_window_size(Size::new(10, 3));
        window.add_control(view);
        window.layout_window();

        window.set_first_responder(None);
        assert_eq!(window.control::<ScrollView>(view).unwrap().offset(), 0);
        window.set_first_responder(Some(button));
        assert_eq!(window.control::<ScrollView>(view).unwrap().offset(), 4);
    }
}
