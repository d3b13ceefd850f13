//! Button: a selectable control that runs an action.
//!
//! A button takes the size of its label (its first child) and highlights its
//! layer while focused. Enter, Space, or a mouse click runs the action.

use std::any::Any;
use std::fmt;

use crate::geometry::{Position, Size};
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind};

use super::text::Text;

/// Callback run with access to the window, so it can edit the tree.
pub type Action = Box<dyn FnMut(&mut Window)>;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A focusable button.
///
/// # Examples
///
/// ```ignore
/// let ok = Button::labeled(&mut window, "OK", |_| println!("pressed"));
/// ```
pub struct Button {
    action: Action,
    hover: Option<Action>,
}

impl Button {
    /// Create a button without a label; compose it with a child to give it one.
    pub fn new(action: impl FnMut(&mut Window) + 'static) -> Self {
        Self { action: Box::new(action), hover: None }
    }

    /// Run `hover` whenever the button gains focus (builder pattern).
    pub fn on_hover(mut self, hover: impl FnMut(&mut Window) + 'static) -> Self {
        self.hover = Some(Box::new(hover));
        self
    }

    /// Create a button widget with a text label child.
    pub fn labeled(
        window: &mut Window,
        label: impl AsRef<str>,
        action: impl FnMut(&mut Window) + 'static,
    ) -> WidgetId {
        let text = window.create(Text::new(label));
        window.compose(Button::new(action), [text])
    }

    pub fn set_action(&mut self, action: impl FnMut(&mut Window) + 'static) {
        self.action = Box::new(action);
    }

    /// Run the action directly.
    pub fn press(&mut self, window: &mut Window) {
        (self.action)(window);
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("hover", &self.hover.is_some())
            .finish_non_exhaustive()
    }
}

impl Control for Button {
    fn kind(&self) -> ControlKind {
        ControlKind::Button
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        window
            .children(id)
            .first()
            .map_or(Size::ZERO, |&label| window.size(label, proposed))
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        if let Some(&label) = window.children(id).first() {
            window.layout(label, size);
        }
    }

    fn handle_event(&mut self, window: &mut Window, _id: WidgetId, ch: char) {
        if ch == '\n' || ch == ' ' {
            self.press(window);
        }
    }

    fn selectable(&self) -> bool {
        true
    }

    fn became_first_responder(&mut self, window: &mut Window, id: WidgetId) {
        window.scroll_ancestors(id, Position::ZERO);
        window.set_highlighted(id, true);
        if let Some(hover) = self.hover.as_mut() {
            hover(window);
        }
        window.invalidate(id);
    }

    fn resigned_first_responder(&mut self, window: &mut Window, id: WidgetId) {
        window.set_highlighted(id, false);
        window.invalidate(id);
    }

    fn activate(&mut self, window: &mut Window, _id: WidgetId) -> bool {
        self.press(window);
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
    use std::cell::Cell as Counter;
    use std::rc::Rc;

    use crate::render::cell::CellAttributes;

    fn counting_button(window: &mut Window, label: &str) -> (WidgetId, Rc<Counter<u32>>) {
        let count = Rc::new(Counter::new(0));
        let inner = Rc::clone(&count);
        let id = Button::labeled(window, label, move |_| inner.set(inner.get() + 1));
        (id, count)
    }

    #[test]
    fn size_follows_label() {
        let mut window = Window::new();
        let (b, _) = counting_button(&mut window, "Save");
        assert_eq!(window.size(b, Size::new(80, 24)), Size::new(4, 1));
    }

    #[test]
    fn enter_and_space_press() {
        let mut window = Window::new();
        let (b, count) = counting_button(&mut window, "Go");
        window.handle_event(b, '\n');
        window.handle_event(b, ' ');
        window.handle_event(b, 'x');
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn activate_presses() {
        let mut window = Window::new();
        let (b, count) = counting_button(&mut window, "Go");
        assert!(window.activate(b));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn focus_inverts_label_cells() {
        let mut window = Window::new();
        window.set_window_size(Size::new(4, 1));
        let (b, _) = counting_button(&mut window, "Hi");
        window.add_control(b);
        window.layout_window();
        assert_eq!(window.first_responder(), Some(b));

        let cell = window.cell_at(Position::new(0, 0)).unwrap();
        assert_eq!(cell.ch, 'H');
        assert!(cell.attributes.contains(CellAttributes::INVERTED));

        window.set_first_responder(None);
        let cell = window.cell_at(Position::new(0, 0)).unwrap();
        assert!(!cell.attributes.contains(CellAttributes::INVERTED));
    }

    #[test]
    fn action_can_edit_the_tree() {
        let mut window = Window::new();
        let label = window.create(Text::new("status"));
        let finish = window.create(Button::new(move |w: &mut Window| {
            if let Some(text) = w.control_mut::<Text>(label) {
                text.set_text("done");
            }
        }));
        window.handle_event(finish, '\n');
        assert_eq!(window.control::<Text>(label).unwrap().text(), "done");
    }
}
