//! TextField: single-line text entry.
//!
//! Printable characters append, DEL removes the last character and Enter
//! submits the text to the action and clears the field. While empty, the
//! placeholder is shown in the placeholder color.

use std::any::Any;
use std::fmt;

use crate::geometry::{Extended, Position, Size};
use crate::render::cell::{Cell, CellAttributes};
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind, Environment};

const DEL: char = '\u{7f}';

/// Callback receiving the submitted text.
pub type SubmitAction = Box<dyn FnMut(&mut Window, &str)>;

pub struct TextField {
    text: String,
    placeholder: Vec<char>,
    environment: Environment,
    action: SubmitAction,
}

impl TextField {
    pub fn new(action: impl FnMut(&mut Window, &str) + 'static) -> Self {
        Self {
            text: String::new(),
            placeholder: Vec::new(),
            environment: Environment::default(),
            action: Box::new(action),
        }
    }

    pub fn placeholder(mut self, placeholder: impl AsRef<str>) -> Self {
        self.placeholder = placeholder.as_ref().chars().collect();
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_action(&mut self, action: impl FnMut(&mut Window, &str) + 'static) {
        self.action = Box::new(action);
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("text", &self.text)
            .field("placeholder", &self.placeholder.iter().collect::<String>())
            .finish_non_exhaustive()
    }
}

impl Control for TextField {
    fn kind(&self) -> ControlKind {
        ControlKind::TextField
    }

    /// Wide enough for the longer of text and placeholder, plus the cursor.
    fn size(&self, _window: &Window, _id: WidgetId, _proposed: Size) -> Size {
        let width = self.char_count().max(self.placeholder.len()) + 1;
        Size { width: Extended::from(width), height: Extended::ONE }
    }

    fn handle_event(&mut self, window: &mut Window, id: WidgetId, ch: char) {
        match ch {
            '\n' => {
                let text = std::mem::take(&mut self.text);
                (self.action)(window, &text);
            }
            DEL => {
                if self.text.pop().is_none() {
                    return;
                }
            }
            c if c.is_control() => return,
            c => self.text.push(c),
        }
        window.invalidate(id);
    }

    fn cell(&self, window: &Window, id: WidgetId, position: Position) -> Option<Cell> {
        if position.line != Extended::ZERO {
            return None;
        }
        let column = usize::try_from(position.column.finite()?).ok()?;
        let focused = window.is_first_responder(id);

        if self.text.is_empty() {
            return Some(match self.placeholder.get(column) {
                Some(&ch) => {
                    let mut attributes = CellAttributes::empty();
                    attributes.set(CellAttributes::UNDERLINE, focused && column == 0);
                    Cell::new(ch)
                        .with_foreground(self.environment.placeholder())
                        .with_attributes(attributes)
                }
                None if focused && column == 0 => {
                    Cell::blank().with_attributes(CellAttributes::UNDERLINE)
                }
                None => Cell::blank(),
            });
        }

        let count = self.char_count();
        if column == count && focused {
            return Some(Cell::blank().with_attributes(CellAttributes::UNDERLINE));
        }
        Some(match self.text.chars().nth(column) {
            Some(ch) => self.environment.styled(ch),
            None => Cell::blank(),
        })
    }

    fn selectable(&self) -> bool {
        true
    }

    fn became_first_responder(&mut self, window: &mut Window, id: WidgetId) {
        window.scroll_ancestors(id, Position::ZERO);
        window.invalidate(id);
    }

    fn resigned_first_responder(&mut self, window: &mut Window, id: WidgetId) {
        window.invalidate(id);
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
