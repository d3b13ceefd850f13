//! Text: a single line of styled characters.

use std::any::Any;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::geometry::{Extended, Position, Size};
use crate::render::cell::Cell;
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind, Environment};

/// One line of text, drawn with the environment's color and attributes.
///
/// Its width is the number of characters and its height is one line,
/// whatever the proposal. Columns past the end draw a plain space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    chars: Vec<char>,
    environment: Environment,
}

impl Text {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self::with_environment(text, Environment::default())
    }

    pub fn with_environment(text: impl AsRef<str>, environment: Environment) -> Self {
        Self { chars: text.as_ref().chars().collect(), environment }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the text. The caller invalidates the widget.
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        self.chars = text.as_ref().chars().collect();
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Control for Text {
    fn kind(&self) -> ControlKind {
        ControlKind::Text
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self, _window: &Window, _id: WidgetId, _proposed: Size) -> Size {
        Size { width: Extended::from(self.chars.len()), height: Extended::ONE }
    }

    fn cell(&self, _window: &Window, _id: WidgetId, position: Position) -> Option<Cell> {
        if position.line != Extended::ZERO {
            return None;
        }
        let column = usize::try_from(position.column.finite()?).ok()?;
        Some(match self.chars.get(column) {
            Some(&ch) => self.environment.styled(ch),
            None => Cell::blank(),
        })
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
    use crate::render::cell::CellAttributes;
    use crate::render::color::{AnsiColor, Color};

    #[test]
    fn size_ignores_proposal() {
        let mut window = Window::new();
        let t = window.create(Text::new("héllo"));
        assert_eq!(window.size(t, Size::new(2, 9)), Size::new(5, 1));
        assert_eq!(window.size(t, Size::INFINITY), Size::new(5, 1));
    }

    #[test]
    fn draws_characters_then_blanks() {
        let mut window = Window::new();
        let env = Environment::new().foreground(Color::Ansi(AnsiColor::Green)).bold(true);
        let t = window.create(Text::with_environment("ab", env));

        let a = window.cell(t, Position::new(0, 0)).unwrap();
        assert_eq!(a.ch, 'a');
        assert_eq!(a.foreground, Color::Ansi(AnsiColor::Green));
        assert_eq!(a.attributes, CellAttributes::BOLD);

        assert_eq!(window.cell(t, Position::new(5, 0)), Some(Cell::blank()));
        assert_eq!(window.cell(t, Position::new(0, 1)), None);
    }

    #[test]
    fn empty_text_has_zero_width() {
        let mut window = Window::new();
        let t = window.create(Text::new(""));
        assert_eq!(window.size(t, Size::new(10, 10)), Size::new(0, 1));
    }

    #[test]
    fn fingerprint_tracks_content_and_style() {
        let plain = Text::new("x");
        assert_eq!(plain.fingerprint(), Text::new("x").fingerprint());
        assert_ne!(plain.fingerprint(), Text::new("y").fingerprint());
        assert_ne!(
            plain.fingerprint(),
            Text::with_environment("x", Environment::new().italic(true)).fingerprint()
        );
    }
}
