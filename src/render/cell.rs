//! Cell: the unit of terminal output.
//!
//! A cell is one character with its colors and text attributes. Controls
//! produce cells on demand, the layer tree composites them, and renderers
//! compare them against what is already on screen.

use bitflags::bitflags;

use super::color::Color;

bitflags! {
    /// Text attributes of a cell, mapping onto SGR enable/disable pairs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct CellAttributes: u8 {
        const BOLD          = 0b0000_0001;
        const ITALIC        = 0b0000_0010;
        const UNDERLINE     = 0b0000_0100;
        const STRIKETHROUGH = 0b0000_1000;
        const INVERTED      = 0b0001_0000;
    }
}

/// A single styled character.
///
/// `background: None` means "no background of its own": the compositor keeps
/// looking through lower layers for one, and renderers draw it with the
/// terminal's default background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub foreground: Color,
    pub background: Option<Color>,
    pub attributes: CellAttributes,
}

impl Cell {
    /// A cell with default colors and no attributes.
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            foreground: Color::Default,
            background: None,
            attributes: CellAttributes::empty(),
        }
    }

    /// A space with default colors.
    pub const fn blank() -> Self {
        Self::new(' ')
    }

    /// A space painted with `color` as background.
    pub const fn filled(color: Color) -> Self {
        Self {
            ch: ' ',
            foreground: Color::Default,
            background: Some(color),
            attributes: CellAttributes::empty(),
        }
    }

    pub const fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub const fn with_attributes(mut self, attributes: CellAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The background a renderer should draw.
    pub fn effective_background(&self) -> Color {
        self.background.unwrap_or(Color::Default)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::AnsiColor;

    #[test]
    fn new_cell_has_defaults() {
        let cell = Cell::new('x');
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.foreground, Color::Default);
        assert_eq!(cell.background, None);
        assert!(cell.attributes.is_empty());
    }

    #[test]
    fn builders_compose() {
        let cell = Cell::new('a')
            .with_foreground(Color::Ansi(AnsiColor::Red))
            .with_background(Color::Xterm(17))
            .with_attributes(CellAttributes::BOLD | CellAttributes::UNDERLINE);
        assert_eq!(cell.foreground, Color::Ansi(AnsiColor::Red));
        assert_eq!(cell.background, Some(Color::Xterm(17)));
        assert!(cell.attributes.contains(CellAttributes::BOLD));
        assert!(!cell.attributes.contains(CellAttributes::ITALIC));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Cell::new('a'), Cell::new('a'));
        assert_ne!(Cell::new('a'), Cell::new('b'));
        assert_ne!(
            Cell::new('a'),
            Cell::new('a').with_attributes(CellAttributes::INVERTED)
        );
    }

    #[test]
    fn effective_background_falls_back_to_default() {
        assert_eq!(Cell::blank().effective_background(), Color::Default);
        let filled = Cell::filled(Color::Ansi(AnsiColor::Blue));
        assert_eq!(filled.ch, ' ');
        assert_eq!(filled.effective_background(), Color::Ansi(AnsiColor::Blue));
    }

    #[test]
    fn attribute_toggle() {
        let mut attrs = CellAttributes::BOLD;
        attrs.toggle(CellAttributes::INVERTED);
        assert!(attrs.contains(CellAttributes::INVERTED));
        attrs.toggle(CellAttributes::INVERTED);
        assert_eq!(attrs, CellAttributes::BOLD);
    }
}
