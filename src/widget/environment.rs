//! Environment: inherited text styling passed to control constructors.

use crate::render::cell::{Cell, CellAttributes};
use crate::render::color::{AnsiColor, Color};

/// Text styling values handed down a view hierarchy.
///
/// Every field is optional; unset fields fall back to the parent environment
/// when merged, and to terminal defaults when read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Environment {
    pub foreground: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub placeholder_color: Option<Color>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = Some(strikethrough);
        self
    }

    pub fn placeholder_color(mut self, color: Color) -> Self {
        self.placeholder_color = Some(color);
        self
    }

    /// Combine with a child environment; fields the child sets win.
    pub fn merge(&self, child: &Environment) -> Environment {
        Environment {
            foreground: child.foreground.or(self.foreground),
            bold: child.bold.or(self.bold),
            italic: child.italic.or(self.italic),
            underline: child.underline.or(self.underline),
            strikethrough: child.strikethrough.or(self.strikethrough),
            placeholder_color: child.placeholder_color.or(self.placeholder_color),
        }
    }

    pub fn foreground_color(&self) -> Color {
        self.foreground.unwrap_or_default()
    }

    pub fn placeholder(&self) -> Color {
        self.placeholder_color.unwrap_or(Color::Ansi(AnsiColor::BrightBlack))
    }

    pub fn attributes(&self) -> CellAttributes {
        let mut attributes = CellAttributes::empty();
        attributes.set(CellAttributes::BOLD, self.bold.unwrap_or(false));
        attributes.set(CellAttributes::ITALIC, self.italic.unwrap_or(false));
        attributes.set(CellAttributes::UNDERLINE, self.underline.unwrap_or(false));
        attributes.set(CellAttributes::STRIKETHROUGH, self.strikethrough.unwrap_or(false));
        attributes
    }

    /// A cell for `ch` styled by this environment.
    pub fn styled(&self, ch: char) -> Cell {
        Cell::new(ch)
            .with_foreground(self.foreground_color())
            .with_attributes(self.attributes())
    }
}
