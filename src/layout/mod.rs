//! Layout primitives shared by container controls: axes, alignment, edge insets.

use crate::geometry::{Extended, Position, Size};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// The main axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The component of `size` along this axis.
    pub fn main(self, size: Size) -> Extended {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// The component of `size` across this axis.
    pub fn cross(self, size: Size) -> Extended {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// Build a size from main and cross components.
    pub fn size(self, main: Extended, cross: Extended) -> Size {
        match self {
            Axis::Horizontal => Size { width: main, height: cross },
            Axis::Vertical => Size { width: cross, height: main },
        }
    }

    /// Build a position from main and cross components.
    pub fn position(self, main: Extended, cross: Extended) -> Position {
        match self {
            Axis::Horizontal => Position { column: main, line: cross },
            Axis::Vertical => Position { column: cross, line: main },
        }
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    Leading,
    #[default]
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Offset of an item of length `used` inside `available`.
///
/// Infinite space or an oversized item aligns to the start.
fn aligned(available: Extended, used: Extended, fraction: (i32, i32)) -> Extended {
    if available.is_infinite() || used >= available {
        return Extended::ZERO;
    }
    (available - used) * Extended::new(fraction.0) / Extended::new(fraction.1)
}

impl HorizontalAlignment {
    pub fn offset(self, available: Extended, used: Extended) -> Extended {
        match self {
            HorizontalAlignment::Leading => Extended::ZERO,
            HorizontalAlignment::Center => aligned(available, used, (1, 2)),
            HorizontalAlignment::Trailing => aligned(available, used, (1, 1)),
        }
    }
}

impl VerticalAlignment {
    pub fn offset(self, available: Extended, used: Extended) -> Extended {
        match self {
            VerticalAlignment::Top => Extended::ZERO,
            VerticalAlignment::Center => aligned(available, used, (1, 2)),
            VerticalAlignment::Bottom => aligned(available, used, (1, 1)),
        }
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Insets on each side of a rectangle, in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same inset on every side.
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Vertical and horizontal insets.
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Shrink a size by these insets, never below zero.
    pub fn shrink(&self, size: Size) -> Size {
        Size {
            width: (size.width - self.horizontal()).max(Extended::ZERO),
            height: (size.height - self.vertical()).max(Extended::ZERO),
        }
    }

    /// Grow a size by these insets.
    pub fn grow(&self, size: Size) -> Size {
        Size {
            width: size.width + self.horizontal(),
            height: size.height + self.vertical(),
        }
    }

    /// Top-left offset of the inset content.
    pub fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
