//! Core geometry types: Extended, Position, Size, Rect.
//!
//! Every coordinate and size in strata-tui is an [`Extended`]: a terminal-cell
//! integer that can also be infinite. Layout proposals use infinity to mean
//! "unbounded", so sizing functions compose without special cases.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

// ---------------------------------------------------------------------------
// Extended
// ---------------------------------------------------------------------------

/// An integer cell count that may also be infinite.
///
/// `Infinity` orders above every finite value. Arithmetic saturates:
/// anything added to infinity stays infinite, and finite overflow clamps to
/// the `i32` bounds instead of wrapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Extended {
    Finite(i32),
    Infinity,
}

impl Extended {
    pub const ZERO: Extended = Extended::Finite(0);
    pub const ONE: Extended = Extended::Finite(1);
    pub const INFINITY: Extended = Extended::Infinity;

    /// Create a finite value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Extended::Finite(value)
    }

    /// Whether this is the infinite value.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        matches!(self, Extended::Infinity)
    }

    /// The finite value, or `None` for infinity.
    #[inline]
    pub const fn finite(self) -> Option<i32> {
        match self {
            Extended::Finite(v) => Some(v),
            Extended::Infinity => None,
        }
    }

    /// The finite value, or `fallback` for infinity.
    #[inline]
    pub const fn finite_or(self, fallback: i32) -> i32 {
        match self {
            Extended::Finite(v) => v,
            Extended::Infinity => fallback,
        }
    }
}

impl Default for Extended {
    fn default() -> Self {
        Extended::ZERO
    }
}

impl PartialOrd for Extended {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Extended {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Extended::Finite(a), Extended::Finite(b)) => a.cmp(b),
            (Extended::Finite(_), Extended::Infinity) => Ordering::Less,
            (Extended::Infinity, Extended::Finite(_)) => Ordering::Greater,
            (Extended::Infinity, Extended::Infinity) => Ordering::Equal,
        }
    }
}

impl From<i32> for Extended {
    fn from(value: i32) -> Self {
        Extended::Finite(value)
    }
}

impl From<u16> for Extended {
    fn from(value: u16) -> Self {
        Extended::Finite(i32::from(value))
    }
}

impl From<usize> for Extended {
    fn from(value: usize) -> Self {
        Extended::Finite(i32::try_from(value).unwrap_or(i32::MAX))
    }
}

impl Add for Extended {
    type Output = Extended;
    #[inline]
    fn add(self, rhs: Extended) -> Extended {
        match (self, rhs) {
            (Extended::Finite(a), Extended::Finite(b)) => Extended::Finite(a.saturating_add(b)),
            _ => Extended::Infinity,
        }
    }
}

impl Sub for Extended {
    type Output = Extended;
    /// `∞ - ∞` is zero and `n - ∞` saturates to `i32::MIN`.
    #[inline]
    fn sub(self, rhs: Extended) -> Extended {
        match (self, rhs) {
            (Extended::Finite(a), Extended::Finite(b)) => Extended::Finite(a.saturating_sub(b)),
            (Extended::Infinity, Extended::Finite(_)) => Extended::Infinity,
            (Extended::Infinity, Extended::Infinity) => Extended::ZERO,
            (Extended::Finite(_), Extended::Infinity) => Extended::Finite(i32::MIN),
        }
    }
}

impl Mul for Extended {
    type Output = Extended;
    #[inline]
    fn mul(self, rhs: Extended) -> Extended {
        match (self, rhs) {
            (Extended::Finite(a), Extended::Finite(b)) => Extended::Finite(a.saturating_mul(b)),
            _ => Extended::Infinity,
        }
    }
}

impl Div for Extended {
    type Output = Extended;
    /// Division by zero, or of infinity, is infinite. Finite by infinite is zero.
    #[inline]
    fn div(self, rhs: Extended) -> Extended {
        match (self, rhs) {
            (Extended::Finite(_), Extended::Finite(0)) => Extended::Infinity,
            (Extended::Finite(a), Extended::Finite(b)) => Extended::Finite(a / b),
            (Extended::Finite(_), Extended::Infinity) => Extended::ZERO,
            (Extended::Infinity, _) => Extended::Infinity,
        }
    }
}

impl Add<i32> for Extended {
    type Output = Extended;
    #[inline]
    fn add(self, rhs: i32) -> Extended {
        self + Extended::Finite(rhs)
    }
}

impl Sub<i32> for Extended {
    type Output = Extended;
    #[inline]
    fn sub(self, rhs: i32) -> Extended {
        self - Extended::Finite(rhs)
    }
}

impl Div<i32> for Extended {
    type Output = Extended;
    #[inline]
    fn div(self, rhs: i32) -> Extended {
        self / Extended::Finite(rhs)
    }
}

impl AddAssign for Extended {
    fn add_assign(&mut self, rhs: Extended) {
        *self = *self + rhs;
    }
}

impl SubAssign for Extended {
    fn sub_assign(&mut self, rhs: Extended) {
        *self = *self - rhs;
    }
}

impl AddAssign<i32> for Extended {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

impl SubAssign<i32> for Extended {
    fn sub_assign(&mut self, rhs: i32) {
        *self = *self - rhs;
    }
}

impl PartialEq<i32> for Extended {
    fn eq(&self, other: &i32) -> bool {
        *self == Extended::Finite(*other)
    }
}

impl PartialOrd<i32> for Extended {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        Some(self.cmp(&Extended::Finite(*other)))
    }
}

impl fmt::Display for Extended {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extended::Finite(v) => write!(f, "{v}"),
            Extended::Infinity => f.write_str("∞"),
        }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell position: `column` from the left edge, `line` from the top.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub column: Extended,
    pub line: Extended,
}

impl Position {
    /// The origin.
    pub const ZERO: Position = Position { column: Extended::ZERO, line: Extended::ZERO };

    /// Create a new position.
    #[inline]
    pub fn new(column: impl Into<Extended>, line: impl Into<Extended>) -> Self {
        Self { column: column.into(), line: line.into() }
    }
}

impl Add for Position {
    type Output = Position;
    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position { column: self.column + rhs.column, line: self.line + rhs.line }
    }
}

impl Sub for Position {
    type Output = Position;
    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position { column: self.column - rhs.column, line: self.line - rhs.line }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.line)
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: Extended,
    pub height: Extended,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: Extended::ZERO, height: Extended::ZERO };

    /// An unbounded proposal in both directions.
    pub const INFINITY: Size = Size { width: Extended::INFINITY, height: Extended::INFINITY };

    /// Create a new size.
    #[inline]
    pub fn new(width: impl Into<Extended>, height: impl Into<Extended>) -> Self {
        Self { width: width.into(), height: height.into() }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= Extended::ZERO || self.height <= Extended::ZERO
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left position and size.
///
/// `max_line`/`max_column` are inclusive, so a 1x1 rect at the origin has
/// `min == max == 0`. Rects with a zero or negative dimension are empty: they
/// contain no position and draw nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    /// An empty rect at the origin.
    pub const ZERO: Rect = Rect { position: Position::ZERO, size: Size::ZERO };

    /// Create a rect from a position and a size.
    #[inline]
    pub const fn from_parts(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a rect from its column, line, width and height.
    #[inline]
    pub fn new(
        column: impl Into<Extended>,
        line: impl Into<Extended>,
        width: impl Into<Extended>,
        height: impl Into<Extended>,
    ) -> Self {
        Self { position: Position::new(column, line), size: Size::new(width, height) }
    }

    /// Create a rect spanning the inclusive bounds.
    pub fn from_bounds(
        min_column: Extended,
        min_line: Extended,
        max_column: Extended,
        max_line: Extended,
    ) -> Self {
        Self {
            position: Position { column: min_column, line: min_line },
            size: Size {
                width: max_column - min_column + 1,
                height: max_line - min_line + 1,
            },
        }
    }

    #[inline]
    pub fn min_line(self) -> Extended {
        self.position.line
    }

    #[inline]
    pub fn min_column(self) -> Extended {
        self.position.column
    }

    #[inline]
    pub fn max_line(self) -> Extended {
        self.position.line + self.size.height - 1
    }

    #[inline]
    pub fn max_column(self) -> Extended {
        self.position.column + self.size.width - 1
    }

    /// Whether the rect has a zero or negative dimension.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.is_empty()
    }

    /// The smallest rect containing both `self` and `other`.
    pub fn union(self, other: Rect) -> Rect {
        Rect::from_bounds(
            self.min_column().min(other.min_column()),
            self.min_line().min(other.min_line()),
            self.max_column().max(other.max_column()),
            self.max_line().max(other.max_line()),
        )
    }

    /// Whether `position` lies inside this rect.
    pub fn contains(self, position: Position) -> bool {
        !self.is_empty()
            && position.column >= self.min_column()
            && position.line >= self.min_line()
            && position.column <= self.max_column()
            && position.line <= self.max_line()
    }

    /// Translate the rect by `offset`.
    #[inline]
    pub fn translate(self, offset: Position) -> Rect {
        Rect { position: self.position + offset, size: self.size }
    }

    /// The overlapping area of two rects, or `None` if they do not overlap.
    pub fn intersection(self, other: Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let min_column = self.min_column().max(other.min_column());
        let min_line = self.min_line().max(other.min_line());
        let max_column = self.max_column().min(other.max_column());
        let max_line = self.max_line().min(other.max_line());
        if min_column > max_column || min_line > max_line {
            return None;
        }
        Some(Rect::from_bounds(min_column, min_line, max_column, max_line))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.size)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
