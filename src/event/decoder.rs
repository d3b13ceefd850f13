//! Incremental decoders for terminal escape sequences.
//!
//! Each decoder is fed one character at a time and answers with a [`Step`].
//! Decoders never fail: malformed input resets them and is either dropped
//! ([`Step::Discarded`]) or handed back ([`Step::Rejected`]) so the caller
//! can reinterpret it literally.

use crate::widget::Direction;

pub(crate) const ESC: char = '\u{1b}';

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Outcome of feeding one character to a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<T> {
    /// Consumed; the sequence is not complete yet.
    Pending,
    /// Consumed; the sequence is complete.
    Ready(T),
    /// Consumed; the sequence was malformed and has been dropped.
    Discarded,
    /// Not consumed; the decoder has reset.
    Rejected,
}

impl<T> Step<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Step::Pending)
    }
}

// ---------------------------------------------------------------------------
// ArrowKeyDecoder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Up,
    Down,
    Right,
    Left,
}

impl ArrowKey {
    /// The focus direction this key moves in.
    pub fn direction(self) -> Direction {
        match self {
            ArrowKey::Up => Direction::Above,
            ArrowKey::Down => Direction::Below,
            ArrowKey::Right => Direction::RightOf,
            ArrowKey::Left => Direction::LeftOf,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ArrowState {
    #[default]
    Idle,
    Escape,
    Csi,
}

/// Decodes `ESC [ A|B|C|D`.
#[derive(Debug, Clone, Default)]
pub struct ArrowKeyDecoder {
    state: ArrowState,
}

impl ArrowKeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ch: char) -> Step<ArrowKey> {
        let (next, step) = match (self.state, ch) {
            (ArrowState::Idle, ESC) => (ArrowState::Escape, Step::Pending),
            (ArrowState::Escape, '[') => (ArrowState::Csi, Step::Pending),
            (ArrowState::Csi, 'A') => (ArrowState::Idle, Step::Ready(ArrowKey::Up)),
            (ArrowState::Csi, 'B') => (ArrowState::Idle, Step::Ready(ArrowKey::Down)),
            (ArrowState::Csi, 'C') => (ArrowState::Idle, Step::Ready(ArrowKey::Right)),
            (ArrowState::Csi, 'D') => (ArrowState::Idle, Step::Ready(ArrowKey::Left)),
            _ => (ArrowState::Idle, Step::Rejected),
        };
        self.state = next;
        step
    }

    pub fn reset(&mut self) {
        self.state = ArrowState::Idle;
    }

    pub fn is_idle(&self) -> bool {
        self.state == ArrowState::Idle
    }
}

// ---------------------------------------------------------------------------
// MouseDecoder
// ---------------------------------------------------------------------------

/// What a mouse report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Press,
    Release,
    Wheel,
    Move,
}

/// A decoded SGR mouse report. Coordinates are 1-based, as sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Raw button code, including modifier and motion bits.
    pub button: u16,
    pub column: u16,
    pub row: u16,
}

impl MouseEvent {
    const WHEEL: u16 = 64;
    const MOTION: u16 = 32;

    fn from_report(button: u16, column: u16, row: u16, pressed: bool) -> Self {
        let kind = if button & Self::WHEEL != 0 {
            MouseEventKind::Wheel
        } else if button & Self::MOTION != 0 {
            MouseEventKind::Move
        } else if pressed {
            MouseEventKind::Press
        } else {
            MouseEventKind::Release
        };
        Self { kind, button, column, row }
    }

    /// Lines to scroll for a wheel event: `1` down, `-1` up.
    pub fn wheel_delta(&self) -> Option<i32> {
        (self.kind == MouseEventKind::Wheel).then(|| if self.button & 1 != 0 { 1 } else { -1 })
    }
}

/// Longest parameter list accepted in a mouse report.
const MAX_PARAMETERS: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum MouseState {
    #[default]
    Idle,
    Escape,
    Csi,
    Parameters(String),
}

/// Decodes SGR mouse reports: `ESC [ < button ; column ; row (M|m)`.
#[derive(Debug, Clone, Default)]
pub struct MouseDecoder {
    state: MouseState,
}

impl MouseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ch: char) -> Step<MouseEvent> {
        let state = std::mem::take(&mut self.state);
        match (state, ch) {
            (MouseState::Idle, ESC) => {
                self.state = MouseState::Escape;
                Step::Pending
            }
            (MouseState::Escape, '[') => {
                self.state = MouseState::Csi;
                Step::Pending
            }
            (MouseState::Csi, '<') => {
                self.state = MouseState::Parameters(String::new());
                Step::Pending
            }
            (MouseState::Parameters(params), c)
                if (c.is_ascii_digit() || c == ';') && params.len() >= MAX_PARAMETERS =>
            {
                tracing::debug!(len = params.len(), "discarding overlong mouse report");
                Step::Discarded
            }
            (MouseState::Parameters(mut params), c) if c.is_ascii_digit() || c == ';' => {
                params.push(c);
                self.state = MouseState::Parameters(params);
                Step::Pending
            }
            (MouseState::Parameters(params), c @ ('M' | 'm')) => match Self::parse(&params, c == 'M') {
                Some(event) => Step::Ready(event),
                None => {
                    tracing::debug!(params = %params, "discarding malformed mouse report");
                    Step::Discarded
                }
            },
            _ => Step::Rejected,
        }
    }

    fn parse(params: &str, pressed: bool) -> Option<MouseEvent> {
        let mut fields = params.split(';').filter(|f| !f.is_empty());
        let button = fields.next()?.parse().ok()?;
        let column = fields.next()?.parse().ok()?;
        let row = fields.next()?.parse().ok()?;
        Some(MouseEvent::from_report(button, column, row, pressed))
    }

    pub fn reset(&mut self) {
        self.state = MouseState::Idle;
    }

    pub fn is_idle(&self) -> bool {
        self.state == MouseState::Idle
    }
}

// ===========================================================================
// Tests
// ===========================================================================
