//! Splits raw terminal input into events.
//!
//! [`InputParser`] runs the mouse and arrow-key decoders side by side over a
//! buffered prefix. When both give up, the first buffered character is
//! reported literally and the rest of the prefix is decoded again.

use std::collections::VecDeque;

use super::decoder::{ArrowKey, ArrowKeyDecoder, MouseDecoder, MouseEvent, Step};

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// A decoded unit of terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Char(char),
    Arrow(ArrowKey),
    Mouse(MouseEvent),
}

// ---------------------------------------------------------------------------
// InputParser
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InputParser {
    arrows: ArrowKeyDecoder,
    mouse: MouseDecoder,
    arrows_live: bool,
    mouse_live: bool,
    buffer: Vec<char>,
}

impl InputParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `input`, returning every completed event in order.
    pub fn advance(&mut self, input: &str) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let mut queue: VecDeque<char> = input.chars().collect();
        while let Some(ch) = queue.pop_front() {
            self.feed(ch, &mut queue, &mut events);
        }
        events
    }

    /// Whether a partial escape sequence is buffered.
    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Give up on the buffered prefix and report it as literal characters.
    pub fn flush(&mut self) -> Vec<InputEvent> {
        self.reset();
        std::mem::take(&mut self.buffer)
            .into_iter()
            .map(InputEvent::Char)
            .collect()
    }

    fn reset(&mut self) {
        self.arrows.reset();
        self.mouse.reset();
        self.arrows_live = false;
        self.mouse_live = false;
    }

    fn feed(&mut self, ch: char, queue: &mut VecDeque<char>, events: &mut Vec<InputEvent>) {
        if self.buffer.is_empty() {
            self.arrows_live = true;
            self.mouse_live = true;
        }
        self.buffer.push(ch);

        let mouse = if self.mouse_live { self.mouse.advance(ch) } else { Step::Rejected };
        let arrow = if self.arrows_live { self.arrows.advance(ch) } else { Step::Rejected };
        self.mouse_live = mouse.is_pending();
        self.arrows_live = arrow.is_pending();

        match (mouse, arrow) {
            (Step::Ready(event), _) => self.complete(events, InputEvent::Mouse(event)),
            (_, Step::Ready(key)) => self.complete(events, InputEvent::Arrow(key)),
            (Step::Discarded, _) | (_, Step::Discarded) => {
                self.reset();
                self.buffer.clear();
            }
            (Step::Pending, _) | (_, Step::Pending) => {}
            (Step::Rejected, Step::Rejected) => {
                self.reset();
                let mut rest = std::mem::take(&mut self.buffer).into_iter();
                if let Some(first) = rest.next() {
                    events.push(InputEvent::Char(first));
                }
                for c in rest.rev() {
                    queue.push_front(c);
                }
            }
        }
    }

    fn complete(&mut self, events: &mut Vec<InputEvent>, event: InputEvent) {
        self.reset();
        self.buffer.clear();
        events.push(event);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
