//! Vertical scroll state.
//!
//! `ScrollState` tracks the line offset of a scrollable widget, clamping it
//! to `[0, content_height - viewport_height]`.

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Scroll position of a vertically scrollable widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// First visible content line (always in `[0, max_offset]`).
    pub offset: i32,
    /// Total content height in lines.
    pub content_height: i32,
    /// Visible height in lines.
    pub viewport_height: i32,
}

impl ScrollState {
    pub fn new(content_height: i32, viewport_height: i32) -> Self {
        Self { offset: 0, content_height, viewport_height }
    }

    /// The largest valid offset.
    pub fn max_offset(&self) -> i32 {
        (self.content_height - self.viewport_height).max(0)
    }

    /// Scroll to an absolute line, clamped. Returns whether the offset changed.
    pub fn scroll_to(&mut self, line: i32) -> bool {
        let offset = line.clamp(0, self.max_offset());
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }

    /// Scroll by a relative number of lines, clamped.
    pub fn scroll_by(&mut self, lines: i32) -> bool {
        self.scroll_to(self.offset.saturating_add(lines))
    }

    /// Adjust the offset as little as possible so `line` is visible.
    pub fn reveal(&mut self, line: i32) -> bool {
        if line < self.offset {
            self.scroll_to(line)
        } else if line >= self.offset + self.viewport_height {
            self.scroll_to(line - self.viewport_height + 1)
        } else {
            false
        }
    }

    /// Whether content extends beyond the viewport.
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Scroll progress in `[0.0, 1.0]`; 0.0 when not scrollable.
    pub fn percent(&self) -> f32 {
        let max = self.max_offset();
        if max == 0 {
            0.0
        } else {
            self.offset as f32 / max as f32
        }
    }

    /// Update both heights and re-clamp the offset.
    pub fn resize(&mut self, content_height: i32, viewport_height: i32) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.scroll_to(self.offset);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_range() {
        let mut s = ScrollState::new(20, 5);
        assert_eq!(s.max_offset(), 15);
        assert!(s.scroll_to(100));
        assert_eq!(s.offset, 15);
        assert!(s.scroll_to(-3));
        assert_eq!(s.offset, 0);
        assert!(!s.scroll_to(0));
    }

    #[test]
    fn content_smaller_than_viewport() {
        let mut s = ScrollState::new(3, 10);
        assert!(!s.is_scrollable());
        assert!(!s.scroll_by(2));
        assert_eq!(s.offset, 0);
        assert_eq!(s.percent(), 0.0);
    }

    #[test]
    fn reveal_moves_minimally() {
        let mut s = ScrollState::new(30, 10);
        assert!(!s.reveal(4));
        assert!(s.reveal(12));
        assert_eq!(s.offset, 3);
        assert!(!s.reveal(5));
        assert!(s.reveal(1));
        assert_eq!(s.offset, 1);
    }

    #[test]
    fn resize_reclamps() {
        let mut s = ScrollState::new(30, 10);
        s.scroll_to(20);
        s.resize(15, 10);
        assert_eq!(s.offset, 5);
        assert_eq!(s.percent(), 1.0);
    }
}
