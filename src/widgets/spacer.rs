//! Spacer: flexible empty space along one axis.

use std::any::Any;

use crate::geometry::{Extended, Size};
use crate::layout::Axis;
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind};

/// Takes whatever length it is offered along its axis, but at least
/// `min_length`, and nothing across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spacer {
    axis: Axis,
    min_length: i32,
}

impl Spacer {
    /// Space between children of a vertical stack.
    pub fn vertical() -> Self {
        Self { axis: Axis::Vertical, min_length: 0 }
    }

    /// Space between children of a horizontal stack.
    pub fn horizontal() -> Self {
        Self { axis: Axis::Horizontal, min_length: 0 }
    }

    pub fn min_length(mut self, min_length: i32) -> Self {
        self.min_length = min_length.max(0);
        self
    }
}

impl Control for Spacer {
    fn kind(&self) -> ControlKind {
        ControlKind::Spacer
    }

    fn fingerprint(&self) -> u64 {
        (u64::from(self.min_length.unsigned_abs()) << 1) | u64::from(self.axis == Axis::Vertical)
    }

    fn size(&self, _window: &Window, _id: WidgetId, proposed: Size) -> Size {
        let length = self.axis.main(proposed).max(Extended::new(self.min_length));
        self.axis.size(length, Extended::ZERO)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
