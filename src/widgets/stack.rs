//! Stacks: children arranged along an axis, or overlaid.
//!
//! `Stack` sizes its children in order of increasing flexibility, offering
//! each an equal share of the space that is still unclaimed. Rigid children
//! therefore take what they need first and flexible ones (spacers) divide
//! the rest, so a stack with a flexible child fills its whole assigned
//! length. `ZStack` overlays its children, later ones on top.

use std::any::Any;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::geometry::{Extended, Position, Size};
use crate::layout::{Axis, HorizontalAlignment, VerticalAlignment};
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind, Direction};

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stack {
    axis: Axis,
    spacing: i32,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
}

impl Stack {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            spacing: 0,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
        }
    }

    /// Children top to bottom.
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Children left to right.
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Empty cells between adjacent children.
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing.max(0);
        self
    }

    /// Cross-axis alignment of a vertical stack.
    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    /// Cross-axis alignment of a horizontal stack.
    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn flexibility(&self, window: &Window, child: WidgetId, cross: Extended) -> Extended {
        match self.axis {
            Axis::Vertical => window.vertical_flexibility(child, cross),
            Axis::Horizontal => window.horizontal_flexibility(child, cross),
        }
    }

    fn total_spacing(&self, count: usize) -> Extended {
        Extended::from(count.saturating_sub(1)) * Extended::new(self.spacing)
    }

    /// Size every child against `size`, least flexible first.
    ///
    /// Returns the children's sizes in child order.
    fn measure(&self, window: &Window, children: &[WidgetId], size: Size) -> Vec<Size> {
        let cross = self.axis.cross(size);
        let mut order: Vec<(usize, Extended)> = children
            .iter()
            .enumerate()
            .map(|(i, &child)| (i, self.flexibility(window, child, cross)))
            .collect();
        order.sort_by_key(|&(_, flexibility)| flexibility);

        let mut sizes = vec![Size::ZERO; children.len()];
        let mut remaining = (self.axis.main(size) - self.total_spacing(children.len())).max(Extended::ZERO);
        let mut remaining_items = children.len();
        for (i, _) in order {
            let share = remaining / Extended::from(remaining_items);
            let child_size = window.size(children[i], self.axis.size(share, cross));
            remaining = (remaining - self.axis.main(child_size)).max(Extended::ZERO);
            remaining_items -= 1;
            sizes[i] = child_size;
        }
        sizes
    }

    fn cross_offset(&self, available: Extended, used: Extended) -> Extended {
        match self.axis {
            Axis::Vertical => self.horizontal_alignment.offset(available, used),
            Axis::Horizontal => self.vertical_alignment.offset(available, used),
        }
    }

    /// The directions this stack resolves: (towards lower index, towards higher index).
    fn directions(&self) -> (Direction, Direction) {
        match self.axis {
            Axis::Vertical => (Direction::Above, Direction::Below),
            Axis::Horizontal => (Direction::LeftOf, Direction::RightOf),
        }
    }
}

impl Control for Stack {
    fn kind(&self) -> ControlKind {
        ControlKind::Stack
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        let children = window.children(id);
        let sizes = self.measure(window, children, proposed);
        let main = sizes
            .iter()
            .fold(self.total_spacing(children.len()), |total, s| total + self.axis.main(*s));
        let cross = sizes
            .iter()
            .map(|s| self.axis.cross(*s))
            .max()
            .unwrap_or(Extended::ZERO);
        self.axis.size(main, cross)
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        let children = window.children(id).to_vec();
        let sizes = self.measure(window, &children, size);

        let cross_available = self.axis.cross(size);
        let mut main = Extended::ZERO;
        for (&child, &child_size) in children.iter().zip(&sizes) {
            window.layout(child, child_size);
            let cross = self.cross_offset(cross_available, self.axis.cross(child_size));
            window.set_frame_position(child, self.axis.position(main, cross));
            main = main + self.axis.main(child_size) + self.spacing;
        }
    }

    fn selectable_element(
        &self,
        window: &Window,
        id: WidgetId,
        direction: Direction,
        index: usize,
    ) -> Option<WidgetId> {
        let (backward, forward) = self.directions();
        let children = window.children(id);
        let found = if direction == forward {
            children
                .iter()
                .skip(index + 1)
                .find_map(|&child| window.first_selectable_element(child))
        } else if direction == backward {
            children
                .iter()
                .take(index.min(children.len()))
                .rev()
                .find_map(|&child| window.first_selectable_element(child))
        } else {
            None
        };
        found.or_else(|| window.parent_selectable_element(id, direction))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// ZStack
// ---------------------------------------------------------------------------

/// Children overlaid in the same area, later children on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ZStack {
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
}

impl ZStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }
}

impl Control for ZStack {
    fn kind(&self) -> ControlKind {
        ControlKind::ZStack
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        window
            .children(id)
            .iter()
            .map(|&child| window.size(child, proposed))
            .fold(Size::ZERO, |acc, s| Size {
                width: acc.width.max(s.width),
                height: acc.height.max(s.height),
            })
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        for child in window.children(id).to_vec() {
            let child_size = window.size(child, size);
            window.layout(child, child_size);
            let position = Position {
                column: self.horizontal_alignment.offset(size.width, child_size.width),
                line: self.vertical_alignment.offset(size.height, child_size.height),
            };
            window.set_frame_position(child, position);
        }
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
