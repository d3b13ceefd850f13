//! Padding: insets a child by edge amounts.

use std::any::Any;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::geometry::Size;
use crate::layout::Edges;
use crate::tree::{WidgetId, Window};
use crate::widget::{Control, ControlKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    pub edges: Edges,
}

impl Padding {
    pub fn new(edges: Edges) -> Self {
        Self { edges }
    }

    pub fn all(amount: i32) -> Self {
        Self::new(Edges::all(amount))
    }
}

impl Control for Padding {
    fn kind(&self) -> ControlKind {
        ControlKind::Padding
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self, window: &Window, id: WidgetId, proposed: Size) -> Size {
        let content = window
            .children(id)
            .first()
            .map_or(Size::ZERO, |&child| window.size(child, self.edges.shrink(proposed)));
        self.edges.grow(content)
    }

    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
        if let Some(&child) = window.children(id).first() {
            window.layout(child, self.edges.shrink(size));
            window.set_frame_position(child, self.edges.origin());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
