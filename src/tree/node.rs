//! Widget nodes: WidgetId, WidgetNode.

use slotmap::new_key_type;

use crate::widget::Control;

use super::layer::LayerId;

new_key_type! {
    /// Unique identifier for a widget in the window arena. Copy, lightweight (u64).
    pub struct WidgetId;
}

/// Data stored for a single widget.
///
/// `control` is only `None` while the window has lent the control out for a
/// mutating call; lookups during that window see the widget as absent.
pub struct WidgetNode {
    pub(crate) control: Option<Box<dyn Control>>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) index: usize,
    pub(crate) layer: LayerId,
}

impl WidgetNode {
    pub(crate) fn new(control: Box<dyn Control>, layer: LayerId) -> Self {
        Self {
            control: Some(control),
            children: Vec::new(),
            parent: None,
            index: 0,
            layer,
        }
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Position of this widget in its parent's child list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }
}

impl std::fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetNode")
            .field("kind", &self.control.as_ref().map(|c| c.kind()))
            .field("children", &self.children)
            .field("parent", &self.parent)
            .field("index", &self.index)
            .field("layer", &self.layer)
            .finish()
    }
}
