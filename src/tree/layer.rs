//! Layer tree: frames, invalidation, and cell compositing.
//!
//! Every widget owns one layer. Layers form a tree parallel to the widget
//! tree; a layer's `frame` is expressed in its parent's coordinates.
//! Invalidation travels up to the root layer, which keeps a single bounding
//! rect of everything that needs redrawing and raises an update request.

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::geometry::{Position, Rect, Size};
use crate::render::cell::{Cell, CellAttributes};

use super::node::WidgetId;

new_key_type! {
    /// Identifier for a layer in the layer arena.
    pub struct LayerId;
}

/// Provides the content cell of the widget that owns a layer.
///
/// Implemented by the window, which can look up the widget's control.
pub trait LayerContent {
    fn content_cell(&self, widget: WidgetId, position: Position) -> Option<Cell>;
}

/// One node of the layer tree.
#[derive(Debug, Clone, Default)]
pub struct LayerNode {
    children: Vec<LayerId>,
    parent: Option<LayerId>,
    frame: Rect,
    invalidated: Option<Rect>,
    content: Option<WidgetId>,
    highlighted: bool,
}

/// Arena of layers with a distinguished root.
pub struct LayerTree {
    layers: SlotMap<LayerId, LayerNode>,
    root: LayerId,
    update_requested: bool,
}

impl LayerTree {
    /// Create a tree holding only an empty root layer.
    pub fn new() -> Self {
        let mut layers = SlotMap::with_key();
        let root = layers.insert(LayerNode::default());
        Self { layers, root, update_requested: false }
    }

    /// The root layer, which covers the whole screen.
    pub fn root(&self) -> LayerId {
        self.root
    }

    /// Create a detached layer, optionally drawing a widget's content.
    pub fn create(&mut self, content: Option<WidgetId>) -> LayerId {
        self.layers.insert(LayerNode { content, ..LayerNode::default() })
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Insert `child` into `parent`'s children at `index` (clamped).
    ///
    /// A child that is already attached elsewhere is detached first. This
    /// does not invalidate anything.
    pub fn add_layer(&mut self, parent: LayerId, child: LayerId, index: usize) {
        if parent == child || !self.layers.contains_key(parent) || !self.layers.contains_key(child) {
            return;
        }
        if let Some(old_parent) = self.layers[child].parent {
            self.remove_layer(old_parent, child);
        }
        let siblings = &mut self.layers[parent].children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.layers[child].parent = Some(parent);
    }

    /// Detach `child` from `parent`. Returns whether it was attached there.
    pub fn remove_layer(&mut self, parent: LayerId, child: LayerId) -> bool {
        let Some(node) = self.layers.get_mut(parent) else {
            return false;
        };
        let before = node.children.len();
        node.children.retain(|&c| c != child);
        let removed = node.children.len() != before;
        if removed {
            if let Some(child) = self.layers.get_mut(child) {
                child.parent = None;
            }
        }
        removed
    }

    /// Detach a layer and free it together with all its descendants.
    pub fn destroy(&mut self, id: LayerId) {
        if id == self.root {
            return;
        }
        if let Some(parent) = self.parent(id) {
            self.remove_layer(parent, id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.layers.remove(current) {
                stack.extend(node.children);
            }
        }
    }

    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.layers.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: LayerId) -> &[LayerId] {
        self.layers.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn content(&self, id: LayerId) -> Option<WidgetId> {
        self.layers.get(id).and_then(|node| node.content)
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    pub fn frame(&self, id: LayerId) -> Rect {
        self.layers.get(id).map_or(Rect::ZERO, |node| node.frame)
    }

    /// Set a layer's frame.
    ///
    /// When the frame actually changes, both the old and the new frame are
    /// invalidated in the parent's coordinate space.
    pub fn set_frame(&mut self, id: LayerId, frame: Rect) {
        let Some(node) = self.layers.get_mut(id) else {
            return;
        };
        if node.frame == frame {
            return;
        }
        let old = std::mem::replace(&mut node.frame, frame);
        let parent = node.parent;
        if let Some(parent) = parent {
            self.invalidate_rect(parent, old);
            self.invalidate_rect(parent, frame);
        }
    }

    pub fn set_size(&mut self, id: LayerId, size: Size) {
        let frame = Rect::from_parts(self.frame(id).position, size);
        self.set_frame(id, frame);
    }

    pub fn set_position(&mut self, id: LayerId, position: Position) {
        let frame = Rect::from_parts(position, self.frame(id).size);
        self.set_frame(id, frame);
    }

    // -----------------------------------------------------------------------
    // Invalidation
    // -----------------------------------------------------------------------

    /// Invalidate the whole area of a layer.
    pub fn invalidate(&mut self, id: LayerId) {
        let size = self.frame(id).size;
        self.invalidate_rect(id, Rect::from_parts(Position::ZERO, size));
    }

    /// Invalidate `rect`, given in `id`'s own coordinates.
    ///
    /// The rect is translated through every ancestor up to the root, where
    /// it is merged into the pending bounding rect. Empty rects are ignored,
    /// as is anything on a layer that is not attached to the root.
    pub fn invalidate_rect(&mut self, id: LayerId, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let mut current = id;
        let mut rect = rect;
        loop {
            let Some(node) = self.layers.get(current) else {
                return;
            };
            match node.parent {
                Some(parent) => {
                    rect = rect.translate(node.frame.position);
                    current = parent;
                }
                None => break,
            }
        }
        if current != self.root {
            return;
        }
        trace!(%rect, "invalidate");
        self.update_requested = true;
        let root = &mut self.layers[current];
        root.invalidated = Some(match root.invalidated {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    /// The rect pending redraw on the root.
    pub fn invalidated(&self) -> Option<Rect> {
        self.layers.get(self.root).and_then(|node| node.invalidated)
    }

    /// Take and clear the rect pending redraw on the root.
    pub fn take_invalidated(&mut self) -> Option<Rect> {
        self.layers.get_mut(self.root).and_then(|node| node.invalidated.take())
    }

    /// Whether an update has been requested since the last
    /// [`take_update_request`](Self::take_update_request).
    pub fn needs_update(&self) -> bool {
        self.update_requested
    }

    /// Read and clear the update request.
    pub fn take_update_request(&mut self) -> bool {
        std::mem::take(&mut self.update_requested)
    }

    // -----------------------------------------------------------------------
    // Highlighting
    // -----------------------------------------------------------------------

    pub fn highlighted(&self, id: LayerId) -> bool {
        self.layers.get(id).is_some_and(|node| node.highlighted)
    }

    /// Set the highlight flag. Returns whether it changed.
    pub fn set_highlighted(&mut self, id: LayerId, highlighted: bool) -> bool {
        match self.layers.get_mut(id) {
            Some(node) if node.highlighted != highlighted => {
                node.highlighted = highlighted;
                true
            }
            _ => false,
        }
    }

    // -----------------------------------------------------------------------
    // Compositing
    // -----------------------------------------------------------------------

    /// Composite the cell at `position` (in `id`'s coordinates).
    ///
    /// Children are visited topmost first. The first child cell found wins
    /// the glyph; the search continues through lower children until one
    /// supplies a background. The layer's own content only contributes when
    /// nothing above it drew, or to fill in a missing background.
    pub fn cell_at(&self, id: LayerId, position: Position, content: &dyn LayerContent) -> Option<Cell> {
        let node = self.layers.get(id)?;
        let mut cell: Option<Cell> = None;

        for &child_id in node.children.iter().rev() {
            let Some(child) = self.layers.get(child_id) else {
                continue;
            };
            if !child.frame.contains(position) {
                continue;
            }
            let Some(child_cell) = self.cell_at(child_id, position - child.frame.position, content) else {
                continue;
            };
            let current = cell.get_or_insert(child_cell);
            if let Some(background) = child_cell.background {
                current.background = Some(background);
                break;
            }
        }

        if let Some(content_cell) = node.content.and_then(|w| content.content_cell(w, position)) {
            let current = cell.get_or_insert(content_cell);
            if current.background.is_none() {
                current.background = content_cell.background;
            }
        }

        if node.highlighted {
            if let Some(cell) = cell.as_mut() {
                cell.attributes.toggle(CellAttributes::INVERTED);
            }
        }

        cell
    }
}

impl Default for LayerTree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::render::color::{AnsiColor, Color};

    /// Content provider keyed by layer content id, for compositing tests.
    #[derive(Default)]
    struct Cells(HashMap<WidgetId, Box<dyn Fn(Position) -> Option<Cell>>>);

    impl LayerContent for Cells {
        fn content_cell(&self, widget: WidgetId, position: Position) -> Option<Cell> {
            self.0.get(&widget).and_then(|f| f(position))
        }
    }

    fn widget_ids(n: usize) -> Vec<WidgetId> {
        let mut arena: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    fn attached(tree: &mut LayerTree, frame: Rect) -> LayerId {
        let id = tree.create(None);
        let root = tree.root();
        let count = tree.children(root).len();
        tree.add_layer(root, id, count);
        tree.set_frame(id, frame);
        id
    }

    // ── structure ──────────────────────────────────────────────────────

    #[test]
    fn add_layer_clamps_index_and_sets_parent() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let a = tree.create(None);
        let b = tree.create(None);
        tree.add_layer(root, a, 10);
        tree.add_layer(root, b, 0);
        assert_eq!(tree.children(root), &[b, a]);
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn add_layer_moves_from_old_parent() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let a = tree.create(None);
        let b = tree.create(None);
        let c = tree.create(None);
        tree.add_layer(root, a, 0);
        tree.add_layer(root, b, 1);
        tree.add_layer(a, c, 0);
        tree.add_layer(b, c, 0);
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[c]);
        assert_eq!(tree.parent(c), Some(b));
    }

    #[test]
    fn destroy_frees_subtree() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let a = tree.create(None);
        let b = tree.create(None);
        tree.add_layer(root, a, 0);
        tree.add_layer(a, b, 0);
        tree.destroy(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn root_cannot_be_destroyed() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        tree.destroy(root);
        assert!(tree.contains(root));
    }

    // ── invalidation ───────────────────────────────────────────────────

    #[test]
    fn frame_change_invalidates_old_and_new() {
        let mut tree = LayerTree::new();
        let a = attached(&mut tree, Rect::new(0, 0, 2, 1));
        tree.take_invalidated();
        tree.take_update_request();

        tree.set_frame(a, Rect::new(5, 3, 2, 1));
        assert_eq!(tree.invalidated(), Some(Rect::new(0, 0, 7, 4)));
        assert!(tree.take_update_request());
        assert!(!tree.needs_update());
    }

    #[test]
    fn unchanged_frame_does_not_invalidate() {
        let mut tree = LayerTree::new();
        let a = attached(&mut tree, Rect::new(1, 1, 2, 2));
        tree.take_invalidated();
        tree.take_update_request();

        tree.set_frame(a, Rect::new(1, 1, 2, 2));
        assert_eq!(tree.invalidated(), None);
        assert!(!tree.needs_update());
    }

    #[test]
    fn invalidation_translates_through_ancestors() {
        let mut tree = LayerTree::new();
        let outer = attached(&mut tree, Rect::new(10, 5, 20, 10));
        let inner = tree.create(None);
        tree.add_layer(outer, inner, 0);
        tree.set_frame(inner, Rect::new(2, 3, 4, 1));
        tree.take_invalidated();

        tree.invalidate(inner);
        assert_eq!(tree.take_invalidated(), Some(Rect::new(12, 8, 4, 1)));
        assert_eq!(tree.take_invalidated(), None);
    }

    #[test]
    fn invalidation_translates_through_deep_chain() {
        let mut tree = LayerTree::new();
        let first = attached(&mut tree, Rect::new(1, 1, 20, 20));
        let mut parent = first;
        for frame in [Rect::new(2, 0, 10, 10), Rect::new(0, 3, 8, 8), Rect::new(1, 1, 2, 2)] {
            let child = tree.create(None);
            tree.add_layer(parent, child, 0);
            tree.set_frame(child, frame);
            parent = child;
        }
        tree.take_invalidated();
        tree.take_update_request();

        tree.invalidate(parent);
        assert_eq!(tree.take_invalidated(), Some(Rect::new(4, 5, 2, 2)));
        assert!(tree.take_update_request());

        tree.invalidate_rect(parent, Rect::new(1, 0, 1, 1));
        assert_eq!(tree.take_invalidated(), Some(Rect::new(5, 5, 1, 1)));
    }

    #[test]
    fn invalidations_union_into_one_rect() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        tree.invalidate_rect(root, Rect::new(1, 1, 1, 1));
        tree.invalidate_rect(root, Rect::new(8, 4, 2, 2));
        assert_eq!(tree.invalidated(), Some(Rect::new(1, 1, 9, 5)));

        tree.take_invalidated();
        tree.invalidate_rect(root, Rect::new(0, 0, 2, 2));
        tree.invalidate_rect(root, Rect::new(5, 5, 1, 1));
        assert_eq!(tree.invalidated(), Some(Rect::new(0, 0, 6, 6)));
    }

    #[test]
    fn empty_rect_is_ignored() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        tree.invalidate_rect(root, Rect::new(3, 3, 0, 4));
        assert_eq!(tree.invalidated(), None);
        assert!(!tree.needs_update());
    }

    #[test]
    fn detached_layers_do_not_request_updates() {
        let mut tree = LayerTree::new();
        let loose = tree.create(None);
        tree.set_frame(loose, Rect::new(0, 0, 3, 3));
        tree.invalidate(loose);
        assert_eq!(tree.invalidated(), None);
        assert!(!tree.needs_update());
    }

    // ── compositing ────────────────────────────────────────────────────

    #[test]
    fn topmost_child_wins_glyph_lower_child_supplies_background() {
        let ids = widget_ids(2);
        let mut tree = LayerTree::new();
        let root = tree.root();
        let bottom = tree.create(Some(ids[0]));
        let top = tree.create(Some(ids[1]));
        tree.add_layer(root, bottom, 0);
        tree.add_layer(root, top, 1);
        tree.set_frame(bottom, Rect::new(0, 0, 4, 1));
        tree.set_frame(top, Rect::new(1, 0, 1, 1));

        let mut cells = Cells::default();
        cells.0.insert(ids[0], Box::new(|_: Position| Some(Cell::filled(Color::Ansi(AnsiColor::Blue)))));
        cells.0.insert(ids[1], Box::new(|_: Position| Some(Cell::new('x'))));

        let cell = tree.cell_at(root, Position::new(1, 0), &cells).unwrap();
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.background, Some(Color::Ansi(AnsiColor::Blue)));

        let cell = tree.cell_at(root, Position::new(3, 0), &cells).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(tree.cell_at(root, Position::new(5, 0), &cells), None);
    }

    #[test]
    fn content_is_background_only() {
        let ids = widget_ids(2);
        let mut tree = LayerTree::new();
        let root = tree.root();
        let parent = tree.create(Some(ids[0]));
        let child = tree.create(Some(ids[1]));
        tree.add_layer(root, parent, 0);
        tree.add_layer(parent, child, 0);
        tree.set_frame(parent, Rect::new(0, 0, 3, 1));
        tree.set_frame(child, Rect::new(0, 0, 1, 1));

        let mut cells = Cells::default();
        cells.0.insert(ids[0], Box::new(|_: Position| Some(Cell::new('#').with_background(Color::Xterm(4)))));
        cells.0.insert(ids[1], Box::new(|_: Position| Some(Cell::new('a'))));

        let cell = tree.cell_at(root, Position::new(0, 0), &cells).unwrap();
        assert_eq!(cell.ch, 'a');
        assert_eq!(cell.background, Some(Color::Xterm(4)));
        let cell = tree.cell_at(root, Position::new(2, 0), &cells).unwrap();
        assert_eq!(cell.ch, '#');
    }

    #[test]
    fn child_positions_are_translated() {
        let ids = widget_ids(1);
        let mut tree = LayerTree::new();
        let root = tree.root();
        let layer = tree.create(Some(ids[0]));
        tree.add_layer(root, layer, 0);
        tree.set_frame(layer, Rect::new(3, 2, 5, 1));

        let mut cells = Cells::default();
        cells.0.insert(
            ids[0],
            Box::new(|p: Position| p.column.finite().and_then(|c| char::from_digit(c as u32, 10)).map(Cell::new)),
        );
        let cell = tree.cell_at(root, Position::new(5, 2), &cells).unwrap();
        assert_eq!(cell.ch, '2');
    }

    #[test]
    fn highlighted_layer_inverts() {
        let ids = widget_ids(1);
        let mut tree = LayerTree::new();
        let root = tree.root();
        let layer = tree.create(Some(ids[0]));
        tree.add_layer(root, layer, 0);
        tree.set_frame(layer, Rect::new(0, 0, 1, 1));
        let mut cells = Cells::default();
        cells.0.insert(ids[0], Box::new(|_: Position| Some(Cell::new('b'))));

        assert!(tree.set_highlighted(layer, true));
        assert!(!tree.set_highlighted(layer, true));
        let cell = tree.cell_at(root, Position::ZERO, &cells).unwrap();
        assert!(cell.attributes.contains(CellAttributes::INVERTED));

        tree.set_highlighted(layer, false);
        let cell = tree.cell_at(root, Position::ZERO, &cells).unwrap();
        assert!(!cell.attributes.contains(CellAttributes::INVERTED));
    }
}
