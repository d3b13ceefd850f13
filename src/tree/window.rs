//! Window: the widget arena, root controls, and the first responder.
//!
//! All widgets live in one `SlotMap`. Each widget owns exactly one layer in
//! the window's [`LayerTree`]; inserting or removing a widget keeps the two
//! trees in step. Controls are called through the window so they always
//! receive the tree they belong to.

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::geometry::{Extended, Position, Rect, Size};
use crate::render::cell::Cell;
use crate::widget::{Control, Direction, Identity};

use super::layer::{LayerContent, LayerId, LayerTree};
use super::node::{WidgetId, WidgetNode};

/// The root of a user interface.
pub struct Window {
    nodes: SlotMap<WidgetId, WidgetNode>,
    layers: LayerTree,
    controls: Vec<WidgetId>,
    first_responder: Option<WidgetId>,
}

impl Window {
    /// Create an empty window.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            layers: LayerTree::new(),
            controls: Vec::new(),
            first_responder: None,
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Create a detached widget for `control`, with its own layer.
    pub fn create<C: Control>(&mut self, control: C) -> WidgetId {
        self.create_boxed(Box::new(control))
    }

    pub fn create_boxed(&mut self, control: Box<dyn Control>) -> WidgetId {
        let layers = &mut self.layers;
        self.nodes
            .insert_with_key(|id| WidgetNode::new(control, layers.create(Some(id))))
    }

    /// Create a widget and append `children` to it.
    pub fn compose<C: Control>(
        &mut self,
        control: C,
        children: impl IntoIterator<Item = WidgetId>,
    ) -> WidgetId {
        let id = self.create(control);
        for child in children {
            let index = self.children(id).len();
            self.insert(id, child, index);
        }
        id
    }

    /// Attach a detached widget as a root control, above existing roots.
    ///
    /// If nothing has focus yet, the first selectable element of the new
    /// root becomes the first responder.
    pub fn add_control(&mut self, id: WidgetId) -> bool {
        if !self.nodes.contains_key(id) || self.nodes[id].parent.is_some() || self.controls.contains(&id) {
            warn!(?id, "add_control ignored: widget missing or already attached");
            return false;
        }
        self.controls.push(id);
        let root = self.layers.root();
        let layer = self.nodes[id].layer;
        let top = self.layers.children(root).len();
        self.layers.add_layer(root, layer, top);
        self.layers.invalidate(layer);
        if self.first_responder.is_none() {
            if let Some(target) = self.first_selectable_element(id) {
                self.set_first_responder(Some(target));
            }
        }
        true
    }

    /// Detach and destroy a root control.
    ///
    /// If it held the first responder, focus moves to the first selectable
    /// element of the topmost remaining root, if any.
    pub fn remove_control(&mut self, id: WidgetId) -> bool {
        if !self.controls.contains(&id) {
            return false;
        }
        let held_focus = self.first_responder.is_some_and(|fr| fr == id || self.is_descendant(fr, id));
        if held_focus {
            self.resign_current();
        }
        self.controls.retain(|&c| c != id);
        if let Some(layer) = self.layer(id) {
            self.layers.invalidate(layer);
        }
        self.destroy_subtree(id);
        if held_focus && self.first_responder.is_none() {
            let replacement = self.fallback_responder(id);
            self.set_first_responder(replacement);
        }
        true
    }

    /// Insert a detached widget into `parent` at `index` (clamped).
    ///
    /// The child's layer is inserted into the parent's layer at the same
    /// index. If the parent is attached to the window and nothing has focus
    /// yet, the child's first selectable element becomes the first responder.
    pub fn insert(&mut self, parent: WidgetId, child: WidgetId, index: usize) -> bool {
        if parent == child
            || !self.nodes.contains_key(parent)
            || !self.nodes.contains_key(child)
            || self.nodes[child].parent.is_some()
            || self.controls.contains(&child)
            || self.is_descendant(parent, child)
        {
            warn!(?parent, ?child, "insert ignored: invalid parent/child pair");
            return false;
        }

        let siblings = &mut self.nodes[parent].children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.nodes[child].parent = Some(parent);
        self.reindex(parent, index);

        let parent_layer = self.nodes[parent].layer;
        let child_layer = self.nodes[child].layer;
        self.layers.add_layer(parent_layer, child_layer, index);
        self.layers.invalidate(child_layer);

        if self.first_responder.is_none() && self.is_attached(parent) {
            if let Some(target) = self.first_selectable_element(child) {
                self.set_first_responder(Some(target));
            }
        }
        true
    }

    /// Remove and destroy the child of `parent` at `index`.
    ///
    /// If the removed subtree holds the first responder, focus moves to the
    /// nearest selectable element above the removed position, else below it,
    /// else to the first selectable element of the topmost root that has
    /// one, else nowhere. The area the child covered is invalidated.
    pub fn remove(&mut self, parent: WidgetId, index: usize) -> bool {
        let Some(&child) = self.nodes.get(parent).and_then(|node| node.children.get(index)) else {
            return false;
        };

        if self.first_responder.is_some_and(|fr| fr == child || self.is_descendant(fr, child)) {
            self.resign_current();
            let outside = |r: &WidgetId| *r != child && !self.is_descendant(*r, child);
            let replacement = self
                .selectable_element(parent, Direction::Above, index)
                .filter(outside)
                .or_else(|| self.selectable_element(parent, Direction::Below, index).filter(outside))
                .or_else(|| self.fallback_responder(child));
            if let Some(replacement) = replacement {
                self.set_first_responder(Some(replacement));
            }
        }

        // Focus hooks run user code; re-check before touching the arena.
        let (Some(parent_layer), Some(child_layer)) = (self.layer(parent), self.layer(child)) else {
            return false;
        };
        let Some(index) = self.children(parent).iter().position(|&c| c == child) else {
            return false;
        };
        self.layers.invalidate(child_layer);
        self.layers.remove_layer(parent_layer, child_layer);

        self.nodes[parent].children.remove(index);
        self.reindex(parent, index);
        self.destroy_subtree(child);
        true
    }

    fn reindex(&mut self, parent: WidgetId, from: usize) {
        let children = self.nodes[parent].children.clone();
        for (i, &child) in children.iter().enumerate().skip(from) {
            if let Some(node) = self.nodes.get_mut(child) {
                node.index = i;
            }
        }
    }

    fn destroy_subtree(&mut self, id: WidgetId) {
        let Some(layer) = self.nodes.get(id).map(|node| node.layer) else {
            return;
        };
        self.layers.destroy(layer);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
            if self.first_responder == Some(current) {
                self.first_responder = None;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root controls, bottom to top.
    pub fn controls(&self) -> &[WidgetId] {
        &self.controls
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn index(&self, id: WidgetId) -> Option<usize> {
        self.nodes.get(id).map(|node| node.index)
    }

    pub fn layer(&self, id: WidgetId) -> Option<LayerId> {
        self.nodes.get(id).map(|node| node.layer)
    }

    /// Whether `id` is a strict descendant of `of`.
    pub fn is_descendant(&self, id: WidgetId, of: WidgetId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == of {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Whether `id` belongs to a root control of this window.
    pub fn is_attached(&self, id: WidgetId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        self.controls.contains(&current)
    }

    /// Kind and fingerprint of a widget's control.
    pub fn identity(&self, id: WidgetId) -> Option<Identity> {
        let control = self.nodes.get(id)?.control.as_ref()?;
        Some(Identity { kind: control.kind(), fingerprint: control.fingerprint() })
    }

    /// Typed access to a widget's control.
    pub fn control<T: Control>(&self, id: WidgetId) -> Option<&T> {
        self.nodes.get(id)?.control.as_ref()?.as_any().downcast_ref::<T>()
    }

    /// Typed mutable access to a widget's control.
    ///
    /// Changes that affect drawing must be followed by [`invalidate`](Self::invalidate).
    pub fn control_mut<T: Control>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.nodes.get_mut(id)?.control.as_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Lend a widget's control out for a call that needs `&mut Window`.
    fn with_control<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Control, &mut Window) -> R,
    ) -> Option<R> {
        let Some(mut control) = self.nodes.get_mut(id).and_then(|node| node.control.take()) else {
            trace!(?id, "control unavailable");
            return None;
        };
        let result = f(control.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            node.control = Some(control);
        }
        Some(result)
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// The size a widget wants when offered `proposed`.
    pub fn size(&self, id: WidgetId, proposed: Size) -> Size {
        self.nodes
            .get(id)
            .and_then(|node| node.control.as_ref())
            .map_or(Size::ZERO, |control| control.size(self, id, proposed))
    }

    /// How much wider a widget gets between a zero and an infinite width proposal.
    pub fn horizontal_flexibility(&self, id: WidgetId, height: Extended) -> Extended {
        let min = self.size(id, Size { width: Extended::ZERO, height });
        let max = self.size(id, Size { width: Extended::INFINITY, height });
        max.width - min.width
    }

    /// How much taller a widget gets between a zero and an infinite height proposal.
    pub fn vertical_flexibility(&self, id: WidgetId, width: Extended) -> Extended {
        let min = self.size(id, Size { width, height: Extended::ZERO });
        let max = self.size(id, Size { width, height: Extended::INFINITY });
        max.height - min.height
    }

    pub fn layout(&mut self, id: WidgetId, size: Size) {
        self.with_control(id, |control, window| control.layout(window, id, size));
    }

    /// Lay out every root control at the window size.
    pub fn layout_window(&mut self) {
        let size = self.window_size();
        for id in self.controls.clone() {
            self.layout(id, size);
        }
    }

    /// The window size, which is the root layer's size.
    pub fn window_size(&self) -> Size {
        self.layers.frame(self.layers.root()).size
    }

    /// Resize the root layer.
    pub fn set_window_size(&mut self, size: Size) {
        let root = self.layers.root();
        self.layers.set_frame(root, Rect::from_parts(Position::ZERO, size));
    }

    /// A widget's frame in its parent's coordinates.
    pub fn frame(&self, id: WidgetId) -> Rect {
        self.nodes.get(id).map_or(Rect::ZERO, |node| self.layers.frame(node.layer))
    }

    pub fn set_frame_size(&mut self, id: WidgetId, size: Size) {
        if let Some(layer) = self.layer(id) {
            self.layers.set_size(layer, size);
        }
    }

    pub fn set_frame_position(&mut self, id: WidgetId, position: Position) {
        if let Some(layer) = self.layer(id) {
            self.layers.set_position(layer, position);
        }
    }

    /// Mark a widget's whole area for redraw.
    pub fn invalidate(&mut self, id: WidgetId) {
        if let Some(layer) = self.layer(id) {
            self.layers.invalidate(layer);
        }
    }

    /// Highlight (invert) a widget's layer, invalidating it on change.
    pub fn set_highlighted(&mut self, id: WidgetId, highlighted: bool) {
        if let Some(layer) = self.layer(id) {
            if self.layers.set_highlighted(layer, highlighted) {
                self.layers.invalidate(layer);
            }
        }
    }

    pub fn layers(&self) -> &LayerTree {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerTree {
        &mut self.layers
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// A widget's own content cell.
    pub fn cell(&self, id: WidgetId, position: Position) -> Option<Cell> {
        self.nodes.get(id)?.control.as_ref()?.cell(self, id, position)
    }

    /// The composited cell at a window position.
    pub fn cell_at(&self, position: Position) -> Option<Cell> {
        self.layers.cell_at(self.layers.root(), position, self)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn handle_event(&mut self, id: WidgetId, ch: char) {
        self.with_control(id, |control, window| control.handle_event(window, id, ch));
    }

    /// Pass `ch` to every child of `id`.
    pub fn broadcast_event(&mut self, id: WidgetId, ch: char) {
        for child in self.children(id).to_vec() {
            self.handle_event(child, ch);
        }
    }

    pub fn scroll_to(&mut self, id: WidgetId, position: Position) {
        self.with_control(id, |control, window| control.scroll_to(window, id, position));
    }

    /// Forward a scroll request to the parent, in the parent's coordinates.
    pub fn scroll_ancestors(&mut self, id: WidgetId, position: Position) {
        if let Some(parent) = self.parent(id) {
            let position = position + self.frame(id).position;
            self.scroll_to(parent, position);
        }
    }

    /// Scroll the nearest widget, starting at `id` and walking up, that
    /// accepts scrolling.
    pub fn scroll_by(&mut self, id: WidgetId, lines: i32) -> bool {
        let mut current = Some(id);
        while let Some(target) = current {
            let handled = self.with_control(target, |control, window| control.scroll_by(window, target, lines));
            if handled == Some(true) {
                return true;
            }
            current = self.parent(target);
        }
        false
    }

    /// Run a widget's primary action.
    pub fn activate(&mut self, id: WidgetId) -> bool {
        self.with_control(id, |control, window| control.activate(window, id))
            .unwrap_or(false)
    }

    /// The deepest selectable widget under a window position, preferring
    /// later (topmost) siblings.
    pub fn hit_test(&self, position: Position) -> Option<WidgetId> {
        self.controls.iter().rev().find_map(|&root| self.hit(root, position, true))
    }

    /// The deepest widget of any kind under a window position.
    pub fn widget_at(&self, position: Position) -> Option<WidgetId> {
        self.controls.iter().rev().find_map(|&root| self.hit(root, position, false))
    }

    fn hit(&self, id: WidgetId, position: Position, selectable_only: bool) -> Option<WidgetId> {
        let frame = self.frame(id);
        if !frame.contains(position) {
            return None;
        }
        let local = position - frame.position;
        self.children(id)
            .iter()
            .rev()
            .find_map(|&child| self.hit(child, local, selectable_only))
            .or_else(|| (!selectable_only || self.is_selectable(id)).then_some(id))
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    pub fn first_responder(&self) -> Option<WidgetId> {
        self.first_responder
    }

    pub fn is_first_responder(&self, id: WidgetId) -> bool {
        self.first_responder == Some(id)
    }

    pub fn is_selectable(&self, id: WidgetId) -> bool {
        self.nodes
            .get(id)
            .and_then(|node| node.control.as_ref())
            .is_some_and(|control| control.selectable())
    }

    /// Depth-first, pre-order search for a selectable widget.
    pub fn first_selectable_element(&self, id: WidgetId) -> Option<WidgetId> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        if self.is_selectable(id) {
            return Some(id);
        }
        self.children(id)
            .iter()
            .find_map(|&child| self.first_selectable_element(child))
    }

    /// First selectable element of the topmost root that has one, never
    /// inside `excluded`'s subtree.
    fn fallback_responder(&self, excluded: WidgetId) -> Option<WidgetId> {
        self.controls
            .iter()
            .rev()
            .find_map(|&root| self.first_selectable_outside(root, excluded))
    }

    fn first_selectable_outside(&self, id: WidgetId, excluded: WidgetId) -> Option<WidgetId> {
        if id == excluded || !self.nodes.contains_key(id) {
            return None;
        }
        if self.is_selectable(id) {
            return Some(id);
        }
        self.children(id)
            .iter()
            .find_map(|&child| self.first_selectable_outside(child, excluded))
    }

    /// Resolve navigation from the child at `index` of `id`.
    pub fn selectable_element(&self, id: WidgetId, direction: Direction, index: usize) -> Option<WidgetId> {
        self.nodes
            .get(id)?
            .control
            .as_ref()?
            .selectable_element(self, id, direction, index)
    }

    /// Ask `id`'s parent to resolve navigation, passing `id`'s index.
    pub fn parent_selectable_element(&self, id: WidgetId, direction: Direction) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        let parent = node.parent?;
        self.selectable_element(parent, direction, node.index)
    }

    /// Replace the first responder, running the resign and become hooks.
    pub fn set_first_responder(&mut self, id: Option<WidgetId>) {
        if self.first_responder == id {
            return;
        }
        self.resign_current();
        let Some(id) = id.filter(|&id| self.nodes.contains_key(id)) else {
            return;
        };
        debug!(?id, "first responder");
        self.first_responder = Some(id);
        self.with_control(id, |control, window| control.became_first_responder(window, id));
    }

    fn resign_current(&mut self) {
        if let Some(old) = self.first_responder.take() {
            debug!(?old, "resign first responder");
            self.with_control(old, |control, window| control.resigned_first_responder(window, old));
        }
    }

    /// Move focus from the first responder in `direction`.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        let Some(current) = self.first_responder else {
            return false;
        };
        match self.selectable_element(current, direction, 0) {
            Some(next) if next != current => {
                self.set_first_responder(Some(next));
                true
            }
            _ => false,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerContent for Window {
    fn content_cell(&self, widget: WidgetId, position: Position) -> Option<Cell> {
        self.cell(widget, position)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
