//! Control trait: sizing, layout, drawing, events, focus.
//!
//! A `Control` is the behavior attached to one widget node. The window owns
//! the node (children, parent, layer) and hands the control `&Window` or
//! `&mut Window` plus its own `WidgetId`, so every default method can reach
//! the tree without controls holding references to each other.

use std::any::Any;
use std::fmt;

use crate::geometry::{Position, Size};
use crate::render::cell::Cell;
use crate::tree::node::WidgetId;
use crate::tree::window::Window;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A focus navigation direction, relative to the widget asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Above,
    Below,
    LeftOf,
    RightOf,
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The kind tag of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Text,
    Button,
    TextField,
    Stack,
    ZStack,
    Spacer,
    Divider,
    ColorFill,
    Background,
    Border,
    Padding,
    Frame,
    ScrollView,
    /// A control defined outside this crate.
    Custom(&'static str),
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Custom(name) => f.write_str(name),
            other => write!(f, "{other:?}"),
        }
    }
}

/// What a reconciler needs to decide whether a widget can be updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub kind: ControlKind,
    pub fingerprint: u64,
}

// ---------------------------------------------------------------------------
// Control trait
// ---------------------------------------------------------------------------

/// Behavior of a widget.
///
/// Control is object-safe; the window stores `Box<dyn Control>`. Every
/// method receives the widget's own id so it can look up its children,
/// frame and layer through the window.
///
/// While a `&mut self` method runs, the window has lent this control out,
/// so calls back into the window that target this same widget's control
/// (for example `window.control::<Self>(id)`) see nothing.
pub trait Control: Any {
    /// The kind tag used for identity comparison.
    fn kind(&self) -> ControlKind;

    /// A hash of this control's own attributes. Two controls of the same
    /// kind with equal fingerprints render identically.
    fn fingerprint(&self) -> u64 {
        0
    }

    /// The size this control wants when offered `proposed`.
    fn size(&self, _window: &Window, _id: WidgetId, proposed: Size) -> Size {
        proposed
    }

    /// Adopt `size`. Containers also size and position their children.
    fn layout(&mut self, window: &mut Window, id: WidgetId, size: Size) {
        window.set_frame_size(id, size);
    }

    /// Handle a character of keyboard input. Defaults to passing it to every child.
    fn handle_event(&mut self, window: &mut Window, id: WidgetId, ch: char) {
        window.broadcast_event(id, ch);
    }

    /// The content cell at `position` in this widget's own coordinates.
    ///
    /// Content is drawn beneath the widget's children.
    fn cell(&self, _window: &Window, _id: WidgetId, _position: Position) -> Option<Cell> {
        None
    }

    /// Whether this control can become the first responder.
    fn selectable(&self) -> bool {
        false
    }

    /// Resolve focus navigation from the child at `index` in `direction`.
    ///
    /// Containers that arrange children along an axis resolve their own
    /// directions; everything else asks its parent.
    fn selectable_element(
        &self,
        window: &Window,
        id: WidgetId,
        direction: Direction,
        _index: usize,
    ) -> Option<WidgetId> {
        window.parent_selectable_element(id, direction)
    }

    fn became_first_responder(&mut self, window: &mut Window, id: WidgetId) {
        window.scroll_ancestors(id, Position::ZERO);
    }

    fn resigned_first_responder(&mut self, _window: &mut Window, _id: WidgetId) {}

    /// Make `position` (in this widget's coordinates) visible.
    fn scroll_to(&mut self, window: &mut Window, id: WidgetId, position: Position) {
        window.scroll_ancestors(id, position);
    }

    /// Scroll by `lines` (positive is down). Returns whether it was handled.
    fn scroll_by(&mut self, _window: &mut Window, _id: WidgetId, _lines: i32) -> bool {
        false
    }

    /// Run the primary action. Returns whether there was one.
    fn activate(&mut self, _window: &mut Window, _id: WidgetId) -> bool {
        false
    }

    /// Downcast to `&dyn Any` for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for typed access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
