//! Widget and layer trees: arena nodes, layers, and the window that owns both.

pub mod layer;
pub mod node;
pub mod window;

pub use layer::{LayerContent, LayerId, LayerTree};
pub use node::{WidgetId, WidgetNode};
pub use window::Window;
