//! Widget system: the Control trait, environment values, scroll state.

pub mod environment;
pub mod scroll;
pub mod traits;

pub use environment::Environment;
pub use scroll::ScrollState;
pub use traits::{Control, ControlKind, Direction, Identity};
