//! Built-in controls.

pub mod border;
pub mod button;
pub mod divider;
pub mod fill;
pub mod frame;
pub mod padding;
pub mod scroll_view;
pub mod spacer;
pub mod stack;
pub mod text;
pub mod text_field;

pub use border::{Border, BorderStyle};
pub use button::{Action, Button};
pub use divider::Divider;
pub use fill::{Background, ColorFill};
pub use frame::Frame;
pub use padding::Padding;
pub use scroll_view::ScrollView;
pub use spacer::Spacer;
pub use stack::{Stack, ZStack};
pub use text::Text;
pub use text_field::{SubmitAction, TextField};
