//! Headless testing helpers: Pilot, snapshot rendering.
//!
//! Use the [`Pilot`] to drive an [`App`](crate::app::App) without a real
//! terminal, and [`render_to_string`] to composite a window to plain text.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{highlight_mask, render_to_string, screen_text};
