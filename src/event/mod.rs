//! Terminal input decoding.

pub mod decoder;
pub mod input;

pub use decoder::{ArrowKey, ArrowKeyDecoder, MouseDecoder, MouseEvent, MouseEventKind, Step};
pub use input::{InputEvent, InputParser};
