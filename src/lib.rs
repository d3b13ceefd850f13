//! # strata-tui
//!
//! A retained-mode terminal UI engine. Widgets ("controls") live in an arena
//! tree owned by a [`Window`](tree::Window); each widget owns a layer that
//! records its frame and accumulates invalidated regions. Renderers draw only
//! what was invalidated, and only the cells that changed.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: `Extended` integers, `Position`, `Size`, `Rect`
//! - **[`tree`]**: Widget arena, layer tree, focus and event dispatch
//! - **[`widget`]**: The `Control` trait, environment values, scroll state
//! - **[`widgets`]**: Built-in controls: text, buttons, fields, stacks, decorations
//! - **[`layout`]**: Axes, alignment and edge insets
//! - **[`event`]**: Arrow-key and SGR mouse decoders, input parser
//! - **[`render`]**: Cells, colors, terminal and in-memory renderers
//! - **[`app`]**: Event loop with coalesced flushing and signal handling
//! - **[`testing`]**: Headless pilot and snapshot helpers

// Foundation
pub mod error;
pub mod geometry;

// Tree and widgets
pub mod layout;
pub mod tree;
pub mod widget;
pub mod widgets;

// Input
pub mod event;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod logging;
pub mod terminal;

// Testing
pub mod testing;

pub use error::{Error, Result};
