//! The backend contract for drawing a window.

use crate::error::Result;
use crate::tree::Window;

/// A drawing backend.
///
/// The backend owns the window's size: `start` and `handle_resize` set the
/// root frame, and `update` draws whatever the root has accumulated as
/// invalidated since the previous update.
pub trait Renderer {
    /// Prepare the output and size the window.
    fn start(&mut self, window: &mut Window) -> Result<()>;

    /// Draw the invalidated region and clear it.
    fn update(&mut self, window: &mut Window) -> Result<()>;

    /// Restore the output to its state before `start`.
    fn stop(&mut self, window: &mut Window) -> Result<()>;

    /// Re-read the output size, resize the window and invalidate all of it.
    fn handle_resize(&mut self, window: &mut Window) -> Result<()>;
}
