//! Tilegrid Render Library
//!
//! Drawing-surface abstraction and the frame builders that draw a grid and
//! its selection overlay in screen space.

mod frame;
mod style;
mod surface;

pub use frame::{render_frame, render_selection, render_tiles};
pub use style::RenderStyle;
pub use surface::{DrawCommand, RecordingSurface, Surface};
