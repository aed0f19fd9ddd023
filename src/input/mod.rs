//! Input handling: platform-agnostic event types and the cursor-shape
//! request the layout core emits back to the window system.

/// Platform-agnostic input events and cursor requests.
pub mod event;

pub use event::{CursorRequest, InputEvent, MouseButton};
