/// Platform-agnostic input events.
///
/// These are fed into
/// [`WorkspaceEngine::handle_input`](crate::engine::WorkspaceEngine::handle_input),
/// which answers with a [`CursorRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute window position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Cursor shape the window system should show, the layout core's one
/// outbound side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorRequest {
    /// Keep whatever cursor is currently set.
    Unchanged,
    /// Horizontal resize cursor (pointer on the vertical boundary).
    ResizeEw,
    /// Vertical resize cursor (pointer on the horizontal boundary).
    ResizeNs,
    /// Restore the default cursor.
    Reset,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl CursorRequest {
    /// The winit cursor icon to apply, or `None` to leave the cursor alone.
    #[must_use]
    pub fn icon(self) -> Option<winit::window::CursorIcon> {
        match self {
            Self::Unchanged => None,
            Self::ResizeEw => Some(winit::window::CursorIcon::EwResize),
            Self::ResizeNs => Some(winit::window::CursorIcon::NsResize),
            Self::Reset => Some(winit::window::CursorIcon::Default),
        }
    }
}
