//! Pointer input reaction points for [`WorkspaceEngine`].

use super::WorkspaceEngine;
use crate::input::{CursorRequest, InputEvent, MouseButton};

impl WorkspaceEngine {
    /// React to a pointer event.
    ///
    /// Hosts must give the immediate-mode overlay first refusal on every
    /// pointer event and only forward the ones it declines — that precedence
    /// is a hard rule, not an optimization.
    ///
    /// Pointer moves hit-test the boundaries (and, mid-drag, move the
    /// grabbed boundary and re-sync the region targets); left press tries to
    /// start a drag at the last cursor position; left release ends it. The
    /// returned [`CursorRequest`] is the engine's only outbound side effect.
    pub fn handle_input(&mut self, event: InputEvent) -> CursorRequest {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = (x, y);
                if self.boundaries.is_dragging() {
                    self.boundaries.update_dragging(&mut self.store, x, y);
                    // Region geometry moved under every member target.
                    self.sync_all_targets();
                }
                self.boundaries.check_boundaries(&self.store, x, y)
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => {
                let (x, y) = self.cursor;
                if self.boundaries.start_dragging(&self.store, x, y) {
                    log::debug!(
                        "drag started at boundary {:?}",
                        self.boundaries.positions()
                    );
                }
                CursorRequest::Unchanged
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            } => self.boundaries.end_dragging(&self.store),
            InputEvent::MouseButton { .. } => CursorRequest::Unchanged,
        }
    }
}
