//! Active-window tracking and z-index allocation.

use tracing::trace;

use crate::runtime::window::WindowId;

/// First z-index handed out by a fresh manager.
pub const BASE_Z_INDEX: u32 = 10;

/// Which window, if any, currently owns keyboard focus.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FocusState {
    active: Option<WindowId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focus(&mut self, target: Option<WindowId>) {
        if self.active == target {
            return;
        }
        trace!(from = ?self.active, to = ?target, "active window changed");
        self.active = target;
    }

    pub fn clear(&mut self) {
        self.set_focus(None);
    }

    /// Clears focus only when `id` is the active window.
    pub fn release(&mut self, id: &WindowId) {
        if self.is_active(id) {
            self.clear();
        }
    }

    pub fn is_active(&self, id: &WindowId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn focused(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }
}

/// Strictly increasing z-index counter.
///
/// Taking `&mut self` makes read-then-increment a single step for the owner,
/// so two allocations can never observe the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZOrder {
    next: u32,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self {
            next: BASE_Z_INDEX,
        }
    }
}

impl ZOrder {
    pub fn allocate(&mut self) -> u32 {
        let z_index = self.next;
        self.next = self.next.saturating_add(1);
        z_index
    }
}

#[cfg(test)]
mod tests {
    use super::{FocusState, ZOrder, BASE_Z_INDEX};
    use crate::runtime::window::WindowId;

    #[test]
    fn focus_release_only_clears_matching_window() {
        let mut focus = FocusState::new();
        let first = WindowId::from("files-1");
        let second = WindowId::from("docs-2");

        focus.set_focus(Some(first.clone()));
        focus.release(&second);
        assert_eq!(focus.focused(), Some(&first));

        focus.release(&first);
        assert_eq!(focus.focused(), None);
    }

    #[test]
    fn z_order_allocations_are_strictly_increasing() {
        let mut z_order = ZOrder::default();
        let values: Vec<u32> = (0..4).map(|_| z_order.allocate()).collect();

        assert_eq!(values, vec![BASE_Z_INDEX, 11, 12, 13]);
        assert_eq!(z_order.allocate(), 14);
    }
}
