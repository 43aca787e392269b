//! The window manager: sole owner and mutator of the window store.
//!
//! Every operation takes `&mut self`, so each one reads and rewrites the store
//! as a single step relative to any other operation. Operations addressed to an
//! id that is not in the store are silent no-ops; UI events may arrive after the
//! window they target has already gone.

use time::OffsetDateTime;
use tracing::debug;

use crate::core::{AppKind, Position, ScreenGeometry};
use crate::runtime::focus::{FocusState, ZOrder};
use crate::runtime::layout::{cascade_position, tile_rects, TileMode, DEFAULT_WINDOW_SIZE};
use crate::runtime::window::{TaskbarEntry, WindowId, WindowRecord};

#[derive(Debug, Clone, Default)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    focus: FocusState,
    z_order: ZOrder,
    screen: ScreenGeometry,
    last_stamp_ms: i64,
}

impl WindowManager {
    pub fn new(screen: ScreenGeometry) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    pub fn screen(&self) -> ScreenGeometry {
        self.screen
    }

    /// Records a viewport resize. Existing windows keep their geometry until
    /// the next layout pass.
    pub fn set_screen(&mut self, screen: ScreenGeometry) {
        self.screen = screen;
    }

    /// Windows in open order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|window| &window.id == id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.focus.focused()
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.focus.focused().and_then(|id| self.window(id))
    }

    /// Opens `app_kind`, or refocuses the existing window of a single-instance
    /// kind. Returns the id of the window that ends up active.
    pub fn open(&mut self, app_kind: AppKind, title: impl Into<String>) -> WindowId {
        if !app_kind.is_multi_instance() {
            if let Some(existing) = self
                .windows
                .iter()
                .find(|window| window.app_kind == app_kind)
                .map(|window| window.id.clone())
            {
                debug!(id = %existing, "single-instance app already open; refocusing");
                self.focus(&existing);
                return existing;
            }
        }

        let stacked = self.windows.len();
        let record = WindowRecord {
            id: WindowId::compose(app_kind, self.next_stamp()),
            app_kind,
            title: title.into(),
            is_open: true,
            is_minimized: false,
            is_maximized: false,
            z_index: self.z_order.allocate(),
            position: cascade_position(stacked),
            size: DEFAULT_WINDOW_SIZE,
        };
        let id = record.id.clone();
        debug!(id = %id, z_index = record.z_index, "window opened");

        self.windows.push(record);
        self.focus.set_focus(Some(id.clone()));
        id
    }

    /// Opens `app_kind` with its launcher title.
    pub fn launch(&mut self, app_kind: AppKind) -> WindowId {
        self.open(app_kind, app_kind.default_title())
    }

    pub fn close(&mut self, id: &WindowId) {
        let before = self.windows.len();
        self.windows.retain(|window| &window.id != id);
        if self.windows.len() != before {
            debug!(id = %id, "window closed");
        }
        self.focus.release(id);
    }

    /// Toggles the minimized flag. Doubles as "restore" from the taskbar.
    pub fn minimize(&mut self, id: &WindowId) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.is_minimized = !window.is_minimized;
        if window.is_minimized {
            self.focus.release(id);
        }
    }

    /// Toggles the maximized flag; always leaves the window un-minimized.
    pub fn maximize(&mut self, id: &WindowId) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.is_maximized = !window.is_maximized;
        window.is_minimized = false;
    }

    /// Raises the window to the top of the stack and makes it active.
    pub fn focus(&mut self, id: &WindowId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let z_index = self.z_order.allocate();
        let window = &mut self.windows[index];
        window.z_index = z_index;
        window.is_minimized = false;
        self.focus.set_focus(Some(id.clone()));
    }

    /// Drag-stop: pins the window at `position`.
    pub fn move_to(&mut self, id: &WindowId, position: Position) {
        if let Some(window) = self.window_mut(id) {
            window.position = position;
        }
    }

    /// Lays out every visible window over the work area. Minimized windows
    /// keep their geometry.
    pub fn tile(&mut self, mode: TileMode) {
        let visible: Vec<usize> = self.visible_indices().collect();
        if visible.is_empty() {
            return;
        }

        let rects = tile_rects(mode, visible.len(), self.screen.work_area());
        for (index, rect) in visible.into_iter().zip(rects) {
            let window = &mut self.windows[index];
            window.position = rect.position;
            window.size = rect.size;
            window.is_maximized = false;
        }
        debug!(mode = %mode, "windows tiled");
    }

    /// Staggers every visible window diagonally in open order.
    pub fn cascade(&mut self) {
        let visible: Vec<usize> = self.visible_indices().collect();
        for (step, index) in visible.into_iter().enumerate() {
            let window = &mut self.windows[index];
            window.position = cascade_position(step);
            window.is_maximized = false;
        }
    }

    pub fn minimize_all(&mut self) {
        for window in &mut self.windows {
            window.is_minimized = true;
        }
        self.focus.clear();
    }

    pub fn close_all(&mut self) {
        self.windows.clear();
        self.focus.clear();
    }

    /// Visible windows in paint order (lowest z-index first).
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> = self
            .windows
            .iter()
            .filter(|window| window.is_visible())
            .collect();
        visible.sort_by_key(|window| window.z_index);
        visible
    }

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        self.windows
            .iter()
            .map(|window| TaskbarEntry {
                id: window.id.clone(),
                app_kind: window.app_kind,
                title: window.title.clone(),
                is_active: self.focus.is_active(&window.id) && !window.is_minimized,
                is_minimized: window.is_minimized,
            })
            .collect()
    }

    fn index_of(&self, id: &WindowId) -> Option<usize> {
        self.windows.iter().position(|window| &window.id == id)
    }

    fn window_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|window| &window.id == id)
    }

    fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.windows
            .iter()
            .enumerate()
            .filter(|(_, window)| window.is_visible())
            .map(|(index, _)| index)
    }

    // Wall-clock milliseconds, bumped so two windows created within the same
    // millisecond still get distinct ids.
    fn next_stamp(&mut self) -> i64 {
        let now = i64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000)
            .unwrap_or(i64::MAX);
        let stamp = now.max(self.last_stamp_ms.saturating_add(1));
        self.last_stamp_ms = stamp;
        stamp
    }
}
