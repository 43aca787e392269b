//! Window records held by the manager's store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{AppKind, Position, Rect, Size};

/// Opaque window identifier: app kind plus creation stamp in milliseconds.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub(crate) fn compose(app_kind: AppKind, stamp_ms: i64) -> Self {
        Self(format!("{}-{stamp_ms}", app_kind.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Display state of one open application instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_kind: AppKind,
    pub title: String,
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u32,
    pub position: Position,
    pub size: Size,
}

impl WindowRecord {
    pub fn bounds(&self) -> Rect {
        Rect {
            position: self.position,
            size: self.size,
        }
    }

    /// Visible windows take part in tiling, cascading and painting.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}

/// Row shown in the taskbar for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub app_kind: AppKind,
    pub title: String,
    pub is_active: bool,
    pub is_minimized: bool,
}
