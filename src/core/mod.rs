//! Value types shared by the window store and layout passes.

pub mod app_kind;
pub mod geometry;

pub use app_kind::{AppKind, UnknownAppKind};
pub use geometry::{Position, Rect, ScreenGeometry, Size};
