//! Window manager core for a simulated browser desktop.
//!
//! Invariant: all window-store mutation goes through [`WindowManager`]; there is no
//! global store and no ad-hoc list splicing.
//!
//! # Public API Overview
//! - Open, close, minimize, maximize and focus windows via [`WindowManager`].
//! - Lay out visible windows with [`WindowManager::tile`] and [`WindowManager::cascade`].
//! - Read paint order and taskbar rows with [`WindowManager::stacking_order`] and
//!   [`WindowManager::taskbar_entries`].
//! - Load viewport geometry from the environment with [`config::ScreenConfig`].

pub mod config;

pub mod core;
pub mod runtime;

/// Geometry and application kinds.
pub use crate::core::{AppKind, Position, Rect, ScreenGeometry, Size, UnknownAppKind};

/// Window store, focus and layout.
pub use crate::runtime::{
    grid_dimensions, tile_rects, TaskbarEntry, TileMode, UnknownTileMode, WindowId,
    WindowManager, WindowRecord, BASE_Z_INDEX,
};

/// Environment configuration.
pub use crate::config::{ConfigError, ScreenConfig};
