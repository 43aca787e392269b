//! Window store, focus bookkeeping and layout passes.

pub mod focus;
pub mod layout;
pub mod manager;
pub mod window;

pub use focus::{FocusState, ZOrder, BASE_Z_INDEX};
pub use layout::{grid_dimensions, tile_rects, TileMode, UnknownTileMode};
pub use manager::WindowManager;
pub use window::{TaskbarEntry, WindowId, WindowRecord};
