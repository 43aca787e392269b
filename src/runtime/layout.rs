//! Layout passes over the visible windows.
//!
//! These functions are pure: they map a window count and the work area to
//! target rectangles, and the manager applies them to records in store order.

use std::fmt;
use std::str::FromStr;

use crate::core::{Position, Rect, Size};

/// Origin of the first cascaded or newly opened window.
pub const CASCADE_ORIGIN: f64 = 50.0;
/// Diagonal step between consecutive cascaded windows.
pub const CASCADE_STEP: f64 = 30.0;
/// Size given to newly opened windows.
pub const DEFAULT_WINDOW_SIZE: Size = Size::new(800.0, 500.0);

/// Fixed tiling algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileMode {
    /// Side by side, each at full height.
    Horizontal,
    /// Stacked top to bottom, each at full width.
    Vertical,
    /// `ceil(sqrt(n))` columns filled row by row.
    Grid,
}

impl TileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Grid => "grid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "horizontal" => Self::Horizontal,
            "vertical" => Self::Vertical,
            "grid" => Self::Grid,
            _ => return None,
        })
    }
}

impl fmt::Display for TileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile mode '{0}' (expected horizontal, vertical or grid)")]
pub struct UnknownTileMode(pub String);

impl FromStr for TileMode {
    type Err = UnknownTileMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value.trim()).ok_or_else(|| UnknownTileMode(value.to_string()))
    }
}

/// Column and row counts of the grid used for `count` windows.
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let columns = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(columns);
    (columns, rows)
}

/// Target rectangle for each of `count` visible windows, in visible order.
pub fn tile_rects(mode: TileMode, count: usize, area: Size) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    match mode {
        TileMode::Horizontal => {
            let width = area.width / count as f64;
            (0..count)
                .map(|index| Rect::new(index as f64 * width, 0.0, width, area.height))
                .collect()
        }
        TileMode::Vertical => {
            let height = area.height / count as f64;
            (0..count)
                .map(|index| Rect::new(0.0, index as f64 * height, area.width, height))
                .collect()
        }
        TileMode::Grid => {
            let (columns, rows) = grid_dimensions(count);
            let width = area.width / columns as f64;
            let height = area.height / rows as f64;
            (0..count)
                .map(|index| {
                    let column = index % columns;
                    let row = index / columns;
                    Rect::new(column as f64 * width, row as f64 * height, width, height)
                })
                .collect()
        }
    }
}

/// Position of the `index`-th window in a diagonal cascade.
pub fn cascade_position(index: usize) -> Position {
    let offset = CASCADE_ORIGIN + CASCADE_STEP * index as f64;
    Position::new(offset, offset)
}

#[cfg(test)]
mod tests {
    use super::{cascade_position, grid_dimensions, tile_rects, TileMode};
    use crate::core::{Position, Rect, Size};

    #[test]
    fn grid_dimensions_follow_square_root() {
        assert_eq!(grid_dimensions(1), (1, 1));
        assert_eq!(grid_dimensions(2), (2, 1));
        assert_eq!(grid_dimensions(3), (2, 2));
        assert_eq!(grid_dimensions(5), (3, 2));
        assert_eq!(grid_dimensions(9), (3, 3));
        assert_eq!(grid_dimensions(10), (4, 3));
    }

    #[test]
    fn horizontal_splits_width() {
        let rects = tile_rects(TileMode::Horizontal, 2, Size::new(1000.0, 600.0));
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 0.0, 500.0, 600.0),
                Rect::new(500.0, 0.0, 500.0, 600.0),
            ]
        );
    }

    #[test]
    fn vertical_splits_height() {
        let rects = tile_rects(TileMode::Vertical, 3, Size::new(900.0, 600.0));
        assert_eq!(rects[2], Rect::new(0.0, 400.0, 900.0, 200.0));
    }

    #[test]
    fn grid_places_cells_row_major() {
        let rects = tile_rects(TileMode::Grid, 3, Size::new(800.0, 600.0));
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 0.0, 400.0, 300.0),
                Rect::new(400.0, 0.0, 400.0, 300.0),
                Rect::new(0.0, 300.0, 400.0, 300.0),
            ]
        );
    }

    #[test]
    fn no_windows_no_rects() {
        assert!(tile_rects(TileMode::Grid, 0, Size::new(800.0, 600.0)).is_empty());
    }

    #[test]
    fn cascade_steps_diagonally() {
        assert_eq!(cascade_position(0), Position::new(50.0, 50.0));
        assert_eq!(cascade_position(2), Position::new(110.0, 110.0));
    }

    #[test]
    fn tile_mode_parses_wire_names() {
        assert_eq!("grid".parse::<TileMode>(), Ok(TileMode::Grid));
        assert!("diagonal".parse::<TileMode>().is_err());
    }
}
