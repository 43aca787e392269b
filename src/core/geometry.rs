//! Screen-space geometry shared by window records and layout passes.

use serde::{Deserialize, Serialize};

/// Top-left offset of a window in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Window extent in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle produced by layout passes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }

    /// Returns true when the interiors of both rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.position.x < other.right()
            && other.position.x < self.right()
            && self.position.y < other.bottom()
            && other.position.y < self.bottom()
    }
}

/// Viewport reported by the host plus the fixed taskbar strip at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    pub width: f64,
    pub height: f64,
    pub taskbar_height: f64,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            taskbar_height: 48.0,
        }
    }
}

impl ScreenGeometry {
    pub const fn new(width: f64, height: f64, taskbar_height: f64) -> Self {
        Self {
            width,
            height,
            taskbar_height,
        }
    }

    /// Region windows may be laid out in: the viewport minus the taskbar.
    pub fn work_area(&self) -> Size {
        Size::new(self.width, (self.height - self.taskbar_height).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, ScreenGeometry, Size};

    #[test]
    fn work_area_excludes_taskbar() {
        let screen = ScreenGeometry::new(1280.0, 800.0, 48.0);
        assert_eq!(screen.work_area(), Size::new(1280.0, 752.0));
    }

    #[test]
    fn work_area_never_goes_negative() {
        let screen = ScreenGeometry::new(100.0, 20.0, 48.0);
        assert_eq!(screen.work_area().height, 0.0);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let left = Rect::new(0.0, 0.0, 100.0, 100.0);
        let right = Rect::new(100.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(50.0, 50.0, 10.0, 10.0);

        assert!(!left.overlaps(&right));
        assert!(left.overlaps(&inner));
    }
}
