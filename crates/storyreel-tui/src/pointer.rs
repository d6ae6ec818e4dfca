//! Mouse-to-gesture translation
//!
//! The terminal reports mouse positions in cells. Gesture thresholds are in
//! logical pixels, so positions are scaled by the configured cell size before
//! they reach the classifier.

use ratatui::layout::Rect;
use storyreel_core::config::UiConfig;
use storyreel_core::gesture::{Bounds, GestureInput, Point};

/// Movement below this distance (in pixels) between press and release is a tap
pub const TAP_SLOP_PX: f64 = 10.0;

/// Cell size used to convert terminal coordinates to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl CellGeometry {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width: cell_width.max(1.0),
            cell_height: cell_height.max(1.0),
        }
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(f64::from(config.cell_width_px), f64::from(config.cell_height_px))
    }

    /// Center of the cell at (column, row)
    pub fn point(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }

    /// Pixel bounds covered by a cell rectangle
    pub fn bounds(&self, area: Rect) -> Bounds {
        Bounds::new(
            f64::from(area.x) * self.cell_width,
            f64::from(area.y) * self.cell_height,
            f64::from(area.width) * self.cell_width,
            f64::from(area.height) * self.cell_height,
        )
    }
}

/// Tracks one press/drag/release sequence of the primary button
#[derive(Debug, Default)]
pub struct GestureTracker {
    start: Option<Point>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }

    /// Button went down; presses outside `bounds` are ignored
    pub fn press(&mut self, point: Point, bounds: Bounds) -> Vec<GestureInput> {
        if !bounds.contains(point) {
            return Vec::new();
        }
        self.start = Some(point);
        vec![GestureInput::PressStart]
    }

    /// Button released: ends the hold, then reports a tap or a swipe
    pub fn release(&mut self, point: Point) -> Vec<GestureInput> {
        let Some(start) = self.start.take() else {
            return Vec::new();
        };
        let distance = (point.x - start.x).hypot(point.y - start.y);
        let gesture = if distance < TAP_SLOP_PX {
            GestureInput::Tap(start)
        } else {
            GestureInput::Swipe { start, end: point }
        };
        vec![GestureInput::PressEnd, gesture]
    }

    /// Abandon the current press (focus lost, resize)
    pub fn cancel(&mut self) -> Vec<GestureInput> {
        match self.start.take() {
            Some(_) => vec![GestureInput::PressEnd],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> CellGeometry {
        CellGeometry::new(8.0, 16.0)
    }

    #[test]
    fn test_cell_to_pixel_conversion() {
        let g = geometry();
        assert_eq!(g.point(0, 0), Point::new(4.0, 8.0));
        assert_eq!(g.point(10, 3), Point::new(84.0, 56.0));

        let bounds = g.bounds(Rect::new(2, 1, 40, 30));
        assert_eq!(bounds, Bounds::new(16.0, 16.0, 320.0, 480.0));
    }

    #[test]
    fn test_zero_cell_size_is_clamped() {
        let g = CellGeometry::new(0.0, 0.0);
        assert_eq!(g.point(2, 2), Point::new(2.5, 2.5));
    }

    #[test]
    fn test_click_is_a_tap() {
        let g = geometry();
        let bounds = g.bounds(Rect::new(0, 0, 40, 30));
        let mut tracker = GestureTracker::new();

        assert_eq!(tracker.press(g.point(35, 10), bounds), vec![GestureInput::PressStart]);
        assert!(tracker.is_pressed());
        assert_eq!(
            tracker.release(g.point(35, 10)),
            vec![GestureInput::PressEnd, GestureInput::Tap(g.point(35, 10))]
        );
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_drag_is_a_swipe() {
        let g = geometry();
        let bounds = g.bounds(Rect::new(0, 0, 40, 30));
        let mut tracker = GestureTracker::new();

        tracker.press(g.point(12, 5), bounds);
        let inputs = tracker.release(g.point(12, 20));
        assert_eq!(
            inputs,
            vec![
                GestureInput::PressEnd,
                GestureInput::Swipe {
                    start: g.point(12, 5),
                    end: g.point(12, 20),
                },
            ]
        );
    }

    #[test]
    fn test_press_outside_bounds_ignored() {
        let g = geometry();
        let bounds = g.bounds(Rect::new(0, 3, 40, 20));
        let mut tracker = GestureTracker::new();

        assert!(tracker.press(g.point(5, 0), bounds).is_empty());
        assert!(tracker.release(g.point(5, 0)).is_empty());
    }

    #[test]
    fn test_cancel_ends_hold() {
        let g = geometry();
        let bounds = g.bounds(Rect::new(0, 0, 40, 30));
        let mut tracker = GestureTracker::new();

        assert!(tracker.cancel().is_empty());
        tracker.press(g.point(20, 10), bounds);
        assert_eq!(tracker.cancel(), vec![GestureInput::PressEnd]);
        assert!(tracker.release(g.point(20, 10)).is_empty());
    }
}
