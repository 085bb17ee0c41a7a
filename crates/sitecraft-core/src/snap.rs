//! Alignment guides and snapping for moving and resizing elements.

use crate::element::Bounds;
use crate::interaction::ResizeDirection;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: f64 = 20.0;

/// Distance (canvas pixels) within which an edge or center snaps to a guide.
pub const SNAP_TOLERANCE: f64 = 5.0;

/// Snap mode for aligning elements to sibling guides or the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// No snapping.
    None,
    /// Snap to sibling edges and centers.
    #[default]
    Guides,
    /// Snap to grid intersections.
    Grid,
    /// Guides first, grid on any axis without a guide match.
    All,
}

impl SnapMode {
    /// Cycle to the next snap mode.
    pub fn next(self) -> Self {
        match self {
            SnapMode::None => SnapMode::Guides,
            SnapMode::Guides => SnapMode::Grid,
            SnapMode::Grid => SnapMode::All,
            SnapMode::All => SnapMode::None,
        }
    }

    pub fn snaps_to_guides(self) -> bool {
        matches!(self, SnapMode::Guides | SnapMode::All)
    }

    pub fn snaps_to_grid(self) -> bool {
        matches!(self, SnapMode::Grid | SnapMode::All)
    }

    pub fn is_enabled(self) -> bool {
        self != SnapMode::None
    }
}

/// Guide coordinates gathered from the siblings of the element being moved.
///
/// `vertical` holds x positions (vertical lines), `horizontal` holds y
/// positions. Order follows the siblings: start edge, end edge, center.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentGuides {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

impl AlignmentGuides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect guides from sibling boxes.
    pub fn from_siblings<'a>(siblings: impl IntoIterator<Item = &'a Bounds>) -> Self {
        let mut guides = Self::new();
        for bounds in siblings {
            guides.vertical.push(bounds.x);
            guides.vertical.push(bounds.right());
            guides.vertical.push(bounds.x + bounds.width / 2.0);

            guides.horizontal.push(bounds.y);
            guides.horizontal.push(bounds.bottom());
            guides.horizontal.push(bounds.y + bounds.height / 2.0);
        }
        guides
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertical.clear();
        self.horizontal.clear();
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped top-left.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }

    /// Clamp the point into the non-negative quadrant.
    fn floored(mut self) -> Self {
        self.point = Point::new(self.point.x.max(0.0), self.point.y.max(0.0));
        self
    }
}

/// Snap one axis. `start` is the leading edge, `extent` the box size on
/// that axis. Start edge, end edge and center are tried against every
/// guide; the closest match wins and ties keep the first one found.
fn snap_axis(start: f64, extent: f64, guides: &[f64], tolerance: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &guide in guides {
        for offset in [0.0, extent, extent / 2.0] {
            let distance = (start + offset - guide).abs();
            if distance < tolerance && best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, guide - offset));
            }
        }
    }
    best.map(|(_, snapped)| snapped)
}

/// Snap a box's top-left to the guides without flooring.
pub fn snap_to_guides(candidate: Point, size: Size, guides: &AlignmentGuides, tolerance: f64) -> SnapResult {
    let x = snap_axis(candidate.x, size.width, &guides.vertical, tolerance);
    let y = snap_axis(candidate.y, size.height, &guides.horizontal, tolerance);
    SnapResult {
        point: Point::new(x.unwrap_or(candidate.x), y.unwrap_or(candidate.y)),
        snapped_x: x.is_some(),
        snapped_y: y.is_some(),
    }
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    if grid_size <= 0.0 {
        return SnapResult::none(point);
    }
    let snapped_x = (point.x / grid_size).round() * grid_size;
    let snapped_y = (point.y / grid_size).round() * grid_size;

    SnapResult {
        point: Point::new(snapped_x, snapped_y),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Snap a dragged box's top-left to the guides, then floor it at 0.
pub fn snap_position(candidate: Point, size: Size, guides: &AlignmentGuides, tolerance: f64) -> SnapResult {
    snap_to_guides(candidate, size, guides, tolerance).floored()
}

/// Snap a dragged box according to `mode`. The result is floored at 0.
pub fn snap_position_with_mode(
    candidate: Point,
    size: Size,
    guides: &AlignmentGuides,
    mode: SnapMode,
    tolerance: f64,
    grid_size: f64,
) -> SnapResult {
    let result = match mode {
        SnapMode::None => SnapResult::none(candidate),
        SnapMode::Guides => snap_to_guides(candidate, size, guides, tolerance),
        SnapMode::Grid => snap_to_grid(candidate, grid_size),
        SnapMode::All => {
            let guided = snap_to_guides(candidate, size, guides, tolerance);
            let grid = snap_to_grid(candidate, grid_size);
            SnapResult {
                point: Point::new(
                    if guided.snapped_x { guided.point.x } else { grid.point.x },
                    if guided.snapped_y { guided.point.y } else { grid.point.y },
                ),
                snapped_x: guided.snapped_x || grid.snapped_x,
                snapped_y: guided.snapped_y || grid.snapped_y,
            }
        }
    };
    result.floored()
}

/// Resize `bounds` by dragging the edges named by `direction` to `pointer`
/// (canvas coordinates).
///
/// East/south edges move with the pointer while the top-left stays put.
/// West/north edges move the origin and keep the opposite edge fixed, even
/// once the size is clamped to `min_size`.
pub fn resize_bounds(bounds: Bounds, direction: ResizeDirection, pointer: Point, min_size: f64) -> Bounds {
    let mut resized = bounds;

    if direction.has_east() {
        resized.width = (pointer.x - bounds.x).max(min_size);
    }
    if direction.has_west() {
        let right = bounds.right();
        resized.width = (right - pointer.x).max(min_size);
        resized.x = right - resized.width;
    }
    if direction.has_south() {
        resized.height = (pointer.y - bounds.y).max(min_size);
    }
    if direction.has_north() {
        let bottom = bounds.bottom();
        resized.height = (bottom - pointer.y).max(min_size);
        resized.y = bottom - resized.height;
    }

    resized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::MIN_ELEMENT_SIZE;

    fn sibling_guides() -> AlignmentGuides {
        AlignmentGuides::from_siblings(&[Bounds::new(100.0, 40.0, 200.0, 60.0)])
    }

    #[test]
    fn test_snap_mode_cycle() {
        assert_eq!(SnapMode::default(), SnapMode::Guides);
        assert_eq!(SnapMode::None.next(), SnapMode::Guides);
        assert_eq!(SnapMode::All.next(), SnapMode::None);
        assert!(SnapMode::All.snaps_to_guides() && SnapMode::All.snaps_to_grid());
        assert!(!SnapMode::None.is_enabled());
    }

    #[test]
    fn test_guides_from_siblings() {
        let guides = sibling_guides();
        assert_eq!(guides.vertical, vec![100.0, 300.0, 200.0]);
        assert_eq!(guides.horizontal, vec![40.0, 100.0, 70.0]);
    }

    #[test]
    fn test_left_edge_snap() {
        let result = snap_position(Point::new(103.0, 500.0), Size::new(50.0, 20.0), &sibling_guides(), SNAP_TOLERANCE);
        assert_eq!(result.point.x, 100.0);
        assert!(result.snapped_x);
        assert!(!result.snapped_y);
    }

    #[test]
    fn test_right_edge_snap() {
        let result = snap_position(Point::new(248.0, 500.0), Size::new(50.0, 20.0), &sibling_guides(), SNAP_TOLERANCE);
        assert_eq!(result.point.x, 250.0);
    }

    #[test]
    fn test_center_snap() {
        // Center at 202 -> aligns with guide 200
        let result = snap_position(Point::new(177.0, 500.0), Size::new(50.0, 20.0), &sibling_guides(), SNAP_TOLERANCE);
        assert_eq!(result.point.x, 175.0);
    }

    #[test]
    fn test_closest_guide_wins() {
        // Left edge 4 away from 100, right edge 1 away from 200 (width 99)
        let guides = AlignmentGuides {
            vertical: vec![100.0, 200.0],
            horizontal: vec![],
        };
        let result = snap_to_guides(Point::new(104.0, 0.0), Size::new(97.0, 10.0), &guides, SNAP_TOLERANCE);
        assert_eq!(result.point.x, 103.0);
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        let result = snap_position(Point::new(105.0, 500.0), Size::new(50.0, 20.0), &sibling_guides(), SNAP_TOLERANCE);
        assert_eq!(result.point.x, 105.0);
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_position_floored_at_zero() {
        let result = snap_position(Point::new(-30.0, -1.0), Size::new(50.0, 20.0), &AlignmentGuides::new(), SNAP_TOLERANCE);
        assert_eq!(result.point, Point::ZERO);
    }

    #[test]
    fn test_grid_snap() {
        let result = snap_to_grid(Point::new(23.0, 38.0), GRID_SIZE);
        assert_eq!(result.point, Point::new(20.0, 40.0));
        let result = snap_to_grid(Point::new(23.0, 38.0), 0.0);
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_mode_all_prefers_guides() {
        let result = snap_position_with_mode(
            Point::new(103.0, 507.0),
            Size::new(50.0, 20.0),
            &sibling_guides(),
            SnapMode::All,
            SNAP_TOLERANCE,
            GRID_SIZE,
        );
        assert_eq!(result.point, Point::new(100.0, 500.0));
    }

    #[test]
    fn test_mode_none_only_floors() {
        let result = snap_position_with_mode(
            Point::new(103.0, -7.0),
            Size::new(50.0, 20.0),
            &sibling_guides(),
            SnapMode::None,
            SNAP_TOLERANCE,
            GRID_SIZE,
        );
        assert_eq!(result.point, Point::new(103.0, 0.0));
    }

    #[test]
    fn test_resize_east_south() {
        let b = Bounds::new(10.0, 10.0, 100.0, 100.0);
        let r = resize_bounds(b, ResizeDirection::SouthEast, Point::new(150.0, 60.0), MIN_ELEMENT_SIZE);
        assert_eq!(r, Bounds::new(10.0, 10.0, 140.0, 50.0));
    }

    #[test]
    fn test_resize_west_north_keeps_opposite_edge() {
        let b = Bounds::new(100.0, 100.0, 100.0, 100.0);
        let r = resize_bounds(b, ResizeDirection::NorthWest, Point::new(80.0, 150.0), MIN_ELEMENT_SIZE);
        assert_eq!(r, Bounds::new(80.0, 150.0, 120.0, 50.0));
        assert_eq!(r.right(), b.right());
        assert_eq!(r.bottom(), b.bottom());
    }

    #[test]
    fn test_resize_floor_past_opposite_edge() {
        let b = Bounds::new(100.0, 100.0, 100.0, 100.0);
        for direction in ResizeDirection::ALL {
            let r = resize_bounds(b, direction, Point::new(-500.0, 900.0), MIN_ELEMENT_SIZE);
            assert!(r.width >= MIN_ELEMENT_SIZE && r.height >= MIN_ELEMENT_SIZE);
            let r = resize_bounds(b, direction, Point::new(900.0, -500.0), MIN_ELEMENT_SIZE);
            assert!(r.width >= MIN_ELEMENT_SIZE && r.height >= MIN_ELEMENT_SIZE);
        }

        let r = resize_bounds(b, ResizeDirection::West, Point::new(400.0, 0.0), MIN_ELEMENT_SIZE);
        assert_eq!(r, Bounds::new(180.0, 100.0, MIN_ELEMENT_SIZE, 100.0));
    }
}
