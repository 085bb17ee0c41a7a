//! Element box geometry.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Smallest width/height an element may have after a resize or update.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Absolute position and size of an element on its page's canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the size differs from `other`, ignoring the origin.
    pub fn size_differs(&self, other: &Bounds) -> bool {
        self.width != other.width || self.height != other.height
    }

    /// Clamp width and height to at least `min_size`.
    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.width = self.width.max(min_size);
        self.height = self.height.max(min_size);
        self
    }

    pub fn contains(&self, point: Point) -> bool {
        self.to_rect().contains(point)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        bounds.to_rect()
    }
}

/// Partial replacement for [`Bounds`]; absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl BoundsPatch {
    /// A patch that moves the origin only.
    pub fn origin(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch that changes the size only.
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// Shallow-merge this patch onto `bounds`.
    pub fn apply(&self, bounds: Bounds) -> Bounds {
        Bounds {
            x: self.x.unwrap_or(bounds.x),
            y: self.y.unwrap_or(bounds.y),
            width: self.width.unwrap_or(bounds.width),
            height: self.height.unwrap_or(bounds.height),
        }
    }
}

impl From<Bounds> for BoundsPatch {
    fn from(bounds: Bounds) -> Self {
        Self {
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: Some(bounds.width),
            height: Some(bounds.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let b = Bounds::new(100.0, 50.0, 200.0, 80.0);
        assert_eq!(b.right(), 300.0);
        assert_eq!(b.bottom(), 130.0);
        assert_eq!(b.center(), Point::new(200.0, 90.0));
    }

    #[test]
    fn test_rect_conversion_normalizes() {
        let b = Bounds::from(Rect::new(50.0, 40.0, 10.0, 20.0));
        assert_eq!(b, Bounds::new(10.0, 20.0, 40.0, 20.0));
        assert_eq!(Rect::from(b), Rect::new(10.0, 20.0, 50.0, 40.0));
    }

    #[test]
    fn test_patch_keeps_missing_fields() {
        let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
        let moved = BoundsPatch::origin(5.0, 6.0).apply(b);
        assert_eq!(moved, Bounds::new(5.0, 6.0, 30.0, 40.0));
        assert!(!moved.size_differs(&b));

        let resized = BoundsPatch::size(50.0, 40.0).apply(b);
        assert!(resized.size_differs(&b));
    }

    #[test]
    fn test_min_size_floor() {
        let b = Bounds::new(0.0, 0.0, 3.0, 200.0).with_min_size(MIN_ELEMENT_SIZE);
        assert_eq!(b.width, MIN_ELEMENT_SIZE);
        assert_eq!(b.height, 200.0);
    }
}
