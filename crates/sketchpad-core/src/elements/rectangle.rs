//! Rectangle element.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle spanned by two corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    /// Corner where the gesture started.
    pub start: Point,
    /// Opposite corner (latest drag point).
    pub end: Point,
    pub style: ElementStyle,
    #[serde(default)]
    pub deleted: bool,
}

impl Rectangle {
    /// Create a rectangle from two corners.
    pub fn new(start: Point, end: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
            deleted: false,
        }
    }

    /// Outline path for stroking.
    pub fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn corners(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    fn bounds(&self) -> Rect {
        // from_points normalizes, so dragging up/left still yields x0 <= x1
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        let b = self.bounds();
        point.x >= b.x0 - threshold
            && point.x <= b.x1 + threshold
            && point.y >= b.y0 - threshold
            && point.y <= b.y1 + threshold
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rectangle {
        Rectangle::new(Point::new(x1, y1), Point::new(x2, y2), ElementStyle::default())
    }

    #[test]
    fn test_bounds_are_normalized() {
        let r = rect(100.0, 80.0, 20.0, 10.0);
        assert_eq!(r.bounds(), Rect::new(20.0, 10.0, 100.0, 80.0));
    }

    #[test]
    fn test_hit_test_inside() {
        let r = rect(0.0, 0.0, 100.0, 100.0);
        assert!(r.hit_test(Point::new(50.0, 50.0), 0.0));
    }

    #[test]
    fn test_hit_test_expanded_by_threshold() {
        let r = rect(0.0, 0.0, 100.0, 100.0);
        assert!(r.hit_test(Point::new(-5.0, 50.0), 5.0));
        assert!(r.hit_test(Point::new(105.0, 105.0), 5.0));
        assert!(!r.hit_test(Point::new(106.0, 50.0), 5.0));
    }

    #[test]
    fn test_hit_test_reversed_corners() {
        let r = rect(100.0, 100.0, 0.0, 0.0);
        assert!(r.hit_test(Point::new(10.0, 90.0), 0.0));
    }

    #[test]
    fn test_path_matches_bounds() {
        let r = rect(10.0, 20.0, 30.0, 60.0);
        let bbox = r.to_path().bounding_box();
        assert_eq!(bbox, Rect::new(10.0, 20.0, 30.0, 60.0));
    }
}
