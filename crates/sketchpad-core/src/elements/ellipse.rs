//! Ellipse element.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned ellipse inscribed in the box spanned by two corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ElementId,
    pub start: Point,
    pub end: Point,
    pub style: ElementStyle,
    #[serde(default)]
    pub deleted: bool,
}

impl Ellipse {
    /// Create an ellipse from two bounding-box corners.
    pub fn new(start: Point, end: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
            deleted: false,
        }
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Horizontal and vertical radii.
    pub fn radii(&self) -> (f64, f64) {
        (
            (self.end.x - self.start.x).abs() / 2.0,
            (self.end.y - self.start.y).abs() / 2.0,
        )
    }

    /// Outline path for stroking.
    pub fn to_path(&self) -> BezPath {
        let (rx, ry) = self.radii();
        KurboEllipse::new(self.center(), (rx, ry), 0.0).to_path(0.1)
    }
}

impl ElementTrait for Ellipse {
    fn id(&self) -> ElementId {
        self.id
    }

    fn corners(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Center-distance check, not true ellipse containment.
    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        self.center().distance(point) <= threshold
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

    #[test]
    fn test_center_and_radii() {
        let e = Ellipse::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            ElementStyle::default(),
        );
        assert_eq!(e.center(), Point::new(50.0, 25.0));
        assert_eq!(e.radii(), (50.0, 25.0));
    }

    #[test]
    fn test_hit_test_uses_center() {
        let e = Ellipse::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            ElementStyle::default(),
        );
        assert!(e.hit_test(Point::new(53.0, 54.0), 5.0));
        // On the true boundary, but far from the center.
        assert!(!e.hit_test(Point::new(100.0, 50.0), 5.0));
    }

    #[test]
    fn test_path_fits_bounds() {
        let e = Ellipse::new(
            Point::new(0.0, 0.0),
            Point::new(40.0, 20.0),
            ElementStyle::default(),
        );
        let bbox = e.to_path().bounding_box();
        assert!((bbox.x0).abs() < 0.5);
        assert!((bbox.x1 - 40.0).abs() < 0.5);
        assert!((bbox.y1 - 20.0).abs() < 0.5);
    }
}
