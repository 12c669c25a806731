//! Freehand stroke element.

use super::{ElementId, ElementStyle, ElementTrait};
use crate::input::InputPoint;
use crate::outline::{OutlineOptions, stroke_outline};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pen stroke: an ordered run of captured points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    /// Gesture start point.
    pub start: Point,
    /// Second corner. Strokes never move it; it stays at the start point.
    pub end: Point,
    /// Captured points in drawing order.
    pub points: Vec<InputPoint>,
    pub style: ElementStyle,
    #[serde(default)]
    pub deleted: bool,
}

impl Stroke {
    /// Create an empty stroke anchored at `start`.
    pub fn new(start: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end: start,
            points: Vec::new(),
            style,
            deleted: false,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<InputPoint>, style: ElementStyle) -> Self {
        let start = points.first().map(|p| p.position).unwrap_or(Point::ZERO);
        Self {
            id: Uuid::new_v4(),
            start,
            end: start,
            points,
            style,
            deleted: false,
        }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: InputPoint) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the captured points, if there are any.
    pub fn point_bounds(&self) -> Option<Rect> {
        let first = self.points.first()?.position;
        Some(
            self.points
                .iter()
                .skip(1)
                .fold(Rect::from_points(first, first), |acc, p| {
                    acc.union_pt(p.position)
                }),
        )
    }

    /// Filled outline polygon produced by the pressure-sensitive outline generator.
    pub fn outline(&self) -> Vec<Point> {
        let options = OutlineOptions::for_stroke_width(self.style.stroke_width);
        stroke_outline(&self.points, &options)
    }

    /// Outline as a closed path, ready to be filled.
    pub fn to_path(&self) -> BezPath {
        let outline = self.outline();
        let mut path = BezPath::new();
        let Some((first, rest)) = outline.split_first() else {
            return path;
        };
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        path.close_path();
        path
    }
}

impl ElementTrait for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn corners(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    fn bounds(&self) -> Rect {
        self.point_bounds()
            .unwrap_or_else(|| Rect::from_points(self.start, self.end))
    }

    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        self.points
            .iter()
            .any(|p| p.position.distance(point) <= threshold)
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

    fn stroke_through(points: &[(f64, f64)]) -> Stroke {
        Stroke::from_points(
            points
                .iter()
                .map(|&(x, y)| InputPoint::new(Point::new(x, y), Some(0.5), 0))
                .collect(),
            ElementStyle::default(),
        )
    }

    #[test]
    fn test_stroke_creation() {
        let stroke = Stroke::new(Point::new(1.0, 2.0), ElementStyle::default());
        assert!(stroke.is_empty());
        assert_eq!(stroke.corners(), (Point::new(1.0, 2.0), Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_bounds_from_points() {
        let stroke = stroke_through(&[(0.0, 0.0), (100.0, 50.0), (50.0, 100.0)]);
        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_near_point() {
        let stroke = stroke_through(&[(10.0, 10.0), (11.0, 11.0), (12.0, 12.0)]);
        // Nearest point (12,12) is ~11.3 away from (20,20).
        assert!(stroke.hit_test(Point::new(20.0, 20.0), 15.0));
        assert!(!stroke.hit_test(Point::new(20.0, 20.0), 5.0));
    }

    #[test]
    fn test_hit_test_is_inclusive() {
        let stroke = stroke_through(&[(0.0, 0.0)]);
        assert!(stroke.hit_test(Point::new(3.0, 4.0), 5.0));
    }

    #[test]
    fn test_empty_stroke_never_hits() {
        let stroke = Stroke::new(Point::ZERO, ElementStyle::default());
        assert!(!stroke.hit_test(Point::ZERO, 100.0));
        assert!(stroke.to_path().elements().is_empty());
    }

    #[test]
    fn test_path_is_closed_polygon() {
        let stroke = stroke_through(&[(0.0, 0.0), (20.0, 0.0), (40.0, 0.0), (60.0, 0.0)]);
        let path = stroke.to_path();
        assert!(matches!(path.elements().first(), Some(kurbo::PathEl::MoveTo(_))));
        assert!(matches!(path.elements().last(), Some(kurbo::PathEl::ClosePath)));
    }
}
