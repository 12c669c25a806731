//! Arrow element.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uuid::Uuid;

/// Upper bound on the arrowhead barb length.
pub const MAX_ARROW_HEAD_LENGTH: f64 = 20.0;

/// Angle between the shaft and each barb.
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// A straight arrow from the anchor (`start`) to the tip (`end`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ElementId,
    /// Anchor point (tail).
    pub start: Point,
    /// Tip (where the arrowhead points).
    pub end: Point,
    pub style: ElementStyle,
    #[serde(default)]
    pub deleted: bool,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(start: Point, end: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
            deleted: false,
        }
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Direction of the shaft in radians.
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    /// Barb length: a third of the shaft, capped at [`MAX_ARROW_HEAD_LENGTH`].
    pub fn head_length(&self) -> f64 {
        MAX_ARROW_HEAD_LENGTH.min(self.length() / 3.0)
    }

    /// End points of the two barbs.
    pub fn head_points(&self) -> (Point, Point) {
        let angle = self.angle();
        let head = self.head_length();
        let barb = |a: f64| Point::new(self.end.x - head * a.cos(), self.end.y - head * a.sin());
        (barb(angle - ARROW_HEAD_ANGLE), barb(angle + ARROW_HEAD_ANGLE))
    }

    /// Shaft and barbs as one open path for stroking.
    pub fn to_path(&self) -> BezPath {
        let (left, right) = self.head_points();
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path.line_to(left);
        path.move_to(self.end);
        path.line_to(right);
        path
    }
}

impl ElementTrait for Arrow {
    fn id(&self) -> ElementId {
        self.id
    }

    fn corners(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Only the anchor is hit-testable.
    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        self.start.distance(point) <= threshold
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
