//! Text element.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font size is the stroke width times this factor.
pub const TEXT_SIZE_FACTOR: f64 = 5.0;

/// Font family used when drawing text.
pub const TEXT_FONT_FAMILY: &str = "Arial";

/// A single line of text anchored at `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Anchor (baseline-left) position.
    pub start: Point,
    pub end: Point,
    pub content: String,
    pub style: ElementStyle,
    #[serde(default)]
    pub deleted: bool,
}

impl Text {
    /// Create a text element with both corners at the anchor.
    pub fn new(anchor: Point, content: String, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start: anchor,
            end: anchor,
            content,
            style,
            deleted: false,
        }
    }

    /// Font size in pixels, derived from the stroke width.
    pub fn font_size(&self) -> f64 {
        self.style.stroke_width * TEXT_SIZE_FACTOR
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl ElementTrait for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn corners(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_tracks_stroke_width() {
        let style = ElementStyle {
            stroke_width: 5.0,
            ..Default::default()
        };
        let text = Text::new(Point::ZERO, "hello".into(), style);
        assert_eq!(text.font_size(), 25.0);
    }

    #[test]
    fn test_hit_test_anchor() {
        let text = Text::new(Point::new(10.0, 10.0), "hi".into(), ElementStyle::default());
        assert!(text.hit_test(Point::new(13.0, 14.0), 5.0));
        assert!(!text.hit_test(Point::new(20.0, 10.0), 5.0));
    }
}
