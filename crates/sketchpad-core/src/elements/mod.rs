//! Drawing elements: the closed set of shapes a gesture can produce.

mod arrow;
mod ellipse;
mod rectangle;
mod stroke;
mod text;

pub use arrow::{ARROW_HEAD_ANGLE, Arrow, MAX_ARROW_HEAD_LENGTH};
pub use ellipse::Ellipse;
pub use rectangle::Rectangle;
pub use stroke::Stroke;
pub use text::{TEXT_FONT_FAMILY, TEXT_SIZE_FACTOR, Text};

use crate::error::SketchError;
use crate::input::InputPoint;
use crate::tools::ToolKind;
use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse a CSS hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub fn from_hex(color: &str) -> Result<Self, SketchError> {
        let invalid = || SketchError::InvalidColor(color.to_string());
        let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Self::new(r, g, b, 255))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Format as a CSS hex color. Alpha is omitted when fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SerializableColor {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style snapshot copied into every element at creation time.
///
/// The session keeps one of these as the live drawing options; elements
/// hold their own copy so later option changes never alter existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub stroke_width: f64,
    pub stroke_color: SerializableColor,
    pub fill_color: SerializableColor,
    /// Tool that was active when the element was created.
    pub tool: ToolKind,
}

impl ElementStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            stroke_color: SerializableColor::black(),
            fill_color: SerializableColor::white(),
            tool: ToolKind::default(),
        }
    }
}

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Variant tag of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Stroke,
    Rectangle,
    Ellipse,
    Arrow,
    Text,
}

/// Behavior shared by every element variant.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// The two defining corners: anchor first, then the latest drag point.
    fn corners(&self) -> (Point, Point);

    /// Bounding box used for the selection indicator.
    fn bounds(&self) -> Rect;

    /// Approximate hit test against a query point.
    fn hit_test(&self, point: Point, threshold: f64) -> bool;

    /// Get the style snapshot.
    fn style(&self) -> &ElementStyle;

    fn is_deleted(&self) -> bool;

    fn set_deleted(&mut self, deleted: bool);
}

/// Enum wrapper for all element variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Stroke(Stroke),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Arrow(Arrow),
    Text(Text),
}

impl Element {
    /// Instantiate a transient element for a gesture starting at `start`.
    ///
    /// Both corners sit at the start point; strokes begin with no points.
    /// Text elements start with empty content.
    pub fn begin(kind: ElementKind, start: Point, style: ElementStyle) -> Self {
        match kind {
            ElementKind::Stroke => Element::Stroke(Stroke::new(start, style)),
            ElementKind::Rectangle => Element::Rectangle(Rectangle::new(start, start, style)),
            ElementKind::Ellipse => Element::Ellipse(Ellipse::new(start, start, style)),
            ElementKind::Arrow => Element::Arrow(Arrow::new(start, start, style)),
            ElementKind::Text => Element::Text(Text::new(start, String::new(), style)),
        }
    }

    /// Continue the defining gesture: strokes collect points, every other
    /// variant moves its second corner.
    pub fn extend(&mut self, point: InputPoint) {
        match self {
            Element::Stroke(s) => s.add_point(point),
            Element::Rectangle(s) => s.end = point.position,
            Element::Ellipse(s) => s.end = point.position,
            Element::Arrow(s) => s.end = point.position,
            Element::Text(s) => s.end = point.position,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Stroke(_) => ElementKind::Stroke,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Ellipse(_) => ElementKind::Ellipse,
            Element::Arrow(_) => ElementKind::Arrow,
            Element::Text(_) => ElementKind::Text,
        }
    }

    pub fn id(&self) -> ElementId {
        match self {
            Element::Stroke(s) => s.id(),
            Element::Rectangle(s) => s.id(),
            Element::Ellipse(s) => s.id(),
            Element::Arrow(s) => s.id(),
            Element::Text(s) => s.id(),
        }
    }

    pub fn corners(&self) -> (Point, Point) {
        match self {
            Element::Stroke(s) => s.corners(),
            Element::Rectangle(s) => s.corners(),
            Element::Ellipse(s) => s.corners(),
            Element::Arrow(s) => s.corners(),
            Element::Text(s) => s.corners(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Element::Stroke(s) => s.bounds(),
            Element::Rectangle(s) => s.bounds(),
            Element::Ellipse(s) => s.bounds(),
            Element::Arrow(s) => s.bounds(),
            Element::Text(s) => s.bounds(),
        }
    }

    /// Hit test used by the eraser and select tools. Deleted elements never hit.
    pub fn hit_test(&self, point: Point, threshold: f64) -> bool {
        if self.is_deleted() {
            return false;
        }
        match self {
            Element::Stroke(s) => s.hit_test(point, threshold),
            Element::Rectangle(s) => s.hit_test(point, threshold),
            Element::Ellipse(s) => s.hit_test(point, threshold),
            Element::Arrow(s) => s.hit_test(point, threshold),
            Element::Text(s) => s.hit_test(point, threshold),
        }
    }

    pub fn style(&self) -> &ElementStyle {
        match self {
            Element::Stroke(s) => s.style(),
            Element::Rectangle(s) => s.style(),
            Element::Ellipse(s) => s.style(),
            Element::Arrow(s) => s.style(),
            Element::Text(s) => s.style(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        match self {
            Element::Stroke(s) => s.is_deleted(),
            Element::Rectangle(s) => s.is_deleted(),
            Element::Ellipse(s) => s.is_deleted(),
            Element::Arrow(s) => s.is_deleted(),
            Element::Text(s) => s.is_deleted(),
        }
    }

    pub fn set_deleted(&mut self, deleted: bool) {
        match self {
            Element::Stroke(s) => s.set_deleted(deleted),
            Element::Rectangle(s) => s.set_deleted(deleted),
            Element::Ellipse(s) => s.set_deleted(deleted),
            Element::Arrow(s) => s.set_deleted(deleted),
            Element::Text(s) => s.set_deleted(deleted),
        }
    }

    /// Get the stroke if this element is a stroke.
    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Element::Stroke(s) => Some(s),
            _ => None,
        }
    }

    /// Get the text if this element is a text element.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}
