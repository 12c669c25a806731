//! Tool system: maps the active tool onto gestures and transient elements.

use crate::elements::{Element, ElementKind, ElementStyle, SerializableColor, Text};
use crate::error::SketchError;
use crate::input::InputPoint;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Rectangle,
    Ellipse,
    Arrow,
    Text,
    Eraser,
    Select,
}

impl ToolKind {
    /// Every tool, in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Pen,
            ToolKind::Rectangle,
            ToolKind::Ellipse,
            ToolKind::Arrow,
            ToolKind::Text,
            ToolKind::Eraser,
            ToolKind::Select,
        ]
    }

    /// Element variant produced by this tool. Eraser and select produce none.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            ToolKind::Pen => Some(ElementKind::Stroke),
            ToolKind::Rectangle => Some(ElementKind::Rectangle),
            ToolKind::Ellipse => Some(ElementKind::Ellipse),
            ToolKind::Arrow => Some(ElementKind::Arrow),
            ToolKind::Text => Some(ElementKind::Text),
            ToolKind::Eraser | ToolKind::Select => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Arrow => "arrow",
            ToolKind::Text => "text",
            ToolKind::Eraser => "eraser",
            ToolKind::Select => "select",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ToolKind::all()
            .iter()
            .copied()
            .find(|tool| tool.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SketchError::UnknownTool(s.to_string()))
    }
}

/// Stroke width presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StrokeWidth {
    Thin,
    #[default]
    Medium,
    Thick,
}

impl StrokeWidth {
    pub fn all() -> &'static [StrokeWidth] {
        &[StrokeWidth::Thin, StrokeWidth::Medium, StrokeWidth::Thick]
    }

    /// Width in pixels.
    pub fn value(&self) -> f64 {
        match self {
            StrokeWidth::Thin => 1.0,
            StrokeWidth::Medium => 3.0,
            StrokeWidth::Thick => 5.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrokeWidth::Thin => "Thin",
            StrokeWidth::Medium => "Medium",
            StrokeWidth::Thick => "Thick",
        }
    }
}

impl TryFrom<f64> for StrokeWidth {
    type Error = SketchError;

    /// Only the preset widths are accepted.
    fn try_from(width: f64) -> Result<Self, Self::Error> {
        StrokeWidth::all()
            .iter()
            .copied()
            .find(|preset| preset.value() == width)
            .ok_or_else(|| SketchError::InvalidConfig(format!("unsupported stroke width: {width}")))
    }
}

impl FromStr for StrokeWidth {
    type Err = SketchError;

    /// Accepts a preset name (`"thin"`) or its pixel width (`"1"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(preset) = StrokeWidth::all()
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
        {
            return Ok(preset);
        }
        name.parse::<f64>()
            .map_err(|_| SketchError::InvalidConfig(format!("unsupported stroke width: {s}")))
            .and_then(StrokeWidth::try_from)
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Waiting for a gesture.
    #[default]
    Idle,
    /// A drag gesture is building a transient element.
    Drawing {
        element: Element,
    },
    /// The text tool was clicked; waiting for the host to submit the text.
    PlacingText {
        position: Point,
    },
}

/// What the caller should do with the start of a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAction {
    /// A transient element was started.
    Drawing,
    /// The host should show a text input at this position.
    PlaceText(Point),
    /// Erase elements around this point.
    Erase(Point),
    /// Select the element under this point.
    Select(Point),
}

/// Manages the current tool, the live drawing options and the gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    current_tool: ToolKind,
    /// Options applied to new elements.
    style: ElementStyle,
    state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Set the current tool. Any gesture in progress is discarded.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.is_active() {
            log::debug!("Switching to {tool} cancelled the active gesture");
        }
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// The live drawing options.
    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn set_stroke_width(&mut self, width: StrokeWidth) {
        self.style.stroke_width = width.value();
    }

    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.style.stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: SerializableColor) {
        self.style.fill_color = color;
    }

    /// Style snapshot for an element created now.
    fn snapshot(&self) -> ElementStyle {
        ElementStyle {
            tool: self.current_tool,
            ..self.style.clone()
        }
    }

    /// Begin a gesture at `point`.
    pub fn begin(&mut self, point: Point) -> ToolAction {
        match self.current_tool {
            ToolKind::Eraser => {
                self.state = ToolState::Idle;
                ToolAction::Erase(point)
            }
            ToolKind::Select => {
                self.state = ToolState::Idle;
                ToolAction::Select(point)
            }
            ToolKind::Text => {
                self.state = ToolState::PlacingText { position: point };
                ToolAction::PlaceText(point)
            }
            tool => {
                let kind = tool.element_kind().unwrap_or(ElementKind::Stroke);
                self.state = ToolState::Drawing {
                    element: Element::begin(kind, point, self.snapshot()),
                };
                ToolAction::Drawing
            }
        }
    }

    /// Continue the gesture. Returns false when no element is being drawn.
    pub fn update(&mut self, point: InputPoint) -> bool {
        match &mut self.state {
            ToolState::Drawing { element } => {
                element.extend(point);
                true
            }
            _ => false,
        }
    }

    /// Finish the gesture, handing back the element to commit.
    pub fn end(&mut self) -> Option<Element> {
        match std::mem::take(&mut self.state) {
            ToolState::Drawing { element } => Some(element),
            other => {
                // Pending text survives pointer-up.
                self.state = other;
                None
            }
        }
    }

    /// Drop any gesture in progress and any pending text placement.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a drag gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    /// The transient element, if a gesture is in progress.
    pub fn current_element(&self) -> Option<&Element> {
        match &self.state {
            ToolState::Drawing { element } => Some(element),
            _ => None,
        }
    }

    /// Where the host should show the text input, if the text tool was clicked.
    pub fn pending_text(&self) -> Option<Point> {
        match self.state {
            ToolState::PlacingText { position } => Some(position),
            _ => None,
        }
    }

    /// Turn the pending text placement into a text element.
    ///
    /// Returns `None` (and keeps the pending position) for empty text, and
    /// `None` when nothing is pending.
    pub fn finish_text(&mut self, content: &str) -> Option<Element> {
        let position = self.pending_text()?;
        if content.is_empty() {
            return None;
        }
        self.state = ToolState::Idle;
        Some(Element::Text(Text::new(
            position,
            content.to_string(),
            self.snapshot(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(x: f64, y: f64) -> InputPoint {
        InputPoint::new(Point::new(x, y), Some(0.5), 0)
    }

    #[test]
    fn test_tool_mapping() {
        assert_eq!(ToolKind::Pen.element_kind(), Some(ElementKind::Stroke));
        assert_eq!(ToolKind::Rectangle.element_kind(), Some(ElementKind::Rectangle));
        assert_eq!(ToolKind::Ellipse.element_kind(), Some(ElementKind::Ellipse));
        assert_eq!(ToolKind::Arrow.element_kind(), Some(ElementKind::Arrow));
        assert_eq!(ToolKind::Text.element_kind(), Some(ElementKind::Text));
        assert_eq!(ToolKind::Eraser.element_kind(), None);
        assert_eq!(ToolKind::Select.element_kind(), None);
    }

    #[test]
    fn test_tool_from_str() {
        assert_eq!("pen".parse::<ToolKind>().unwrap(), ToolKind::Pen);
        assert_eq!("Eraser".parse::<ToolKind>().unwrap(), ToolKind::Eraser);
        assert_eq!(
            "laser".parse::<ToolKind>(),
            Err(SketchError::UnknownTool("laser".to_string()))
        );
    }

    #[test]
    fn test_stroke_width_presets() {
        assert_eq!(StrokeWidth::Thin.value(), 1.0);
        assert_eq!(StrokeWidth::Medium.value(), 3.0);
        assert_eq!(StrokeWidth::Thick.value(), 5.0);
        assert_eq!(StrokeWidth::default().value(), ElementStyle::default().stroke_width);
    }

    #[test]
    fn test_stroke_width_from_value() {
        assert_eq!(StrokeWidth::try_from(1.0), Ok(StrokeWidth::Thin));
        assert_eq!(StrokeWidth::try_from(5.0), Ok(StrokeWidth::Thick));
        for width in [-3.0, 0.0, 2.0, 4.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                StrokeWidth::try_from(width),
                Err(SketchError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_stroke_width_from_str() {
        assert_eq!("thin".parse::<StrokeWidth>(), Ok(StrokeWidth::Thin));
        assert_eq!("Medium".parse::<StrokeWidth>(), Ok(StrokeWidth::Medium));
        assert_eq!("5".parse::<StrokeWidth>(), Ok(StrokeWidth::Thick));
        assert!("-3".parse::<StrokeWidth>().is_err());
        assert!("huge".parse::<StrokeWidth>().is_err());
    }

    #[test]
    fn test_rectangle_gesture() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Rectangle);

        assert_eq!(tools.begin(Point::new(10.0, 10.0)), ToolAction::Drawing);
        assert!(tools.is_active());
        assert!(tools.update(input(50.0, 40.0)));

        let element = tools.end().unwrap();
        assert_eq!(element.kind(), ElementKind::Rectangle);
        assert_eq!(element.corners(), (Point::new(10.0, 10.0), Point::new(50.0, 40.0)));
        assert_eq!(element.style().tool, ToolKind::Rectangle);
        assert!(!tools.is_active());
    }

    #[test]
    fn test_pen_gesture_collects_points() {
        let mut tools = ToolManager::new();
        tools.begin(Point::ZERO);
        tools.update(input(1.0, 1.0));
        tools.update(input(2.0, 3.0));

        let element = tools.end().unwrap();
        assert_eq!(element.as_stroke().unwrap().len(), 2);
    }

    #[test]
    fn test_update_and_end_without_gesture() {
        let mut tools = ToolManager::new();
        assert!(!tools.update(input(1.0, 1.0)));
        assert!(tools.end().is_none());
    }

    #[test]
    fn test_eraser_and_select_do_not_draw() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Eraser);
        assert_eq!(tools.begin(Point::new(1.0, 2.0)), ToolAction::Erase(Point::new(1.0, 2.0)));
        assert!(tools.current_element().is_none());

        tools.set_tool(ToolKind::Select);
        assert_eq!(tools.begin(Point::new(3.0, 4.0)), ToolAction::Select(Point::new(3.0, 4.0)));
        assert!(tools.current_element().is_none());
    }

    #[test]
    fn test_switching_tool_cancels_gesture() {
        let mut tools = ToolManager::new();
        tools.begin(Point::ZERO);
        assert!(tools.is_active());
        tools.set_tool(ToolKind::Ellipse);
        assert!(!tools.is_active());
        assert!(tools.end().is_none());
    }

    #[test]
    fn test_text_placement() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Text);
        let at = Point::new(20.0, 30.0);
        assert_eq!(tools.begin(at), ToolAction::PlaceText(at));

        // Pointer-up keeps the text box open.
        assert!(tools.end().is_none());
        assert_eq!(tools.pending_text(), Some(at));

        assert!(tools.finish_text("").is_none());
        assert_eq!(tools.pending_text(), Some(at));

        let element = tools.finish_text("hello").unwrap();
        let text = element.as_text().unwrap();
        assert_eq!(text.content, "hello");
        assert_eq!(element.corners(), (at, at));
        assert!(tools.pending_text().is_none());
    }

    #[test]
    fn test_finish_text_without_placement() {
        let mut tools = ToolManager::new();
        assert!(tools.finish_text("hello").is_none());
    }

    #[test]
    fn test_options_apply_to_new_elements_only() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Ellipse);
        tools.begin(Point::ZERO);
        let first = tools.end().unwrap();

        tools.set_stroke_width(StrokeWidth::Thick);
        tools.set_stroke_color(SerializableColor::new(255, 0, 0, 255));
        tools.begin(Point::ZERO);
        let second = tools.end().unwrap();

        assert_eq!(first.style().stroke_width, 3.0);
        assert_eq!(second.style().stroke_width, 5.0);
        assert_eq!(second.style().stroke_color, SerializableColor::new(255, 0, 0, 255));
    }
}
