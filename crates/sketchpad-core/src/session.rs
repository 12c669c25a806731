//! Drawing session: the single state object a host drives with input events.

use crate::config::SessionConfig;
use crate::elements::{Element, ElementId, ElementStyle, SerializableColor};
use crate::error::SketchResult;
use crate::history::History;
use crate::input::{InputCapture, InputPoint, Modifiers, PointerInput};
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use crate::tools::{StrokeWidth, ToolAction, ToolKind, ToolManager};
use kurbo::Point;

/// Runtime drawing state: committed history, the gesture in progress,
/// the selection and the live drawing options.
///
/// Mutating operations return `true` when the host should re-render.
#[derive(Debug, Clone)]
pub struct Session {
    history: History,
    tools: ToolManager,
    capture: InputCapture,
    /// Selected element. Looked up in the visible scene on every read.
    selection: Option<ElementId>,
    config: SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(SessionConfig::default())
    }

    /// Create a session with a custom configuration.
    pub fn with_config(config: SessionConfig) -> SketchResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SessionConfig) -> Self {
        Self {
            history: History::with_limit(config.history_limit),
            tools: ToolManager::new(),
            capture: InputCapture::new(),
            selection: None,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // --- Surface ---

    /// Record the drawing surface's top-left corner in client coordinates.
    /// Call again whenever the surface moves.
    pub fn attach_surface(&mut self, origin: Point) {
        self.capture.attach(origin);
    }

    pub fn detach_surface(&mut self) {
        self.capture.detach();
    }

    pub fn is_attached(&self) -> bool {
        self.capture.is_attached()
    }

    fn capture(&self, input: PointerInput) -> SketchResult<InputPoint> {
        self.capture.capture(input).inspect_err(|e| {
            log::error!("Dropping pointer event: {e}");
        })
    }

    // --- Options ---

    pub fn tool(&self) -> ToolKind {
        self.tools.tool()
    }

    /// Live drawing options applied to new elements.
    pub fn options(&self) -> &ElementStyle {
        self.tools.style()
    }

    /// Switch tools. Returns true if a gesture in progress was discarded.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        let redraw = self.tools.is_active();
        self.tools.set_tool(tool);
        redraw
    }

    /// Switch tools by name (`"pen"`, `"eraser"`, ...).
    pub fn set_tool_by_name(&mut self, name: &str) -> SketchResult<bool> {
        let tool = name.parse()?;
        Ok(self.set_tool(tool))
    }

    pub fn set_stroke_width(&mut self, width: StrokeWidth) {
        self.tools.set_stroke_width(width);
    }

    /// Set the stroke width from a pixel value. Only the preset widths are accepted.
    pub fn set_stroke_width_value(&mut self, width: f64) -> SketchResult<()> {
        let preset = StrokeWidth::try_from(width)?;
        self.set_stroke_width(preset);
        Ok(())
    }

    /// Set the stroke color from a CSS hex string.
    pub fn set_stroke_color(&mut self, color: &str) -> SketchResult<()> {
        let color = SerializableColor::from_hex(color)?;
        self.tools.set_stroke_color(color);
        Ok(())
    }

    /// Set the fill color from a CSS hex string.
    pub fn set_fill_color(&mut self, color: &str) -> SketchResult<()> {
        let color = SerializableColor::from_hex(color)?;
        self.tools.set_fill_color(color);
        Ok(())
    }

    /// Eraser radius for the current stroke width.
    pub fn eraser_radius(&self) -> f64 {
        self.tools.style().stroke_width * self.config.eraser_radius_factor
    }

    // --- Scene ---

    /// The committed scene, including soft-deleted elements.
    pub fn elements(&self) -> &[Element] {
        self.history.present()
    }

    /// Committed elements that are drawn, in scene order.
    pub fn visible_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements().iter().filter(|e| !e.is_deleted())
    }

    /// The element being drawn, if a gesture is in progress.
    pub fn current_element(&self) -> Option<&Element> {
        self.tools.current_element()
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// The selected element, if it is still part of the visible scene.
    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selection?;
        self.visible_elements().find(|e| e.id() == id)
    }

    /// Where the host should show a text input, if the text tool was clicked.
    pub fn pending_text_position(&self) -> Option<Point> {
        self.tools.pending_text()
    }

    fn commit_element(&mut self, element: Element) {
        let mut scene = self.history.present().to_vec();
        scene.push(element);
        self.history.commit(scene);
    }

    // --- Pointer input ---

    /// Start a gesture.
    pub fn pointer_down(&mut self, input: PointerInput) -> SketchResult<bool> {
        let point = self.capture(input)?;
        let redraw = match self.tools.begin(point.position) {
            ToolAction::Drawing => true,
            ToolAction::PlaceText(position) => {
                log::debug!("Text placement at ({}, {})", position.x, position.y);
                true
            }
            ToolAction::Erase(position) => self.erase_at(position),
            ToolAction::Select(position) => self.select_at(position),
        };
        Ok(redraw)
    }

    /// Continue the gesture. Ignored when no gesture is active.
    pub fn pointer_move(&mut self, input: PointerInput) -> SketchResult<bool> {
        if !self.tools.is_active() {
            return Ok(false);
        }
        let point = self.capture(input)?;
        Ok(self.tools.update(point))
    }

    /// End the gesture, committing the transient element.
    pub fn pointer_up(&mut self) -> bool {
        match self.tools.end() {
            Some(element) => {
                log::debug!("Committing {:?} {}", element.kind(), element.id());
                self.commit_element(element);
                true
            }
            None => false,
        }
    }

    /// The pointer left the surface. Ends the gesture like pointer-up.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    // --- Eraser / select ---

    /// Soft-delete every element within the eraser radius of `point`.
    ///
    /// Commits a new scene only when something was hit.
    pub fn erase_at(&mut self, point: Point) -> bool {
        let radius = self.eraser_radius();
        let mut scene = self.history.present().to_vec();
        let mut erased = 0;
        for element in scene.iter_mut() {
            if element.hit_test(point, radius) {
                element.set_deleted(true);
                erased += 1;
            }
        }
        if erased == 0 {
            log::debug!("Eraser missed at ({}, {})", point.x, point.y);
            return false;
        }
        log::debug!("Erased {erased} element(s)");
        self.history.commit(scene);
        if self.selected_element().is_none() {
            self.selection = None;
        }
        true
    }

    /// Select the first element in scene order within the select tolerance
    /// of `point`. A miss clears the selection.
    pub fn select_at(&mut self, point: Point) -> bool {
        let tolerance = self.config.select_tolerance;
        let hit = self
            .visible_elements()
            .find(|e| e.hit_test(point, tolerance))
            .map(|e| e.id());
        match hit {
            Some(id) => log::debug!("Selected {id}"),
            None => log::debug!("Selection cleared"),
        }
        let changed = hit != self.selection;
        self.selection = hit;
        changed
    }

    // --- Text ---

    /// Commit a text element at the pending text position.
    /// No-op for empty text or when no position is pending.
    pub fn submit_text(&mut self, text: &str) -> bool {
        match self.tools.finish_text(text) {
            Some(element) => {
                log::debug!("Committing text {}", element.id());
                self.commit_element(element);
                true
            }
            None => false,
        }
    }

    /// Discard the pending text position.
    pub fn cancel_text(&mut self) -> bool {
        if self.tools.pending_text().is_none() {
            return false;
        }
        self.tools.cancel();
        true
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Reset history and drop the transient element, selection and pending text.
    /// Nothing is committed, so a clear cannot be undone.
    pub fn clear(&mut self) -> bool {
        self.history.clear();
        self.tools.cancel();
        self.selection = None;
        log::debug!("Session cleared");
        true
    }

    /// Commit the scene without its last element. No-op on an empty scene.
    pub fn remove_last_element(&mut self) -> bool {
        let mut scene = self.history.present().to_vec();
        let Some(removed) = scene.pop() else {
            return false;
        };
        log::debug!("Removed last element {}", removed.id());
        self.history.commit(scene);
        true
    }

    /// Run the action bound to a key press. Returns the action that ran, if any.
    pub fn handle_shortcut(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutRegistry::resolve(key, modifiers)?;
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
        };
        Some(action)
    }
}
