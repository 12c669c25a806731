//! The 2D drawing surface a renderer draws onto.

use kurbo::{BezPath, Point, Rect, Size, Stroke};
use peniko::Color;

/// A host-provided 2D raster surface.
///
/// Mirrors the small subset of an immediate-mode 2D context the renderer
/// needs. Paths are in surface pixel coordinates.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Clear a region to transparent.
    fn clear(&mut self, rect: Rect);

    /// Push the current drawing state (line dash, styles).
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Stroke a path outline.
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color);

    /// Fill a closed path using the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Fill a single line of text with its baseline-left corner at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font_size: f64,
        font_family: &str,
        color: Color,
    );
}

/// A drawing call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Save,
    Restore,
    StrokePath {
        path: BezPath,
        stroke: Stroke,
        color: Color,
    },
    FillPath {
        path: BezPath,
        color: Color,
    },
    FillText {
        text: String,
        origin: Point,
        font_size: f64,
        font_family: String,
        color: Color,
    },
}

/// In-memory surface that records every drawing call.
///
/// Used by tests and headless hosts.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, rect: Rect) {
        // A clear of the whole surface wipes everything before it.
        if rect.union(self.size.to_rect()) == rect {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font_size: f64,
        font_family: &str,
        color: Color,
    ) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            origin,
            font_size,
            font_family: font_family.to_string(),
            color,
        });
    }
}
