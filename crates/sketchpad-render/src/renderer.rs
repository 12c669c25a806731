//! Renderer trait and the surface-backed scene replay.

use crate::surface::Surface;
use kurbo::{BezPath, Cap, Join, Point, Rect, Shape, Stroke};
use peniko::Color;
use sketchpad_core::elements::{Element, TEXT_FONT_FAMILY};
use sketchpad_core::session::Session;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Padding between a selected element and its indicator box.
pub const SELECTION_PADDING: f64 = 5.0;

/// Dash pattern of the selection indicator.
pub const SELECTION_DASH: [f64; 2] = [5.0, 5.0];

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The session to render.
    pub session: &'a Session,
    /// Selection indicator color.
    pub selection_color: Color,
    pub selection_padding: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            selection_color: Color::from_rgba8(0, 153, 255, 255),
            selection_padding: SELECTION_PADDING,
        }
    }

    /// Set the selection indicator color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_selection_padding(mut self, padding: f64) -> Self {
        self.selection_padding = padding;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Draw a full frame. Nothing from the previous frame survives.
    fn build_scene(&mut self, ctx: &RenderContext);
}

/// Line style for shape outlines.
fn line_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

/// Replays a session onto a [`Surface`].
///
/// Holds no drawing state between frames: every call clears the surface and
/// redraws the committed scene, the transient element and the selection box.
#[derive(Debug)]
pub struct SurfaceRenderer<S: Surface> {
    surface: S,
}

impl<S: Surface> SurfaceRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn render_element(&mut self, element: &Element) {
        let style = element.style();
        match element {
            Element::Stroke(stroke) => {
                let path = stroke.to_path();
                if !path.elements().is_empty() {
                    self.surface.fill_path(&path, style.stroke());
                }
            }
            Element::Rectangle(rect) => {
                self.stroke_shape(&rect.to_path(), style.stroke_width, style.stroke());
            }
            Element::Ellipse(ellipse) => {
                self.stroke_shape(&ellipse.to_path(), style.stroke_width, style.stroke());
            }
            Element::Arrow(arrow) => {
                self.stroke_shape(&arrow.to_path(), style.stroke_width, style.stroke());
            }
            Element::Text(text) => {
                if !text.is_empty() {
                    self.surface.fill_text(
                        &text.content,
                        text.start,
                        text.font_size(),
                        TEXT_FONT_FAMILY,
                        style.stroke(),
                    );
                }
            }
        }
    }

    fn stroke_shape(&mut self, path: &BezPath, width: f64, color: Color) {
        self.surface.stroke_path(path, &line_stroke(width), color);
    }

    fn render_selection(&mut self, bounds: Rect, ctx: &RenderContext) {
        let rect = bounds.inflate(ctx.selection_padding, ctx.selection_padding);
        let stroke = Stroke::new(1.0).with_dashes(0.0, SELECTION_DASH);
        self.surface.save();
        self.surface
            .stroke_path(&rect.to_path(0.1), &stroke, ctx.selection_color);
        self.surface.restore();
    }
}

impl<S: Surface> Renderer for SurfaceRenderer<S> {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let session = ctx.session;
        let size = self.surface.size();
        self.surface.clear(Rect::from_origin_size(Point::ZERO, size));

        let mut drawn = 0;
        for element in session.visible_elements() {
            self.render_element(element);
            drawn += 1;
        }
        log::trace!("Rendered {drawn} elements onto {}x{}", size.width, size.height);

        if let Some(current) = session.current_element() {
            self.render_element(current);
        }

        if let Some(selected) = session.selected_element() {
            self.render_selection(selected.bounds(), ctx);
        }
    }
}
