//! Browser `<canvas>` 2D context surface.

use crate::renderer::{RenderResult, RendererError};
use crate::surface::Surface;
use js_sys::Array;
use kurbo::{BezPath, Cap, Join, PathEl, Point, Rect, Size, Stroke};
use peniko::Color;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// CSS `rgba()` string for a color.
fn css_color(color: Color) -> String {
    let c = color.to_rgba8();
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, f64::from(c.a) / 255.0)
}

fn cap_name(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Square => "square",
        Cap::Round => "round",
    }
}

fn join_name(join: Join) -> &'static str {
    match join {
        Join::Bevel => "bevel",
        Join::Miter => "miter",
        Join::Round => "round",
    }
}

/// A [`Surface`] backed by a canvas element's 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> RenderResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| RendererError::Surface(format!("{e:?}")))?
            .ok_or_else(|| RendererError::Surface("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RendererError::Surface("not a 2d rendering context".to_string()))?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }

    /// Replay a kurbo path into the context's current path.
    fn trace(&self, path: &BezPath) {
        let ctx = &self.context;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn clear(&mut self, rect: Rect) {
        self.context
            .clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn save(&mut self) {
        self.context.save();
    }

    fn restore(&mut self) {
        self.context.restore();
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        let ctx = &self.context;
        ctx.set_line_width(stroke.width);
        ctx.set_line_cap(cap_name(stroke.start_cap));
        ctx.set_line_join(join_name(stroke.join));
        let dashes: Array = stroke.dash_pattern.iter().map(|d| JsValue::from_f64(*d)).collect();
        if let Err(e) = ctx.set_line_dash(&dashes) {
            log::error!("Failed to set line dash: {e:?}");
        }
        ctx.set_line_dash_offset(stroke.dash_offset);
        ctx.set_stroke_style_str(&css_color(color));
        self.trace(path);
        ctx.stroke();
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.context.set_fill_style_str(&css_color(color));
        self.trace(path);
        self.context.fill();
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font_size: f64,
        font_family: &str,
        color: Color,
    ) {
        let ctx = &self.context;
        ctx.set_font(&format!("{font_size}px {font_family}"));
        ctx.set_fill_style_str(&css_color(color));
        if let Err(e) = ctx.fill_text(text, origin.x, origin.y) {
            log::error!("Failed to draw text: {e:?}");
        }
    }
}
