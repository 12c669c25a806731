//! Sketchpad Widget
//!
//! Browser shell for the sketchpad: attaches a drawing session to a
//! `<canvas>` element and forwards pointer and keyboard events to it.
//! Native builds only expose the headless [`replay`] helper.

use sketchpad_core::{PointerInput, Session, SketchResult, ToolKind};
use sketchpad_render::{DrawCommand, RecordingSurface, RenderContext, Renderer, SurfaceRenderer};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{SketchpadWidget, start};

/// A scripted drag gesture with one tool.
#[derive(Debug, Clone)]
pub struct Gesture {
    pub tool: ToolKind,
    /// Client-space points; the first is the pointer-down position.
    pub points: Vec<(f64, f64)>,
}

impl Gesture {
    pub fn new(tool: ToolKind, points: &[(f64, f64)]) -> Self {
        Self {
            tool,
            points: points.to_vec(),
        }
    }
}

/// Feed gestures into a session, then render it onto a recording surface.
pub fn replay(session: &mut Session, gestures: &[Gesture]) -> SketchResult<Vec<DrawCommand>> {
    for gesture in gestures {
        session.set_tool(gesture.tool);
        let Some((&(x, y), rest)) = gesture.points.split_first() else {
            continue;
        };
        session.pointer_down(PointerInput::new(x, y))?;
        for &(x, y) in rest {
            session.pointer_move(PointerInput::new(x, y))?;
        }
        session.pointer_up();
    }

    let mut renderer = SurfaceRenderer::new(RecordingSurface::new(session.config().surface_size));
    renderer.build_scene(&RenderContext::new(session));
    Ok(renderer.into_surface().take_commands())
}
