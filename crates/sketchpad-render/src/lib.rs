//! Sketchpad Render Library
//!
//! Surface abstraction and stateless scene replay for the sketchpad widget.
//! The browser build draws through a `<canvas>` 2D context.

mod renderer;
mod surface;

#[cfg(target_arch = "wasm32")]
mod web_surface;

pub use renderer::{
    RenderContext, RenderResult, Renderer, RendererError, SELECTION_DASH, SELECTION_PADDING,
    SurfaceRenderer,
};
pub use surface::{DrawCommand, RecordingSurface, Surface};

#[cfg(target_arch = "wasm32")]
pub use web_surface::CanvasSurface;
