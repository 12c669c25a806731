//! Sketchpad Core Library
//!
//! Platform-agnostic drawing model for the sketchpad widget: input capture,
//! elements, tools, undo/redo history and freehand stroke outlines.

pub mod config;
pub mod elements;
pub mod error;
pub mod history;
pub mod input;
pub mod outline;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use config::SessionConfig;
pub use elements::{Element, ElementId, ElementKind, ElementStyle, SerializableColor};
pub use error::{SketchError, SketchResult};
pub use history::{History, MAX_HISTORY_LENGTH, Scene};
pub use input::{InputCapture, InputPoint, Modifiers, PointerInput};
pub use session::Session;
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use tools::{StrokeWidth, ToolKind, ToolManager};
