//! WebAssembly entry point: binds a session to a `<canvas>` element.

use kurbo::Point;
use sketchpad_core::{Modifiers, PointerInput, Session, SessionConfig};
use sketchpad_render::{CanvasSurface, RenderContext, Renderer, SurfaceRenderer};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent};

fn to_js(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Session plus the renderer drawing it.
struct WidgetState {
    session: Session,
    renderer: SurfaceRenderer<CanvasSurface>,
}

impl WidgetState {
    fn render(&mut self) {
        self.renderer.build_scene(&RenderContext::new(&self.session));
    }

    /// Re-read the canvas position; it moves with scrolling and layout.
    fn refresh_origin(&mut self) {
        let rect = self.renderer.surface().canvas().get_bounding_client_rect();
        self.session.attach_surface(Point::new(rect.left(), rect.top()));
    }

    fn render_if(&mut self, redraw: bool) -> bool {
        if redraw {
            self.render();
        }
        redraw
    }
}

type Shared = Rc<RefCell<WidgetState>>;

/// A DOM listener that is removed when the widget is dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.closure.as_ref().unchecked_ref();
        if let Err(e) = self.target.remove_event_listener_with_callback(self.event, callback) {
            log::warn!("Failed to remove {} listener: {e:?}", self.event);
        }
    }
}

/// Convert a DOM pointer event. Only pens report a meaningful pressure;
/// mouse and touch fall back to the default.
fn pointer_input(event: &PointerEvent) -> PointerInput {
    let input = PointerInput::new(f64::from(event.client_x()), f64::from(event.client_y()));
    let pressure = f64::from(event.pressure());
    if event.pointer_type() == "pen" && pressure > 0.0 {
        input.with_pressure(pressure)
    } else {
        input
    }
}

fn handle_pointer(state: &Shared, event: Event) {
    let Some(event) = event.dyn_ref::<PointerEvent>() else {
        return;
    };
    // Multi-touch: only the first active touch draws.
    if !event.is_primary() {
        return;
    }

    let mut state = state.borrow_mut();
    let result = match event.type_().as_str() {
        "pointerdown" => {
            event.prevent_default();
            state.refresh_origin();
            state.session.pointer_down(pointer_input(event))
        }
        "pointermove" => state.session.pointer_move(pointer_input(event)),
        "pointerup" => Ok(state.session.pointer_up()),
        "pointerleave" => Ok(state.session.pointer_leave()),
        _ => Ok(false),
    };
    // Capture failures are already logged by the session.
    if let Ok(redraw) = result {
        state.render_if(redraw);
    }
}

fn handle_key(state: &Shared, event: Event) {
    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    let modifiers = Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    };
    let mut state = state.borrow_mut();
    if let Some(action) = state.session.handle_shortcut(&event.key(), modifiers) {
        log::debug!("Shortcut: {action:?}");
        event.prevent_default();
        state.render();
    }
}

/// Drawing widget attached to a canvas element.
///
/// Pointer and keyboard events are wired up on construction and removed
/// when the widget is freed.
#[wasm_bindgen]
pub struct SketchpadWidget {
    state: Shared,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl SketchpadWidget {
    /// Attach to `canvas` with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<SketchpadWidget, JsValue> {
        Self::build(canvas, SessionConfig::default())
    }

    /// Attach to `canvas` with a JSON configuration.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        canvas: HtmlCanvasElement,
        config: &str,
    ) -> Result<SketchpadWidget, JsValue> {
        let config = SessionConfig::from_json(config).map_err(to_js)?;
        Self::build(canvas, config)
    }

    /// Select a tool by name: pen, rectangle, ellipse, arrow, text, eraser or select.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&self, name: &str) -> Result<(), JsValue> {
        let mut state = self.state.borrow_mut();
        let redraw = state.session.set_tool_by_name(name).map_err(to_js)?;
        state.render_if(redraw);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        self.state.borrow().session.tool().to_string()
    }

    /// Set the stroke width in pixels: 1, 3 or 5.
    #[wasm_bindgen(js_name = setStrokeWidth)]
    pub fn set_stroke_width(&self, width: f64) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .session
            .set_stroke_width_value(width)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = setStrokeColor)]
    pub fn set_stroke_color(&self, color: &str) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .session
            .set_stroke_color(color)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = setFillColor)]
    pub fn set_fill_color(&self, color: &str) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .session
            .set_fill_color(color)
            .map_err(to_js)
    }

    pub fn undo(&self) -> bool {
        let mut state = self.state.borrow_mut();
        let redraw = state.session.undo();
        state.render_if(redraw)
    }

    pub fn redo(&self) -> bool {
        let mut state = self.state.borrow_mut();
        let redraw = state.session.redo();
        state.render_if(redraw)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.state.borrow().session.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.state.borrow().session.can_redo()
    }

    /// Remove every element. Cannot be undone.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        let redraw = state.session.clear();
        state.render_if(redraw);
    }

    #[wasm_bindgen(js_name = removeLastElement)]
    pub fn remove_last_element(&self) -> bool {
        let mut state = self.state.borrow_mut();
        let redraw = state.session.remove_last_element();
        state.render_if(redraw)
    }

    /// Surface position `[x, y]` where the host should show a text input.
    #[wasm_bindgen(js_name = pendingTextPosition)]
    pub fn pending_text_position(&self) -> Option<Vec<f64>> {
        self.state
            .borrow()
            .session
            .pending_text_position()
            .map(|p| vec![p.x, p.y])
    }

    #[wasm_bindgen(js_name = submitText)]
    pub fn submit_text(&self, text: &str) -> bool {
        let mut state = self.state.borrow_mut();
        let redraw = state.session.submit_text(text);
        state.render_if(redraw)
    }

    #[wasm_bindgen(js_name = cancelText)]
    pub fn cancel_text(&self) {
        self.state.borrow_mut().session.cancel_text();
    }

    /// Force a full redraw.
    pub fn render(&self) {
        self.state.borrow_mut().render();
    }
}

impl SketchpadWidget {
    fn build(canvas: HtmlCanvasElement, config: SessionConfig) -> Result<SketchpadWidget, JsValue> {
        let size = config.surface_size;
        canvas.set_width(size.width as u32);
        canvas.set_height(size.height as u32);
        canvas.style().set_property("touch-action", "none")?;

        let session = Session::with_config(config).map_err(to_js)?;
        let surface = CanvasSurface::new(canvas.clone()).map_err(to_js)?;
        let state = Rc::new(RefCell::new(WidgetState {
            session,
            renderer: SurfaceRenderer::new(surface),
        }));
        state.borrow_mut().refresh_origin();

        let mut listeners = Vec::new();
        for event in ["pointerdown", "pointermove", "pointerup", "pointerleave"] {
            let state = state.clone();
            listeners.push(Listener::attach(canvas.clone().into(), event, move |e| {
                handle_pointer(&state, e)
            })?);
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let key_state = state.clone();
        listeners.push(Listener::attach(window.into(), "keydown", move |e| {
            handle_key(&key_state, e)
        })?);

        state.borrow_mut().render();
        log::info!("Sketchpad attached ({}x{})", size.width, size.height);

        Ok(SketchpadWidget {
            state,
            _listeners: listeners,
        })
    }
}

/// Initialize panic reporting and logging.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting Sketchpad (WASM)");
}
