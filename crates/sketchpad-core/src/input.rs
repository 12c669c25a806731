//! Pointer capture: turns raw pointer/touch events into timestamped points.

use crate::error::{SketchError, SketchResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Pressure assumed when the input device does not report one.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A raw pointer or touch sample as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Position in client (viewport) coordinates.
    pub client: Point,
    /// Device pressure in `0.0..=1.0`, if the device reports one.
    pub pressure: Option<f64>,
}

impl PointerInput {
    /// A sample without pressure information (mouse, most touch screens).
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self {
            client: Point::new(client_x, client_y),
            pressure: None,
        }
    }

    /// Attach a device pressure reading.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }
}

/// A captured point in surface coordinates. Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputPoint {
    pub position: Point,
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl InputPoint {
    pub fn new(position: Point, pressure: Option<f64>, timestamp: u64) -> Self {
        Self {
            position,
            pressure,
            timestamp,
        }
    }

    pub fn pressure_or_default(&self) -> f64 {
        self.pressure.unwrap_or(DEFAULT_PRESSURE)
    }
}

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Converts client coordinates into surface coordinates.
///
/// Holds the screen position of the drawing surface. Until the host attaches
/// a surface, every capture fails with [`SketchError::SurfaceNotAttached`].
#[derive(Debug, Clone, Default)]
pub struct InputCapture {
    origin: Option<Point>,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or refresh) the surface's top-left corner in client coordinates.
    pub fn attach(&mut self, origin: Point) {
        self.origin = Some(origin);
    }

    pub fn detach(&mut self) {
        self.origin = None;
    }

    pub fn is_attached(&self) -> bool {
        self.origin.is_some()
    }

    /// Capture a pointer sample, stamped with the current time.
    pub fn capture(&self, input: PointerInput) -> SketchResult<InputPoint> {
        self.capture_at(input, now_millis())
    }

    /// Capture a pointer sample with an explicit timestamp.
    pub fn capture_at(&self, input: PointerInput, timestamp: u64) -> SketchResult<InputPoint> {
        let origin = self.origin.ok_or(SketchError::SurfaceNotAttached)?;
        let position = Point::new(input.client.x - origin.x, input.client.y - origin.y);
        let pressure = input.pressure.unwrap_or(DEFAULT_PRESSURE).clamp(0.0, 1.0);
        Ok(InputPoint::new(position, Some(pressure), timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_requires_surface() {
        let capture = InputCapture::new();
        let result = capture.capture(PointerInput::new(10.0, 10.0));
        assert_eq!(result, Err(SketchError::SurfaceNotAttached));
    }

    #[test]
    fn test_capture_subtracts_origin() {
        let mut capture = InputCapture::new();
        capture.attach(Point::new(100.0, 50.0));

        let point = capture.capture_at(PointerInput::new(130.0, 70.0), 42).unwrap();
        assert_eq!(point.position, Point::new(30.0, 20.0));
        assert_eq!(point.timestamp, 42);
    }

    #[test]
    fn test_default_pressure() {
        let mut capture = InputCapture::new();
        capture.attach(Point::ZERO);

        let point = capture.capture(PointerInput::new(1.0, 1.0)).unwrap();
        assert_eq!(point.pressure, Some(DEFAULT_PRESSURE));

        let point = capture
            .capture(PointerInput::new(1.0, 1.0).with_pressure(0.8))
            .unwrap();
        assert_eq!(point.pressure, Some(0.8));
    }

    #[test]
    fn test_pressure_is_clamped() {
        let mut capture = InputCapture::new();
        capture.attach(Point::ZERO);

        let point = capture
            .capture(PointerInput::new(0.0, 0.0).with_pressure(1.7))
            .unwrap();
        assert_eq!(point.pressure, Some(1.0));
    }

    #[test]
    fn test_detach() {
        let mut capture = InputCapture::new();
        capture.attach(Point::ZERO);
        assert!(capture.is_attached());
        capture.detach();
        assert!(!capture.is_attached());
        assert!(capture.capture(PointerInput::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_command_modifier() {
        let ctrl = Modifiers { ctrl: true, ..Default::default() };
        let meta = Modifiers { meta: true, ..Default::default() };
        assert!(ctrl.command());
        assert!(meta.command());
        assert!(!Modifiers::default().command());
    }
}
