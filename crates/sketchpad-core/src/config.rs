//! Session configuration.

use crate::error::{SketchError, SketchResult};
use crate::history::MAX_HISTORY_LENGTH;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Hit-test threshold for the select tool, in pixels.
pub const SELECT_TOLERANCE: f64 = 5.0;

/// Eraser radius is the stroke width times this factor.
pub const ERASER_RADIUS_FACTOR: f64 = 5.0;

/// Default drawing surface size in pixels.
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(1200.0, 800.0);

/// Tunables for a drawing session. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of undo states.
    pub history_limit: usize,
    pub select_tolerance: f64,
    pub eraser_radius_factor: f64,
    /// Size of the drawing surface the host creates.
    pub surface_size: Size,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: MAX_HISTORY_LENGTH,
            select_tolerance: SELECT_TOLERANCE,
            eraser_radius_factor: ERASER_RADIUS_FACTOR,
            surface_size: DEFAULT_SURFACE_SIZE,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> SketchResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SketchError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> SketchResult<()> {
        if self.history_limit == 0 {
            return Err(SketchError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if !(self.select_tolerance >= 0.0) {
            return Err(SketchError::InvalidConfig(format!(
                "select_tolerance must be non-negative, got {}",
                self.select_tolerance
            )));
        }
        if !(self.eraser_radius_factor >= 0.0) {
            return Err(SketchError::InvalidConfig(format!(
                "eraser_radius_factor must be non-negative, got {}",
                self.eraser_radius_factor
            )));
        }
        if !(self.surface_size.width > 0.0 && self.surface_size.height > 0.0) {
            return Err(SketchError::InvalidConfig(format!(
                "surface_size must be positive, got {}x{}",
                self.surface_size.width, self.surface_size.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.select_tolerance, 5.0);
        assert_eq!(config.eraser_radius_factor, 5.0);
        assert_eq!(config.surface_size, Size::new(1200.0, 800.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = SessionConfig::from_json(r#"{ "history_limit": 10 }"#).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.select_tolerance, SELECT_TOLERANCE);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SessionConfig {
            select_tolerance: 8.0,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            SessionConfig::from_json(r#"{ "history_limit": 0 }"#),
            Err(SketchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "select_tolerance": -1.0 }"#),
            Err(SketchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json("not json"),
            Err(SketchError::InvalidConfig(_))
        ));
    }
}
