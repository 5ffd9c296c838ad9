#![forbid(unsafe_code)]

//! Grid configuration as data.
//!
//! Every tunable of the calendar grid lives in [`GridConfig`], which can be
//! loaded from TOML or JSON at startup when the `config` feature is enabled.
//! Missing fields fall back to [`GridConfig::default()`].
//!
//! # Example (TOML)
//!
//! ```toml
//! hour_unit = 0.25
//! zone_offset_minutes = -300
//! row_height_rem = 3.0
//! long_press_ms = 500
//! touch_slop_px = 10.0
//! undo_max_depth = 200
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::layout::{DEFAULT_ROW_HEIGHT_REM, LayoutMetrics};
#[cfg(feature = "tracing")]
use crate::logging::warn;
#[cfg(not(feature = "tracing"))]
use crate::warn;
use crate::time::{CalendarZone, QUARTER_HOUR};

/// Largest accepted UTC offset, in minutes.
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Tunables for the calendar grid and its interactions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GridConfig {
    /// Grid resolution in hours.
    pub hour_unit: f64,
    /// Display zone, minutes east of UTC.
    pub zone_offset_minutes: i32,
    /// Height of one hour row, in `rem`.
    pub row_height_rem: f64,
    /// Hold time before a touch turns into a drag, in milliseconds.
    pub long_press_ms: u64,
    /// Movement tolerated while waiting for the long press, in CSS pixels.
    pub touch_slop_px: f64,
    /// Retained undo entries; `None` keeps the full history.
    pub undo_max_depth: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hour_unit: QUARTER_HOUR,
            zone_offset_minutes: 0,
            row_height_rem: DEFAULT_ROW_HEIGHT_REM,
            long_press_ms: 500,
            touch_slop_px: 10.0,
            undo_max_depth: None,
        }
    }
}

impl GridConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Collect every out-of-range parameter. An empty list means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.hour_unit.is_finite() && self.hour_unit > 0.0 && self.hour_unit <= 24.0) {
            errors.push(format!("hour_unit must be in (0, 24], got {}", self.hour_unit));
        }
        if self.zone_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            errors.push(format!(
                "zone_offset_minutes must be within ±{MAX_OFFSET_MINUTES}, got {}",
                self.zone_offset_minutes
            ));
        }
        if !(self.row_height_rem.is_finite() && self.row_height_rem > 0.0) {
            errors.push(format!(
                "row_height_rem must be positive, got {}",
                self.row_height_rem
            ));
        }
        if !(self.touch_slop_px.is_finite() && self.touch_slop_px >= 0.0) {
            errors.push(format!(
                "touch_slop_px must be non-negative, got {}",
                self.touch_slop_px
            ));
        }
        if self.undo_max_depth == Some(0) {
            errors.push("undo_max_depth must be at least 1".to_string());
        }
        errors
    }

    /// Validate, turning violations into an error.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// The display zone. Out-of-range offsets fall back to UTC.
    #[must_use]
    pub fn zone(&self) -> CalendarZone {
        CalendarZone::from_offset_minutes(self.zone_offset_minutes).unwrap_or_else(|| {
            warn!(
                zone_offset_minutes = self.zone_offset_minutes,
                "zone offset out of range, using UTC"
            );
            CalendarZone::utc()
        })
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMetrics {
        LayoutMetrics::new(self.row_height_rem)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a grid configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GridConfig::default().validate().is_empty());
        assert_eq!(GridConfig::default().hour_unit, 0.25);
    }

    #[test]
    fn validation_reports_every_violation() {
        let config = GridConfig {
            hour_unit: 0.0,
            zone_offset_minutes: 20 * 60,
            row_height_rem: -1.0,
            touch_slop_px: f64::NAN,
            undo_max_depth: Some(0),
            ..GridConfig::default()
        };
        assert_eq!(config.validate().len(), 5);
        let err = config.validated().unwrap_err();
        assert!(err.to_string().starts_with("validation errors:"));
    }

    #[test]
    fn zone_follows_offset() {
        let config = GridConfig {
            zone_offset_minutes: 60,
            ..GridConfig::default()
        };
        assert_eq!(config.zone().offset().local_minus_utc(), 3600);
    }

    #[test]
    fn layout_uses_row_height() {
        let config = GridConfig {
            row_height_rem: 2.0,
            ..GridConfig::default()
        };
        assert_eq!(config.layout().row_height_rem, 2.0);
    }
}
