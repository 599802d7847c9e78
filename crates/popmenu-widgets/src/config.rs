#![forbid(unsafe_code)]

//! Tunable menu parameters as data.
//!
//! [`MenuConfig`] groups every constant the trigger and panel rely on:
//! gesture thresholds, edge-autoscroll bands, and panel geometry. With the
//! `config` feature it loads from TOML or JSON.
//!
//! ```toml
//! # popmenu.toml
//! [gesture]
//! open_press_delay_ms = 70
//!
//! [autoscroll]
//! top_band = 70.0
//! step = 2.0
//!
//! [panel]
//! max_height = 300.0
//! ```
//!
//! # Defaults
//!
//! `MenuConfig::default()` reproduces the stock menu behaviour exactly.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use popmenu_core::geometry::Vector;
use popmenu_core::gesture::GestureConfig;
use web_time::Duration;

// ---------------------------------------------------------------------------
// Top-level MenuConfig
// ---------------------------------------------------------------------------

/// All tunable parameters for a menu trigger and its panel.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MenuConfig {
    /// Press and tap recognition.
    pub gesture: GesturePolicyConfig,
    /// Edge autoscroll during a drag.
    pub autoscroll: AutoscrollPolicyConfig,
    /// Panel geometry and animation.
    pub panel: PanelPolicyConfig,
}

impl MenuConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check every parameter. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let g = &self.gesture;
        let a = &self.autoscroll;
        let p = &self.panel;

        if g.allowable_movement < 0.0 {
            errors.push(format!(
                "gesture.allowable_movement must be >= 0, got {}",
                g.allowable_movement
            ));
        }
        if g.tap_slop < 0.0 {
            errors.push(format!("gesture.tap_slop must be >= 0, got {}", g.tap_slop));
        }
        if g.tap_max_ms == 0 {
            errors.push("gesture.tap_max_ms must be > 0".into());
        }

        if a.period_ms == 0 {
            errors.push("autoscroll.period_ms must be > 0".into());
        }
        if a.step <= 0.0 {
            errors.push(format!("autoscroll.step must be > 0, got {}", a.step));
        }
        if a.top_band < 0.0 || a.bottom_band < 0.0 {
            errors.push(format!(
                "autoscroll bands must be >= 0, got top={} bottom={}",
                a.top_band, a.bottom_band
            ));
        }

        if p.corner_radius < 0.0 {
            errors.push(format!(
                "panel.corner_radius must be >= 0, got {}",
                p.corner_radius
            ));
        }
        if p.max_height <= 0.0 {
            errors.push(format!("panel.max_height must be > 0, got {}", p.max_height));
        }
        if p.min_extra_width < 0.0 {
            errors.push(format!(
                "panel.min_extra_width must be >= 0, got {}",
                p.min_extra_width
            ));
        }
        if p.scroll_padding < 0.0 {
            errors.push(format!(
                "panel.scroll_padding must be >= 0, got {}",
                p.scroll_padding
            ));
        }
        if p.shadow_inset < 0.0 {
            errors.push(format!(
                "panel.shadow_inset must be >= 0, got {}",
                p.shadow_inset
            ));
        }
        if p.content_fade_height < 0.0 {
            errors.push(format!(
                "panel.content_fade_height must be >= 0, got {}",
                p.content_fade_height
            ));
        }

        errors
    }

    /// Return `self` if it validates, otherwise every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Gesture thresholds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GesturePolicyConfig {
    /// Hold time before a press begins while the panel is open (default: 70).
    /// While closed a press begins immediately.
    pub open_press_delay_ms: u64,
    /// Movement that fails a pending press (default: 10).
    pub allowable_movement: f64,
    /// Longest contact that still counts as a tap (default: 500).
    pub tap_max_ms: u64,
    /// Movement allowed for a tap (default: 10).
    pub tap_slop: f64,
    /// A press must last longer than this to select on release (default: 300).
    pub select_after_ms: u64,
}

impl Default for GesturePolicyConfig {
    fn default() -> Self {
        Self {
            open_press_delay_ms: 70,
            allowable_movement: 10.0,
            tap_max_ms: 500,
            tap_slop: 10.0,
            select_after_ms: 300,
        }
    }
}

impl GesturePolicyConfig {
    /// Recognizer thresholds for a closed trigger.
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            min_press_duration: Duration::ZERO,
            allowable_movement: self.allowable_movement,
            tap_max_duration: Duration::from_millis(self.tap_max_ms),
            tap_slop: self.tap_slop,
        }
    }

    #[must_use]
    pub fn open_press_delay(&self) -> Duration {
        Duration::from_millis(self.open_press_delay_ms)
    }

    #[must_use]
    pub fn select_after(&self) -> Duration {
        Duration::from_millis(self.select_after_ms)
    }
}

/// Edge autoscroll bands and speed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AutoscrollPolicyConfig {
    /// Tick period (default: 16).
    pub period_ms: u64,
    /// Offset change per tick (default: 2).
    pub step: f64,
    /// Height of the top band, from the viewport top (default: 70).
    pub top_band: f64,
    /// Height of the bottom band, from the viewport bottom (default: 24).
    pub bottom_band: f64,
}

impl Default for AutoscrollPolicyConfig {
    fn default() -> Self {
        Self {
            period_ms: 16,
            step: 2.0,
            top_band: 70.0,
            bottom_band: 24.0,
        }
    }
}

impl AutoscrollPolicyConfig {
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Panel geometry, shadow, and animation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PanelPolicyConfig {
    /// Corner radius of the fused outline (default: 8).
    pub corner_radius: f64,
    /// Tallest the scroll viewport may grow (default: 300).
    pub max_height: f64,
    /// The panel is at least this much wider than its trigger (default: 100).
    pub min_extra_width: f64,
    /// Padding added to the scroll insets (default: 6).
    pub scroll_padding: f64,
    /// Shadow canvas outset on every side (default: 20).
    pub shadow_inset: f64,
    /// Offset of the cast shadow (default: 0, 6).
    pub shadow_offset: Vector,
    /// Close fade duration (default: 200).
    pub fade_out_ms: u64,
    /// Height of the scroll container's top fade (default: 12).
    pub content_fade_height: f64,
}

impl Default for PanelPolicyConfig {
    fn default() -> Self {
        Self {
            corner_radius: 8.0,
            max_height: 300.0,
            min_extra_width: 100.0,
            scroll_padding: 6.0,
            shadow_inset: 20.0,
            shadow_offset: Vector::new(0.0, 6.0),
            fade_out_ms: 200,
            content_fade_height: 12.0,
        }
    }
}

impl PanelPolicyConfig {
    #[must_use]
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from loading a menu configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = MenuConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn default_matches_stock_constants() {
        let config = MenuConfig::default();
        assert_eq!(config.gesture.open_press_delay(), Duration::from_millis(70));
        assert_eq!(config.gesture.select_after(), Duration::from_millis(300));
        assert_eq!(config.autoscroll.period(), Duration::from_millis(16));
        assert_eq!(config.autoscroll.step, 2.0);
        assert_eq!(config.panel.max_height, 300.0);
        assert_eq!(config.panel.fade_out(), Duration::from_millis(200));
        assert_eq!(config.panel.shadow_offset, Vector::new(0.0, 6.0));
    }

    #[test]
    fn gesture_config_starts_with_immediate_press() {
        let g = GesturePolicyConfig::default().to_gesture_config();
        assert_eq!(g.min_press_duration, Duration::ZERO);
        assert_eq!(g.tap_max_duration, Duration::from_millis(500));
    }

    #[test]
    fn validate_catches_bad_values() {
        let mut config = MenuConfig::default();
        config.autoscroll.step = 0.0;
        config.panel.max_height = -1.0;
        config.autoscroll.period_ms = 0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("autoscroll.step")));
        assert!(errors.iter().any(|e| e.contains("panel.max_height")));
        assert!(errors.iter().any(|e| e.contains("autoscroll.period_ms")));
    }

    #[test]
    fn validated_reports_all_errors() {
        let mut config = MenuConfig::default();
        config.gesture.tap_slop = -2.0;
        config.panel.corner_radius = -1.0;
        let err = config.validated().unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("validation errors: "));
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_keeps_defaults() {
        let config = MenuConfig::from_toml_str(
            r#"
            [autoscroll]
            step = 4.0

            [panel]
            max_height = 240.0
            shadow_offset = { dx = 0.0, dy = 3.0 }
            "#,
        )
        .expect("toml parses");
        assert_eq!(config.autoscroll.step, 4.0);
        assert_eq!(config.autoscroll.top_band, 70.0);
        assert_eq!(config.panel.max_height, 240.0);
        assert_eq!(config.panel.shadow_offset, Vector::new(0.0, 3.0));
        assert_eq!(config.gesture, GesturePolicyConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trips_through_defaults() {
        let config =
            MenuConfig::from_json_str(r#"{"gesture":{"open_press_delay_ms":90}}"#).expect("json");
        assert_eq!(config.gesture.open_press_delay_ms, 90);
        assert_eq!(config.panel, PanelPolicyConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = MenuConfig::from_toml_str("[panel\nmax_height = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
