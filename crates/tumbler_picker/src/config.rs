//! Picker configuration (picker.toml)
//!
//! Every field is optional in the file; missing fields take the defaults
//! below, which reproduce the stock flat picker feel.

use serde::{Deserialize, Serialize};
use tumbler_animation::FRAME_MS;

use crate::error::{PickerError, Result};

/// Top-level picker configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PickerConfig {
    /// Degrees of X rotation per pixel of option offset. `0` selects the flat
    /// translate look, anything else the rotating wheel.
    #[serde(default)]
    pub rotate_factor: f64,
    /// Scale applied to options that are visible but not selected
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    /// Flat look: options further than this from the center are hidden (px)
    #[serde(default = "default_flat_visibility_px")]
    pub flat_visibility_px: f64,
    /// Wheel look: options rotated further than this are hidden (degrees)
    #[serde(default = "default_wheel_visibility_deg")]
    pub wheel_visibility_deg: f64,
    #[serde(default)]
    pub physics: PhysicsConfig,
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_flat_visibility_px() -> f64 {
    170.0
}

fn default_wheel_visibility_deg() -> f64 {
    90.0
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            rotate_factor: 0.0,
            scale_factor: default_scale_factor(),
            flat_visibility_px: default_flat_visibility_px(),
            wheel_visibility_deg: default_wheel_visibility_deg(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl PickerConfig {
    /// Rotating-wheel look with shrunken neighbours
    pub fn wheel() -> Self {
        Self {
            rotate_factor: -0.46,
            scale_factor: 0.85,
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PickerError::InvalidConfig(e.to_string()))
    }

    /// Reject values the physics cannot settle with
    pub fn validate(&self) -> Result<()> {
        if !self.rotate_factor.is_finite() {
            return Err(invalid("rotate_factor must be finite"));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(invalid("scale_factor must be positive"));
        }
        if !(self.flat_visibility_px.is_finite() && self.flat_visibility_px >= 0.0) {
            return Err(invalid("flat_visibility_px must be non-negative"));
        }
        if !(self.wheel_visibility_deg.is_finite() && self.wheel_visibility_deg >= 0.0) {
            return Err(invalid("wheel_visibility_deg must be non-negative"));
        }
        self.physics.validate()
    }

    /// Whether options are laid out on a rotating wheel
    pub fn is_wheel(&self) -> bool {
        self.rotate_factor != 0.0
    }
}

/// Gesture and deceleration tuning
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity multiplier applied once per frame while decelerating
    pub friction: f64,
    /// Release velocity ceiling (pixels per frame)
    pub max_speed: f64,
    /// Nominal frame interval used to express velocity per frame (ms)
    pub frame_ms: f64,
    /// How far back from release the velocity reference sample may lie (ms)
    pub velocity_window_ms: f64,
    /// Displacement below which a release does not move the column (px)
    pub dead_zone_px: f64,
    /// Snap-back transition after an overscrolled release (ms)
    pub bounce_duration_ms: u32,
    /// Transition used by taps and refresh clamps (ms)
    pub select_duration_ms: u32,
    /// Elastic exponent when dragged past the first enabled option
    pub leading_elastic_exponent: f64,
    /// Elastic exponent when dragged past the last enabled option
    pub trailing_elastic_exponent: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.97,
            max_speed: 60.0,
            frame_ms: FRAME_MS,
            velocity_window_ms: 100.0,
            dead_zone_px: 3.0,
            bounce_duration_ms: 100,
            select_duration_ms: 150,
            leading_elastic_exponent: 0.8,
            trailing_elastic_exponent: 0.9,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("physics.friction must be in (0, 1]"));
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(invalid("physics.max_speed must be positive"));
        }
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(invalid("physics.frame_ms must be positive"));
        }
        for (name, exponent) in [
            ("physics.leading_elastic_exponent", self.leading_elastic_exponent),
            ("physics.trailing_elastic_exponent", self.trailing_elastic_exponent),
        ] {
            if !(exponent > 0.0 && exponent <= 1.0) {
                return Err(PickerError::InvalidConfig(format!(
                    "{name} must be in (0, 1]"
                )));
            }
        }
        for (name, value) in [
            ("physics.velocity_window_ms", self.velocity_window_ms),
            ("physics.dead_zone_px", self.dead_zone_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PickerError::InvalidConfig(format!(
                    "{name} must be non-negative"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> PickerError {
    PickerError::InvalidConfig(message.to_string())
}
