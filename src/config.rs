//! Tunable parameters for the fly simulation and the theme toggle.
//!
//! Every field has a default taken from [`crate::consts`], so a page can pass
//! a partial JSON object to `start_with_config` and override only what it
//! needs. [`FlyConfig::from_json`] validates after parsing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field}: min {min} exceeds max {max}")]
    InvertedRange { field: &'static str, min: f64, max: f64 },
    #[error("{field}: range must end above 0 ms, got max {max}")]
    EmptyRange { field: &'static str, max: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be within [0, 1], got {value}")]
    NotProbability { field: &'static str, value: f64 },
}

/// A half-open delay range `[min_ms, max_ms)` in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl DelayRange {
    #[must_use]
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }

    const fn from_pair(pair: (f64, f64)) -> Self {
        Self::new(pair.0, pair.1)
    }

    /// Draw a delay from the range. A degenerate range yields `min_ms`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.max_ms > self.min_ms {
            rng.random_range(self.min_ms..self.max_ms)
        } else {
            self.min_ms
        }
    }

    #[must_use]
    pub fn contains(&self, ms: f64) -> bool {
        (self.min_ms..self.max_ms).contains(&ms)
    }

    /// Ranges must end above zero so a self-re-arming timer always moves the clock.
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        non_negative(field, self.min_ms)?;
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvertedRange { field, min: self.min_ms, max: self.max_ms });
        }
        if self.max_ms.is_nan() || self.max_ms <= 0.0 {
            return Err(ConfigError::EmptyRange { field, max: self.max_ms });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_nan() || value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

/// Which presentation layer draws the flies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// One positioned `<img>` per fly.
    #[default]
    Sprite,
    /// A single shared `<canvas>` redrawn every frame.
    Canvas,
}

/// Fly simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyConfig {
    pub fly_size_px: f64,
    pub speed_px: f64,
    pub scare_distance_px: f64,
    pub offscreen_buffer_px: f64,
    pub turn_probability: f64,
    pub wander_spread_deg: f64,
    pub flee_spread_deg: f64,
    pub center_blend: f64,

    /// Cap on concurrent user-spawned flies.
    pub max_extra_flies: usize,
    /// When false, the `M` key and the global spawn function only log.
    pub debug_spawn_enabled: bool,

    pub first_appearance: DelayRange,
    pub next_appearance: DelayRange,
    pub primary_active: DelayRange,
    pub stationary: DelayRange,
    pub moving: DelayRange,
    pub extra_lifetime: DelayRange,
    pub fade_in_delay_ms: f64,
    pub fade_in_ms: f64,
    pub fade_out_ms: f64,

    pub renderer: RendererKind,
    /// Container the primary sprite lives in (sprite renderer).
    pub container_id: String,
    /// Shared drawing surface (canvas renderer).
    pub canvas_id: String,
    /// Class toggled on the container/canvas while the primary fly is out.
    pub visible_class: String,
    pub sprite_class: String,
    pub primary_sprite_id: String,
    pub image_path: String,
    pub dot_color: String,

    pub theme: ThemeConfig,
}

impl Default for FlyConfig {
    fn default() -> Self {
        Self {
            fly_size_px: FLY_SIZE_PX,
            speed_px: MOVEMENT_SPEED_PX,
            scare_distance_px: SCARE_DISTANCE_PX,
            offscreen_buffer_px: OFFSCREEN_BUFFER_PX,
            turn_probability: TURN_PROBABILITY,
            wander_spread_deg: WANDER_SPREAD_DEG,
            flee_spread_deg: FLEE_SPREAD_DEG,
            center_blend: CENTER_BLEND,
            max_extra_flies: MAX_EXTRA_FLIES,
            debug_spawn_enabled: true,
            first_appearance: DelayRange::from_pair(FIRST_APPEARANCE_MS),
            next_appearance: DelayRange::from_pair(NEXT_APPEARANCE_MS),
            primary_active: DelayRange::from_pair(PRIMARY_ACTIVE_MS),
            stationary: DelayRange::from_pair(STATIONARY_MS),
            moving: DelayRange::from_pair(MOVING_MS),
            extra_lifetime: DelayRange::from_pair(EXTRA_LIFETIME_MS),
            fade_in_delay_ms: FADE_IN_DELAY_MS,
            fade_in_ms: FADE_IN_MS,
            fade_out_ms: FADE_OUT_MS,
            renderer: RendererKind::default(),
            container_id: "fly-container".to_owned(),
            canvas_id: "fly-canvas".to_owned(),
            visible_class: "visible".to_owned(),
            sprite_class: "fly-image".to_owned(),
            primary_sprite_id: "fly-image".to_owned(),
            image_path: "imagenes/haloween/mosca.png".to_owned(),
            dot_color: "#1F1A17".to_owned(),
            theme: ThemeConfig::default(),
        }
    }
}

impl FlyConfig {
    /// Parse a (possibly partial) JSON object and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input, or a validation error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("fly_size_px", self.fly_size_px),
            ("speed_px", self.speed_px),
            ("scare_distance_px", self.scare_distance_px),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("offscreen_buffer_px", self.offscreen_buffer_px),
            ("wander_spread_deg", self.wander_spread_deg),
            ("flee_spread_deg", self.flee_spread_deg),
            ("fade_in_delay_ms", self.fade_in_delay_ms),
            ("fade_in_ms", self.fade_in_ms),
            ("fade_out_ms", self.fade_out_ms),
        ] {
            non_negative(field, value)?;
        }
        for (field, value) in [("turn_probability", self.turn_probability), ("center_blend", self.center_blend)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotProbability { field, value });
            }
        }
        self.first_appearance.validate("first_appearance")?;
        self.next_appearance.validate("next_appearance")?;
        self.primary_active.validate("primary_active")?;
        self.stationary.validate("stationary")?;
        self.moving.validate("moving")?;
        self.extra_lifetime.validate("extra_lifetime")?;
        Ok(())
    }
}

/// Theme toggle parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub body_class: String,
    pub button_id: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_owned(),
            body_class: "dark-mode".to_owned(),
            button_id: "dark-mode-toggle".to_owned(),
        }
    }
}
