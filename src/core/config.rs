//! Configuration system for route playback tuning
//!
//! Options are grouped the same way the engine is: how fast the vehicle
//! moves along the path, and how the camera trails it. Presets resolve to a
//! full option tree, and every struct deserializes with defaults so partial
//! JSON files work.

use crate::animation::interpolation::EasingFunction;
use crate::core::constants::{
    BASE_SPEED_KMH, CAMERA_EASE_DURATION_MS, CAMERA_SMOOTHING_FACTOR, INTRO_DURATION_MS,
    INTRO_ZOOM, KMH_TO_MPS, LOOK_AHEAD_SPAN,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackProfile {
    /// 100 km/h, two-point look-ahead, 300 ms camera eases
    Reference,
    /// Slower vehicle, lazier camera
    Cinematic,
    /// Faster vehicle, tighter camera, capped frame deltas
    Brisk,
    Custom(PlaybackOptions),
}

impl PlaybackProfile {
    pub fn resolve(&self) -> PlaybackOptions {
        match self {
            Self::Reference => PlaybackOptions::default(),
            Self::Cinematic => PlaybackOptions {
                playback: PlaybackConfig {
                    base_speed_kmh: 60.0,
                    ..PlaybackConfig::default()
                },
                camera: CameraConfig {
                    look_ahead_span: 3,
                    smoothing_factor: 0.03,
                    ease_duration_ms: 500,
                    easing: EasingFunction::EaseInOutQuad,
                    intro_zoom: 16.0,
                    intro_duration_ms: 3000,
                    ..CameraConfig::default()
                },
            },
            Self::Brisk => PlaybackOptions {
                playback: PlaybackConfig {
                    base_speed_kmh: 160.0,
                    max_frame_delta_ms: Some(250.0),
                    ..PlaybackConfig::default()
                },
                camera: CameraConfig {
                    look_ahead_span: 1,
                    smoothing_factor: 0.12,
                    ease_duration_ms: 150,
                    easing: EasingFunction::EaseOutCubic,
                    intro_zoom: 14.0,
                    intro_duration_ms: 1000,
                    ..CameraConfig::default()
                },
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for PlaybackProfile {
    fn default() -> Self {
        Self::Reference
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    pub playback: PlaybackConfig,
    pub camera: CameraConfig,
}

impl PlaybackOptions {
    /// Loads options from a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        self.playback.validate()?;
        self.camera.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Vehicle speed at a 1x multiplier
    pub base_speed_kmh: f64,
    pub default_speed_multiplier: f64,
    pub min_speed_multiplier: f64,
    pub max_speed_multiplier: f64,
    /// Added to the travel heading before it reaches the marker
    pub marker_rotation_offset_deg: f64,
    /// Upper bound for a single tick's delta; `None` integrates any gap
    pub max_frame_delta_ms: Option<f64>,
}

impl PlaybackConfig {
    /// Speed in meters per second for the given multiplier
    pub fn speed_mps(&self, multiplier: f64) -> f64 {
        self.base_speed_kmh * multiplier * KMH_TO_MPS
    }

    /// Clamps a requested multiplier into the configured range.
    pub fn clamp_multiplier(&self, multiplier: f64) -> f64 {
        multiplier.clamp(self.min_speed_multiplier, self.max_speed_multiplier)
    }

    fn validate(&self) -> Result<()> {
        if !(self.base_speed_kmh.is_finite() && self.base_speed_kmh > 0.0) {
            return Err(Error::Config(format!(
                "base_speed_kmh must be positive, got {}",
                self.base_speed_kmh
            )));
        }
        if !(self.min_speed_multiplier > 0.0 && self.min_speed_multiplier <= self.max_speed_multiplier)
        {
            return Err(Error::Config(format!(
                "speed multiplier range [{}, {}] is empty or non-positive",
                self.min_speed_multiplier, self.max_speed_multiplier
            )));
        }
        if !(self.min_speed_multiplier..=self.max_speed_multiplier)
            .contains(&self.default_speed_multiplier)
        {
            return Err(Error::Config(format!(
                "default_speed_multiplier {} is outside [{}, {}]",
                self.default_speed_multiplier, self.min_speed_multiplier, self.max_speed_multiplier
            )));
        }
        if let Some(cap) = self.max_frame_delta_ms {
            if !(cap > 0.0) {
                return Err(Error::Config(format!(
                    "max_frame_delta_ms must be positive, got {cap}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_speed_kmh: BASE_SPEED_KMH,
            default_speed_multiplier: 1.0,
            min_speed_multiplier: 0.25,
            max_speed_multiplier: 16.0,
            marker_rotation_offset_deg: 0.0,
            max_frame_delta_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub look_ahead_span: usize,
    /// Share of the remaining gap closed per tick, in (0, 1)
    pub smoothing_factor: f64,
    pub ease_duration_ms: u64,
    pub easing: EasingFunction,
    pub intro_zoom: f64,
    pub intro_duration_ms: u64,
    pub intro_easing: EasingFunction,
}

impl CameraConfig {
    pub fn ease_duration(&self) -> Duration {
        Duration::from_millis(self.ease_duration_ms)
    }

    pub fn intro_duration(&self) -> Duration {
        Duration::from_millis(self.intro_duration_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.look_ahead_span == 0 {
            return Err(Error::Config("look_ahead_span must be at least 1".to_string()));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor < 1.0) {
            return Err(Error::Config(format!(
                "smoothing_factor must lie in (0, 1), got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_ahead_span: LOOK_AHEAD_SPAN,
            smoothing_factor: CAMERA_SMOOTHING_FACTOR,
            ease_duration_ms: CAMERA_EASE_DURATION_MS,
            easing: EasingFunction::EaseOutQuad,
            intro_zoom: INTRO_ZOOM,
            intro_duration_ms: INTRO_DURATION_MS,
            intro_easing: EasingFunction::EaseInOutQuad,
        }
    }
}
