use crate::core::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Interpolation trait for values that can be smoothly transitioned
pub trait Interpolatable {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

/// Timing curves a Map Surface applies to a viewport ease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => t * (2.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

impl Default for EasingFunction {
    fn default() -> Self {
        Self::EaseOutQuad
    }
}

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * t
    }

    /// Interpolation with easing function
    pub fn ease(start: f64, end: f64, t: f64, easing: EasingFunction) -> f64 {
        Self::linear(start, end, easing.apply(t))
    }

    /// Planar interpolation of longitude and latitude.
    ///
    /// This is not a great-circle slerp. Route rendering draws straight
    /// lon/lat segments, so the moving marker has to follow the same lines.
    pub fn coordinate(start: &Coordinate, end: &Coordinate, t: f64) -> Coordinate {
        start.lerp(end, t)
    }
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Interpolation::linear(*self, *other, t)
    }
}

impl Interpolatable for Coordinate {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Coordinate::new(
            Interpolation::linear(self.lng, other.lng, t),
            Interpolation::linear(self.lat, other.lat, t),
        )
    }
}
