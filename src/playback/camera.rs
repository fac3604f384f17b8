use crate::core::{config::CameraConfig, geo::Coordinate};
use crate::playback::path::Path;
use crate::surface::ViewportEase;

/// Trails the vehicle with a lagged viewport target.
///
/// Each tick the target closes a fixed share of the gap to a vertex a few
/// points ahead of the vehicle, so the camera anticipates turns without
/// jumping.
#[derive(Debug, Clone)]
pub struct CameraFollower {
    config: CameraConfig,
    target: Option<Coordinate>,
}

impl CameraFollower {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            target: None,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn target(&self) -> Option<Coordinate> {
        self.target
    }

    /// Snaps the target to `start` and returns the intro move toward it.
    pub fn reset(&mut self, start: Coordinate) -> ViewportEase {
        self.target = Some(start);
        ViewportEase::to(start, self.config.intro_duration(), self.config.intro_easing)
            .with_zoom(self.config.intro_zoom)
    }

    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Vertex the camera aims at while the vehicle is on `segment_index`.
    /// Within `look_ahead_span` vertices of the end this is the destination.
    pub fn look_ahead(&self, path: &Path, segment_index: usize) -> Coordinate {
        let index = segment_index
            .saturating_add(self.config.look_ahead_span)
            .min(path.last_index());
        path.coordinates()[index]
    }

    /// Advances the smoothed target one tick and returns the viewport ease.
    pub fn follow(&mut self, path: &Path, segment_index: usize) -> ViewportEase {
        let look_ahead = self.look_ahead(path, segment_index);
        let current = self.target.unwrap_or_else(|| path.start());
        let next = current.approach(&look_ahead, self.config.smoothing_factor);
        self.target = Some(next);
        ViewportEase::to(next, self.config.ease_duration(), self.config.easing)
    }
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
