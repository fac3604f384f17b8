use crate::core::geo::Coordinate;
use crate::playback::path::Path;
use crate::surface::MarkerHandle;
use instant::Instant;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlaybackStatus {
    Idle,
    Running,
    Paused,
    Finished,
    Cancelled,
}

impl PlaybackStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PlaybackStatus::Finished | PlaybackStatus::Cancelled)
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackStatus::Idle => write!(f, "idle"),
            PlaybackStatus::Running => write!(f, "running"),
            PlaybackStatus::Paused => write!(f, "paused"),
            PlaybackStatus::Finished => write!(f, "finished"),
            PlaybackStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Identity token handed out by `start`. A scheduled tick carries the token
/// it was scheduled with, so a chain from a replaced session can tell it is
/// stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn first() -> Self {
        SessionId(1)
    }

    pub(crate) fn next(self) -> Self {
        SessionId(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Emitted on every tick that advances the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionUpdate {
    pub session: SessionId,
    pub position: Coordinate,
    pub heading: f64,
    pub segment_index: usize,
    pub segment_progress: f64,
    pub distance_traveled: f64,
}

/// Mutable state of one run along one path
#[derive(Debug)]
pub struct PlaybackSession {
    pub(crate) id: SessionId,
    pub(crate) path: Arc<Path>,
    pub(crate) distance_traveled: f64,
    pub(crate) speed_multiplier: f64,
    pub(crate) status: PlaybackStatus,
    /// `None` until the warm-up tick records a baseline
    pub(crate) last_timestamp: Option<f64>,
    pub(crate) marker: Option<MarkerHandle>,
    pub(crate) ticks: u64,
    started_at: Instant,
}

impl PlaybackSession {
    pub(crate) fn new(id: SessionId, path: Arc<Path>, speed_multiplier: f64) -> Self {
        Self {
            id,
            path,
            distance_traveled: 0.0,
            speed_multiplier,
            status: PlaybackStatus::Running,
            last_timestamp: None,
            marker: None,
            ticks: 0,
            started_at: Instant::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Ticks observed so far, the warm-up tick included
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Wall-clock time since `start`, independent of the frame timestamps
    pub fn wall_clock_elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Share of the path covered, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let total = self.path.total_length();
        if total > 0.0 {
            (self.distance_traveled / total).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Remaining distance divided by the current speed, in seconds
    pub fn remaining_seconds(&self, speed_mps: f64) -> f64 {
        let remaining = (self.path.total_length() - self.distance_traveled).max(0.0);
        if speed_mps > 0.0 {
            remaining / speed_mps
        } else {
            f64::INFINITY
        }
    }
}
