//! Tokio frame clock for hosts without a display-refresh callback.
//!
//! Headless hosts (the CLI, servers, tests) have no requestAnimationFrame.
//! [`FrameClock`] stands in for it: it wakes at a target frame rate and
//! reports millisecond timestamps since it was created. Frames the host was
//! too busy to take are skipped, not replayed, just like a real display.

use crate::playback::controller::{PlaybackController, TickOutcome};
use crate::playback::session::{PositionUpdate, SessionId};
use crate::surface::MapSurface;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

pub struct FrameClock {
    interval: Interval,
    origin: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            origin: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Waits for the next frame and returns its timestamp in milliseconds.
    pub async fn next_frame(&mut self) -> f64 {
        let at = self.interval.tick().await;
        at.saturating_duration_since(self.origin).as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Ticks `session` on every frame until its chain stops, handing each
/// position update to `on_update`. Returns the outcome that ended the chain.
pub async fn run_to_completion<S, F>(
    controller: &mut PlaybackController<S>,
    session: SessionId,
    clock: &mut FrameClock,
    mut on_update: F,
) -> TickOutcome
where
    S: MapSurface,
    F: FnMut(&PositionUpdate),
{
    loop {
        let now = clock.next_frame().await;
        let outcome = controller.tick(session, now);
        if let Some(update) = outcome.position_update() {
            on_update(update);
        }
        if !outcome.should_continue() {
            #[cfg(feature = "debug")]
            log::debug!("{} tick chain ended with {:?}", session, outcome);
            return outcome;
        }
    }
}
