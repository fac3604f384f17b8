use crate::core::{
    config::{PlaybackOptions, PlaybackProfile},
    geo::Coordinate,
    geodesy::normalize_degrees,
};
use crate::playback::{
    camera::CameraFollower,
    path::Path,
    session::{PlaybackSession, PlaybackStatus, PositionUpdate, SessionId},
    swallow,
};
use crate::surface::MapSurface;
use crate::{Error, Result};
use std::sync::Arc;

/// What a tick did, and whether the host should schedule another one
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// First tick of a run (or after a resume): baseline recorded, no motion
    WarmUp,
    Advanced(PositionUpdate),
    /// Session is paused; nothing moved, keep ticking to notice a resume
    Paused,
    /// Timestamp was not a finite number and was ignored
    Skipped,
    /// The vehicle reached the end of the path on this tick
    Finished,
    /// The token is stale, or its session already ended
    Stopped,
}

impl TickOutcome {
    /// True when the host should schedule another tick for this token
    pub fn should_continue(&self) -> bool {
        matches!(
            self,
            TickOutcome::WarmUp
                | TickOutcome::Advanced(_)
                | TickOutcome::Paused
                | TickOutcome::Skipped
        )
    }

    pub fn position_update(&self) -> Option<&PositionUpdate> {
        match self {
            TickOutcome::Advanced(update) => Some(update),
            _ => None,
        }
    }
}

/// Drives one vehicle along the loaded route.
///
/// The host calls [`tick`](Self::tick) once per rendered frame with a
/// millisecond timestamp and the token returned by `start`. Distance, not
/// position, is integrated, so speed changes and uneven frame intervals
/// never cause jumps. At most one session exists at a time; starting again
/// tears the previous one down and invalidates its token.
pub struct PlaybackController<S: MapSurface> {
    surface: S,
    options: PlaybackOptions,
    camera: CameraFollower,
    route: Option<Arc<Path>>,
    session: Option<PlaybackSession>,
    next_id: SessionId,
    speed_multiplier: f64,
}

impl<S: MapSurface> PlaybackController<S> {
    pub fn new(surface: S, options: PlaybackOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            surface,
            camera: CameraFollower::new(options.camera.clone()),
            speed_multiplier: options.playback.default_speed_multiplier,
            options,
            route: None,
            session: None,
            next_id: SessionId::first(),
        })
    }

    pub fn with_profile(surface: S, profile: PlaybackProfile) -> Result<Self> {
        Self::new(surface, profile.resolve())
    }

    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(mut self) -> S {
        self.cancel();
        self.surface
    }

    pub fn camera(&self) -> &CameraFollower {
        &self.camera
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn route(&self) -> Option<&Arc<Path>> {
        self.route.as_ref()
    }

    /// `Idle` until the first `start`, then the current session's status
    pub fn status(&self) -> PlaybackStatus {
        self.session
            .as_ref()
            .map(|s| s.status)
            .unwrap_or(PlaybackStatus::Idle)
    }

    pub fn is_running(&self) -> bool {
        self.status() == PlaybackStatus::Running
    }

    /// Id of the current session, whatever its status
    pub fn active_session(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Replaces the route used by the next `start`. A running session keeps
    /// the path it started with.
    pub fn set_route(&mut self, path: impl Into<Arc<Path>>) {
        self.route = Some(path.into());
    }

    pub fn clear_route(&mut self) {
        self.route = None;
    }

    /// Starts playback of the loaded route and returns the token ticks must
    /// carry.
    ///
    /// Fails with [`Error::EmptyPath`] and changes nothing when no route has
    /// been loaded. An existing session is torn down first.
    pub fn start(&mut self) -> Result<SessionId> {
        let path = self.route.clone().ok_or(Error::EmptyPath)?;

        if let Some(previous) = self.session.take() {
            #[cfg(feature = "debug")]
            log::debug!("replacing {} ({})", previous.id, previous.status);
            self.release(previous);
        }

        let id = self.next_id;
        self.next_id = id.next();

        let start = path.start();
        let rotation = self.marker_rotation(path.segment_heading(0));
        let marker = self.surface.add_marker(start, rotation)?;
        let intro = self.camera.reset(start);
        swallow("intro viewport ease", self.surface.ease_viewport(intro));

        let mut session = PlaybackSession::new(id, path, self.speed_multiplier);
        session.marker = Some(marker);

        #[cfg(feature = "debug")]
        log::info!(
            "{} started: {} points, {:.0} m at {}x",
            id,
            session.path.len(),
            session.path.total_length(),
            self.speed_multiplier
        );

        self.session = Some(session);
        Ok(id)
    }

    /// Loads `path` and starts it.
    pub fn start_path(&mut self, path: impl Into<Arc<Path>>) -> Result<SessionId> {
        self.set_route(path);
        self.start()
    }

    /// Builds a path from raw route coordinates and starts it.
    pub fn start_coordinates(&mut self, coordinates: Vec<Coordinate>) -> Result<SessionId> {
        if coordinates.is_empty() {
            return Err(Error::EmptyPath);
        }
        let path = Path::new(coordinates)?;
        self.start_path(path)
    }

    /// Advances `session` to the frame timestamp `now_ms`.
    pub fn tick(&mut self, session: SessionId, now_ms: f64) -> TickOutcome {
        let current = match self.session.as_mut() {
            Some(current) if current.id == session => current,
            _ => {
                #[cfg(feature = "debug")]
                log::debug!("{} is no longer active, stopping its tick chain", session);
                return TickOutcome::Stopped;
            }
        };

        match current.status {
            PlaybackStatus::Running => {}
            PlaybackStatus::Paused => return TickOutcome::Paused,
            _ => return TickOutcome::Stopped,
        }

        if !now_ms.is_finite() {
            return TickOutcome::Skipped;
        }

        current.ticks += 1;
        let last = match current.last_timestamp.replace(now_ms) {
            Some(last) => last,
            None => return TickOutcome::WarmUp,
        };

        // Host clocks are not guaranteed monotonic; never run backwards
        let mut delta_ms = (now_ms - last).max(0.0);
        if let Some(cap) = self.options.playback.max_frame_delta_ms {
            delta_ms = delta_ms.min(cap);
        }
        let speed_mps = self.options.playback.speed_mps(current.speed_multiplier);
        current.distance_traveled += delta_ms / 1000.0 * speed_mps;

        if current.distance_traveled >= current.path.total_length() {
            current.status = PlaybackStatus::Finished;
            #[cfg(feature = "debug")]
            log::info!(
                "{} finished after {} ticks ({:.0} m)",
                current.id,
                current.ticks,
                current.distance_traveled
            );
            return TickOutcome::Finished;
        }

        let location = current.path.locate(current.distance_traveled);
        let rotation = normalize_degrees(
            location.heading + self.options.playback.marker_rotation_offset_deg,
        );
        if let Some(marker) = current.marker {
            swallow(
                "marker pose",
                self.surface
                    .set_marker_pose(marker, location.position, rotation),
            );
        }
        let ease = self.camera.follow(&current.path, location.segment_index);
        swallow("camera ease", self.surface.ease_viewport(ease));

        TickOutcome::Advanced(PositionUpdate {
            session: current.id,
            position: location.position,
            heading: location.heading,
            segment_index: location.segment_index,
            segment_progress: location.segment_progress,
            distance_traveled: current.distance_traveled,
        })
    }

    /// Ticks whichever session is current.
    pub fn tick_active(&mut self, now_ms: f64) -> TickOutcome {
        match self.active_session() {
            Some(id) => self.tick(id, now_ms),
            None => TickOutcome::Stopped,
        }
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Changes the speed from the next tick on.
    ///
    /// Any positive finite multiplier is accepted. Values outside
    /// `[min_speed_multiplier, max_speed_multiplier]` are clamped into that
    /// range rather than rejected, and the multiplier actually applied is
    /// returned. Zero, negative and non-finite values fail with
    /// [`Error::Config`].
    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> Result<f64> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(Error::Config(format!(
                "speed multiplier must be a positive number, got {multiplier}"
            )));
        }
        let applied = self.options.playback.clamp_multiplier(multiplier);
        self.speed_multiplier = applied;
        if let Some(session) = self.session.as_mut() {
            session.speed_multiplier = applied;
        }
        #[cfg(feature = "debug")]
        log::debug!("speed multiplier set to {}x", applied);
        Ok(applied)
    }

    /// Puts the multiplier back to its default. Playback keeps going.
    pub fn reset_speed(&mut self) -> f64 {
        let default = self.options.playback.default_speed_multiplier;
        self.speed_multiplier = default;
        if let Some(session) = self.session.as_mut() {
            session.speed_multiplier = default;
        }
        default
    }

    /// Freezes the vehicle where it is. Returns false unless it was running.
    pub fn pause(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) if session.status == PlaybackStatus::Running => {
                session.status = PlaybackStatus::Paused;
                #[cfg(feature = "debug")]
                log::debug!("{} paused at {:.0} m", session.id, session.distance_traveled);
                true
            }
            _ => false,
        }
    }

    /// Continues a paused session. The next tick is a warm-up again, so
    /// the time spent paused is not integrated.
    pub fn resume(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) if session.status == PlaybackStatus::Paused => {
                session.status = PlaybackStatus::Running;
                session.last_timestamp = None;
                #[cfg(feature = "debug")]
                log::debug!("{} resumed", session.id);
                true
            }
            _ => false,
        }
    }

    /// Stops the current session and releases its marker.
    ///
    /// Idempotent: cancelling a finished, cancelled or missing session does
    /// nothing.
    pub fn cancel(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.status.is_terminal() {
            return;
        }
        session.status = PlaybackStatus::Cancelled;
        if let Some(marker) = session.marker.take() {
            swallow("marker removal", self.surface.remove_marker(marker));
        }
        self.camera.clear();
        #[cfg(feature = "debug")]
        log::info!("{} cancelled", session.id);
    }

    fn release(&mut self, mut session: PlaybackSession) {
        if let Some(marker) = session.marker.take() {
            swallow("marker removal", self.surface.remove_marker(marker));
        }
    }

    fn marker_rotation(&self, heading: f64) -> f64 {
        normalize_degrees(heading + self.options.playback.marker_rotation_offset_deg)
    }
}
