//! Surface for hosts that render on another thread.
//!
//! Playback state stays on the ticking thread; the render thread only ever
//! sees [`SurfaceCommand`] snapshots pulled from the receiving end.

use super::{MapSurface, MarkerHandle, SurfaceCommand, ViewportEase};
use crate::core::geo::Coordinate;
use crate::{Error, Result};
use crossbeam_channel::{Receiver, Sender, TrySendError};

pub struct ChannelSurface {
    sender: Sender<SurfaceCommand>,
    next_marker: u64,
}

impl ChannelSurface {
    /// Creates a surface and the receiver the render thread drains.
    pub fn unbounded() -> (Self, Receiver<SurfaceCommand>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }

    /// Bounded variant. Once the render thread is `capacity` commands
    /// behind, further commands fail with [`Error::Surface`] instead of
    /// blocking the ticking thread.
    pub fn bounded(capacity: usize) -> (Self, Receiver<SurfaceCommand>) {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        (Self::new(sender), receiver)
    }

    pub fn new(sender: Sender<SurfaceCommand>) -> Self {
        Self {
            sender,
            next_marker: 0,
        }
    }

    fn send(&self, command: SurfaceCommand) -> Result<()> {
        self.sender.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => {
                Error::Surface("render thread is lagging, command dropped".to_string())
            }
            TrySendError::Disconnected(_) => {
                Error::Surface("render thread disconnected".to_string())
            }
        })
    }
}

impl MapSurface for ChannelSurface {
    fn add_marker(&mut self, position: Coordinate, rotation: f64) -> Result<MarkerHandle> {
        self.next_marker += 1;
        let marker = MarkerHandle(self.next_marker);
        self.send(SurfaceCommand::AddMarker {
            marker,
            position,
            rotation,
        })?;
        Ok(marker)
    }

    fn set_marker_pose(
        &mut self,
        marker: MarkerHandle,
        position: Coordinate,
        rotation: f64,
    ) -> Result<()> {
        self.send(SurfaceCommand::SetMarkerPose {
            marker,
            position,
            rotation,
        })
    }

    fn remove_marker(&mut self, marker: MarkerHandle) -> Result<()> {
        self.send(SurfaceCommand::RemoveMarker { marker })
    }

    fn ease_viewport(&mut self, ease: ViewportEase) -> Result<()> {
        self.send(SurfaceCommand::EaseViewport(ease))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_cross_threads() {
        let (mut surface, receiver) = ChannelSurface::unbounded();
        let renderer = std::thread::spawn(move || receiver.iter().collect::<Vec<_>>());

        let marker = surface.add_marker(Coordinate::new(1.0, 1.0), 0.0).unwrap();
        surface
            .set_marker_pose(marker, Coordinate::new(1.0, 1.1), 0.0)
            .unwrap();
        surface.remove_marker(marker).unwrap();
        drop(surface);

        let received = renderer.join().unwrap();
        assert_eq!(received.len(), 3);
        assert_eq!(received[2], SurfaceCommand::RemoveMarker { marker });
    }

    #[test]
    fn test_full_channel_fails_without_blocking() {
        let (mut surface, receiver) = ChannelSurface::bounded(2);
        let marker = surface.add_marker(Coordinate::default(), 0.0).unwrap();
        surface
            .set_marker_pose(marker, Coordinate::new(0.0, 0.1), 0.0)
            .unwrap();
        assert!(matches!(
            surface.set_marker_pose(marker, Coordinate::new(0.0, 0.2), 0.0),
            Err(Error::Surface(_))
        ));
        assert_eq!(receiver.len(), 2);
    }

    #[test]
    fn test_lagging_renderer_does_not_stall_playback() {
        use crate::core::config::PlaybackOptions;
        use crate::playback::{PlaybackController, TickOutcome};

        let (surface, receiver) = ChannelSurface::bounded(2);
        let mut controller = PlaybackController::new(surface, PlaybackOptions::default()).unwrap();
        let id = controller
            .start_coordinates(vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)])
            .unwrap();

        // Marker and intro ease fill the channel; nothing drains it
        assert_eq!(controller.tick(id, 0.0), TickOutcome::WarmUp);
        for frame in 1..=10 {
            let outcome = controller.tick(id, frame as f64 * 16.0);
            assert!(matches!(outcome, TickOutcome::Advanced(_)));
        }
        assert_eq!(receiver.len(), 2);
    }

    #[test]
    fn test_disconnected_renderer_is_an_error() {
        let (mut surface, receiver) = ChannelSurface::bounded(4);
        drop(receiver);
        assert!(matches!(
            surface.add_marker(Coordinate::default(), 0.0),
            Err(Error::Surface(_))
        ));
    }
}
