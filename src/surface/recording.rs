//! Headless surface that records every command it receives.

use super::{MapSurface, MarkerHandle, SurfaceCommand, ViewportEase};
use crate::core::geo::Coordinate;
use crate::{Error, Result};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    markers: HashMap<MarkerHandle, (Coordinate, f64)>,
    next_marker: u64,
    /// When set, every marker removal fails
    fail_removals: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `remove_marker` fail, as a surface torn down underneath the
    /// engine would.
    pub fn failing_removals(mut self) -> Self {
        self.fail_removals = true;
        self
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Markers currently on the surface, with their last pose
    pub fn live_markers(&self) -> &HashMap<MarkerHandle, (Coordinate, f64)> {
        &self.markers
    }

    pub fn marker_pose(&self, marker: MarkerHandle) -> Option<(Coordinate, f64)> {
        self.markers.get(&marker).copied()
    }

    pub fn viewport_eases(&self) -> impl Iterator<Item = &ViewportEase> {
        self.commands.iter().filter_map(|command| match command {
            SurfaceCommand::EaseViewport(ease) => Some(ease),
            _ => None,
        })
    }

    /// Positions from every pose update, in order
    pub fn marker_trail(&self) -> Vec<Coordinate> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                SurfaceCommand::SetMarkerPose { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, position: Coordinate, rotation: f64) -> Result<MarkerHandle> {
        self.next_marker += 1;
        let marker = MarkerHandle(self.next_marker);
        self.markers.insert(marker, (position, rotation));
        self.commands.push(SurfaceCommand::AddMarker {
            marker,
            position,
            rotation,
        });
        Ok(marker)
    }

    fn set_marker_pose(
        &mut self,
        marker: MarkerHandle,
        position: Coordinate,
        rotation: f64,
    ) -> Result<()> {
        let pose = self
            .markers
            .get_mut(&marker)
            .ok_or_else(|| Error::Surface(format!("unknown marker {marker:?}")))?;
        *pose = (position, rotation);
        self.commands.push(SurfaceCommand::SetMarkerPose {
            marker,
            position,
            rotation,
        });
        Ok(())
    }

    fn remove_marker(&mut self, marker: MarkerHandle) -> Result<()> {
        if self.fail_removals {
            return Err(Error::Surface(format!("marker {marker:?} is gone")));
        }
        if self.markers.remove(&marker).is_none() {
            return Err(Error::Surface(format!("marker {marker:?} already removed")));
        }
        self.commands.push(SurfaceCommand::RemoveMarker { marker });
        Ok(())
    }

    fn ease_viewport(&mut self, ease: ViewportEase) -> Result<()> {
        self.commands.push(SurfaceCommand::EaseViewport(ease));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::interpolation::EasingFunction;
    use std::time::Duration;

    #[test]
    fn test_marker_lifecycle() {
        let mut surface = RecordingSurface::new();
        let marker = surface.add_marker(Coordinate::new(1.0, 2.0), 45.0).unwrap();
        surface
            .set_marker_pose(marker, Coordinate::new(1.5, 2.5), 90.0)
            .unwrap();
        assert_eq!(
            surface.marker_pose(marker),
            Some((Coordinate::new(1.5, 2.5), 90.0))
        );

        surface.remove_marker(marker).unwrap();
        assert!(surface.live_markers().is_empty());
        assert!(surface.remove_marker(marker).is_err());
        assert_eq!(surface.commands().len(), 3);
    }

    #[test]
    fn test_unknown_marker_pose_fails() {
        let mut surface = RecordingSurface::new();
        assert!(surface
            .set_marker_pose(MarkerHandle(9), Coordinate::default(), 0.0)
            .is_err());
    }

    #[test]
    fn test_viewport_eases_are_recorded() {
        let mut surface = RecordingSurface::new();
        let ease = ViewportEase::to(
            Coordinate::new(3.0, 4.0),
            Duration::from_millis(300),
            EasingFunction::EaseOutQuad,
        );
        surface.ease_viewport(ease).unwrap();
        assert_eq!(surface.viewport_eases().collect::<Vec<_>>(), vec![&ease]);
    }
}
