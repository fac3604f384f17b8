//! Map Surface capability interface
//!
//! The playback engine never talks to a map library directly. Whatever draws
//! the map (a browser map, an egui widget, a render thread) implements
//! [`MapSurface`]; the engine only asks it to place a marker, move it, and
//! ease the viewport.

pub mod channel;
pub mod recording;

use crate::animation::interpolation::EasingFunction;
use crate::core::geo::Coordinate;
use crate::Result;
use serde::Serialize;
use std::time::Duration;

pub use channel::ChannelSurface;
pub use recording::RecordingSurface;

/// Opaque id of a marker owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerHandle(pub u64);

/// "Move the viewport to `target` over `duration` using `easing`"
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportEase {
    pub target: Coordinate,
    /// New zoom level, or `None` to keep the current one
    pub zoom: Option<f64>,
    pub duration: Duration,
    pub easing: EasingFunction,
}

impl ViewportEase {
    pub fn to(target: Coordinate, duration: Duration, easing: EasingFunction) -> Self {
        Self {
            target,
            zoom: None,
            duration,
            easing,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

/// Everything the engine can ask of a surface, as data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SurfaceCommand {
    AddMarker {
        marker: MarkerHandle,
        position: Coordinate,
        rotation: f64,
    },
    SetMarkerPose {
        marker: MarkerHandle,
        position: Coordinate,
        rotation: f64,
    },
    RemoveMarker {
        marker: MarkerHandle,
    },
    EaseViewport(ViewportEase),
}

pub trait MapSurface {
    /// Adds the moving marker and returns a handle to it
    fn add_marker(&mut self, position: Coordinate, rotation: f64) -> Result<MarkerHandle>;

    /// Moves a marker and sets its rotation in degrees
    fn set_marker_pose(
        &mut self,
        marker: MarkerHandle,
        position: Coordinate,
        rotation: f64,
    ) -> Result<()>;

    /// Releases a marker. Removing an unknown marker may fail.
    fn remove_marker(&mut self, marker: MarkerHandle) -> Result<()>;

    fn ease_viewport(&mut self, ease: ViewportEase) -> Result<()>;
}

impl<S: MapSurface + ?Sized> MapSurface for Box<S> {
    fn add_marker(&mut self, position: Coordinate, rotation: f64) -> Result<MarkerHandle> {
        (**self).add_marker(position, rotation)
    }

    fn set_marker_pose(
        &mut self,
        marker: MarkerHandle,
        position: Coordinate,
        rotation: f64,
    ) -> Result<()> {
        (**self).set_marker_pose(marker, position, rotation)
    }

    fn remove_marker(&mut self, marker: MarkerHandle) -> Result<()> {
        (**self).remove_marker(marker)
    }

    fn ease_viewport(&mut self, ease: ViewportEase) -> Result<()> {
        (**self).ease_viewport(ease)
    }
}
