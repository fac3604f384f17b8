pub mod camera;
pub mod controller;
#[cfg(feature = "tokio-runtime")]
pub mod driver;
pub mod path;
pub mod session;

// Re-export commonly used types and functions for convenience
pub use camera::CameraFollower;
pub use controller::{PlaybackController, TickOutcome};
pub use path::{Location, Path};
pub use session::{PlaybackSession, PlaybackStatus, PositionUpdate, SessionId};

/// Logs and drops a surface error. Rendering hiccups must not change
/// playback state, and teardown has to survive partial prior cleanup.
pub(crate) fn swallow(context: &str, result: crate::Result<()>) {
    if let Err(err) = result {
        #[cfg(feature = "debug")]
        log::warn!("{} failed: {}", context, err);
        #[cfg(not(feature = "debug"))]
        let _ = (context, err);
    }
}
