pub mod interpolation;

// Re-export commonly used types and functions for convenience
pub use interpolation::{EasingFunction, Interpolatable, Interpolation};
