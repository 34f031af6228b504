//! Errors that degrade a screen line to its degenerate form for one frame.

use bevy::prelude::*;
use thiserror::Error;

/// Which end of the connector a target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Endpoint {
    A,
    B,
}

/// Reasons a frame's line could not be composed.
///
/// None of these are fatal. The line collapses to three origin points for the frame and the
/// next frame starts from scratch.
#[derive(Error, Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ScreenLineError {
    /// A handle-style target has no entity, or the entity has no `GlobalTransform`.
    #[error("screen line target {endpoint:?} is not bound to a resolvable entity")]
    UnresolvedHandle { endpoint: Endpoint },
    /// No camera is bound, or the bound camera entity is gone.
    #[error("screen line has no camera bound")]
    NoCameraBound,
    /// The bound camera does not use a perspective projection.
    #[error("screen line camera must use a perspective projection")]
    UnsupportedProjection,
    /// `distance_from_camera` must be finite and strictly positive.
    #[error("screen line distance from camera must be positive, got {0}")]
    InvalidDistance(f32),
}
