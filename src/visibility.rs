//! Front/back culling for screen lines.

use bevy::prelude::*;

use crate::camera::CameraState;

/// How strictly a line's endpoints must be in view for the line to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CullMode {
    /// Both endpoints lie in the camera's forward half-space. Cheap, and keeps callouts to
    /// off-screen targets visible.
    #[default]
    ForwardHalfSpace,
    /// Both endpoints are in front of the camera and inside the visible frame.
    ViewFrustum,
}

/// Returns true when the line between `a` and `b` should be drawn.
///
/// A point exactly on the camera's focal plane counts as in front.
pub fn is_visible(camera: &CameraState, a: Vec3, b: Vec3, mode: CullMode) -> bool {
    let in_front = camera.depth_of(a) >= 0.0 && camera.depth_of(b) >= 0.0;

    match mode {
        CullMode::ForwardHalfSpace => in_front,
        CullMode::ViewFrustum => in_front && in_frame(camera, a) && in_frame(camera, b),
    }
}

fn in_frame(camera: &CameraState, point: Vec3) -> bool {
    let viewport = camera.world_to_viewport(point);
    (0.0..=1.0).contains(&viewport.x) && (0.0..=1.0).contains(&viewport.y)
}
