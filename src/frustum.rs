//! Rectangular plane spanning the camera's field of view at a fixed distance.

use bevy::prelude::*;

use crate::camera::CameraState;

/// The slice of the view frustum at `distance` in front of the camera.
///
/// Only three anchors are stored; the fourth corner is implied because the plane is a
/// rectangle perpendicular to the camera's forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumPlane {
    pub bottom_left:  Vec3,
    pub bottom_right: Vec3,
    pub top_left:     Vec3,
    pub width:        f32,
    pub height:       f32,
}

impl FrustumPlane {
    /// Builds the plane `distance` units in front of `camera`.
    ///
    /// `distance` must be strictly positive; callers validate it before building.
    pub fn build(camera: &CameraState, distance: f32) -> Self {
        let height = 2.0 * distance * camera.half_tan_vfov();
        let width = height * camera.aspect_ratio;

        let bottom_left = camera.position + camera.forward * distance
            - camera.right * (width * 0.5)
            - camera.up * (height * 0.5);

        Self {
            bottom_left,
            bottom_right: bottom_left + camera.right * width,
            top_left: bottom_left + camera.up * height,
            width,
            height,
        }
    }

    pub fn top_right(&self) -> Vec3 { self.bottom_right + (self.top_left - self.bottom_left) }

    pub fn center(&self) -> Vec3 { (self.bottom_right + self.top_left) * 0.5 }

    /// Corners in winding order, starting bottom-left and going counter-clockwise as seen
    /// from the camera.
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.bottom_left,
            self.bottom_right,
            self.top_right(),
            self.top_left,
        ]
    }
}
