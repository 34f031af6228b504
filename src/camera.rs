//! Per-frame camera snapshot and its world-to-viewport projection.

use bevy::prelude::*;

use crate::error::ScreenLineError;

/// Read-only snapshot of a perspective camera for one frame.
///
/// Basis vectors follow Bevy's convention: the camera looks down its local `-Z`, with `+X` to
/// the right and `+Y` up. `vertical_fov` is in radians, matching `PerspectiveProjection::fov`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position:     Vec3,
    pub forward:      Vec3,
    pub right:        Vec3,
    pub up:           Vec3,
    pub vertical_fov: f32,
    pub aspect_ratio: f32,
}

impl CameraState {
    /// Builds a snapshot from a world position and orientation.
    pub fn new(position: Vec3, rotation: Quat, vertical_fov: f32, aspect_ratio: f32) -> Self {
        Self {
            position,
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
            vertical_fov,
            aspect_ratio,
        }
    }

    /// Builds a snapshot of a camera at `position` looking at `target`.
    pub fn looking_at(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        vertical_fov: f32,
        aspect_ratio: f32,
    ) -> Self {
        let transform = Transform::from_translation(position).looking_at(target, up);
        Self::new(position, transform.rotation, vertical_fov, aspect_ratio)
    }

    /// Replaces the vertical field of view with a value given in degrees.
    pub fn with_fov_degrees(mut self, degrees: f32) -> Self {
        self.vertical_fov = degrees.to_radians();
        self
    }

    /// Snapshots a live camera entity.
    ///
    /// The aspect ratio comes from the logical viewport when the camera has one, and from the
    /// projection otherwise (e.g. before the first resize, or in headless apps).
    pub fn from_camera(
        global_transform: &GlobalTransform,
        projection: &Projection,
        camera: Option<&Camera>,
    ) -> Result<Self, ScreenLineError> {
        let Projection::Perspective(perspective) = projection else {
            return Err(ScreenLineError::UnsupportedProjection);
        };

        let aspect_ratio = camera
            .and_then(Camera::logical_viewport_size)
            .filter(|size| size.y > 0.0)
            .map_or(perspective.aspect_ratio, |size| size.x / size.y);

        Ok(Self::new(
            global_transform.translation(),
            global_transform.rotation(),
            perspective.fov,
            aspect_ratio,
        ))
    }

    /// Tangent of half the vertical field of view
    pub fn half_tan_vfov(&self) -> f32 { (self.vertical_fov * 0.5).tan() }

    /// Signed distance of `point` along the camera's forward axis.
    pub fn depth_of(&self, point: Vec3) -> f32 { (point - self.position).dot(self.forward) }

    /// Projects a world point into viewport space.
    ///
    /// `x` and `y` are normalized to `[0, 1]` across the visible frame with the origin at the
    /// bottom-left corner. `z` is the view-space depth along `forward`. Points behind the camera
    /// come out mirrored, as with any perspective divide, and a point at zero depth yields
    /// non-finite coordinates.
    pub fn world_to_viewport(&self, point: Vec3) -> Vec3 {
        let relative = point - self.position;
        let depth = relative.dot(self.forward);

        let half_height = depth * self.half_tan_vfov();
        let half_width = half_height * self.aspect_ratio;

        let norm_x = relative.dot(self.right) / half_width;
        let norm_y = relative.dot(self.up) / half_height;

        Vec3::new(norm_x.mul_add(0.5, 0.5), norm_y.mul_add(0.5, 0.5), depth)
    }
}
