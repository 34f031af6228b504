//! Per-frame composition of a screen-anchored connector.
//!
//! [`compose_line`] is a pure function of its inputs: the ECS layer snapshots the camera and
//! resolves both endpoints, then hands everything here. No state is carried across calls.

use bevy::prelude::*;

use crate::camera::CameraState;
use crate::error::ScreenLineError;
use crate::frustum::FrustumPlane;
use crate::viewport::right_angle_elbow;
use crate::viewport::viewport_to_plane;
use crate::visibility::CullMode;
use crate::visibility::is_visible;

/// Distance used when a `ScreenLine` does not override it.
pub const DEFAULT_DISTANCE_FROM_CAMERA: f32 = 2.0;

/// Shape of the connector between the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LineStyle {
    /// Horizontal run from A to B's column, then vertical to B.
    #[default]
    RightAngled,
    /// Straight segment from A to B.
    SingleLine,
}

/// The three ordered world-space points handed to the line sink.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct RenderedLine(pub [Vec3; 3]);

impl RenderedLine {
    /// Three coincident origin points. Draws nothing.
    pub const DEGENERATE: Self = Self([Vec3::ZERO; 3]);

    pub const fn start(&self) -> Vec3 { self.0[0] }

    pub const fn mid(&self) -> Vec3 { self.0[1] }

    pub const fn end(&self) -> Vec3 { self.0[2] }

    pub const fn points(&self) -> &[Vec3; 3] { &self.0 }

    pub fn is_degenerate(&self) -> bool { *self == Self::DEGENERATE }
}

/// Per-instance composition settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSettings {
    pub style:                LineStyle,
    pub distance_from_camera: f32,
    pub cull_mode:            CullMode,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            style:                LineStyle::default(),
            distance_from_camera: DEFAULT_DISTANCE_FROM_CAMERA,
            cull_mode:            CullMode::default(),
        }
    }
}

/// Everything computed for one line in one frame.
///
/// `line` is what the sink draws. The remaining fields are kept for diagnostics and debug
/// drawing, and are `None` when composition stopped before reaching them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOutcome {
    pub line:      RenderedLine,
    pub visible:   bool,
    pub endpoints: Option<(Vec3, Vec3)>,
    pub plane:     Option<FrustumPlane>,
    /// The three remapped points before culling and style selection: `[a, elbow, b]`.
    pub remapped:  Option<[Vec3; 3]>,
    pub error:     Option<ScreenLineError>,
}

impl LineOutcome {
    fn failed(error: ScreenLineError, endpoints: Option<(Vec3, Vec3)>) -> Self {
        Self {
            line: RenderedLine::DEGENERATE,
            visible: false,
            endpoints,
            plane: None,
            remapped: None,
            error: Some(error),
        }
    }
}

/// Composes the screen-anchored polyline for one frame.
///
/// Failures never panic: a missing camera, an unresolved endpoint or an invalid distance all
/// yield the degenerate line, with the reason recorded in [`LineOutcome::error`].
pub fn compose_line(
    camera: Result<CameraState, ScreenLineError>,
    a: Result<Vec3, ScreenLineError>,
    b: Result<Vec3, ScreenLineError>,
    settings: &LineSettings,
) -> LineOutcome {
    let camera = match camera {
        Ok(camera) => camera,
        Err(error) => return LineOutcome::failed(error, a.ok().zip(b.ok())),
    };

    let (a, b) = match (a, b) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(error), _) | (_, Err(error)) => return LineOutcome::failed(error, None),
    };

    let distance = settings.distance_from_camera;
    if !distance.is_finite() || distance <= 0.0 {
        return LineOutcome::failed(ScreenLineError::InvalidDistance(distance), Some((a, b)));
    }

    let plane = FrustumPlane::build(&camera, distance);

    let viewport_a = camera.world_to_viewport(a);
    let viewport_b = camera.world_to_viewport(b);
    let viewport_mid = right_angle_elbow(viewport_a, viewport_b);

    let world_a = viewport_to_plane(viewport_a, &plane);
    let world_mid = viewport_to_plane(viewport_mid, &plane);
    let world_b = viewport_to_plane(viewport_b, &plane);
    let remapped = [world_a, world_mid, world_b];

    // An endpoint on the camera's focal plane has no finite projection.
    let finite = remapped.iter().all(|point| point.is_finite());
    let visible = finite && is_visible(&camera, a, b, settings.cull_mode);

    let line = if visible {
        let second = match settings.style {
            LineStyle::RightAngled => world_mid,
            LineStyle::SingleLine => world_b,
        };
        RenderedLine([world_a, second, world_b])
    } else {
        RenderedLine::DEGENERATE
    };

    trace!(
        "compose_line: viewport a={viewport_a:.3?} b={viewport_b:.3?} mid={viewport_mid:.3?} \
         visible={visible}"
    );

    LineOutcome {
        line,
        visible,
        endpoints: Some((a, b)),
        plane: Some(plane),
        remapped: Some(remapped),
        error: None,
    }
}
