//! Components that configure a screen line and carry its per-frame output.

use bevy::prelude::*;

use crate::compose::DEFAULT_DISTANCE_FROM_CAMERA;
use crate::compose::LineSettings;
use crate::compose::LineStyle;
use crate::compose::RenderedLine;
use crate::error::ScreenLineError;
use crate::target::ScreenLineTarget;
use crate::visibility::CullMode;

/// A connector between two targets, anchored at a fixed distance in front of `camera`.
///
/// Spawning this component activates the line: the required [`ScreenLinePoints`] sink and
/// [`ScreenLineDiagnostics`] are inserted alongside it and refreshed every frame. Remove it (or
/// mark the entity `Disabled`) to stop updating.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component, Default)]
#[require(ScreenLinePoints, ScreenLineDiagnostics)]
pub struct ScreenLine {
    pub target_a:             ScreenLineTarget,
    pub target_b:             ScreenLineTarget,
    pub style:                LineStyle,
    /// Distance of the drawing plane along the camera's forward axis. Must be positive.
    pub distance_from_camera: f32,
    /// Camera the line is anchored to. `None` draws nothing.
    pub camera:               Option<Entity>,
    pub cull_mode:            CullMode,
}

impl Default for ScreenLine {
    fn default() -> Self {
        Self {
            target_a:             ScreenLineTarget::default(),
            target_b:             ScreenLineTarget::default(),
            style:                LineStyle::default(),
            distance_from_camera: DEFAULT_DISTANCE_FROM_CAMERA,
            camera:               None,
            cull_mode:            CullMode::default(),
        }
    }
}

impl ScreenLine {
    pub fn new(
        target_a: impl Into<ScreenLineTarget>,
        target_b: impl Into<ScreenLineTarget>,
    ) -> Self {
        Self {
            target_a: target_a.into(),
            target_b: target_b.into(),
            ..default()
        }
    }

    pub const fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub const fn with_distance(mut self, distance_from_camera: f32) -> Self {
        self.distance_from_camera = distance_from_camera;
        self
    }

    pub const fn with_camera(mut self, camera: Entity) -> Self {
        self.camera = Some(camera);
        self
    }

    pub const fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub const fn settings(&self) -> LineSettings {
        LineSettings {
            style:                self.style,
            distance_from_camera: self.distance_from_camera,
            cull_mode:            self.cull_mode,
        }
    }
}

/// The line sink: the three world-space points to draw this frame.
///
/// Degenerate (all zero) when the line is culled or could not be composed.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Default, Deref)]
#[reflect(Component)]
pub struct ScreenLinePoints(pub RenderedLine);

/// What happened to a screen line on its most recent update.
/// Updated every frame for BRP inspection and debug drawing; nothing reads it back into the
/// line computation.
#[derive(Component, Reflect, Debug, Clone, PartialEq, Default)]
#[reflect(Component)]
pub struct ScreenLineDiagnostics {
    pub visible:         bool,
    /// True world positions of A and B, before remapping.
    pub endpoints:       Option<(Vec3, Vec3)>,
    /// Remapped `[a, elbow, b]`, before culling and style selection.
    pub remapped:        Option<[Vec3; 3]>,
    pub plane_corners:   Option<[Vec3; 4]>,
    pub camera_position: Option<Vec3>,
    pub last_error:      Option<ScreenLineError>,
}
