//! Gizmo drawing for screen lines.
//!
//! Two gizmo groups, following Bevy's `GizmoConfigGroup` pattern:
//! - [`ScreenLineGizmo`] is a ready-made line sink that draws every [`ScreenLinePoints`]. Enabled
//!   by default.
//! - [`ScreenLineDebugGizmo`] shows how each line was built: the frustum plane it was remapped
//!   onto, markers at the remapped points, and the raw endpoints. Disabled by default; toggle via
//!   `GizmoConfigStore::config_mut::<ScreenLineDebugGizmo>().enabled`.

use bevy::prelude::*;

use crate::ScreenLineSystems;
use crate::components::ScreenLineDiagnostics;
use crate::components::ScreenLinePoints;

/// Gizmo config group for the drawn connector lines.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ScreenLineGizmo {}

/// Gizmo config group for screen line construction debugging.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ScreenLineDebugGizmo {}

/// Per-line colour override for the gizmo sink.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct ScreenLineColor(pub Color);

// Length of the markers drawn at each remapped point
const MARKER_LENGTH: f32 = 0.1;

/// Colours and widths used by both gizmo groups
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct ScreenLineVisualizationConfig {
    pub line_color:       Color,
    pub line_width:       f32,
    pub plane_color:      Color,
    pub marker_color:     Color,
    pub endpoint_color:   Color,
    pub debug_line_width: f32,
}

impl Default for ScreenLineVisualizationConfig {
    fn default() -> Self {
        Self {
            line_color:       Color::srgb(1.0, 1.0, 1.0),
            line_width:       2.0,
            plane_color:      Color::srgb(1.0, 1.0, 1.0), // White
            marker_color:     Color::srgb(0.0, 1.0, 1.0), // Cyan
            endpoint_color:   Color::srgb(0.0, 0.0, 1.0), // Blue
            debug_line_width: 1.0,
        }
    }
}

/// Plugin that draws screen lines with gizmos
pub struct ScreenLineVisualizationPlugin;

impl Plugin for ScreenLineVisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<ScreenLineGizmo>()
            .init_gizmo_group::<ScreenLineDebugGizmo>()
            .init_resource::<ScreenLineVisualizationConfig>()
            .add_systems(Startup, init_screen_line_gizmos)
            .add_systems(
                PostUpdate,
                (
                    sync_gizmo_line_widths,
                    (draw_screen_lines, draw_screen_line_debug),
                )
                    .chain()
                    .after(ScreenLineSystems),
            );
    }
}

/// Initialize gizmo configs: the line sink on, debug drawing off
fn init_screen_line_gizmos(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<ScreenLineVisualizationConfig>,
) {
    let (line_config, _) = config_store.config_mut::<ScreenLineGizmo>();
    line_config.enabled = true;
    line_config.line.width = viz_config.line_width;

    let (debug_config, _) = config_store.config_mut::<ScreenLineDebugGizmo>();
    debug_config.enabled = false;
    debug_config.line.width = viz_config.debug_line_width;
    debug_config.depth_bias = -1.0;
}

/// Keeps gizmo line widths in step with the visualization config
fn sync_gizmo_line_widths(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<ScreenLineVisualizationConfig>,
) {
    if !viz_config.is_changed() {
        return;
    }
    config_store.config_mut::<ScreenLineGizmo>().0.line.width = viz_config.line_width;
    config_store.config_mut::<ScreenLineDebugGizmo>().0.line.width = viz_config.debug_line_width;
}

fn draw_screen_lines(
    mut gizmos: Gizmos<ScreenLineGizmo>,
    config: Res<ScreenLineVisualizationConfig>,
    lines: Query<(&ScreenLinePoints, Option<&ScreenLineColor>)>,
) {
    for (points, color) in &lines {
        if points.is_degenerate() {
            continue;
        }
        let color = color.map_or(config.line_color, |color| color.0);
        gizmos.linestrip(points.points().iter().copied(), color);
    }
}

/// Draws the frustum plane, remapped points and raw endpoints of every line
fn draw_screen_line_debug(
    mut gizmos: Gizmos<ScreenLineDebugGizmo>,
    config: Res<ScreenLineVisualizationConfig>,
    lines: Query<&ScreenLineDiagnostics>,
) {
    for diagnostics in &lines {
        if let Some(corners) = diagnostics.plane_corners {
            for i in 0..4 {
                let next = (i + 1) % 4;
                gizmos.line(corners[i], corners[next], config.plane_color);
            }
        }

        if let Some(remapped) = diagnostics.remapped {
            for point in remapped {
                gizmos.ray(point, Vec3::Y * MARKER_LENGTH, config.marker_color);
            }
        }

        let Some((a, b)) = diagnostics.endpoints else {
            continue;
        };
        gizmos.line(a, b, config.endpoint_color);
        if let Some(camera_position) = diagnostics.camera_position {
            gizmos.line(camera_position, a.lerp(b, 0.5), config.endpoint_color);
        }
    }
}
