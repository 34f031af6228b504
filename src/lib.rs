// bevy_screen_line
// Screen-anchored connector lines for Bevy:
// - Endpoints follow entities or fixed world positions
// - Lines are remapped onto a plane at a fixed distance in front of a camera
// - Right-angled or straight connectors, culled when a target is behind the camera

use bevy::prelude::*;
use bevy::transform::TransformSystems;

mod camera;
mod components;
mod compose;
mod error;
mod events;
mod frustum;
pub mod prelude;
mod systems;
mod target;
mod viewport;
mod visibility;
#[cfg(feature = "visualization")]
mod visualization;

// Public API - Components
pub use components::ScreenLine;
pub use components::ScreenLineDiagnostics;
pub use components::ScreenLinePoints;

// Public API - Configuration types
pub use compose::DEFAULT_DISTANCE_FROM_CAMERA;
pub use compose::LineSettings;
pub use compose::LineStyle;
pub use target::ScreenLineTarget;
pub use visibility::CullMode;

// Public API - Geometry (usable without the ECS layer)
pub use camera::CameraState;
pub use compose::LineOutcome;
pub use compose::RenderedLine;
pub use compose::compose_line;
pub use frustum::FrustumPlane;
pub use viewport::right_angle_elbow;
pub use viewport::viewport_to_plane;
pub use visibility::is_visible;

// Public API - Errors
pub use error::Endpoint;
pub use error::ScreenLineError;

// Public API - Events
pub use events::ScreenLineHidden;
pub use events::ScreenLineShown;

// Public API - Visualization
#[cfg(feature = "visualization")]
pub use visualization::ScreenLineColor;
#[cfg(feature = "visualization")]
pub use visualization::ScreenLineDebugGizmo;
#[cfg(feature = "visualization")]
pub use visualization::ScreenLineGizmo;
#[cfg(feature = "visualization")]
pub use visualization::ScreenLineVisualizationConfig;
#[cfg(feature = "visualization")]
pub use visualization::ScreenLineVisualizationPlugin;

// Internal - used by plugin, not for external use
use systems::on_screen_line_added;
use systems::on_screen_line_removed;
use systems::update_screen_lines;

/// System set that recomposes screen lines each frame.
///
/// Runs in `PostUpdate` after transform propagation. Order line sinks `.after` this set.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenLineSystems;

/// Plugin that keeps every `ScreenLine` anchored to its camera
pub struct ScreenLinePlugin;

impl Plugin for ScreenLinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ScreenLine>()
            .register_type::<ScreenLinePoints>()
            .register_type::<ScreenLineDiagnostics>()
            // Register observers for component lifecycle events
            .add_observer(on_screen_line_added)
            .add_observer(on_screen_line_removed)
            .configure_sets(
                PostUpdate,
                ScreenLineSystems.after(TransformSystems::Propagate),
            )
            .add_systems(PostUpdate, update_screen_lines.in_set(ScreenLineSystems));
    }
}
