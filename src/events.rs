//! Visibility transitions for screen lines.

use bevy::prelude::*;

/// Fired when a screen line starts drawing after being culled, unresolved or newly spawned.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct ScreenLineShown {
    pub entity: Entity,
}

/// Fired when a drawn screen line collapses, or when its `ScreenLine` is removed while drawn.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct ScreenLineHidden {
    pub entity: Entity,
}
