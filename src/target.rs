//! Endpoint references and their resolution to world positions.

use bevy::prelude::*;

use crate::error::Endpoint;
use crate::error::ScreenLineError;

/// What a screen line endpoint is attached to.
///
/// Handle variants hold `None` while unbound; resolving an unbound handle is an error rather
/// than a fallback to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ScreenLineTarget {
    /// A scene object, followed through its `GlobalTransform`.
    Object(Option<Entity>),
    /// A positional node, followed through its `GlobalTransform`.
    Transform(Option<Entity>),
    /// A fixed world-space position.
    WorldPosition(Vec3),
}

impl Default for ScreenLineTarget {
    fn default() -> Self { Self::Object(None) }
}

impl From<Vec3> for ScreenLineTarget {
    fn from(position: Vec3) -> Self { Self::WorldPosition(position) }
}

impl From<Entity> for ScreenLineTarget {
    fn from(entity: Entity) -> Self { Self::Object(Some(entity)) }
}

impl ScreenLineTarget {
    /// The entity this target follows, if it is a bound handle.
    pub const fn entity(&self) -> Option<Entity> {
        match self {
            Self::Object(entity) | Self::Transform(entity) => *entity,
            Self::WorldPosition(_) => None,
        }
    }

    /// Resolves this target to a world position for the current frame.
    ///
    /// `lookup` returns the current world position of an entity, or `None` when the entity
    /// cannot be found.
    pub fn resolve(
        &self,
        endpoint: Endpoint,
        lookup: impl Fn(Entity) -> Option<Vec3>,
    ) -> Result<Vec3, ScreenLineError> {
        match self {
            Self::Object(handle) | Self::Transform(handle) => handle
                .and_then(lookup)
                .ok_or(ScreenLineError::UnresolvedHandle { endpoint }),
            Self::WorldPosition(position) => Ok(*position),
        }
    }
}
