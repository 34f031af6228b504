//! Convenient re-exports for common types

pub use crate::CullMode;
pub use crate::LineStyle;
pub use crate::ScreenLine;
pub use crate::ScreenLineError;
pub use crate::ScreenLineHidden;
pub use crate::ScreenLinePlugin;
pub use crate::ScreenLinePoints;
pub use crate::ScreenLineShown;
pub use crate::ScreenLineSystems;
pub use crate::ScreenLineTarget;
#[cfg(feature = "visualization")]
pub use crate::ScreenLineDebugGizmo;
#[cfg(feature = "visualization")]
pub use crate::ScreenLineVisualizationPlugin;
