//! Interactive Cartesian grid with a pan/zoom transform and a function plot.
//!
//! [`ViewTransform`] maps between world and screen coordinates,
//! [`render_scene`] draws one frame of grid, ticks, axes, curve and labels
//! onto a [`Surface`], and [`GestureTracker`] turns pinch/drag input into
//! transform updates.

pub mod colors;
pub mod config;
pub mod curve;
pub mod gesture;
pub mod scene;
pub mod surface;
pub mod transform;

pub use config::{ConfigError, GraphConfig};
pub use curve::{Curve, CurveKind};
pub use gesture::{GestureMode, GestureTracker};
pub use scene::{SceneLayers, SceneStyle, render_scene};
pub use surface::{PainterSurface, RecordingSurface, Surface};
pub use transform::{ViewTransform, ZoomLimits};
