/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 180.0;

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [960.0, 640.0];

/// Range offered for the power curve's exponent.
pub const EXPONENT_RANGE: std::ops::RangeInclusive<f32> = -5.0..=5.0;

/// Largest width or height accepted by `--dump-scene`.
pub const MAX_SCENE_DIMENSION: f32 = 16384.0;
