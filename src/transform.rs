//! Conversion between world (function-space) coordinates and canvas pixels.
//!
//! World space has Y growing upward; screen space has its origin at the
//! top-left of the canvas with Y growing downward. One world unit spans
//! `unit * zoom` pixels, and the world origin sits at the canvas center
//! shifted by the pan offset.

use eframe::egui::{Pos2, Vec2, pos2};

/// Base grid spacing in pixels at zoom 1.0.
pub const DEFAULT_UNIT: f32 = 50.0;

/// Smallest zoom accepted by default. Keeps the grid stride finite.
pub const DEFAULT_ZOOM_MIN: f32 = 0.05;

/// Largest zoom accepted by default.
pub const DEFAULT_ZOOM_MAX: f32 = 20.0;

/// Smallest on-screen distance between grid lines, in pixels. Bounds the
/// number of grid lines and labels per frame by the canvas size.
pub const MIN_GRID_SPACING: f32 = 2.0;

/// Inclusive bounds a [`ViewTransform`] clamps its zoom into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl ZoomLimits {
    /// Returns `None` unless `0 < min <= max` and both are finite.
    pub fn new(min: f32, max: f32) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min > 0.0 && min <= max).then_some(Self { min, max })
    }

    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }

    /// Raises `min` (and `max` with it, if needed) so that `unit * zoom`
    /// never drops below [`MIN_GRID_SPACING`].
    pub fn floored_for(self, unit: f32) -> Self {
        let floor = MIN_GRID_SPACING / unit;
        if self.min >= floor {
            return self;
        }
        log::warn!(
            "Raising minimum zoom from {} to {floor} to keep grid spacing at least {MIN_GRID_SPACING}px",
            self.min
        );
        Self {
            min: floor,
            max: self.max.max(floor),
        }
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_ZOOM_MIN,
            max: DEFAULT_ZOOM_MAX,
        }
    }
}

/// Live pan/zoom state of the graph view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    unit: f32,
    zoom: f32,
    offset: Vec2,
    limits: ZoomLimits,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT, ZoomLimits::default())
    }
}

impl ViewTransform {
    /// Creates a transform at zoom 1.0 (clamped into `limits`) with no pan.
    ///
    /// A non-positive or non-finite `unit` falls back to [`DEFAULT_UNIT`].
    /// The minimum zoom is raised if `unit * limits.min` would put grid
    /// lines closer than [`MIN_GRID_SPACING`].
    pub fn new(unit: f32, limits: ZoomLimits) -> Self {
        let unit = if unit.is_finite() && unit > 0.0 {
            unit
        } else {
            log::warn!("Ignoring invalid grid unit {unit}, using {DEFAULT_UNIT}");
            DEFAULT_UNIT
        };
        let limits = limits.floored_for(unit);

        Self {
            unit,
            zoom: limits.clamp(1.0),
            offset: Vec2::ZERO,
            limits,
        }
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// On-screen distance between adjacent grid lines.
    pub fn scaled_unit(&self) -> f32 {
        self.unit * self.zoom
    }

    /// Replaces the zoom factor, clamped into the zoom limits.
    ///
    /// Non-finite values leave the zoom unchanged.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            log::warn!("Ignoring non-finite zoom {zoom}");
            return;
        }
        self.zoom = self.limits.clamp(zoom);
    }

    /// Replaces the pan offset in pixels.
    pub fn set_offset(&mut self, offset: Vec2) {
        if offset.x.is_finite() && offset.y.is_finite() {
            self.offset = offset;
        } else {
            log::warn!("Ignoring non-finite offset {offset:?}");
        }
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.set_offset(self.offset + delta);
    }

    /// Swaps in new limits and re-clamps the current zoom.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        let limits = limits.floored_for(self.unit);
        self.limits = limits;
        self.zoom = limits.clamp(self.zoom);
    }

    /// Multiplies the zoom by `factor` while keeping the world point under
    /// `anchor` (canvas-local pixels) at the same screen position.
    pub fn zoom_about(&mut self, factor: f32, anchor: Pos2, canvas: Vec2) {
        let old_zoom = self.zoom;
        self.set_zoom(old_zoom * factor);

        let ratio = self.zoom / old_zoom;
        let center = canvas * 0.5;
        let anchor_from_center = anchor.to_vec2() - center;
        let origin_from_anchor = self.offset - anchor_from_center;
        self.set_offset(anchor_from_center + origin_from_anchor * ratio);
    }

    /// Multiplies the zoom by `factor`, keeping the canvas center fixed.
    pub fn zoom_centered(&mut self, factor: f32) {
        let old_zoom = self.zoom;
        self.set_zoom(old_zoom * factor);
        self.set_offset(self.offset * (self.zoom / old_zoom));
    }

    /// Back to zoom 1.0 and no pan.
    pub fn reset(&mut self) {
        self.zoom = self.limits.clamp(1.0);
        self.offset = Vec2::ZERO;
    }

    /// Screen position of the world origin for a canvas of the given size.
    pub fn origin(&self, canvas: Vec2) -> Pos2 {
        (canvas * 0.5 + self.offset).to_pos2()
    }

    pub fn world_to_screen_x(&self, canvas: Vec2, x: f32) -> f32 {
        canvas.x * 0.5 + x * self.scaled_unit() + self.offset.x
    }

    pub fn world_to_screen_y(&self, canvas: Vec2, y: f32) -> f32 {
        canvas.y * 0.5 - y * self.scaled_unit() + self.offset.y
    }

    pub fn world_to_screen(&self, canvas: Vec2, world: Pos2) -> Pos2 {
        pos2(
            self.world_to_screen_x(canvas, world.x),
            self.world_to_screen_y(canvas, world.y),
        )
    }

    pub fn screen_to_world_x(&self, canvas: Vec2, x: f32) -> f32 {
        (x - self.origin(canvas).x) / self.scaled_unit()
    }

    pub fn screen_to_world_y(&self, canvas: Vec2, y: f32) -> f32 {
        (self.origin(canvas).y - y) / self.scaled_unit()
    }

    pub fn screen_to_world(&self, canvas: Vec2, screen: Pos2) -> Pos2 {
        pos2(
            self.screen_to_world_x(canvas, screen.x),
            self.screen_to_world_y(canvas, screen.y),
        )
    }
}
