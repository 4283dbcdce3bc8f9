//! Pinch and drag gesture handling.
//!
//! Hosts report gestures cumulatively: while a pinch is active every update
//! carries the total scale since the fingers went down, and a drag carries the
//! total translation since the press. How those totals land on the
//! [`ViewTransform`] depends on the [`GestureMode`].

use crate::transform::ViewTransform;
use eframe::egui::Vec2;
use serde::{Deserialize, Serialize};

/// How a gesture's cumulative value is applied to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureMode {
    /// Gestures continue from the view left by the previous one:
    /// `zoom = zoom_at_start * scale`, `offset = offset_at_start + translation`.
    #[default]
    Compose,
    /// Each update overwrites the view: `zoom = scale`, `offset = translation`.
    Replace,
}

/// Tracks in-progress gestures for one view.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    mode: GestureMode,
    pinch_start_zoom: Option<f32>,
    drag_start_offset: Option<Vec2>,
}

impl GestureTracker {
    pub fn new(mode: GestureMode) -> Self {
        Self {
            mode,
            pinch_start_zoom: None,
            drag_start_offset: None,
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Switches mode; any gesture in flight continues from the current view.
    pub fn set_mode(&mut self, mode: GestureMode) {
        self.mode = mode;
        self.pinch_start_zoom = None;
        self.drag_start_offset = None;
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_start_zoom.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start_offset.is_some()
    }

    /// Applies a pinch update carrying the gesture's cumulative scale.
    pub fn pinch_changed(&mut self, transform: &mut ViewTransform, scale: f32) {
        match self.mode {
            GestureMode::Compose => {
                let start = *self.pinch_start_zoom.get_or_insert(transform.zoom());
                transform.set_zoom(start * scale);
            }
            GestureMode::Replace => {
                self.pinch_start_zoom.get_or_insert(transform.zoom());
                transform.set_zoom(scale);
            }
        }
    }

    pub fn pinch_ended(&mut self) {
        if let Some(start) = self.pinch_start_zoom.take() {
            log::debug!("Pinch ended (started at zoom {start:.3})");
        }
    }

    /// Applies a drag update carrying the gesture's cumulative translation.
    pub fn drag_changed(&mut self, transform: &mut ViewTransform, translation: Vec2) {
        match self.mode {
            GestureMode::Compose => {
                let start = *self.drag_start_offset.get_or_insert(transform.offset());
                transform.set_offset(start + translation);
            }
            GestureMode::Replace => {
                self.drag_start_offset.get_or_insert(transform.offset());
                transform.set_offset(translation);
            }
        }
    }

    pub fn drag_ended(&mut self) {
        if let Some(start) = self.drag_start_offset.take() {
            log::debug!("Drag ended (started at offset {start:?})");
        }
    }
}
