//! Color constants for the graph scene.

use eframe::egui::Color32;

// Axes and tick marks
pub const AXIS: Color32 = Color32::from_rgb(142, 142, 147);
pub const TICK: Color32 = Color32::from_rgb(142, 142, 147);

// Minor grid, same gray at 30% opacity
pub const GRID: Color32 = Color32::from_rgba_premultiplied(43, 43, 44, 77);

// Function curve
pub const CURVE: Color32 = Color32::from_rgb(0, 122, 255);

// Axis labels
pub const LABEL_TEXT: Color32 = Color32::from_gray(60);
