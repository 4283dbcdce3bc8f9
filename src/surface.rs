//! Drawing surfaces the scene renderer paints onto.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke};
use serde::Serialize;

/// Immediate-mode 2-D drawing target. Coordinates are canvas-local pixels.
pub trait Surface {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke);

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font_size: f32, color: Color32);
}

/// Paints into an egui [`egui::Painter`], offsetting by the canvas rect.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    canvas_rect: egui::Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, canvas_rect: egui::Rect) -> Self {
        Self {
            painter,
            canvas_rect,
        }
    }

    fn to_window(&self, pos: Pos2) -> Pos2 {
        self.canvas_rect.min + pos.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([self.to_window(from), self.to_window(to)], stroke);
    }

    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke) {
        let points = points.into_iter().map(|p| self.to_window(p)).collect();
        self.painter.add(egui::Shape::line(points, stroke));
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font_size: f32, color: Color32) {
        self.painter.text(
            self.to_window(pos),
            anchor,
            text,
            FontId::proportional(font_size),
            color,
        );
    }
}

/// Stroke parameters as plain data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub width: f32,
    /// Unmultiplied RGBA.
    pub color: [u8; 4],
}

impl From<Stroke> for StrokeStyle {
    fn from(stroke: Stroke) -> Self {
        Self {
            width: stroke.width,
            color: stroke.color.to_srgba_unmultiplied(),
        }
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        from: [f32; 2],
        to: [f32; 2],
        stroke: StrokeStyle,
    },
    Polyline {
        points: Vec<[f32; 2]>,
        stroke: StrokeStyle,
    },
    Text {
        pos: [f32; 2],
        /// Horizontal and vertical alignment, each -1 (min), 0 (center) or 1 (max).
        anchor: [i8; 2],
        text: String,
        font_size: f32,
        color: [u8; 4],
    },
}

/// Collects draw calls instead of painting them.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Pos2, Pos2, StrokeStyle)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { from, to, stroke } => Some((to_pos(*from), to_pos(*to), *stroke)),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[[f32; 2]]> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Pos2)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, pos, .. } => Some((text.as_str(), to_pos(*pos))),
            _ => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn to_array(pos: Pos2) -> [f32; 2] {
    [pos.x, pos.y]
}

fn to_pos(array: [f32; 2]) -> Pos2 {
    Pos2::new(array[0], array[1])
}

fn align_index(align: egui::Align) -> i8 {
    match align {
        egui::Align::Min => -1,
        egui::Align::Center => 0,
        egui::Align::Max => 1,
    }
}

impl Surface for RecordingSurface {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line {
            from: to_array(from),
            to: to_array(to),
            stroke: stroke.into(),
        });
    }

    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.into_iter().map(to_array).collect(),
            stroke: stroke.into(),
        });
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font_size: f32, color: Color32) {
        self.commands.push(DrawCommand::Text {
            pos: to_array(pos),
            anchor: [align_index(anchor.x()), align_index(anchor.y())],
            text: text.to_owned(),
            font_size,
            color: color.to_srgba_unmultiplied(),
        });
    }
}
