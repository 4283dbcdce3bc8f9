//! Procedural drawing of the grid, axes, labels and function curve.
//!
//! Everything here is recomputed from `(canvas, transform, curve)` on every
//! frame. The layout helpers are pure so the geometry can be checked without
//! a painter; [`render_scene`] feeds their output to a [`Surface`] back to
//! front.

use crate::colors;
use crate::curve::Curve;
use crate::surface::Surface;
use crate::transform::ViewTransform;
use eframe::egui::{Align2, Color32, Pos2, Stroke, Vec2, pos2};

/// Visual parameters of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub grid: Stroke,
    pub tick: Stroke,
    pub axis: Stroke,
    pub curve: Stroke,
    pub label_color: Color32,
    pub label_font_size: f32,
    /// Half-length of a tick mark, measured from the axis.
    pub tick_length: f32,
    /// Distance of X labels below the horizontal axis.
    pub x_label_offset: f32,
    /// Distance of Y labels left of the vertical axis.
    pub y_label_offset: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            grid: Stroke::new(1.0, colors::GRID),
            tick: Stroke::new(1.0, colors::TICK),
            axis: Stroke::new(1.0, colors::AXIS),
            curve: Stroke::new(2.0, colors::CURVE),
            label_color: colors::LABEL_TEXT,
            label_font_size: 12.0,
            tick_length: 5.0,
            x_label_offset: 15.0,
            y_label_offset: 20.0,
        }
    }
}

/// Which parts of the scene get drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayers {
    pub grid: bool,
    pub ticks: bool,
    pub axes: bool,
    pub curve: bool,
    pub labels: bool,
}

impl Default for SceneLayers {
    fn default() -> Self {
        Self {
            grid: true,
            ticks: true,
            axes: true,
            curve: true,
            labels: true,
        }
    }
}

/// Grid line positions for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Screen position of the world origin (`midX`, `midY`).
    pub origin: Pos2,
    /// Pixels between adjacent lines.
    pub spacing: f32,
    /// Screen X of each vertical line, ascending.
    pub vertical: Vec<f32>,
    /// Screen Y of each horizontal line, ascending.
    pub horizontal: Vec<f32>,
}

impl GridLayout {
    pub fn new(canvas: Vec2, transform: &ViewTransform) -> Self {
        let origin = transform.origin(canvas);
        let spacing = transform.scaled_unit();

        Self {
            origin,
            spacing,
            vertical: grid_positions(origin.x, spacing, canvas.x),
            horizontal: grid_positions(origin.y, spacing, canvas.y),
        }
    }

    /// Tick mark segments, vertical-line ticks first.
    pub fn ticks(&self, tick_length: f32) -> Vec<[Pos2; 2]> {
        let Pos2 { x: mid_x, y: mid_y } = self.origin;

        let on_x_axis = self
            .vertical
            .iter()
            .map(|&x| [pos2(x, mid_y - tick_length), pos2(x, mid_y + tick_length)]);
        let on_y_axis = self
            .horizontal
            .iter()
            .map(|&y| [pos2(mid_x - tick_length, y), pos2(mid_x + tick_length, y)]);

        on_x_axis.chain(on_y_axis).collect()
    }
}

/// Positions `origin + k * spacing` (k integer) that fall within `[0, extent]`.
///
/// Both the sequence walking right/down from the origin and the one walking
/// left/up are covered; the origin itself appears once.
pub fn grid_positions(origin: f32, spacing: f32, extent: f32) -> Vec<f32> {
    if !(spacing.is_finite() && spacing > 0.0 && origin.is_finite() && extent >= 0.0) {
        return Vec::new();
    }

    let first = (-origin / spacing).ceil() as i64;
    let last = ((extent - origin) / spacing).floor() as i64;

    (first..=last)
        .map(|k| origin + k as f32 * spacing)
        .filter(|&p| (0.0..=extent).contains(&p))
        .collect()
}

/// The horizontal then the vertical axis, spanning the full canvas.
pub fn axis_segments(canvas: Vec2, origin: Pos2) -> [[Pos2; 2]; 2] {
    [
        [pos2(0.0, origin.y), pos2(canvas.x, origin.y)],
        [pos2(origin.x, 0.0), pos2(origin.x, canvas.y)],
    ]
}

/// Samples `curve` once per integer screen column.
///
/// Columns run from 0 while `column < 2 * midX`, i.e. pixel offsets
/// `[-midX, midX)` from the origin, and stop one past the canvas edge. Each
/// returned run is a continuous polyline; a non-finite value starts a new run.
pub fn sample_curve<C: Curve + ?Sized>(
    canvas: Vec2,
    transform: &ViewTransform,
    curve: &C,
) -> Vec<Vec<Pos2>> {
    let origin = transform.origin(canvas);
    let end = (2.0 * origin.x).min(canvas.x + 1.0);

    let mut runs = Vec::new();
    let mut run = Vec::new();

    let columns = end.max(0.0).ceil() as u32;
    for column in 0..columns {
        let screen_x = column as f32;
        let world_y = curve.eval(transform.screen_to_world_x(canvas, screen_x));
        let screen_y = transform.world_to_screen_y(canvas, world_y);

        if screen_y.is_finite() {
            run.push(pos2(screen_x, screen_y));
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }

    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

/// Which axis a label annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// An integer tick label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub axis: Axis,
    /// World coordinate along `axis`; never 0.
    pub value: i32,
    /// Center of the label text.
    pub pos: Pos2,
}

/// Labels on each side of the origin: `floor(dimension / (2 * spacing))`.
pub fn label_count(dimension: f32, spacing: f32) -> i32 {
    if !(spacing > 0.0 && dimension > 0.0) {
        return 0;
    }
    (dimension / (2.0 * spacing)).floor() as i32
}

/// X labels below the horizontal axis, then Y labels left of the vertical one.
///
/// Labels whose position falls outside the canvas are dropped, so a panned
/// view can yield fewer than [`label_count`] per side.
pub fn axis_labels(canvas: Vec2, transform: &ViewTransform, style: &SceneStyle) -> Vec<AxisLabel> {
    let origin = transform.origin(canvas);
    let spacing = transform.scaled_unit();

    let x_count = label_count(canvas.x, spacing);
    let y_count = label_count(canvas.y, spacing);

    let x_labels = (-x_count..=x_count).filter(|&i| i != 0).map(|i| AxisLabel {
        axis: Axis::X,
        value: i,
        pos: pos2(origin.x + i as f32 * spacing, origin.y + style.x_label_offset),
    });
    let y_labels = (-y_count..=y_count).filter(|&i| i != 0).map(|i| AxisLabel {
        axis: Axis::Y,
        value: i,
        pos: pos2(origin.x - style.y_label_offset, origin.y - i as f32 * spacing),
    });

    let on_canvas = |label: &AxisLabel| {
        (0.0..=canvas.x).contains(&label.pos.x) && (0.0..=canvas.y).contains(&label.pos.y)
    };

    x_labels.chain(y_labels).filter(on_canvas).collect()
}

/// Draws one complete frame: grid, ticks, axes, curve, labels.
pub fn render_scene<S, C>(
    surface: &mut S,
    canvas: Vec2,
    transform: &ViewTransform,
    curve: &C,
    style: &SceneStyle,
    layers: SceneLayers,
) where
    S: Surface + ?Sized,
    C: Curve + ?Sized,
{
    let grid = GridLayout::new(canvas, transform);

    if layers.grid {
        for &x in &grid.vertical {
            surface.line(pos2(x, 0.0), pos2(x, canvas.y), style.grid);
        }
        for &y in &grid.horizontal {
            surface.line(pos2(0.0, y), pos2(canvas.x, y), style.grid);
        }
    }

    if layers.ticks {
        for [from, to] in grid.ticks(style.tick_length) {
            surface.line(from, to, style.tick);
        }
    }

    if layers.axes {
        for [from, to] in axis_segments(canvas, grid.origin) {
            surface.line(from, to, style.axis);
        }
    }

    if layers.curve {
        for run in sample_curve(canvas, transform, curve) {
            surface.polyline(run, style.curve);
        }
    }

    if layers.labels {
        for label in axis_labels(canvas, transform, style) {
            surface.text(
                label.pos,
                Align2::CENTER_CENTER,
                &label.value.to_string(),
                style.label_font_size,
                style.label_color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKind;
    use crate::surface::{DrawCommand, RecordingSurface, StrokeStyle};
    use eframe::egui::vec2;

    const CANVAS: Vec2 = vec2(400.0, 400.0);

    fn zoomed(zoom: f32) -> ViewTransform {
        let mut transform = ViewTransform::default();
        transform.set_zoom(zoom);
        transform
    }

    #[test]
    fn grid_at_default_view() {
        let grid = GridLayout::new(CANVAS, &ViewTransform::default());
        let expected: Vec<f32> = (0..=8).map(|k| k as f32 * 50.0).collect();
        assert_eq!(grid.origin, pos2(200.0, 200.0));
        assert_eq!(grid.vertical, expected);
        assert_eq!(grid.horizontal, expected);
    }

    #[test]
    fn grid_spacing_tracks_zoom() {
        for zoom in [0.5, 1.0, 1.3, 2.0, 4.0] {
            let grid = GridLayout::new(CANVAS, &zoomed(zoom));
            assert_eq!(grid.spacing, 50.0 * zoom);
            for pair in grid.vertical.windows(2) {
                assert!((pair[1] - pair[0] - 50.0 * zoom).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn grid_follows_pan_and_stays_on_canvas() {
        let mut transform = ViewTransform::default();
        transform.set_offset(vec2(-230.0, 35.0));
        let grid = GridLayout::new(CANVAS, &transform);

        assert_eq!(grid.origin, pos2(-30.0, 235.0));
        assert_eq!(grid.vertical.first(), Some(&20.0));
        assert_eq!(grid.vertical.last(), Some(&370.0));
        assert_eq!(grid.horizontal.first(), Some(&35.0));
        assert_eq!(grid.horizontal.last(), Some(&385.0));
        assert!(grid.vertical.iter().all(|&x| (0.0..=400.0).contains(&x)));
    }

    #[test]
    fn minimum_zoom_keeps_grid_finite() {
        let grid = GridLayout::new(CANVAS, &zoomed(0.0));
        assert!(grid.spacing > 0.0);
        assert_eq!(grid.vertical.len(), (400.0 / grid.spacing) as usize + 1);
    }

    #[test]
    fn degenerate_spacing_yields_no_lines() {
        assert!(grid_positions(0.0, 0.0, 400.0).is_empty());
        assert!(grid_positions(0.0, f32::NAN, 400.0).is_empty());
        assert!(grid_positions(10.0, 50.0, -1.0).is_empty());
    }

    #[test]
    fn ticks_are_centered_on_axis_intersections() {
        let mut transform = ViewTransform::default();
        transform.set_offset(vec2(12.0, -7.0));
        let grid = GridLayout::new(CANVAS, &transform);
        let ticks = grid.ticks(5.0);

        assert_eq!(ticks.len(), grid.vertical.len() + grid.horizontal.len());
        for (tick, &x) in ticks.iter().zip(&grid.vertical) {
            assert_eq!(tick[0].x, x);
            assert_eq!(tick[1].x, x);
            assert_eq!((tick[0].y + tick[1].y) / 2.0, grid.origin.y);
        }
        for (tick, &y) in ticks[grid.vertical.len()..].iter().zip(&grid.horizontal) {
            assert_eq!(tick[0].y, y);
            assert_eq!((tick[0].x + tick[1].x) / 2.0, grid.origin.x);
        }
    }

    #[test]
    fn axes_pass_through_origin() {
        let origin = pos2(123.0, 321.0);
        let [horizontal, vertical] = axis_segments(CANVAS, origin);
        assert_eq!(horizontal, [pos2(0.0, 321.0), pos2(400.0, 321.0)]);
        assert_eq!(vertical, [pos2(123.0, 0.0), pos2(123.0, 400.0)]);
    }

    #[test]
    fn exponential_passes_one_unit_above_origin() {
        let runs = sample_curve(CANVAS, &ViewTransform::default(), &CurveKind::Exponential);
        assert_eq!(runs.len(), 1);

        let run = &runs[0];
        assert_eq!(run.len(), 400);
        assert_eq!(run[0].x, 0.0);
        assert_eq!(run[399].x, 399.0);
        assert_eq!(run[200], pos2(200.0, 150.0));
    }

    #[test]
    fn curve_columns_stop_past_the_canvas_edge() {
        let mut transform = ViewTransform::default();
        transform.set_offset(vec2(150.0, 0.0));
        let runs = sample_curve(CANVAS, &transform, &CurveKind::Sine);
        assert_eq!(runs[0].len(), 401);

        transform.set_offset(vec2(-300.0, 0.0));
        assert!(sample_curve(CANVAS, &transform, &CurveKind::Sine).is_empty());
    }

    #[test]
    fn curve_shape_is_zoom_invariant() {
        let base = sample_curve(CANVAS, &zoomed(1.0), &CurveKind::Exponential);
        let doubled = sample_curve(CANVAS, &zoomed(2.0), &CurveKind::Exponential);

        // At zoom 2 column 200 + 2p sits where column 200 + p sat at zoom 1,
        // at twice the height above the axis.
        for p in [-100, -40, 0, 30, 60] {
            let a = base[0][(200 + p) as usize];
            let b = doubled[0][(200 + 2 * p) as usize];
            let height_a = 200.0 - a.y;
            let height_b = 200.0 - b.y;
            assert!((height_b - 2.0 * height_a).abs() < 1e-2 * height_a.max(1.0));
        }
    }

    #[test]
    fn logarithm_starts_at_the_origin_column() {
        let runs = sample_curve(CANVAS, &ViewTransform::default(), &CurveKind::Logarithm);
        assert_eq!(runs.len(), 1);
        // Column 200 is ln(0) = -inf, so the run starts just right of it.
        assert_eq!(runs[0][0].x, 201.0);
    }

    #[test]
    fn undefined_band_splits_the_polyline() {
        let gap = |x: f32| if x.abs() < 1.0 { f32::NAN } else { x };
        let runs = sample_curve(CANVAS, &ViewTransform::default(), &gap);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].last().map(|p| p.x), Some(150.0));
        assert_eq!(runs[1][0].x, 250.0);
    }

    #[test]
    fn label_counts_per_side() {
        assert_eq!(label_count(400.0, 50.0), 4);
        assert_eq!(label_count(400.0, 100.0), 2);
        assert_eq!(label_count(399.0, 100.0), 1);
        assert_eq!(label_count(0.0, 50.0), 0);
    }

    #[test]
    fn labels_skip_zero_and_sit_beside_axes() {
        let style = SceneStyle::default();
        let labels = axis_labels(CANVAS, &zoomed(2.0), &style);

        let x: Vec<_> = labels.iter().filter(|l| l.axis == Axis::X).collect();
        let y: Vec<_> = labels.iter().filter(|l| l.axis == Axis::Y).collect();
        assert_eq!(x.iter().map(|l| l.value).collect::<Vec<_>>(), [-2, -1, 1, 2]);
        assert_eq!(y.len(), 4);
        assert!(labels.iter().all(|l| l.value != 0));

        assert_eq!(x[3].pos, pos2(400.0, 215.0));
        assert_eq!(y[3].pos, pos2(180.0, 0.0));
    }

    #[test]
    fn panned_labels_stay_on_canvas() {
        let mut transform = ViewTransform::default();
        transform.set_offset(vec2(130.0, -170.0));
        let labels = axis_labels(CANVAS, &transform, &SceneStyle::default());

        // Origin at (330, 30): X labels at 330 + 50i, Y labels at 30 - 50i.
        let x: Vec<_> = labels.iter().filter(|l| l.axis == Axis::X).map(|l| l.value).collect();
        let y: Vec<_> = labels.iter().filter(|l| l.axis == Axis::Y).map(|l| l.value).collect();
        assert_eq!(x, [-4, -3, -2, -1, 1]);
        assert_eq!(y, [-4, -3, -2, -1]);
        assert!(labels.iter().all(|l| (0.0..=400.0).contains(&l.pos.x)));
        assert!(labels.iter().all(|l| (0.0..=400.0).contains(&l.pos.y)));
    }

    #[test]
    fn labels_vanish_with_the_axis_off_canvas() {
        let mut transform = ViewTransform::default();
        transform.set_offset(vec2(0.0, 250.0));
        let labels = axis_labels(CANVAS, &transform, &SceneStyle::default());
        assert!(labels.iter().all(|l| l.axis == Axis::Y));
    }

    #[test]
    fn empty_canvas_draws_only_degenerate_geometry() {
        let mut surface = RecordingSurface::new();
        render_scene(
            &mut surface,
            Vec2::ZERO,
            &ViewTransform::default(),
            &CurveKind::Exponential,
            &SceneStyle::default(),
            SceneLayers::default(),
        );
        assert_eq!(surface.polylines().count(), 0);
        assert_eq!(surface.texts().count(), 0);
    }

    #[test]
    fn render_order_is_back_to_front() {
        let style = SceneStyle::default();
        let mut surface = RecordingSurface::new();
        render_scene(
            &mut surface,
            CANVAS,
            &ViewTransform::default(),
            &CurveKind::Exponential,
            &style,
            SceneLayers::default(),
        );

        let grid_stroke = StrokeStyle::from(style.grid);
        let rank = |command: &DrawCommand| match command {
            DrawCommand::Line { stroke, .. } if *stroke == grid_stroke => 0,
            DrawCommand::Line { from, to, .. } if (to[0] - from[0]).max(to[1] - from[1]) <= 10.0 => 1,
            DrawCommand::Line { .. } => 2,
            DrawCommand::Polyline { .. } => 3,
            DrawCommand::Text { .. } => 4,
        };
        let ranks: Vec<_> = surface.commands.iter().map(rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");

        // 9 + 9 grid lines, 18 ticks, 2 axes, 1 curve, 8 + 8 labels
        assert_eq!(surface.commands.len(), 18 + 18 + 2 + 1 + 16);
    }

    #[test]
    fn hidden_layers_are_skipped() {
        let mut surface = RecordingSurface::new();
        let layers = SceneLayers {
            grid: false,
            ticks: false,
            labels: false,
            ..SceneLayers::default()
        };
        render_scene(
            &mut surface,
            CANVAS,
            &ViewTransform::default(),
            &CurveKind::Exponential,
            &SceneStyle::default(),
            layers,
        );
        assert_eq!(surface.lines().count(), 2);
        assert_eq!(surface.polylines().count(), 1);
    }
}
