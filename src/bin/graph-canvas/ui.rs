//! UI rendering and input handling for the graph view.

use crate::GraphCanvasApp;
use crate::constants::{EXPONENT_RANGE, SIDEBAR_WIDTH};
use eframe::egui;
use graph_canvas::{CurveKind, GestureMode, PainterSurface, SceneStyle, render_scene};

impl GraphCanvasApp {
    /// Handles keyboard shortcuts for zoom and layer toggles.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let zoom_speed = self.config.zoom_speed;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                self.transform.zoom_centered(zoom_speed);
            }
            if i.key_pressed(egui::Key::Minus) {
                self.transform.zoom_centered(1.0 / zoom_speed);
            }
            if i.key_pressed(egui::Key::Num0) {
                self.reset_view();
            }
            if i.key_pressed(egui::Key::G) {
                self.layers.grid = !self.layers.grid;
            }
            if i.key_pressed(egui::Key::L) {
                self.layers.labels = !self.layers.labels;
            }
        });
    }

    /// Renders the bottom status bar with controls hint and the current view.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Pinch/Scroll: Zoom | Drag: Pan | +/-: Zoom | 0: Reset | G: Grid | L: Labels");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let offset = self.transform.offset();
                    ui.label(format!(
                        "y = {}   {:.2}x   ({:.0}, {:.0})",
                        self.curve,
                        self.transform.zoom(),
                        offset.x,
                        offset.y
                    ));
                });
            });
        });
    }

    /// Renders the left sidebar panel.
    pub fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_sidebar_content(ui);
                });
            });
    }

    /// Renders the sidebar content: curve picker, layer toggles, gesture mode.
    fn show_sidebar_content(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        ui.strong("Function");
        ui.separator();

        for kind in CurveKind::ALL {
            let selected = self.curve.same_family(&kind);
            if ui.selectable_label(selected, kind.name()).clicked() && !selected {
                self.curve = kind;
            }
        }

        if let CurveKind::Power { exponent } = &mut self.curve {
            ui.horizontal(|ui| {
                ui.label("Exponent");
                ui.add(
                    egui::DragValue::new(exponent)
                        .speed(0.05)
                        .range(EXPONENT_RANGE),
                );
            });
        }

        ui.add_space(12.0);

        ui.strong("Layers");
        ui.separator();

        ui.checkbox(&mut self.layers.grid, "Grid");
        ui.checkbox(&mut self.layers.ticks, "Ticks");
        ui.checkbox(&mut self.layers.axes, "Axes");
        ui.checkbox(&mut self.layers.curve, "Curve");
        ui.checkbox(&mut self.layers.labels, "Labels");

        ui.add_space(12.0);

        ui.strong("Gestures");
        ui.separator();

        let mut mode = self.gestures.mode();
        ui.radio_value(&mut mode, GestureMode::Compose, "Continue from view")
            .on_hover_text("Each pinch or drag starts from the current zoom and pan");
        ui.radio_value(&mut mode, GestureMode::Replace, "Absolute")
            .on_hover_text("Each pinch or drag sets zoom and pan from scratch");
        if mode != self.gestures.mode() {
            self.gestures.set_mode(mode);
        }
    }

    /// Renders the central panel containing the graph.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let panel_rect = ui.max_rect();
            self.show_graph(ui);
            self.show_zoom_controls(ctx, panel_rect);
        });
    }

    /// Renders the floating zoom controls panel.
    fn show_zoom_controls(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let margin = 12.0;
        let panel_width = 160.0;
        let panel_height = 36.0;

        let anchor_pos = egui::pos2(
            panel_rect.right() - panel_width - margin,
            panel_rect.bottom() - panel_height - margin,
        );

        egui::Area::new(egui::Id::new("zoom_controls"))
            .fixed_pos(anchor_pos)
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let limits = self.transform.limits();
                            let mut zoom = self.transform.zoom();
                            let slider = egui::Slider::new(&mut zoom, limits.min..=limits.max)
                                .logarithmic(true)
                                .show_value(false);
                            if ui.add(slider).changed() {
                                self.transform.zoom_centered(zoom / self.transform.zoom());
                            }
                            if ui.button("Reset").on_hover_text("Reset view (0)").clicked() {
                                self.reset_view();
                            }
                        });
                    });
            });
    }

    /// Handles input for the graph canvas and paints one frame.
    fn show_graph(&mut self, ui: &mut egui::Ui) {
        let (canvas_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        let pinching = self.handle_pinch(ui);
        if !pinching {
            self.handle_drag(&response);
            self.handle_scroll_zoom(ui, canvas_rect);
        }

        if response.double_clicked() {
            self.reset_view();
        }

        let style = SceneStyle {
            label_color: ui.visuals().text_color(),
            ..self.style
        };

        let painter = ui.painter_at(canvas_rect);
        let mut surface = PainterSurface::new(&painter, canvas_rect);
        render_scene(
            &mut surface,
            canvas_rect.size(),
            &self.transform,
            &self.curve,
            &style,
            self.layers,
        );
    }

    /// Feeds multi-touch pinches to the gesture tracker. Returns whether a
    /// pinch is in progress.
    fn handle_pinch(&mut self, ui: &egui::Ui) -> bool {
        match ui.input(|i| i.multi_touch()) {
            Some(touch) => {
                self.pinch_scale *= touch.zoom_delta;
                self.gestures
                    .pinch_changed(&mut self.transform, self.pinch_scale);
                true
            }
            None => {
                if self.gestures.is_pinching() {
                    self.gestures.pinch_ended();
                    self.pinch_scale = 1.0;
                }
                false
            }
        }
    }

    /// Feeds pointer drags to the gesture tracker.
    fn handle_drag(&mut self, response: &egui::Response) {
        if response.drag_started() {
            self.drag_translation = egui::Vec2::ZERO;
        }

        if response.dragged() {
            self.drag_translation += response.drag_delta();
            self.gestures
                .drag_changed(&mut self.transform, self.drag_translation);
        }

        if response.drag_stopped() {
            self.gestures.drag_ended();
            self.drag_translation = egui::Vec2::ZERO;
        }
    }

    /// Handles scroll wheel zoom, zooming towards the mouse position.
    fn handle_scroll_zoom(&mut self, ui: &egui::Ui, canvas_rect: egui::Rect) {
        let hover_pos = ui.input(|i| i.pointer.hover_pos());
        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);

        let Some(hover) = hover_pos.filter(|p| canvas_rect.contains(*p)) else {
            return;
        };
        if scroll_delta == 0.0 {
            return;
        }

        let zoom_speed = self.config.zoom_speed;
        let zoom_factor = if scroll_delta > 0.0 {
            zoom_speed
        } else {
            1.0 / zoom_speed
        };

        let anchor = (hover - canvas_rect.min).to_pos2();
        self.transform
            .zoom_about(zoom_factor, anchor, canvas_rect.size());
    }
}
