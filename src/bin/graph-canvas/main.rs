#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;
mod config_watcher;
mod constants;
mod ui;

use clap::Parser;
use cli::{Cli, LoadedConfig, load_config};
use config_watcher::ConfigWatcher;
use constants::WINDOW_SIZE;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use graph_canvas::{
    CurveKind, GestureTracker, GraphConfig, RecordingSurface, SceneLayers, SceneStyle,
    ViewTransform, render_scene,
};

/// Main application state for the graph view.
pub struct GraphCanvasApp {
    config: GraphConfig,
    transform: ViewTransform,
    gestures: GestureTracker,
    curve: CurveKind,
    layers: SceneLayers,
    style: SceneStyle,
    /// Cumulative scale of the pinch in progress.
    pinch_scale: f32,
    /// Cumulative translation of the drag in progress.
    drag_translation: egui::Vec2,
    toasts: Toasts,
    config_watcher: Option<ConfigWatcher>,
}

impl GraphCanvasApp {
    fn new(cc: &eframe::CreationContext<'_>, loaded: LoadedConfig, curve: Option<CurveKind>) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        if let Some(err) = &loaded.error {
            toasts.add(Toast {
                kind: ToastKind::Error,
                text: format!("Using default settings: {err}").into(),
                options: ToastOptions::default()
                    .duration_in_seconds(10.0)
                    .show_icon(true),
                ..Default::default()
            });
        }

        let config_watcher = loaded
            .path
            .and_then(|path| ConfigWatcher::new(cc.egui_ctx.clone(), path));

        if config_watcher.is_none() {
            log::info!("Config watcher not available - settings hot reload disabled");
        }

        let config = loaded.config;
        Self {
            transform: config.view_transform(),
            gestures: GestureTracker::new(config.gesture_mode),
            curve: curve.unwrap_or(config.curve),
            layers: SceneLayers::default(),
            style: config.scene_style(),
            pinch_scale: 1.0,
            drag_translation: egui::Vec2::ZERO,
            toasts,
            config_watcher,
            config,
        }
    }

    fn reset_view(&mut self) {
        self.transform.reset();
        self.pinch_scale = 1.0;
        self.drag_translation = egui::Vec2::ZERO;
        self.gestures.pinch_ended();
        self.gestures.drag_ended();
    }

    /// Swaps in reloaded settings, keeping the current zoom and pan.
    fn apply_config(&mut self, config: GraphConfig) {
        let mut transform = config.view_transform();
        transform.set_zoom(self.transform.zoom());
        transform.set_offset(self.transform.offset());
        self.transform = transform;

        if config.curve != self.config.curve {
            self.curve = config.curve;
        }
        if config.gesture_mode != self.gestures.mode() {
            self.gestures.set_mode(config.gesture_mode);
        }
        self.style = config.scene_style();
        self.config = config;
    }

    /// Polls the config watcher for reloaded settings.
    fn poll_config(&mut self) {
        let Some(watcher) = &mut self.config_watcher else {
            return;
        };
        let Some(result) = watcher.poll() else {
            return;
        };
        let path = watcher.path().display().to_string();

        match result {
            Ok(config) => {
                log::info!("Reloaded settings from {path}");
                self.apply_config(config);
                self.toasts.add(Toast {
                    kind: ToastKind::Info,
                    text: "Settings reloaded".into(),
                    options: ToastOptions::default().duration_in_seconds(3.0),
                    ..Default::default()
                });
            }
            Err(err) => {
                self.toasts.add(Toast {
                    kind: ToastKind::Error,
                    text: format!("{path}: {err}").into(),
                    options: ToastOptions::default()
                        .duration_in_seconds(8.0)
                        .show_icon(true),
                    ..Default::default()
                });
            }
        }
    }
}

impl eframe::App for GraphCanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_config();
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

/// Renders one frame without a window and prints its draw calls.
fn dump_scene(cli: &Cli, config: &GraphConfig, canvas: egui::Vec2) -> serde_json::Result<String> {
    let mut transform = config.view_transform();
    transform.set_zoom(cli.zoom);
    transform.set_offset(egui::vec2(cli.pan_x, cli.pan_y));

    let curve = cli.curve.unwrap_or(config.curve);
    let mut surface = RecordingSurface::new();
    render_scene(
        &mut surface,
        canvas,
        &transform,
        &curve,
        &config.scene_style(),
        SceneLayers::default(),
    );

    log::info!(
        "Rendered {} draw calls for a {}x{} canvas",
        surface.commands.len(),
        canvas.x,
        canvas.y
    );
    surface.to_json()
}

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref());

    if let Some(canvas) = cli.dump_scene {
        match dump_scene(&cli, &loaded.config, canvas) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("Failed to serialize scene: {err}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title("Graph Canvas"),
        ..Default::default()
    };

    let curve = cli.curve;
    eframe::run_native(
        "Graph Canvas",
        options,
        Box::new(move |cc| Ok(Box::new(GraphCanvasApp::new(cc, loaded, curve)))),
    )
}
