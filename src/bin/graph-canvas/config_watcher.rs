//! Reloads the settings file when it changes on disk.

use eframe::egui;
use graph_canvas::{ConfigError, GraphConfig};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Watches one settings file and hands freshly parsed configs to the UI thread.
pub struct ConfigWatcher {
    config_rx: Receiver<Result<GraphConfig, ConfigError>>,
    /// The watcher must be kept alive for events to fire
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ConfigWatcher {
    /// Starts watching `path`.
    ///
    /// The parent directory is watched so the file may be created later.
    /// Returns `None` if that directory doesn't exist or watching fails.
    pub fn new(ctx: egui::Context, path: PathBuf) -> Option<Self> {
        let dir = path.parent()?.to_path_buf();

        if !dir.exists() {
            log::info!(
                "Config directory does not exist, not watching: {}",
                dir.display()
            );
            return None;
        }

        let (config_tx, config_rx) = mpsc::channel();

        let watched = path.clone();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let Ok(event) = res else {
                return;
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            if event.paths.iter().any(|p| is_same_file_name(p, &watched)) {
                let result = GraphConfig::load(&watched);
                if let Err(err) = &result {
                    log::warn!("Reloading {} failed: {err}", watched.display());
                }
                let _ = config_tx.send(result);
                ctx.request_repaint();
            }
        })
        .ok()?;

        watcher.watch(&dir, RecursiveMode::NonRecursive).ok()?;

        log::info!("Watching config file: {}", path.display());

        Some(Self {
            config_rx,
            _watcher: watcher,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the most recent reload result, if any arrived since the last poll.
    pub fn poll(&mut self) -> Option<Result<GraphConfig, ConfigError>> {
        let mut latest = None;
        loop {
            match self.config_rx.try_recv() {
                Ok(result) => latest = Some(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Config watcher channel disconnected");
                    break;
                }
            }
        }
        latest
    }
}

fn is_same_file_name(a: &Path, b: &Path) -> bool {
    a.file_name().is_some() && a.file_name() == b.file_name()
}
