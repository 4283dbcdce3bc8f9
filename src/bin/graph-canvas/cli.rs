//! Command line flags and settings resolution.

use crate::constants::MAX_SCENE_DIMENSION;
use clap::Parser;
use eframe::egui::{Vec2, vec2};
use graph_canvas::config::user_config_path;
use graph_canvas::{ConfigError, CurveKind, GraphConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about = "Cartesian grid with a pannable, zoomable function plot")]
pub struct Cli {
    /// Settings file [default: <config dir>/graph-canvas/graph.ron]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Curve to plot: exp, sin, cos, tan, ln, pow[:EXPONENT]
    #[arg(long, value_parser = parse_curve)]
    pub curve: Option<CurveKind>,

    /// Print the draw calls of one frame as JSON and exit
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub dump_scene: Option<Vec2>,

    /// Zoom used with --dump-scene
    #[arg(long, default_value_t = 1.0, requires = "dump_scene")]
    pub zoom: f32,

    /// Horizontal pan in pixels used with --dump-scene
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true, requires = "dump_scene")]
    pub pan_x: f32,

    /// Vertical pan in pixels used with --dump-scene
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true, requires = "dump_scene")]
    pub pan_y: f32,
}

/// Errors for malformed `WIDTHxHEIGHT` arguments.
#[derive(Error, Debug, PartialEq)]
pub enum SceneSizeError {
    #[error("expected WIDTHxHEIGHT, e.g. 400x300")]
    MissingSeparator,
    #[error("invalid dimension '{0}'")]
    InvalidDimension(String),
    #[error("dimension {0} exceeds the maximum of 16384")]
    TooLarge(f32),
}

fn parse_size(input: &str) -> Result<Vec2, SceneSizeError> {
    let (width, height) = input
        .split_once(['x', 'X'])
        .ok_or(SceneSizeError::MissingSeparator)?;

    let dimension = |text: &str| -> Result<f32, SceneSizeError> {
        let value = text
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or_else(|| SceneSizeError::InvalidDimension(text.to_owned()))?;
        if value > MAX_SCENE_DIMENSION {
            return Err(SceneSizeError::TooLarge(value));
        }
        Ok(value)
    };

    Ok(vec2(dimension(width)?, dimension(height)?))
}

fn parse_curve(input: &str) -> Result<CurveKind, String> {
    CurveKind::parse(input).ok_or_else(|| format!("unknown curve '{input}'"))
}

/// Settings chosen at startup.
pub struct LoadedConfig {
    pub config: GraphConfig,
    /// File to watch for changes.
    pub path: Option<PathBuf>,
    /// Why the file (or the embedded default) could not be used.
    pub error: Option<ConfigError>,
}

/// Loads `--config`, else the user's settings file if present, else the
/// embedded default. A broken file falls back to the embedded default.
pub fn load_config(explicit: Option<&Path>) -> LoadedConfig {
    let path = explicit.map(Path::to_path_buf).or_else(user_config_path);

    let from_file = match &path {
        Some(path) if explicit.is_some() || path.exists() => Some(GraphConfig::load(path)),
        _ => None,
    };

    match from_file {
        Some(Ok(config)) => {
            log::info!("Loaded settings from {}", path_display(&path));
            LoadedConfig {
                config,
                path,
                error: None,
            }
        }
        Some(Err(err)) => {
            log::warn!("Falling back to default settings: {err}");
            LoadedConfig {
                config: embedded_or_builtin(),
                path,
                error: Some(err),
            }
        }
        None => match GraphConfig::embedded() {
            Ok(config) => LoadedConfig {
                config,
                path,
                error: None,
            },
            Err(err) => {
                log::warn!("Embedded settings unusable: {err}");
                LoadedConfig {
                    config: GraphConfig::default(),
                    path,
                    error: Some(err),
                }
            }
        },
    }
}

fn embedded_or_builtin() -> GraphConfig {
    GraphConfig::embedded().unwrap_or_default()
}

fn path_display(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scene_sizes() {
        assert_eq!(parse_size("400x300"), Ok(vec2(400.0, 300.0)));
        assert_eq!(parse_size(" 640 X 480 "), Ok(vec2(640.0, 480.0)));
        assert_eq!(parse_size("0x0"), Ok(Vec2::ZERO));
        assert_eq!(parse_size("400"), Err(SceneSizeError::MissingSeparator));
        assert_eq!(
            parse_size("-1x20"),
            Err(SceneSizeError::InvalidDimension("-1".to_owned()))
        );
    }

    #[test]
    fn caps_scene_sizes() {
        assert_eq!(parse_size("16384x16384"), Ok(vec2(16384.0, 16384.0)));
        assert_eq!(parse_size("5000000000x10"), Err(SceneSizeError::TooLarge(5.0e9)));
        assert!(Cli::try_parse_from(["graph-canvas", "--dump-scene", "10x1e30"]).is_err());
    }

    #[test]
    fn dump_flags_parse() {
        let cli = Cli::try_parse_from([
            "graph-canvas",
            "--dump-scene",
            "400x400",
            "--zoom",
            "2",
            "--pan-x",
            "-30",
            "--curve",
            "pow:3",
        ])
        .unwrap();

        assert_eq!(cli.dump_scene, Some(vec2(400.0, 400.0)));
        assert_eq!(cli.zoom, 2.0);
        assert_eq!(cli.pan_x, -30.0);
        assert_eq!(cli.curve, Some(CurveKind::Power { exponent: 3.0 }));
    }

    #[test]
    fn rejects_unknown_curve() {
        assert!(Cli::try_parse_from(["graph-canvas", "--curve", "sinc"]).is_err());
    }

    #[test]
    fn broken_explicit_config_falls_back_to_default() {
        let loaded = load_config(Some(Path::new("/nonexistent/graph.ron")));
        assert!(matches!(loaded.error, Some(ConfigError::Io { .. })));
        assert_eq!(loaded.config, GraphConfig::default());
    }
}
