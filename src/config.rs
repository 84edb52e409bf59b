//! Configuration loading and management
//!
//! Handles parsing of `.taskmap.toml` in the data directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = ".taskmap.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Storage location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Debounce windows for autosave
    #[serde(default)]
    pub autosave: AutosaveConfig,

    /// Camera limits and controls
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Force-directed layout parameters
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Store file; defaults to the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// How long a write waits for another process holding the store lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    crate::lock::DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Autosave debounce windows, in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct AutosaveConfig {
    #[serde(default = "default_positions_ms")]
    pub positions_ms: u64,

    #[serde(default = "default_viewport_ms")]
    pub viewport_ms: u64,

    /// Quiet time after a window resize before re-centering
    #[serde(default = "default_resize_ms")]
    pub resize_ms: u64,
}

fn default_positions_ms() -> u64 {
    100
}

fn default_viewport_ms() -> u64 {
    100
}

fn default_resize_ms() -> u64 {
    250
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            positions_ms: default_positions_ms(),
            viewport_ms: default_viewport_ms(),
            resize_ms: default_resize_ms(),
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,

    #[serde(default = "default_zoom_in_factor")]
    pub zoom_in_factor: f64,

    #[serde(default = "default_zoom_out_factor")]
    pub zoom_out_factor: f64,

    /// Screens at or below this width use the inverted zoom slider
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u32,

    /// Task the camera centers on after a resize
    #[serde(default = "default_start_node")]
    pub start_node: String,

    /// Padding around the start node when centering
    #[serde(default = "default_center_padding")]
    pub center_padding: f64,
}

fn default_min_zoom() -> f64 {
    0.25
}

fn default_max_zoom() -> f64 {
    2.0
}

fn default_zoom_in_factor() -> f64 {
    1.25
}

fn default_zoom_out_factor() -> f64 {
    0.8
}

fn default_narrow_width() -> u32 {
    640
}

fn default_start_node() -> String {
    "t1_intro".to_string()
}

fn default_center_padding() -> f64 {
    150.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_in_factor: default_zoom_in_factor(),
            zoom_out_factor: default_zoom_out_factor(),
            narrow_width: default_narrow_width(),
            start_node: default_start_node(),
            center_padding: default_center_padding(),
        }
    }
}

/// Parameters for the renderer's `cose` force-directed layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default = "default_layout_name")]
    pub name: String,
    #[serde(default = "default_ideal_edge_length")]
    pub ideal_edge_length: f64,
    #[serde(default = "default_node_overlap")]
    pub node_overlap: f64,
    #[serde(default = "default_refresh")]
    pub refresh: u32,
    #[serde(default = "default_true")]
    pub fit: bool,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default)]
    pub randomize: bool,
    #[serde(default = "default_component_spacing")]
    pub component_spacing: f64,
    #[serde(default = "default_node_repulsion")]
    pub node_repulsion: f64,
    #[serde(default = "default_edge_elasticity")]
    pub edge_elasticity: f64,
    #[serde(default = "default_nesting_factor")]
    pub nesting_factor: f64,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_num_iter")]
    pub num_iter: u32,
    #[serde(default = "default_initial_temp")]
    pub initial_temp: f64,
    #[serde(default = "default_cooling_factor")]
    pub cooling_factor: f64,
    #[serde(default = "default_min_temp")]
    pub min_temp: f64,
}

fn default_layout_name() -> String {
    "cose".to_string()
}

fn default_ideal_edge_length() -> f64 {
    100.0
}

fn default_node_overlap() -> f64 {
    20.0
}

fn default_refresh() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

fn default_padding() -> f64 {
    30.0
}

fn default_component_spacing() -> f64 {
    100.0
}

fn default_node_repulsion() -> f64 {
    2_400_000.0
}

fn default_edge_elasticity() -> f64 {
    100.0
}

fn default_nesting_factor() -> f64 {
    5.0
}

fn default_gravity() -> f64 {
    80.0
}

fn default_num_iter() -> u32 {
    1000
}

fn default_initial_temp() -> f64 {
    200.0
}

fn default_cooling_factor() -> f64 {
    0.95
}

fn default_min_temp() -> f64 {
    1.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            name: default_layout_name(),
            ideal_edge_length: default_ideal_edge_length(),
            node_overlap: default_node_overlap(),
            refresh: default_refresh(),
            fit: true,
            padding: default_padding(),
            randomize: false,
            component_spacing: default_component_spacing(),
            node_repulsion: default_node_repulsion(),
            edge_elasticity: default_edge_elasticity(),
            nesting_factor: default_nesting_factor(),
            gravity: default_gravity(),
            num_iter: default_num_iter(),
            initial_temp: default_initial_temp(),
            cooling_factor: default_cooling_factor(),
            min_temp: default_min_temp(),
        }
    }
}

impl ViewportConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(crate::error::Error::InvalidConfig(
                "viewport.min_zoom must be > 0".to_string(),
            ));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(crate::error::Error::InvalidConfig(
                "viewport.max_zoom must be >= viewport.min_zoom".to_string(),
            ));
        }
        if self.zoom_in_factor <= 1.0 {
            return Err(crate::error::Error::InvalidConfig(
                "viewport.zoom_in_factor must be > 1".to_string(),
            ));
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(crate::error::Error::InvalidConfig(
                "viewport.zoom_out_factor must be between 0 and 1".to_string(),
            ));
        }
        if self.start_node.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "viewport.start_node cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl LayoutConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "layout.name cannot be empty".to_string(),
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(crate::error::Error::InvalidConfig(
                "layout.coolingFactor must be between 0 and 1".to_string(),
            ));
        }
        if self.num_iter == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "layout.numIter must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a `.taskmap.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Resolved store file: explicit config, else the platform data directory
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        if let Some(path) = &self.storage.path {
            if path.is_relative() {
                return data_dir.join(path);
            }
            return path.clone();
        }
        directories::ProjectDirs::from("", "", "taskmap")
            .map(|dirs| dirs.data_dir().join(crate::storage::STORE_FILE))
            .unwrap_or_else(|| data_dir.join(crate::storage::STORE_FILE))
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.viewport.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.autosave.positions_ms, 100);
        assert_eq!(cfg.autosave.viewport_ms, 100);
        assert_eq!(cfg.autosave.resize_ms, 250);
        assert_eq!(cfg.viewport.min_zoom, 0.25);
        assert_eq!(cfg.viewport.max_zoom, 2.0);
        assert_eq!(cfg.viewport.narrow_width, 640);
        assert_eq!(cfg.viewport.start_node, "t1_intro");
        assert_eq!(cfg.layout.name, "cose");
        assert_eq!(cfg.layout.node_repulsion, 2_400_000.0);
        assert_eq!(cfg.layout.num_iter, 1000);
        assert!(cfg.layout.fit);
        assert!(!cfg.layout.randomize);
        assert!(cfg.storage.path.is_none());
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
[storage]
path = "state/view.json"

[autosave]
positions_ms = 300

[viewport]
max_zoom = 3.0
start_node = "root"

[layout]
gravity = 40.0
numIter = 500
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.autosave.positions_ms, 300);
        assert_eq!(cfg.autosave.viewport_ms, 100);
        assert_eq!(cfg.viewport.max_zoom, 3.0);
        assert_eq!(cfg.viewport.start_node, "root");
        assert_eq!(cfg.layout.gravity, 40.0);
        assert_eq!(cfg.layout.num_iter, 500);
        assert_eq!(
            cfg.store_path(dir.path()),
            dir.path().join("state/view.json")
        );
    }

    #[test]
    fn invalid_zoom_bounds_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[viewport]\nmin_zoom = 2.0\nmax_zoom = 1.0").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            crate::error::Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.viewport.start_node, "t1_intro");
    }
}
