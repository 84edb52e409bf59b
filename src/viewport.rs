//! Camera controls and layout selection

use serde::Serialize;

use crate::config::{LayoutConfig, ViewportConfig};
use crate::model::ViewportState;

/// Offset of the inverted slider used on narrow screens
const NARROW_SLIDER_OFFSET: f64 = 225.0;

/// Which layout the renderer should run on load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Layout {
    /// Use the positions already attached to the nodes
    Preset,
    /// Run the force-directed layout
    Force(LayoutConfig),
}

impl Layout {
    /// Preset whenever a position record was cached, force-directed otherwise
    pub fn choose(has_cached_positions: bool, config: &LayoutConfig) -> Self {
        if has_cached_positions {
            Layout::Preset
        } else {
            Layout::Force(config.clone())
        }
    }
}

/// Zoom arithmetic bounded by the configured limits
#[derive(Debug, Clone)]
pub struct ZoomControls {
    config: ViewportConfig,
}

impl ZoomControls {
    pub fn new(config: ViewportConfig) -> Self {
        Self { config }
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.config.min_zoom, self.config.max_zoom)
    }

    pub fn zoom_in(&self, zoom: f64) -> f64 {
        self.clamp(zoom * self.config.zoom_in_factor)
    }

    pub fn zoom_out(&self, zoom: f64) -> f64 {
        self.clamp(zoom * self.config.zoom_out_factor)
    }

    pub fn is_narrow(&self, width: u32) -> bool {
        width <= self.config.narrow_width
    }

    /// Slider position for a zoom level. Narrow screens use an inverted slider.
    pub fn slider_value(&self, zoom: f64, narrow: bool) -> i64 {
        let raw = if narrow {
            NARROW_SLIDER_OFFSET - zoom * 100.0
        } else {
            zoom * 100.0
        };
        raw.round() as i64
    }

    /// Zoom level for a slider position, clamped to the limits
    pub fn zoom_from_slider(&self, value: f64, narrow: bool) -> f64 {
        let zoom = if narrow {
            (NARROW_SLIDER_OFFSET - value) / 100.0
        } else {
            value / 100.0
        };
        self.clamp(zoom)
    }

    /// Keep the pan, replace the zoom
    pub fn with_zoom(&self, viewport: ViewportState, zoom: f64) -> ViewportState {
        ViewportState {
            zoom: self.clamp(zoom),
            pan: viewport.pan,
        }
    }
}
