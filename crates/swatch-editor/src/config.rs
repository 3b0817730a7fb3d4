//! Canvas behaviour settings.

use serde::{Deserialize, Serialize};
use swatch_core::error::ConfigError;
use swatch_core::layout::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub layout: LayoutConfig,
    /// Oldest history snapshots are evicted beyond this many.
    pub history_depth: usize,
    /// Horizontal step from the rightmost group member to a new variant
    /// (64 gap + 350 footprint).
    pub variant_offset_x: f32,
    /// Offset applied on both axes to a duplicated node.
    pub duplicate_offset: f32,
    /// Half of a node's approximate footprint, used when centering on it.
    pub center_offset_x: f32,
    pub center_offset_y: f32,
    pub center_duration_ms: u32,
    pub default_zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Pointer travel (screen px) below which a press counts as a click.
    pub click_threshold: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            history_depth: 100,
            variant_offset_x: 414.0,
            duplicate_offset: 50.0,
            center_offset_x: 150.0,
            center_offset_y: 80.0,
            center_duration_ms: 500,
            default_zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 4.0,
            click_threshold: 3.0,
        }
    }
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
