//! Editor tuning knobs, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::bezier::DEFAULT_SEGMENTS_PER_CURVE;
use crate::history::DEFAULT_MAX_DEPTH;
use crate::path::{PathStyle, Rgba};

/// Editor configuration.
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undoable actions.
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    /// Tessellation density for cubic segments.
    #[serde(default = "default_segments_per_curve")]
    pub segments_per_curve: usize,
    /// Eraser radius in degrees of arc.
    #[serde(default = "default_eraser_radius")]
    pub eraser_radius: f64,
    /// Pick distance for selection, in degrees of arc.
    #[serde(default = "default_selection_tolerance")]
    pub selection_tolerance: f64,
    /// Freehand points closer than this to the previous one are dropped.
    #[serde(default = "default_min_point_spacing")]
    pub min_point_spacing: f64,
    #[serde(default = "default_rotate_degrees_per_pixel")]
    pub rotate_degrees_per_pixel: f64,
    /// Style given to newly drawn paths.
    #[serde(default)]
    pub default_style: PathStyle,
    #[serde(default = "default_selection_color")]
    pub selection_color: Rgba,
    #[serde(default = "default_sphere_lat_segments")]
    pub sphere_lat_segments: u32,
    #[serde(default = "default_sphere_lon_segments")]
    pub sphere_lon_segments: u32,
}

fn default_history_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_segments_per_curve() -> usize {
    DEFAULT_SEGMENTS_PER_CURVE
}

fn default_eraser_radius() -> f64 {
    2.0
}

fn default_selection_tolerance() -> f64 {
    1.5
}

fn default_min_point_spacing() -> f64 {
    0.05
}

fn default_rotate_degrees_per_pixel() -> f64 {
    0.25
}

fn default_selection_color() -> Rgba {
    Rgba::HIGHLIGHT
}

fn default_sphere_lat_segments() -> u32 {
    64
}

fn default_sphere_lon_segments() -> u32 {
    128
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: default_history_depth(),
            segments_per_curve: default_segments_per_curve(),
            eraser_radius: default_eraser_radius(),
            selection_tolerance: default_selection_tolerance(),
            min_point_spacing: default_min_point_spacing(),
            rotate_degrees_per_pixel: default_rotate_degrees_per_pixel(),
            default_style: PathStyle::default(),
            selection_color: default_selection_color(),
            sphere_lat_segments: default_sphere_lat_segments(),
            sphere_lon_segments: default_sphere_lon_segments(),
        }
    }
}

impl EditorConfig {
    /// Loads a configuration from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the configuration to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history_depth, 50);
        assert_eq!(config.segments_per_curve, 16);
        assert!((config.eraser_radius - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"eraserRadius": 5.0, "historyDepth": 10}"#;
        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.history_depth, 10);
        assert!((config.eraser_radius - 5.0).abs() < f64::EPSILON);
        assert!((config.selection_tolerance - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.sphere_lon_segments, 128);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = EditorConfig::default();
        config.default_style.stroke_width = 4.0;
        let json = config.to_json().unwrap();
        assert!(json.contains("\"segmentsPerCurve\""));
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
