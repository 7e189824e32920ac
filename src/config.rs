use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutParams;
use crate::viewbox::CameraParams;

/// Optional on-disk overrides for layout and camera tuning.
///
/// Every field falls back to its default, so a partial file is fine and a
/// missing one is the normal case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub layout: LayoutParams,
    pub camera: CameraParams,
}

impl AppConfig {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|err| {
                log::warn!("ignoring malformed config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treescape").map(|dirs| dirs.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RootArrangement;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config = AppConfig::parse("{}").unwrap();
        let defaults = LayoutParams::default();
        assert_eq!(config.layout.node_width, defaults.node_width);
        assert_eq!(config.layout.arrangement, defaults.arrangement);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"{"layout": {"root_offset_x": 9000.0, "arrangement": "Radial"}}"#,
        )
        .unwrap();

        assert_eq!(config.layout.root_offset_x, 9_000.0);
        assert_eq!(config.layout.arrangement, RootArrangement::Radial);
        assert_eq!(config.layout.node_width, LayoutParams::default().node_width);
        assert_eq!(
            config.camera.initial_view_width,
            CameraParams::default().initial_view_width
        );
    }

    #[test]
    fn test_malformed_text_is_an_error() {
        assert!(AppConfig::parse("not json").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let parsed = AppConfig::parse(&text).unwrap();
        assert_eq!(parsed.camera.min_view_width, config.camera.min_view_width);
    }
}
