use std::path::Path;

use serde::{Deserialize, Serialize};
use slither_core::{ConfigError, Rect, TrailConfig};
use slither_platform::HostConfig;

/// A caret state that takes effect at `frame` and holds until the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: u64,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_caret_width")]
    pub width: f32,
    #[serde(default = "default_caret_height")]
    pub height: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_caret_width() -> f32 {
    2.0
}

fn default_caret_height() -> f32 {
    18.0
}

fn default_visible() -> bool {
    true
}

impl Keyframe {
    pub fn caret(frame: u64, x: f32, y: f32) -> Self {
        Self {
            frame,
            x,
            y,
            width: default_caret_width(),
            height: default_caret_height(),
            visible: true,
        }
    }

    pub fn hidden(frame: u64) -> Self {
        Self {
            visible: false,
            ..Self::caret(frame, 0.0, 0.0)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoScript {
    pub frames: u64,
    pub dt: f32,
    /// Container rectangle in host coordinates.
    pub container: Rect,
    /// Number of failed container lookups before the container appears.
    pub container_delay_polls: u32,
    pub keyframes: Vec<Keyframe>,
}

impl Default for DemoScript {
    fn default() -> Self {
        Self {
            frames: 180,
            dt: 1.0 / 60.0,
            container: Rect::new(40.0, 30.0, 1200.0, 800.0),
            container_delay_polls: 2,
            keyframes: vec![
                Keyframe::caret(0, 160.0, 70.0),
                Keyframe::caret(30, 520.0, 70.0),
                Keyframe::caret(60, 520.0, 250.0),
                Keyframe::hidden(90),
                Keyframe::caret(120, 100.0, 330.0),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlitherConfig {
    pub trail: TrailConfig,
    pub host: HostConfig,
    pub demo: DemoScript,
}

impl SlitherConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SlitherConfig = toml::from_str(source)?;
        config.trail.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> slither_platform::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slither_core::TrailStyle;

    #[test]
    fn full_document_parses() {
        let config = SlitherConfig::from_toml_str(
            r#"
            [trail.render]
            style = "ribbon"

            [host]
            overlay_id = "editor-caret"
            retry_delay_ms = 100

            [demo]
            frames = 10
            keyframes = [
                { frame = 0, x = 10.0, y = 20.0 },
                { frame = 5, x = 0.0, y = 0.0, visible = false },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(config.trail.render.style, TrailStyle::Ribbon);
        assert_eq!(config.host.overlay_id, "editor-caret");
        assert_eq!(config.host.max_attempts, None);
        assert_eq!(config.demo.frames, 10);
        assert_eq!(config.demo.keyframes[0], Keyframe::caret(0, 10.0, 20.0));
        assert!(!config.demo.keyframes[1].visible);
    }

    #[test]
    fn trail_section_is_validated() {
        let err = SlitherConfig::from_toml_str("[trail.chain]\nsegment_dist = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
