//! Tunables for the trail pipeline, loadable from TOML.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;
use crate::trail::TrailStyle;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Clamped linear approach; never overshoots.
    #[default]
    Linear,
    /// Momentum model; may overshoot around large jumps.
    Inertial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherConfig {
    pub mode: SmoothingMode,
    /// Seconds; the remaining distance divided by this is the per-second speed.
    pub approach_time: f32,
    /// Upper bound applied to every frame's `dt`.
    pub max_dt: f32,
    /// Remaining per-axis distance below which the position snaps onto the target.
    pub settle_epsilon: f32,
    pub stiffness: f32,
    pub momentum: f32,
    pub initial_size: Size,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            mode: SmoothingMode::Linear,
            approach_time: 0.04,
            max_dt: 1.0 / 30.0,
            settle_epsilon: 1e-3,
            stiffness: 300.0,
            momentum: 0.85,
            initial_size: Size::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub segment_dist: f32,
    pub max_nodes: usize,
    /// Anchor displacement per tick at or below which the chain is idle.
    pub move_threshold: f32,
    pub initial_anchor: Vec2,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            segment_dist: 4.0,
            max_nodes: 20,
            move_threshold: 1.0,
            initial_anchor: Vec2::new(100.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub style: TrailStyle,
    pub line_width: f32,
    pub color: Vec4,
    pub round_joins: bool,
    pub surface_size: Vec2,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: TrailStyle::Polyline,
            line_width: 16.0,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            round_joins: true,
            surface_size: Vec2::new(500.0, 500.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub enabled: bool,
    pub rate: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rate: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub smoother: SmootherConfig,
    pub chain: ChainConfig,
    pub render: RenderConfig,
    pub pulse: PulseConfig,
}

impl TrailConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: TrailConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("smoother.approach_time", self.smoother.approach_time)?;
        positive("smoother.max_dt", self.smoother.max_dt)?;
        non_negative("smoother.settle_epsilon", self.smoother.settle_epsilon)?;
        if self.smoother.mode == SmoothingMode::Inertial {
            positive("smoother.stiffness", self.smoother.stiffness)?;
            if !(0.0..1.0).contains(&self.smoother.momentum) {
                return Err(invalid("smoother.momentum", "must lie in [0, 1)"));
            }
        }
        positive("chain.segment_dist", self.chain.segment_dist)?;
        if self.chain.max_nodes == 0 {
            return Err(invalid("chain.max_nodes", "must be at least 1"));
        }
        non_negative("chain.move_threshold", self.chain.move_threshold)?;
        if !self.chain.initial_anchor.is_finite() {
            return Err(invalid("chain.initial_anchor", "must be finite"));
        }
        positive("render.line_width", self.render.line_width)?;
        positive("render.surface_size.x", self.render.surface_size.x)?;
        positive("render.surface_size.y", self.render.surface_size.y)?;
        non_negative("pulse.rate", self.pulse.rate)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a non-negative number, got {value}"),
        })
    }
}
