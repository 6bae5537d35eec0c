//! Slither core engine: platform-agnostic motion pipeline for a caret trail.
//!
//! Per frame the target sample feeds the [`PositionSmoother`], whose output
//! anchors the [`ChainSimulator`]; the resulting nodes are turned into
//! drawable [`TrailGeometry`].

pub mod chain;
pub mod config;
pub mod geometry;
pub mod pulse;
pub mod smoother;
pub mod trail;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub use chain::{ChainSimulator, ChainState, Motion};
pub use config::{
    ChainConfig, ConfigError, PulseConfig, RenderConfig, SmootherConfig, SmoothingMode,
    TrailConfig,
};
pub use geometry::{Rect, Size};
pub use pulse::Pulse;
pub use smoother::{clamp_dt, PositionSmoother, SmoothedState, TargetSample};
pub use trail::{StrokeStyle, TrailGeometry, TrailStyle, TrailVertex};

/// Everything the drawing side needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Where the surface centre goes, in container coordinates.
    pub placement: Vec2,
    pub size: Size,
    pub alpha: f32,
    pub geometry: TrailGeometry,
    pub stroke: StrokeStyle,
}

pub struct TrailEngine {
    pub config: TrailConfig,
    smoother: PositionSmoother,
    chain: ChainSimulator,
    pulse: Pulse,
}

impl TrailEngine {
    pub fn new(config: TrailConfig) -> Self {
        let smoother = PositionSmoother::new(config.smoother.clone());
        let chain = ChainSimulator::new(config.chain.clone());
        Self {
            config,
            smoother,
            chain,
            pulse: Pulse::default(),
        }
    }

    /// Places the smoothed position without animating, e.g. at the centre of
    /// the host container on startup.
    pub fn snap_to(&mut self, position: Vec2) {
        self.smoother.snap_to(position);
    }

    /// Advances the whole pipeline. A missing sample keeps the previous target.
    pub fn tick(&mut self, sample: Option<TargetSample>, dt: f32) -> Frame {
        let dt = clamp_dt(dt, self.config.smoother.max_dt);
        if let Some(sample) = sample {
            self.smoother.set_target(sample);
        }
        let position = self.smoother.advance(dt);
        self.chain.set_anchor_target(position);
        self.chain.update(dt);
        let pulse_alpha = self.pulse.update(&self.config.pulse, dt);
        let alpha = if self.config.pulse.enabled {
            pulse_alpha
        } else {
            1.0
        };

        let render = &self.config.render;
        let geometry = trail::build(
            render.style,
            self.chain.nodes(),
            position,
            self.smoother.size(),
            render.surface_size * 0.5,
        );
        let mut color = render.color;
        color.w *= alpha;
        trace!(
            x = position.x,
            y = position.y,
            nodes = self.chain.len(),
            "trail tick"
        );

        Frame {
            placement: position,
            size: self.smoother.size(),
            alpha,
            geometry,
            stroke: StrokeStyle {
                line_width: render.line_width,
                color,
                round_joins: render.round_joins,
            },
        }
    }

    pub fn smoother(&self) -> &PositionSmoother {
        &self.smoother
    }

    pub fn chain(&self) -> &ChainSimulator {
        &self.chain
    }
}

impl Default for TrailEngine {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}
