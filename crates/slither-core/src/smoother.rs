//! Turns a jumpy target position into continuous motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{SmootherConfig, SmoothingMode};
use crate::geometry::Size;

/// Latest observed centre and size of the tracked marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSample {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetSample {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Sanitises a frame delta: non-finite or negative values become zero and
/// everything is capped at `max_dt`.
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max_dt)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedState {
    pub position: Vec2,
    pub size: Size,
    pub target: Vec2,
    /// Only used by the inertial mode.
    pub velocity: Vec2,
}

impl SmoothedState {
    pub fn at(position: Vec2, size: Size) -> Self {
        Self {
            position,
            size,
            target: position,
            velocity: Vec2::ZERO,
        }
    }

    /// Advances the state by an already clamped `dt`.
    pub fn step(mut self, config: &SmootherConfig, dt: f32) -> Self {
        match config.mode {
            SmoothingMode::Linear => {
                let factor = dt / config.approach_time;
                self.position = Vec2::new(
                    approach_axis(
                        self.position.x,
                        self.target.x,
                        factor,
                        config.settle_epsilon,
                    ),
                    approach_axis(
                        self.position.y,
                        self.target.y,
                        factor,
                        config.settle_epsilon,
                    ),
                );
            }
            SmoothingMode::Inertial => {
                let pull = (self.target - self.position) * config.stiffness;
                self.velocity = (self.velocity + pull * dt) * config.momentum;
                self.position += self.velocity * dt;
            }
        }
        self
    }
}

fn approach_axis(position: f32, target: f32, factor: f32, settle_epsilon: f32) -> f32 {
    if factor <= 0.0 {
        return position;
    }
    let remaining = target - position;
    let step = remaining * factor;
    if remaining.abs() <= step.abs() || remaining.abs() < settle_epsilon {
        return target;
    }
    let next = position + step;
    if next == position {
        // The step rounds away entirely; creep by one ulp so the axis still settles.
        return next_toward(position, target);
    }
    next
}

/// Adjacent representable `f32` from `from` in the direction of `to`.
fn next_toward(from: f32, to: f32) -> f32 {
    if from == to || !from.is_finite() || !to.is_finite() {
        return to;
    }
    if from == 0.0 {
        let tiny = f32::from_bits(1);
        return if to > 0.0 { tiny } else { -tiny };
    }
    let bits = from.to_bits();
    // Moving away from zero increments the magnitude bits.
    let away_from_zero = (to > from) == (from > 0.0);
    f32::from_bits(if away_from_zero { bits + 1 } else { bits - 1 })
}

pub struct PositionSmoother {
    config: SmootherConfig,
    state: SmoothedState,
}

impl PositionSmoother {
    pub fn new(config: SmootherConfig) -> Self {
        let state = SmoothedState::at(Vec2::ZERO, config.initial_size);
        Self { config, state }
    }

    /// Records the latest target; the position only moves in `update`.
    pub fn set_target(&mut self, sample: TargetSample) {
        self.state.target = sample.position();
        self.state.size = sample.size();
    }

    /// Teleports to `position` and makes it the current target.
    pub fn snap_to(&mut self, position: Vec2) {
        self.state = SmoothedState::at(position, self.state.size);
    }

    pub fn update(&mut self, dt: f32) -> Vec2 {
        let dt = clamp_dt(dt, self.config.max_dt);
        self.advance(dt)
    }

    /// Same as `update` for a `dt` that has already been clamped.
    pub(crate) fn advance(&mut self, dt: f32) -> Vec2 {
        self.state = self.state.step(&self.config, dt);
        self.state.position
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn size(&self) -> Size {
        self.state.size
    }

    pub fn state(&self) -> &SmoothedState {
        &self.state
    }
}
