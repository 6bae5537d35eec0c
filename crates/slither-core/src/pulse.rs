use std::f32::consts::PI;

use crate::config::PulseConfig;

/// Breathing opacity: `|cos(t)|` with `t` wrapping back to zero at pi.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    timer: f32,
    alpha: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            timer: 0.0,
            alpha: 1.0,
        }
    }
}

impl Pulse {
    pub fn update(&mut self, config: &PulseConfig, dt: f32) -> f32 {
        self.timer += dt * config.rate;
        if self.timer >= PI {
            self.timer = 0.0;
        }
        self.alpha = self.timer.cos().abs();
        self.alpha
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
