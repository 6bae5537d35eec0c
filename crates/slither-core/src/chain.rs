//! The "snake": a chain of trailing nodes with fixed spacing that grows
//! while the anchor moves and retracts while it rests.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ChainConfig;
use crate::geometry::{distance, point_at_spacing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    Idle,
    Moving,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainState {
    /// Index 0 is the head.
    pub nodes: Vec<Vec2>,
    pub last_anchor: Vec2,
    pub rest_anchor: Vec2,
    pub is_moving: bool,
}

impl ChainState {
    /// Empty, idle chain whose anchors start at `anchor`.
    pub fn empty_at(anchor: Vec2) -> Self {
        Self {
            nodes: Vec::new(),
            last_anchor: anchor,
            rest_anchor: anchor,
            is_moving: false,
        }
    }

    /// Idle chain holding a single node at `anchor`.
    pub fn resting_at(anchor: Vec2) -> Self {
        Self {
            nodes: vec![anchor],
            ..Self::empty_at(anchor)
        }
    }

    pub fn classify(&self, anchor: Vec2, threshold: f32) -> Motion {
        if distance(self.last_anchor, anchor) <= threshold {
            Motion::Idle
        } else {
            Motion::Moving
        }
    }

    /// Runs one tick with the head pinned to `anchor`.
    pub fn step(&mut self, config: &ChainConfig, anchor: Vec2) -> Motion {
        let motion = self.classify(anchor, config.move_threshold);
        let was_moving = self.is_moving;
        self.is_moving = motion == Motion::Moving;
        match motion {
            Motion::Idle => self.rest_anchor = anchor,
            Motion::Moving if self.nodes.is_empty() => self.nodes.push(anchor),
            Motion::Moving => {}
        }
        if was_moving != self.is_moving {
            debug!(?motion, nodes = self.nodes.len(), "chain motion changed");
        }

        if let Some(head) = self.nodes.first_mut() {
            *head = anchor;
        }
        for i in 1..self.nodes.len() {
            self.nodes[i] = point_at_spacing(self.nodes[i - 1], self.nodes[i], config.segment_dist);
        }

        match motion {
            Motion::Moving => self.grow(config),
            Motion::Idle => {
                if self.nodes.len() > 1 {
                    self.nodes.pop();
                }
            }
        }

        self.last_anchor = anchor;
        motion
    }

    fn grow(&mut self, config: &ChainConfig) {
        if self.nodes.len() >= config.max_nodes {
            return;
        }
        let Some(&tail) = self.nodes.last() else {
            return;
        };
        if distance(tail, self.rest_anchor) >= config.segment_dist {
            // Lands on the rest anchor when the gap is exactly one segment.
            let node = point_at_spacing(tail, self.rest_anchor, config.segment_dist);
            self.nodes.push(node);
            trace!(nodes = self.nodes.len(), "chain grew");
        }
    }
}

pub struct ChainSimulator {
    config: ChainConfig,
    state: ChainState,
    anchor_target: Vec2,
}

impl ChainSimulator {
    pub fn new(config: ChainConfig) -> Self {
        let state = ChainState::empty_at(config.initial_anchor);
        Self::with_state(config, state)
    }

    pub fn with_state(config: ChainConfig, state: ChainState) -> Self {
        let anchor_target = state.last_anchor;
        Self {
            config,
            state,
            anchor_target,
        }
    }

    pub fn set_anchor_target(&mut self, anchor: Vec2) {
        self.anchor_target = anchor;
    }

    /// The chain reacts to anchor displacement per tick, not to elapsed time,
    /// so `dt` does not enter the step.
    pub fn update(&mut self, _dt: f32) -> Motion {
        self.state.step(&self.config, self.anchor_target)
    }

    pub fn nodes(&self) -> &[Vec2] {
        &self.state.nodes
    }

    pub fn len(&self) -> usize {
        self.state.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.nodes.is_empty()
    }

    pub fn is_moving(&self) -> bool {
        self.state.is_moving
    }

    pub fn state(&self) -> &ChainState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_nodes: usize) -> ChainConfig {
        ChainConfig {
            segment_dist: 4.0,
            max_nodes,
            move_threshold: 1.0,
            initial_anchor: Vec2::ZERO,
        }
    }

    fn assert_spacing(nodes: &[Vec2], spacing: f32) {
        for pair in nodes.windows(2) {
            let gap = distance(pair[0], pair[1]);
            assert!((gap - spacing).abs() < 1e-3, "gap {gap} in {nodes:?}");
        }
    }

    #[test]
    fn empty_chain_stays_empty_while_idle() {
        let mut chain = ChainSimulator::new(config(20));
        chain.set_anchor_target(Vec2::new(0.5, 0.0));
        assert_eq!(chain.update(0.016), Motion::Idle);
        assert!(chain.is_empty());
    }

    #[test]
    fn first_movement_seeds_head() {
        let mut chain = ChainSimulator::new(config(20));
        chain.set_anchor_target(Vec2::new(2.0, 0.0));
        assert_eq!(chain.update(0.016), Motion::Moving);
        assert_eq!(chain.nodes(), &[Vec2::new(2.0, 0.0)]);
    }

    #[test]
    fn jitter_below_threshold_is_idle() {
        let mut chain = ChainSimulator::with_state(config(20), ChainState::resting_at(Vec2::ZERO));
        chain.set_anchor_target(Vec2::new(0.3, 0.4));
        assert_eq!(chain.update(0.016), Motion::Idle);
        assert_eq!(chain.state().rest_anchor, Vec2::new(0.3, 0.4));
    }

    #[test]
    fn grows_one_segment_per_segment_travelled() {
        let mut chain = ChainSimulator::with_state(config(20), ChainState::resting_at(Vec2::ZERO));
        let k = 6;
        let mut x = 0.0;
        while x < 4.0 * k as f32 {
            x += 2.0;
            chain.set_anchor_target(Vec2::new(x, 0.0));
            assert_eq!(chain.update(0.016), Motion::Moving);
            assert_spacing(chain.nodes(), 4.0);
        }
        // One head plus k laid-down segments reaching back to the start.
        assert_eq!(chain.len(), k + 1);
        assert_eq!(*chain.nodes().last().unwrap(), Vec2::ZERO);

        for expected in (1..=k).rev() {
            assert_eq!(chain.update(0.016), Motion::Idle);
            assert_eq!(chain.len(), expected);
        }
        for _ in 0..3 {
            chain.update(0.016);
            assert_eq!(chain.len(), 1);
        }
    }

    #[test]
    fn never_exceeds_max_nodes() {
        let mut chain = ChainSimulator::new(config(5));
        for tick in 1..500 {
            let t = tick as f32 * 0.1;
            chain.set_anchor_target(Vec2::new(t.cos() * 200.0, t.sin() * 150.0 + tick as f32));
            chain.update(0.016);
            assert!(chain.len() <= 5);
            if chain.is_moving() {
                assert_spacing(chain.nodes(), 4.0);
            }
        }
        assert_eq!(chain.len(), 5);
    }

    #[test]
    fn coincident_nodes_resolve_along_x() {
        let p = Vec2::new(10.0, 10.0);
        let state = ChainState {
            nodes: vec![p, p],
            last_anchor: p,
            rest_anchor: p,
            is_moving: true,
        };
        let mut chain = ChainSimulator::with_state(config(20), state);
        chain.set_anchor_target(p);
        chain.update(0.016);
        // Idle tick re-projects first, then retracts.
        assert_eq!(chain.len(), 1);

        // Head lands exactly on its successor.
        let q = Vec2::new(0.0, 10.0);
        let mut state = ChainState {
            nodes: vec![q, p],
            last_anchor: q,
            rest_anchor: q,
            is_moving: true,
        };
        assert_eq!(state.step(&config(20), p), Motion::Moving);
        assert!(state.nodes.iter().all(|n| n.is_finite()));
        assert_eq!(state.nodes[1], Vec2::new(14.0, 10.0));
    }

    #[test]
    fn rest_anchor_freezes_while_moving() {
        let mut chain = ChainSimulator::with_state(config(20), ChainState::resting_at(Vec2::ZERO));
        for x in [3.0, 6.0, 9.0] {
            chain.set_anchor_target(Vec2::new(x, 0.0));
            chain.update(0.016);
            assert_eq!(chain.state().rest_anchor, Vec2::ZERO);
        }
        chain.update(0.016);
        assert_eq!(chain.state().rest_anchor, Vec2::new(9.0, 0.0));
    }
}
