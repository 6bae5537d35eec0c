//! Headless platform implementation for Slither: a scripted caret, a
//! recording surface and a simulated host container.
use std::io::Write;

use glam::Vec2;
use slither_core::TrailEngine;
use slither_platform::{attach, Attach, FrameDriver, Result};
use tracing::info;

mod config;
mod overlay;
mod surface;
mod tracker;

pub use crate::config::{DemoScript, Keyframe, SlitherConfig};
pub use crate::overlay::HeadlessOverlayHost;
pub use crate::surface::{DrawCommand, RecordingSurface};
pub use crate::tracker::ScriptedTracker;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub final_placement: Vec2,
    pub longest_chain: usize,
    /// False when an overlay was already attached and nothing ran.
    pub attached: bool,
}

// Public app entry ----------------
/// Attach the overlay, drive the scripted frames, and write one JSON line per
/// frame to `out`.
pub fn run_app<W: Write>(config: &SlitherConfig, out: &mut W) -> Result<RunSummary> {
    let demo = &config.demo;
    let mut host = HeadlessOverlayHost::new(demo.container, demo.container_delay_polls);
    let (surface, container) =
        match attach(&mut host, &config.host, config.trail.render.surface_size)? {
            Attach::Created { surface, container } => (surface, container),
            Attach::AlreadyPresent => {
                return Ok(RunSummary {
                    frames: 0,
                    final_placement: Vec2::ZERO,
                    longest_chain: 0,
                    attached: false,
                })
            }
        };
    host.log_current_layout("initial overlay creation");

    let mut engine = TrailEngine::new(config.trail.clone());
    engine.snap_to(Vec2::new(container.width * 0.5, container.height * 0.5));
    let tracker = ScriptedTracker::new(container, demo.keyframes.clone());
    let mut driver = FrameDriver::new(engine, tracker, surface);

    let mut longest_chain = 0;
    let mut final_placement = Vec2::ZERO;
    for _ in 0..demo.frames {
        let frame = driver.tick(demo.dt)?;
        final_placement = frame.placement;
        longest_chain = longest_chain.max(driver.engine().chain().len());
        writeln!(out, "{}", driver.surface().frame_json()?)?;
    }
    out.flush()?;

    info!(
        frames = driver.frames(),
        longest_chain, "headless run finished"
    );
    host.remove_overlay(&config.host.overlay_id);
    host.log_current_layout("teardown");

    Ok(RunSummary {
        frames: driver.frames(),
        final_placement,
        longest_chain,
        attached: true,
    })
}
