//! Platform abstraction traits so `slither-core` stays host-agnostic.
//!
//! The host locates the container and the live caret, owns the drawing
//! surface, and schedules frames; this crate only describes those seams and
//! wires them to the engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use slither_core::{Rect, StrokeStyle, TargetSample, TrailGeometry};

mod attach;
mod driver;

pub use attach::{attach, attach_with, Attach, AttachError};
pub use driver::FrameDriver;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Identifies the overlay so a second attach can detect the first.
    pub overlay_id: String,
    pub retry_delay_ms: u64,
    /// `None` keeps waiting for the container indefinitely.
    pub max_attempts: Option<u32>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            overlay_id: "slither-caret-overlay".into(),
            retry_delay_ms: 500,
            max_attempts: None,
        }
    }
}

/// A caret element as reported by the host UI, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerRect {
    pub rect: Rect,
    pub visible: bool,
}

/// Centre and size of the first visible marker, relative to `container`.
pub fn sample_from_markers(container: Rect, markers: &[MarkerRect]) -> Option<TargetSample> {
    let marker = markers.iter().find(|m| m.visible)?;
    let center = marker.rect.center() - container.origin();
    Some(TargetSample::new(
        center.x,
        center.y,
        marker.rect.width,
        marker.rect.height,
    ))
}

/// Source of the live caret position.
pub trait TargetTracker {
    /// `None` when no caret is visible this frame.
    fn sample(&mut self) -> Option<TargetSample>;
}

/// 2D surface the trail is drawn on.
pub trait DrawSurface {
    fn clear(&mut self) -> Result<()>;
    /// Moves the surface so its centre sits at `center` in container coordinates.
    fn place(&mut self, center: Vec2) -> Result<()>;
    fn submit(&mut self, geometry: &TrailGeometry, stroke: &StrokeStyle) -> Result<()>;
}

/// Owns the host container and creates overlay surfaces inside it.
pub trait OverlayHost {
    type Surface: DrawSurface;

    fn locate_container(&mut self) -> Option<Rect>;
    fn has_overlay(&self, id: &str) -> bool;
    fn create_overlay(
        &mut self,
        id: &str,
        container: Rect,
        surface_size: Vec2,
    ) -> Result<Self::Surface>;
}
