use std::collections::HashMap;

use glam::Vec2;
use slither_core::Rect;
use slither_platform::{OverlayHost, Result};
use tracing::{info, warn};

use crate::surface::RecordingSurface;

struct AttachedOverlay {
    container: Rect,
    surface_size: Vec2,
}

/// Simulated host UI whose container only shows up after a few lookups,
/// like an editor that is still loading.
pub struct HeadlessOverlayHost {
    container: Rect,
    pending_polls: u32,
    overlays: HashMap<String, AttachedOverlay>,
}

impl HeadlessOverlayHost {
    pub fn new(container: Rect, pending_polls: u32) -> Self {
        Self {
            container,
            pending_polls,
            overlays: HashMap::new(),
        }
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn log_current_layout(&self, reason: &str) {
        if self.overlays.is_empty() {
            info!("Overlay layout ({}) -> no overlays attached", reason);
            return;
        }
        let details: Vec<String> = self
            .overlays
            .iter()
            .map(|(id, overlay)| {
                format!(
                    "{}: container=({}, {}) {}x{}, surface={}x{}",
                    id,
                    overlay.container.x,
                    overlay.container.y,
                    overlay.container.width,
                    overlay.container.height,
                    overlay.surface_size.x,
                    overlay.surface_size.y
                )
            })
            .collect();
        info!("Overlay layout ({}) -> {}", reason, details.join("; "));
    }

    pub fn remove_overlay(&mut self, id: &str) {
        if self.overlays.remove(id).is_none() {
            warn!("remove_overlay: no overlay named {id}");
        }
    }
}

impl OverlayHost for HeadlessOverlayHost {
    type Surface = RecordingSurface;

    fn locate_container(&mut self) -> Option<Rect> {
        if self.pending_polls > 0 {
            self.pending_polls -= 1;
            return None;
        }
        Some(self.container)
    }

    fn has_overlay(&self, id: &str) -> bool {
        self.overlays.contains_key(id)
    }

    fn create_overlay(
        &mut self,
        id: &str,
        container: Rect,
        surface_size: Vec2,
    ) -> Result<RecordingSurface> {
        if self.overlays.contains_key(id) {
            return Err(format!("overlay {id} already exists").into());
        }
        self.overlays.insert(
            id.to_string(),
            AttachedOverlay {
                container,
                surface_size,
            },
        );
        Ok(RecordingSurface::new(id, surface_size))
    }
}
