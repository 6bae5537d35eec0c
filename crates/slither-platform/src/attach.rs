use std::time::Duration;

use glam::Vec2;
use slither_core::Rect;
use thiserror::Error;
use tracing::{debug, info};

use crate::{HostConfig, OverlayHost};

#[derive(Debug, Error)]
pub enum AttachError {
    #[error("host container not found after {attempts} attempts")]
    ContainerNotFound { attempts: u32 },
    #[error("failed to create overlay `{id}`: {source}")]
    CreateFailed {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub enum Attach<S> {
    Created { surface: S, container: Rect },
    /// An overlay with the configured id is already attached; nothing was created.
    AlreadyPresent,
}

/// Waits for the host container (sleeping between polls) and creates the
/// overlay surface once it exists.
pub fn attach<H: OverlayHost>(
    host: &mut H,
    config: &HostConfig,
    surface_size: Vec2,
) -> Result<Attach<H::Surface>, AttachError> {
    attach_with(host, config, surface_size, std::thread::sleep)
}

pub fn attach_with<H, F>(
    host: &mut H,
    config: &HostConfig,
    surface_size: Vec2,
    mut sleep: F,
) -> Result<Attach<H::Surface>, AttachError>
where
    H: OverlayHost,
    F: FnMut(Duration),
{
    let delay = Duration::from_millis(config.retry_delay_ms);
    let mut attempts = 0u32;
    let container = loop {
        if host.has_overlay(&config.overlay_id) {
            info!(id = %config.overlay_id, "overlay already attached; skipping");
            return Ok(Attach::AlreadyPresent);
        }
        attempts += 1;
        if let Some(container) = host.locate_container() {
            break container;
        }
        if config.max_attempts.is_some_and(|max| attempts >= max) {
            return Err(AttachError::ContainerNotFound { attempts });
        }
        debug!(attempts, "host container not ready; retrying in {delay:?}");
        sleep(delay);
    };

    let surface = host
        .create_overlay(&config.overlay_id, container, surface_size)
        .map_err(|source| AttachError::CreateFailed {
            id: config.overlay_id.clone(),
            source,
        })?;
    info!(
        id = %config.overlay_id,
        attempts,
        "overlay attached to {}x{} container",
        container.width,
        container.height
    );
    Ok(Attach::Created { surface, container })
}
