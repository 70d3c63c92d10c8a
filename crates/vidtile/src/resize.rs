//! Re-splits the viewport among live tiles when the window resizes.

use vidtile_core::{Registry, TileError};

use crate::events::Listener;
use crate::web_host::WebHost;

/// Window `resize` listener bound to a registry. Dropping it stops watching.
pub struct ResizeWatcher {
    _listener: Listener,
}

impl ResizeWatcher {
    pub fn watch(host: &WebHost, registry: &Registry<WebHost>) -> Result<Self, TileError> {
        let registry = registry.clone();
        let listener = Listener::add(host.window(), "resize", move |_| {
            tracing::debug!(tiles = registry.len(), "window resized");
            registry.renormalize();
        })?;
        Ok(Self {
            _listener: listener,
        })
    }
}
