//! Tile and launch configuration.

use std::time::Duration;

use crate::controls::ControlLayout;

/// Per-tile behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct TileConfig {
    /// Overlay control geometry and appearance
    pub controls: ControlLayout,
    /// Start the video muted. Browsers block unmuted autoplay, so turning this
    /// off usually means the video waits for a user gesture.
    pub muted: bool,
    /// Ignore clicks while the overlay is hidden.
    pub clicks_require_visible_controls: bool,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            controls: ControlLayout::default(),
            muted: true,
            clicks_require_visible_controls: true,
        }
    }
}

impl TileConfig {
    pub fn with_controls(mut self, controls: ControlLayout) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// When false, hidden controls still respond to clicks.
    pub fn with_clicks_require_visible_controls(mut self, required: bool) -> Self {
        self.clicks_require_visible_controls = required;
        self
    }
}

/// How a batch of tiles is brought up.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    /// Delay between consecutive tile inits
    pub stagger: Duration,
    /// Configuration applied to every tile
    pub tile: TileConfig,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            stagger: Duration::from_secs(30),
            tile: TileConfig::default(),
        }
    }
}

impl LaunchConfig {
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_tile(mut self, tile: TileConfig) -> Self {
        self.tile = tile;
        self
    }
}
