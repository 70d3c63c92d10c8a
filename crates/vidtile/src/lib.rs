//! vidtile: canvas video tiles for the browser
//!
//! Each tile is a hidden `<video>` element painted frame by frame onto a
//! `<canvas>`. Tiles share the viewport width equally, and every tile draws
//! three circular overlay buttons (rewind, play/pause, forward) while the
//! pointer is over it.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use vidtile::{launch, LaunchConfig, Registry, WebHost};
//!
//! let host = Rc::new(WebHost::new()?);
//! let registry = Registry::new();
//! let tiles = launch(&host, &registry, &["a.mp4", "b.mp4"], &LaunchConfig::default())?;
//! ```
//!
//! All tile logic lives in `vidtile-core` and is re-exported here. This crate
//! adds the `web-sys` implementation of [`Host`] and is only functional on
//! `wasm32`.

pub use vidtile_core::{
    hit_test, launch, CanvasElement, ControlAction, ControlButton, ControlLayout, DrawContext,
    EventSink, Host, Launch, LaunchConfig, MediaElement, PlaybackTile, Registry, Surface,
    TileConfig, TileError, TileEvent, TileId, TilePhase, Viewport,
};

#[cfg(target_arch = "wasm32")]
pub mod console;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
pub mod resize;
#[cfg(target_arch = "wasm32")]
pub mod web_canvas;
#[cfg(target_arch = "wasm32")]
pub mod web_host;
#[cfg(target_arch = "wasm32")]
pub mod web_video;

#[cfg(target_arch = "wasm32")]
pub use console::init_console_tracing;
#[cfg(target_arch = "wasm32")]
pub use events::WebBindings;
#[cfg(target_arch = "wasm32")]
pub use resize::ResizeWatcher;
#[cfg(target_arch = "wasm32")]
pub use web_canvas::{WebCanvas, WebContext};
#[cfg(target_arch = "wasm32")]
pub use web_host::{TimeoutHandle, WebHost};
#[cfg(target_arch = "wasm32")]
pub use web_video::WebVideo;
