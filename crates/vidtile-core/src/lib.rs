//! vidtile-core: side-by-side canvas video tiles without a browser dependency.
//!
//! This crate holds everything about tiles that is not a DOM call:
//!
//! - [`surface`]: viewport-bounded drawing region with set-once canvas/context
//! - [`controls`]: circular overlay buttons, layout and hit-testing
//! - [`registry`]: shared live-tile set that splits the viewport width
//! - [`tile`]: the managed video + canvas pair and its redraw loop
//! - [`launch`]: staggered bring-up of a list of sources
//! - [`host`]: the capability traits a page must provide
//!
//! The browser implementation of [`host`] lives in the `vidtile` crate. The
//! `testing` feature exposes an in-memory host used by this crate's tests.

pub mod config;
pub mod controls;
pub mod error;
pub mod host;
pub mod launch;
pub mod registry;
pub mod surface;
pub mod tile;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{LaunchConfig, TileConfig};
pub use controls::{hit_test, ControlAction, ControlButton, ControlLayout};
pub use error::TileError;
pub use host::{
    CanvasElement, DrawContext, EventSink, Host, MediaElement, TileEvent, Viewport,
};
pub use launch::{launch, Launch};
pub use registry::{Registry, TileId};
pub use surface::Surface;
pub use tile::{PlaybackTile, TilePhase};
