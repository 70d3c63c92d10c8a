//! Capability surface a tile runs on.
//!
//! The core never talks to a browser directly. Everything it needs from the
//! page (element creation, 2D drawing, the media element, timers, event
//! delivery, the viewport size) goes through the traits in this module:
//!
//! ```text
//! PlaybackTile ──► Host ──► CanvasElement ──► DrawContext
//!                   │                              │ draw_media
//!                   └────► MediaElement ◄──────────┘
//! ```
//!
//! `vidtile` implements them over `web-sys`; the `testing` module implements
//! them in memory.

use std::rc::Rc;
use std::time::Duration;

use crate::error::TileError;

/// Size of the visible page area, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible width
    pub width: f64,
    /// Visible height
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Input delivered from the page to a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileEvent {
    /// Pointer entered the canvas
    PointerEnter,
    /// Pointer left the canvas
    PointerLeave,
    /// Click at page-relative coordinates
    Click {
        /// Page-relative x
        page_x: f64,
        /// Page-relative y
        page_y: f64,
    },
    /// The media element started (or resumed) playing
    MediaPlay,
    /// The media element finished a seek
    MediaSeeked,
}

/// Callback a host invokes for every [`TileEvent`] on a tile's elements.
pub type EventSink = Rc<dyn Fn(TileEvent)>;

/// A 2D drawing context bound to one canvas.
pub trait DrawContext {
    /// Media type this context can paint frames from.
    type Media;

    /// Paints the current frame of `media` scaled into the given rect.
    fn draw_media(
        &self,
        media: &Self::Media,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), TileError>;

    fn begin_path(&self);

    /// Adds a circular arc from `start` to `end` radians to the current path.
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), TileError>;

    fn fill(&self);

    fn set_fill_style(&self, css_color: &str);

    fn set_font(&self, css_font: &str);

    fn set_text_align(&self, align: &str);

    fn set_text_baseline(&self, baseline: &str);

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), TileError>;
}

/// A canvas element already attached to the page.
pub trait CanvasElement {
    type Context: DrawContext;

    /// Acquires the element's 2D drawing context.
    fn context_2d(&self) -> Result<Self::Context, TileError>;

    /// Sets the `width` attribute (backing-store pixels).
    fn set_pixel_width(&self, width: u32);

    /// Sets the `height` attribute (backing-store pixels).
    fn set_pixel_height(&self, height: u32);

    /// Offset of the element's top-left corner relative to the page.
    fn page_offset(&self) -> (f64, f64);

    /// Removes the element from the page.
    fn detach(&self);
}

/// A video element already attached to the page.
///
/// Methods take `&self`: page elements are shared handles with interior
/// state owned by the media engine.
pub trait MediaElement {
    fn set_source(&self, url: &str);

    fn set_autoplay(&self, autoplay: bool);

    /// Shows or hides the element's built-in controls.
    fn set_native_controls(&self, enabled: bool);

    fn set_muted(&self, muted: bool);

    /// Height of the element's own box on the page.
    fn set_display_height(&self, height: u32);

    /// Requests playback. Completion is reported asynchronously through
    /// [`TileEvent::MediaPlay`].
    fn play(&self) -> Result<(), TileError>;

    fn pause(&self) -> Result<(), TileError>;

    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    /// Seeks to `seconds`. Out-of-range values are left to the media engine.
    fn set_current_time(&self, seconds: f64);

    fn is_paused(&self) -> bool;

    fn is_ended(&self) -> bool;

    /// Removes the element from the page.
    fn detach(&self);
}

/// The page a set of tiles lives on.
///
/// `schedule` must never run `task` synchronously: tasks borrow tile state
/// and are expected to run from the event loop.
pub trait Host: 'static {
    type Video: MediaElement + 'static;
    type Context: DrawContext<Media = Self::Video> + 'static;
    type Canvas: CanvasElement<Context = Self::Context> + 'static;
    /// Keeps event listeners alive; dropping it unbinds them.
    type Bindings: 'static;
    /// Identifies a scheduled task for cancellation.
    type TaskHandle: Copy + std::fmt::Debug + 'static;

    fn viewport(&self) -> Viewport;

    /// Creates a canvas element and attaches it to the page.
    fn create_canvas(&self) -> Result<Self::Canvas, TileError>;

    /// Creates a video element and attaches it to the page.
    fn create_video(&self) -> Result<Self::Video, TileError>;

    /// Routes pointer events on `canvas` and media events on `video` to `sink`.
    fn bind_events(
        &self,
        canvas: &Self::Canvas,
        video: &Self::Video,
        sink: EventSink,
    ) -> Result<Self::Bindings, TileError>;

    /// Runs `task` once after `delay`. `Duration::ZERO` means the next tick.
    fn schedule(
        &self,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> Result<Self::TaskHandle, TileError>;

    /// Cancels a scheduled task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::TaskHandle);
}
