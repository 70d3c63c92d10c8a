//! One video + canvas + overlay controls, laid out through a shared registry.
//!
//! # Lifecycle
//!
//! ```text
//! new(url)                      → Constructed   (no page presence)
//! init()                        → Initialized   (canvas, video, listeners, registry)
//!   set_paused(true/false)        Playing ⇄ Paused
//! destroy()                     → Destroyed     (detached, left registry)
//! init() on a registered tile   → destroy() first, then init
//! ```
//!
//! # Redraw loop
//!
//! `redraw` paints the current frame (plus controls when visible) and, while
//! the video is neither paused nor ended, schedules one more `redraw` on the
//! next tick. At most one iteration is pending per tile. The pending task is
//! cancelled on destroy; a task that outlives its tile finds only a dead
//! weak reference and does nothing. "play" and "seeked" media events restart
//! the loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::config::TileConfig;
use crate::controls::{self, ControlAction, ControlButton};
use crate::error::TileError;
use crate::host::{CanvasElement, DrawContext, EventSink, Host, MediaElement, TileEvent};
use crate::registry::{Registry, TileId};
use crate::surface::Surface;

/// Coarse lifecycle position of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilePhase {
    Constructed,
    Initialized,
    Destroyed,
}

pub(crate) struct TileState<H: Host> {
    id: TileId,
    host: Rc<H>,
    config: TileConfig,
    source_url: String,
    surface: Surface<H>,
    video: Option<H::Video>,
    paused: bool,
    controls_visible: bool,
    controls: Vec<ControlButton>,
    bindings: Option<H::Bindings>,
    pending_frame: Option<H::TaskHandle>,
    phase: TilePhase,
    self_ref: Weak<RefCell<TileState<H>>>,
}

impl<H: Host> TileState<H> {
    /// Builds the surface, video and listeners. Leaves nothing attached on error.
    fn materialize(&mut self) -> Result<(), TileError> {
        let result = self.try_materialize();
        if result.is_err() {
            self.teardown();
        }
        result
    }

    fn try_materialize(&mut self) -> Result<(), TileError> {
        self.paused = false;
        self.controls_visible = false;

        self.surface.initialize(&self.host)?;

        let video = self.host.create_video()?;
        video.set_source(&self.source_url);
        video.set_autoplay(true);
        video.set_native_controls(false);
        video.set_muted(self.config.muted);
        video.set_display_height(0);
        self.set_video(video);

        let canvas = self.surface.canvas().ok_or(TileError::NotInitialized)?;
        let video = self.video.as_ref().ok_or(TileError::NotInitialized)?;
        let bindings = self.host.bind_events(canvas, video, self.event_sink())?;
        self.bindings = Some(bindings);

        self.rebuild_controls();
        self.phase = TilePhase::Initialized;
        tracing::info!(id = %self.id, url = %self.source_url, "tile initialized");
        Ok(())
    }

    /// Sets the video unless one is already held.
    fn set_video(&mut self, video: H::Video) {
        if self.video.is_none() {
            self.video = Some(video);
        }
    }

    fn event_sink(&self) -> EventSink {
        let weak = self.self_ref.clone();
        Rc::new(move |event| {
            let Some(tile) = weak.upgrade() else {
                return;
            };
            let Ok(mut state) = tile.try_borrow_mut() else {
                tracing::trace!(?event, "tile busy, dropping event");
                return;
            };
            state.dispatch(event);
        })
    }

    fn dispatch(&mut self, event: TileEvent) {
        let result = match event {
            TileEvent::PointerEnter => self.set_controls_visible(true),
            TileEvent::PointerLeave => self.set_controls_visible(false),
            TileEvent::Click { page_x, page_y } => self.handle_click(page_x, page_y).map(|_| ()),
            TileEvent::MediaPlay | TileEvent::MediaSeeked => self.redraw(),
        };
        if let Err(e) = result {
            tracing::warn!(id = %self.id, ?event, error = %e, "tile event failed");
        }
    }

    pub(crate) fn on_membership_change(&mut self, member_count: usize) -> Result<(), TileError> {
        if member_count == 0 {
            return Ok(());
        }
        let viewport = self.host.viewport();
        self.surface
            .set_width(viewport.width / member_count as f64, viewport);
        self.surface.set_height(viewport.height, viewport);
        self.surface.sync_pixel_size();
        self.rebuild_controls();
        tracing::debug!(
            id = %self.id,
            member_count,
            width = self.surface.width(),
            height = self.surface.height(),
            "tile layout updated"
        );
        self.redraw()
    }

    fn rebuild_controls(&mut self) {
        self.controls = self.config.controls.buttons(
            self.surface.width(),
            self.surface.height(),
            self.paused,
        );
    }

    fn set_paused(&mut self, paused: bool) -> Result<(), TileError> {
        let video = self.video.as_ref().ok_or(TileError::NotInitialized)?;
        self.paused = paused;
        if paused {
            video.pause()?;
        } else {
            video.play()?;
        }
        self.rebuild_controls();
        self.redraw()
    }

    fn set_controls_visible(&mut self, visible: bool) -> Result<(), TileError> {
        self.controls_visible = visible;
        if self.phase == TilePhase::Initialized {
            self.redraw()
        } else {
            Ok(())
        }
    }

    fn handle_click(&mut self, page_x: f64, page_y: f64) -> Result<Option<ControlAction>, TileError> {
        if self.config.clicks_require_visible_controls && !self.controls_visible {
            return Ok(None);
        }
        let canvas = self.surface.canvas().ok_or(TileError::NotInitialized)?;
        let (offset_x, offset_y) = canvas.page_offset();
        let x = page_x - offset_x;
        let y = page_y - offset_y;

        let Some(action) = controls::hit_test(&self.controls, x, y).map(|b| b.action) else {
            return Ok(None);
        };
        tracing::debug!(id = %self.id, ?action, "control clicked");
        self.perform(action)?;
        Ok(Some(action))
    }

    fn perform(&mut self, action: ControlAction) -> Result<(), TileError> {
        match action {
            ControlAction::SeekBy(seconds) => {
                let video = self.video.as_ref().ok_or(TileError::NotInitialized)?;
                video.set_current_time(video.current_time() + seconds);
                Ok(())
            }
            ControlAction::TogglePause => self.set_paused(!self.paused),
        }
    }

    fn redraw(&mut self) -> Result<(), TileError> {
        let ctx = self.surface.context().ok_or(TileError::NotInitialized)?;
        let video = self.video.as_ref().ok_or(TileError::NotInitialized)?;

        ctx.draw_media(video, 0.0, 0.0, self.surface.width(), self.surface.height())?;
        if self.controls_visible {
            controls::draw_controls(ctx, &self.controls, &self.config.controls)?;
        }

        if !video.is_paused() && !video.is_ended() {
            self.schedule_frame()?;
        }
        Ok(())
    }

    fn schedule_frame(&mut self) -> Result<(), TileError> {
        if self.pending_frame.is_some() {
            return Ok(());
        }
        let weak = self.self_ref.clone();
        let handle = self
            .host
            .schedule(Duration::ZERO, Box::new(move || run_frame(weak)))?;
        self.pending_frame = Some(handle);
        Ok(())
    }

    /// Cancels the loop, unbinds listeners and detaches video and canvas.
    fn teardown(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel(handle);
        }
        self.bindings = None;
        if let Some(video) = self.video.take() {
            video.detach();
        }
        self.surface.release();
    }
}

fn run_frame<H: Host>(tile: Weak<RefCell<TileState<H>>>) {
    let Some(tile) = tile.upgrade() else {
        return;
    };
    let Ok(mut state) = tile.try_borrow_mut() else {
        tracing::trace!("tile busy, skipping frame");
        return;
    };
    state.pending_frame = None;
    if state.phase != TilePhase::Initialized {
        return;
    }
    if let Err(e) = state.redraw() {
        tracing::warn!(id = %state.id, error = %e, "redraw failed");
    }
}

impl<H: Host> Drop for TileState<H> {
    fn drop(&mut self) {
        if self.phase == TilePhase::Initialized {
            self.teardown();
        }
    }
}

/// Handle to a managed video tile.
///
/// Clones refer to the same tile. The tile (and its page elements) live as
/// long as at least one handle does; the registry does not keep it alive.
pub struct PlaybackTile<H: Host> {
    id: TileId,
    state: Rc<RefCell<TileState<H>>>,
    registry: Registry<H>,
}

impl<H: Host> Clone for PlaybackTile<H> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            state: Rc::clone(&self.state),
            registry: self.registry.clone(),
        }
    }
}

impl<H: Host> PlaybackTile<H> {
    /// Creates an inert tile for `source_url`. Nothing touches the page until
    /// [`PlaybackTile::init`].
    pub fn new(
        source_url: impl Into<String>,
        host: Rc<H>,
        registry: &Registry<H>,
        config: TileConfig,
    ) -> Self {
        let id = registry.allocate_id();
        let surface = Surface::new(host.viewport());
        let controls = config
            .controls
            .buttons(surface.width(), surface.height(), false);
        let state = Rc::new_cyclic(|self_ref| {
            RefCell::new(TileState {
                id,
                host,
                config,
                source_url: source_url.into(),
                surface,
                video: None,
                paused: false,
                controls_visible: false,
                controls,
                bindings: None,
                pending_frame: None,
                phase: TilePhase::Constructed,
                self_ref: self_ref.clone(),
            })
        });
        Self {
            id,
            state,
            registry: registry.clone(),
        }
    }

    /// Materializes the tile on the page and re-lays out every registry member.
    ///
    /// A tile that is already registered is destroyed first.
    pub fn init(&self) -> Result<(), TileError> {
        if self.registry.contains(self.id) {
            tracing::debug!(id = %self.id, "re-init, destroying previous instance");
            self.destroy();
        }
        self.state.borrow_mut().materialize()?;
        self.registry.join(self.id, Rc::downgrade(&self.state));
        self.registry.renormalize();
        Ok(())
    }

    /// Detaches the tile, leaves the registry and re-lays out the remaining
    /// members. Calling it again is a no-op.
    pub fn destroy(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.phase == TilePhase::Initialized {
                state.teardown();
                state.phase = TilePhase::Destroyed;
                tracing::info!(id = %self.id, "tile destroyed");
            }
        }
        if self.registry.leave(self.id) {
            self.registry.renormalize();
        }
    }

    /// Pauses or resumes the video, refreshes the play/pause label and redraws.
    pub fn set_paused(&self, paused: bool) -> Result<(), TileError> {
        self.state.borrow_mut().set_paused(paused)
    }

    /// Shows or hides the overlay and redraws immediately.
    pub fn set_controls_visible(&self, visible: bool) -> Result<(), TileError> {
        self.state.borrow_mut().set_controls_visible(visible)
    }

    /// Hit-tests a page-relative click and runs the first matching control.
    ///
    /// Returns the action that ran, if any.
    pub fn handle_click(&self, page_x: f64, page_y: f64) -> Result<Option<ControlAction>, TileError> {
        self.state.borrow_mut().handle_click(page_x, page_y)
    }

    /// Paints one frame now and keeps the loop going while the video plays.
    pub fn redraw(&self) -> Result<(), TileError> {
        self.state.borrow_mut().redraw()
    }

    /// Routes a page event the same way bound listeners do.
    pub fn dispatch(&self, event: TileEvent) {
        self.state.borrow_mut().dispatch(event);
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn source_url(&self) -> String {
        self.state.borrow().source_url.clone()
    }

    pub fn width(&self) -> f64 {
        self.state.borrow().surface.width()
    }

    pub fn height(&self) -> f64 {
        self.state.borrow().surface.height()
    }

    pub fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    pub fn controls_visible(&self) -> bool {
        self.state.borrow().controls_visible
    }

    /// Snapshot of the current control row.
    pub fn controls(&self) -> Vec<ControlButton> {
        self.state.borrow().controls.clone()
    }

    pub fn phase(&self) -> TilePhase {
        self.state.borrow().phase
    }

    pub fn is_registered(&self) -> bool {
        self.registry.contains(self.id)
    }

    /// True while a redraw iteration is scheduled.
    pub fn has_pending_frame(&self) -> bool {
        self.state.borrow().pending_frame.is_some()
    }

    /// A handle that does not keep the tile alive.
    pub(crate) fn downgrade(&self) -> WeakTile<H> {
        WeakTile {
            id: self.id,
            state: Rc::downgrade(&self.state),
            registry: self.registry.clone(),
        }
    }
}

/// Non-owning counterpart of [`PlaybackTile`], for scheduled tasks.
pub(crate) struct WeakTile<H: Host> {
    id: TileId,
    state: Weak<RefCell<TileState<H>>>,
    registry: Registry<H>,
}

impl<H: Host> WeakTile<H> {
    pub(crate) fn upgrade(&self) -> Option<PlaybackTile<H>> {
        self.state.upgrade().map(|state| PlaybackTile {
            id: self.id,
            state,
            registry: self.registry.clone(),
        })
    }
}
