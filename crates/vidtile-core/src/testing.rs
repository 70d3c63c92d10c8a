//! In-memory host for tests.
//!
//! [`FakeHost`] hands out canvases, contexts and videos that record what the
//! tile does to them, and runs scheduled tasks only when the test says so
//! (`run_pending` / `advance`). Event bindings are kept as weak sinks so a
//! test can `fire` pointer and media events the way a page would, and sees
//! them go nowhere once the tile unbinds.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::error::TileError;
use crate::host::{
    CanvasElement, DrawContext, EventSink, Host, MediaElement, TileEvent, Viewport,
};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Media {
        media: u64,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    Arc {
        x: f64,
        y: f64,
        radius: f64,
    },
    Fill,
    FillStyle(String),
    Font(String),
    TextAlign(String),
    TextBaseline(String),
    Text {
        text: String,
        x: f64,
        y: f64,
    },
}

/// Drawing context that logs every call.
#[derive(Debug, Clone, Default)]
pub struct FakeContext {
    ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl FakeContext {
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    pub fn clear(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Number of video frames painted.
    pub fn frames(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, DrawOp::Media { .. }))
            .count()
    }

    /// Text drawn, in order.
    pub fn labels(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Size of the most recent frame.
    pub fn last_frame_size(&self) -> Option<(f64, f64)> {
        self.ops.borrow().iter().rev().find_map(|op| match op {
            DrawOp::Media { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
    }

    fn push(&self, op: DrawOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl DrawContext for FakeContext {
    type Media = FakeVideo;

    fn draw_media(
        &self,
        media: &FakeVideo,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), TileError> {
        self.push(DrawOp::Media {
            media: media.id(),
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn begin_path(&self) {
        self.push(DrawOp::BeginPath);
    }

    fn arc(&self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) -> Result<(), TileError> {
        self.push(DrawOp::Arc { x, y, radius });
        Ok(())
    }

    fn fill(&self) {
        self.push(DrawOp::Fill);
    }

    fn set_fill_style(&self, css_color: &str) {
        self.push(DrawOp::FillStyle(css_color.to_string()));
    }

    fn set_font(&self, css_font: &str) {
        self.push(DrawOp::Font(css_font.to_string()));
    }

    fn set_text_align(&self, align: &str) {
        self.push(DrawOp::TextAlign(align.to_string()));
    }

    fn set_text_baseline(&self, baseline: &str) {
        self.push(DrawOp::TextBaseline(baseline.to_string()));
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), TileError> {
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }
}

#[derive(Debug)]
struct CanvasInner {
    id: u64,
    size: Cell<(u32, u32)>,
    offset: Cell<(f64, f64)>,
    attached: Cell<bool>,
    context_fails: bool,
    context: FakeContext,
}

/// Canvas handle; clones share state.
#[derive(Debug, Clone)]
pub struct FakeCanvas {
    inner: Rc<CanvasInner>,
}

impl FakeCanvas {
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    /// `(width, height)` attributes as last stamped.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.inner.size.get()
    }

    pub fn context(&self) -> FakeContext {
        self.inner.context.clone()
    }

    pub fn set_page_offset(&self, x: f64, y: f64) {
        self.inner.offset.set((x, y));
    }
}

impl CanvasElement for FakeCanvas {
    type Context = FakeContext;

    fn context_2d(&self) -> Result<FakeContext, TileError> {
        if self.inner.context_fails {
            return Err(TileError::Context("2d context unavailable".into()));
        }
        Ok(self.inner.context.clone())
    }

    fn set_pixel_width(&self, width: u32) {
        let (_, h) = self.inner.size.get();
        self.inner.size.set((width, h));
    }

    fn set_pixel_height(&self, height: u32) {
        let (w, _) = self.inner.size.get();
        self.inner.size.set((w, height));
    }

    fn page_offset(&self) -> (f64, f64) {
        self.inner.offset.get()
    }

    fn detach(&self) {
        self.inner.attached.set(false);
    }
}

#[derive(Debug, Default)]
struct VideoInner {
    id: u64,
    source: RefCell<String>,
    autoplay: Cell<bool>,
    native_controls: Cell<bool>,
    muted: Cell<bool>,
    display_height: Cell<Option<u32>>,
    paused: Cell<bool>,
    ended: Cell<bool>,
    time: Cell<f64>,
    attached: Cell<bool>,
}

/// Video handle; clones share state.
///
/// Starts paused; `set_autoplay(true)` puts it in the playing state the way
/// a browser does once the source loads.
#[derive(Debug, Clone)]
pub struct FakeVideo {
    inner: Rc<VideoInner>,
}

impl FakeVideo {
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn source(&self) -> String {
        self.inner.source.borrow().clone()
    }

    pub fn autoplay(&self) -> bool {
        self.inner.autoplay.get()
    }

    pub fn native_controls(&self) -> bool {
        self.inner.native_controls.get()
    }

    pub fn muted(&self) -> bool {
        self.inner.muted.get()
    }

    pub fn display_height(&self) -> Option<u32> {
        self.inner.display_height.get()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    pub fn time(&self) -> f64 {
        self.inner.time.get()
    }

    pub fn set_time(&self, seconds: f64) {
        self.inner.time.set(seconds);
    }

    pub fn set_ended(&self, ended: bool) {
        self.inner.ended.set(ended);
    }
}

impl MediaElement for FakeVideo {
    fn set_source(&self, url: &str) {
        *self.inner.source.borrow_mut() = url.to_string();
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.inner.autoplay.set(autoplay);
        if autoplay {
            self.inner.paused.set(false);
        }
    }

    fn set_native_controls(&self, enabled: bool) {
        self.inner.native_controls.set(enabled);
    }

    fn set_muted(&self, muted: bool) {
        self.inner.muted.set(muted);
    }

    fn set_display_height(&self, height: u32) {
        self.inner.display_height.set(Some(height));
    }

    fn play(&self) -> Result<(), TileError> {
        self.inner.paused.set(false);
        self.inner.ended.set(false);
        Ok(())
    }

    fn pause(&self) -> Result<(), TileError> {
        self.inner.paused.set(true);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.inner.time.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.inner.time.set(seconds);
    }

    fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    fn is_ended(&self) -> bool {
        self.inner.ended.get()
    }

    fn detach(&self) {
        self.inner.attached.set(false);
    }
}

/// Keeps a tile's sink alive; the host only holds it weakly.
pub struct FakeBindings {
    _sink: EventSink,
}

/// Scheduled-task handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeTask(u64);

struct Task {
    id: u64,
    due: Duration,
    run: Box<dyn FnOnce()>,
}

/// In-memory page with a manual clock.
pub struct FakeHost {
    viewport: Cell<Viewport>,
    canvases: RefCell<Vec<FakeCanvas>>,
    videos: RefCell<Vec<FakeVideo>>,
    sinks: RefCell<Vec<Weak<dyn Fn(TileEvent)>>>,
    tasks: RefCell<Vec<Task>>,
    now: Cell<Duration>,
    next_id: Cell<u64>,
    fail_context: Cell<bool>,
    fail_video: Cell<bool>,
}

impl FakeHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
            canvases: RefCell::new(Vec::new()),
            videos: RefCell::new(Vec::new()),
            sinks: RefCell::new(Vec::new()),
            tasks: RefCell::new(Vec::new()),
            now: Cell::new(Duration::ZERO),
            next_id: Cell::new(1),
            fail_context: Cell::new(false),
            fail_video: Cell::new(false),
        }
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    /// Make new canvases refuse to hand out a 2D context.
    pub fn fail_context(&self, fail: bool) {
        self.fail_context.set(fail);
    }

    /// Make `create_video` fail.
    pub fn fail_video(&self, fail: bool) {
        self.fail_video.set(fail);
    }

    /// Canvas `index`, in creation order.
    ///
    /// # Panics
    /// If fewer canvases were created.
    pub fn canvas(&self, index: usize) -> FakeCanvas {
        self.canvases.borrow()[index].clone()
    }

    /// Video `index`, in creation order.
    ///
    /// # Panics
    /// If fewer videos were created.
    pub fn video(&self, index: usize) -> FakeVideo {
        self.videos.borrow()[index].clone()
    }

    pub fn attached_canvases(&self) -> usize {
        self.canvases
            .borrow()
            .iter()
            .filter(|c| c.is_attached())
            .count()
    }

    pub fn attached_videos(&self) -> usize {
        self.videos
            .borrow()
            .iter()
            .filter(|v| v.is_attached())
            .count()
    }

    /// Delivers `event` through binding `index` (bindings are numbered in
    /// creation order). Returns false if that binding has been dropped.
    pub fn fire(&self, index: usize, event: TileEvent) -> bool {
        let sink = self
            .sinks
            .borrow()
            .get(index)
            .and_then(|weak| weak.upgrade());
        match sink {
            Some(sink) => {
                sink(event);
                true
            }
            None => false,
        }
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs every task already due. Tasks scheduled while running wait for
    /// the next call. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let now = self.now.get();
        let mut due: Vec<(Duration, u64)> = self
            .tasks
            .borrow()
            .iter()
            .filter(|t| t.due <= now)
            .map(|t| (t.due, t.id))
            .collect();
        due.sort();

        let mut ran = 0;
        for (_, id) in due {
            let task = {
                let mut tasks = self.tasks.borrow_mut();
                tasks
                    .iter()
                    .position(|t| t.id == id)
                    .map(|pos| tasks.remove(pos))
            };
            if let Some(task) = task {
                (task.run)();
                ran += 1;
            }
        }
        ran
    }

    /// Moves the clock forward, then runs what became due.
    pub fn advance(&self, by: Duration) -> usize {
        self.now.set(self.now.get() + by);
        self.run_pending()
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Host for FakeHost {
    type Video = FakeVideo;
    type Context = FakeContext;
    type Canvas = FakeCanvas;
    type Bindings = FakeBindings;
    type TaskHandle = FakeTask;

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn create_canvas(&self) -> Result<FakeCanvas, TileError> {
        let canvas = FakeCanvas {
            inner: Rc::new(CanvasInner {
                id: self.allocate_id(),
                size: Cell::new((300, 150)),
                offset: Cell::new((0.0, 0.0)),
                attached: Cell::new(true),
                context_fails: self.fail_context.get(),
                context: FakeContext::default(),
            }),
        };
        self.canvases.borrow_mut().push(canvas.clone());
        Ok(canvas)
    }

    fn create_video(&self) -> Result<FakeVideo, TileError> {
        if self.fail_video.get() {
            return Err(TileError::create("video", "video element disabled"));
        }
        let video = FakeVideo {
            inner: Rc::new(VideoInner {
                id: self.allocate_id(),
                paused: Cell::new(true),
                attached: Cell::new(true),
                ..VideoInner::default()
            }),
        };
        self.videos.borrow_mut().push(video.clone());
        Ok(video)
    }

    fn bind_events(
        &self,
        _canvas: &FakeCanvas,
        _video: &FakeVideo,
        sink: EventSink,
    ) -> Result<FakeBindings, TileError> {
        self.sinks.borrow_mut().push(Rc::downgrade(&sink));
        Ok(FakeBindings { _sink: sink })
    }

    fn schedule(
        &self,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> Result<FakeTask, TileError> {
        let id = self.allocate_id();
        self.tasks.borrow_mut().push(Task {
            id,
            due: self.now.get() + delay,
            run: task,
        });
        Ok(FakeTask(id))
    }

    fn cancel(&self, handle: FakeTask) {
        self.tasks.borrow_mut().retain(|t| t.id != handle.0);
    }
}
