//! Video source backed by the browser's native HTMLVideoElement.
//!
//! The element decodes; the tile paints its current frame onto a canvas.
//! The element itself is kept on the page at zero height so it never shows
//! next to its canvas.
//!
//! ## Autoplay Policy
//!
//! Browsers refuse to autoplay audible video. Tiles start muted by default;
//! a rejected `play()` is logged rather than surfaced, since the promise
//! settles long after the click that asked for it.

use vidtile_core::{MediaElement, TileError};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlVideoElement};

/// A `<video>` element attached to the page.
pub struct WebVideo {
    video: HtmlVideoElement,
}

impl WebVideo {
    /// Creates a video element and appends it to `body`.
    pub(crate) fn create(document: &Document, body: &HtmlElement) -> Result<Self, TileError> {
        let video: HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| TileError::create("video", format!("{e:?}")))?
            .dyn_into()
            .map_err(|_| TileError::create("video", "element is not a video"))?;

        // Required for inline playback on iOS
        video.set_attribute("playsinline", "true").ok();

        body.append_child(&video)
            .map_err(|e| TileError::create("video", format!("failed to append: {e:?}")))?;

        Ok(Self { video })
    }

    /// Underlying element, for drawing frames onto a canvas.
    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl MediaElement for WebVideo {
    fn set_source(&self, url: &str) {
        self.video.set_src(url);
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.video.set_autoplay(autoplay);
    }

    fn set_native_controls(&self, enabled: bool) {
        self.video.set_controls(enabled);
    }

    fn set_muted(&self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn set_display_height(&self, height: u32) {
        self.video.set_height(height);
    }

    fn play(&self) -> Result<(), TileError> {
        let promise = self
            .video
            .play()
            .map_err(|e| TileError::Playback(format!("play failed: {e:?}")))?;

        let src = self.video.src();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                // NotAllowedError here means the video needs a user gesture
                tracing::warn!(%src, error = ?e, "play() rejected");
            }
        });
        Ok(())
    }

    fn pause(&self) -> Result<(), TileError> {
        self.video
            .pause()
            .map_err(|e| TileError::Playback(format!("pause failed: {e:?}")))
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn is_paused(&self) -> bool {
        self.video.paused()
    }

    fn is_ended(&self) -> bool {
        self.video.ended()
    }

    fn detach(&self) {
        self.video.remove();
    }
}
