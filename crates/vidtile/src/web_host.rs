//! The browser page as a tile [`Host`].

use std::time::Duration;

use vidtile_core::{EventSink, Host, TileError, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::events::{self, WebBindings};
use crate::web_canvas::{WebCanvas, WebContext};
use crate::web_video::WebVideo;

/// Id returned by `setTimeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutHandle(i32);

/// Window, document and body of the current page.
///
/// New elements are appended to `<body>` in creation order, so tiles line
/// up left to right as they initialize.
pub struct WebHost {
    window: Window,
    document: Document,
    body: HtmlElement,
}

impl WebHost {
    pub fn new() -> Result<Self, TileError> {
        let window =
            web_sys::window().ok_or_else(|| TileError::create("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| TileError::create("document", "window has no document"))?;
        let body = document
            .body()
            .ok_or_else(|| TileError::create("body", "document has no body"))?;
        Ok(Self {
            window,
            document,
            body,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// Reads a numeric window dimension, treating anything unreadable as zero.
fn dimension(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl Host for WebHost {
    type Video = WebVideo;
    type Context = WebContext;
    type Canvas = WebCanvas;
    type Bindings = WebBindings;
    type TaskHandle = TimeoutHandle;

    fn viewport(&self) -> Viewport {
        Viewport::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn create_canvas(&self) -> Result<WebCanvas, TileError> {
        WebCanvas::create(&self.document, &self.body)
    }

    fn create_video(&self) -> Result<WebVideo, TileError> {
        WebVideo::create(&self.document, &self.body)
    }

    fn bind_events(
        &self,
        canvas: &WebCanvas,
        video: &WebVideo,
        sink: EventSink,
    ) -> Result<WebBindings, TileError> {
        events::bind(canvas.element(), video.element(), sink)
    }

    fn schedule(
        &self,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> Result<TimeoutHandle, TileError> {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let callback = Closure::once_into_js(move || task());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                millis,
            )
            .map(TimeoutHandle)
            .map_err(|e| TileError::Schedule(format!("setTimeout failed: {e:?}")))
    }

    fn cancel(&self, handle: TimeoutHandle) {
        // The closure shim is only freed when it runs; a cancelled one leaks.
        self.window.clear_timeout_with_handle(handle.0);
    }
}
