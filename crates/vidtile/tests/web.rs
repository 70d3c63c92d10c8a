//! Browser tests for the web-sys host.
//!
//! ```bash
//! wasm-pack test --headless --firefox crates/vidtile
//! ```

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use vidtile::{Host, PlaybackTile, Registry, TileConfig, TilePhase, WebHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{HtmlCanvasElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn count(selector: &str) -> u32 {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    document
        .query_selector_all(selector)
        .expect("query")
        .length()
}

#[wasm_bindgen_test]
fn viewport_is_window_size() {
    let host = WebHost::new().expect("host");
    let viewport = host.viewport();
    assert!(viewport.width > 0.0);
    assert!(viewport.height > 0.0);
}

#[wasm_bindgen_test]
fn init_and_destroy_manage_page_elements() {
    let host = Rc::new(WebHost::new().expect("host"));
    let registry = Registry::new();
    let canvases = count("canvas");
    let videos = count("video");

    let tile = PlaybackTile::new("missing.mp4", Rc::clone(&host), &registry, TileConfig::default());
    tile.init().expect("init");
    assert_eq!(tile.phase(), TilePhase::Initialized);
    assert_eq!(count("canvas"), canvases + 1);
    assert_eq!(count("video"), videos + 1);
    assert_eq!(tile.width(), host.viewport().width);

    tile.destroy();
    assert_eq!(count("canvas"), canvases);
    assert_eq!(count("video"), videos);
}

/// Most recently appended `<canvas>`; tiles append theirs to `<body>`.
fn last_canvas() -> HtmlCanvasElement {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    let canvases = document.query_selector_all("canvas").expect("query");
    canvases
        .item(canvases.length() - 1)
        .expect("canvas")
        .dyn_into()
        .expect("canvas element")
}

fn fire(target: &HtmlCanvasElement, kind: &str, client_x: i32, client_y: i32) {
    let init = MouseEventInit::new();
    init.set_client_x(client_x);
    init.set_client_y(client_y);
    let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).expect("event");
    target.dispatch_event(&event).expect("dispatch");
}

/// Resolves after `ms` milliseconds of event-loop time.
async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("setTimeout");
    });
    JsFuture::from(promise).await.expect("sleep");
}

#[wasm_bindgen_test]
fn dom_pointer_events_reach_the_tile() {
    let host = Rc::new(WebHost::new().expect("host"));
    let registry = Registry::new();
    let tile = PlaybackTile::new("missing.mp4", Rc::clone(&host), &registry, TileConfig::default());
    tile.init().expect("init");
    let canvas = last_canvas();

    fire(&canvas, "mouseenter", 0, 0);
    assert!(tile.controls_visible());

    // centre button, in page coordinates of an unscrolled page
    let centre = &tile.controls()[1];
    let x = f64::from(canvas.offset_left()) + centre.center_x;
    let y = f64::from(canvas.offset_top()) + centre.center_y;
    fire(&canvas, "click", x as i32, y as i32);
    assert!(tile.is_paused());

    fire(&canvas, "mouseleave", 0, 0);
    assert!(!tile.controls_visible());

    tile.destroy();
    fire(&canvas, "mouseenter", 0, 0);
    assert!(!tile.controls_visible());
}

#[wasm_bindgen_test]
async fn cancelled_timeout_never_fires() {
    let host = WebHost::new().expect("host");
    let cancelled = Rc::new(Cell::new(false));
    let kept = Rc::new(Cell::new(false));

    let flag = Rc::clone(&cancelled);
    let handle = host
        .schedule(Duration::from_millis(1), Box::new(move || flag.set(true)))
        .expect("schedule");
    let flag = Rc::clone(&kept);
    host.schedule(Duration::from_millis(1), Box::new(move || flag.set(true)))
        .expect("schedule");
    host.cancel(handle);

    sleep(50).await;
    assert!(kept.get());
    assert!(!cancelled.get());
}
