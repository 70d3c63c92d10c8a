//! vidtile web demo
//!
//! Launches three sample videos side by side, 30 seconds apart. Each new
//! tile narrows the ones already playing; hover a tile for its controls.
//!
//! Build and run with trunk:
//! ```bash
//! cd crates/vidtile-web-demo && trunk serve --open
//! ```

/// Sample videos, one tile each, in launch order.
const SOURCES: [&str; 3] = [
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/WhatCarCanYouGetForAGrand.mp4",
];

#[cfg(target_arch = "wasm32")]
mod app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use vidtile::{launch, Launch, LaunchConfig, Registry, ResizeWatcher, TileError, WebHost};

    /// Everything that must outlive `main` for the page to keep running.
    struct Demo {
        _launch: Launch<WebHost>,
        _resize: ResizeWatcher,
    }

    thread_local! {
        static DEMO: RefCell<Option<Demo>> = const { RefCell::new(None) };
    }

    pub fn start(sources: &[&str]) -> Result<(), TileError> {
        let host = Rc::new(WebHost::new()?);
        let registry = Registry::new();
        let launch = launch(&host, &registry, sources, &LaunchConfig::default())?;
        let resize = ResizeWatcher::watch(&host, &registry)?;

        DEMO.with(|demo| {
            *demo.borrow_mut() = Some(Demo {
                _launch: launch,
                _resize: resize,
            });
        });
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    vidtile::init_console_tracing(tracing::Level::DEBUG);

    match app::start(&SOURCES) {
        Ok(()) => tracing::info!(tiles = SOURCES.len(), "demo started"),
        Err(e) => tracing::error!(error = %e, "demo failed to start"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "vidtile-web-demo runs in the browser; build it for wasm32 with `trunk serve` ({} sources)",
        SOURCES.len()
    );
}
