//! DOM event listeners feeding a tile's [`EventSink`].

use vidtile_core::{EventSink, TileError, TileEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent};

/// One registered listener. Removes itself from its target when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn add(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, TileError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| TileError::Bind(format!("{kind}: {e:?}")))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Listeners for one tile's canvas and video. Dropping unbinds all of them.
pub struct WebBindings {
    _listeners: Vec<Listener>,
}

/// Maps a DOM event to the tile event for `kind`, if it carries one.
fn translate(kind: &str, event: &Event) -> Option<TileEvent> {
    match kind {
        "mouseenter" => Some(TileEvent::PointerEnter),
        "mouseleave" => Some(TileEvent::PointerLeave),
        "click" => event.dyn_ref::<MouseEvent>().map(|e| TileEvent::Click {
            page_x: f64::from(e.page_x()),
            page_y: f64::from(e.page_y()),
        }),
        "play" => Some(TileEvent::MediaPlay),
        "seeked" => Some(TileEvent::MediaSeeked),
        _ => None,
    }
}

const CANVAS_EVENTS: [&str; 3] = ["mouseenter", "mouseleave", "click"];
const VIDEO_EVENTS: [&str; 2] = ["play", "seeked"];

pub(crate) fn bind(
    canvas: &EventTarget,
    video: &EventTarget,
    sink: EventSink,
) -> Result<WebBindings, TileError> {
    let targets = CANVAS_EVENTS
        .iter()
        .map(|kind| (canvas, *kind))
        .chain(VIDEO_EVENTS.iter().map(|kind| (video, *kind)));

    let mut listeners = Vec::with_capacity(CANVAS_EVENTS.len() + VIDEO_EVENTS.len());
    for (target, kind) in targets {
        let sink = sink.clone();
        // On error, listeners added so far are dropped and unbound.
        listeners.push(Listener::add(target, kind, move |event| {
            match translate(kind, &event) {
                Some(tile_event) => sink(tile_event),
                None => tracing::trace!(kind, "ignored event"),
            }
        })?);
    }

    Ok(WebBindings {
        _listeners: listeners,
    })
}
