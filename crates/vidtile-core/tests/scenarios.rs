//! End-to-end tile scenarios against the in-memory host.
//!
//! ```bash
//! cargo test -p vidtile-core --test scenarios
//! ```

use std::rc::Rc;

use pretty_assertions::assert_eq;
use vidtile_core::testing::FakeHost;
use vidtile_core::{
    ControlAction, MediaElement, PlaybackTile, Registry, TileConfig, TileEvent, TilePhase,
    Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 1200.0,
    height: 800.0,
};

struct Page {
    host: Rc<FakeHost>,
    registry: Registry<FakeHost>,
}

impl Page {
    fn new() -> Self {
        Self {
            host: Rc::new(FakeHost::new(VIEWPORT)),
            registry: Registry::new(),
        }
    }

    fn tile(&self, url: &str) -> PlaybackTile<FakeHost> {
        PlaybackTile::new(url, Rc::clone(&self.host), &self.registry, TileConfig::default())
    }
}

fn centres(tile: &PlaybackTile<FakeHost>) -> Vec<(f64, f64)> {
    tile.controls()
        .iter()
        .map(|b| (b.center_x, b.center_y))
        .collect()
}

#[test]
fn single_tile_takes_full_width_then_splits() {
    let page = Page::new();
    let tiles = [
        page.tile("BigBuckBunny.mp4"),
        page.tile("ElephantsDream.mp4"),
        page.tile("WhatCarCanYouGetForAGrand.mp4"),
    ];

    tiles[0].init().unwrap();
    assert_eq!(tiles[0].width(), 1200.0);
    assert_eq!(
        centres(&tiles[0]),
        vec![(500.0, 750.0), (600.0, 750.0), (700.0, 750.0)]
    );
    assert_eq!(page.host.canvas(0).pixel_size(), (1200, 800));

    tiles[1].init().unwrap();
    for tile in &tiles[..2] {
        assert_eq!(tile.width(), 600.0);
        assert_eq!(
            centres(tile),
            vec![(200.0, 750.0), (300.0, 750.0), (400.0, 750.0)]
        );
    }
    assert_eq!(page.host.canvas(0).pixel_size(), (600, 800));
    assert_eq!(page.host.canvas(1).pixel_size(), (600, 800));
    assert_eq!(tiles[2].phase(), TilePhase::Constructed);
    assert_eq!(tiles[2].width(), 1200.0);
}

#[test]
fn membership_change_redraws_every_member() {
    let page = Page::new();
    let a = page.tile("a.mp4");
    let b = page.tile("b.mp4");
    a.init().unwrap();
    let ctx_a = page.host.canvas(0).context();
    ctx_a.clear();

    b.init().unwrap();
    assert_eq!(ctx_a.frames(), 1);
    assert_eq!(ctx_a.last_frame_size(), Some((600.0, 800.0)));
}

#[test]
fn removal_renormalizes_remaining_tiles() {
    let page = Page::new();
    let tiles: Vec<_> = ["a", "b", "c"].iter().map(|u| page.tile(u)).collect();
    for tile in &tiles {
        tile.init().unwrap();
    }
    assert!(tiles.iter().all(|t| t.width() == 400.0));

    tiles[1].destroy();
    assert_eq!(page.registry.len(), 2);
    assert_eq!(tiles[0].width(), 600.0);
    assert_eq!(tiles[2].width(), 600.0);
    assert_eq!(tiles[2].controls()[1].center_x, 300.0);
}

#[test]
fn window_resize_refits_height_and_controls() {
    let page = Page::new();
    let tile = page.tile("a.mp4");
    tile.init().unwrap();

    page.host.set_viewport(Viewport::new(1000.0, 500.0));
    page.registry.renormalize();
    assert_eq!(tile.width(), 1000.0);
    assert_eq!(tile.height(), 500.0);
    assert_eq!(
        centres(&tile),
        vec![(400.0, 450.0), (500.0, 450.0), (600.0, 450.0)]
    );
    assert_eq!(page.host.canvas(0).pixel_size(), (1000, 500));

    tile.set_controls_visible(true).unwrap();
    assert_eq!(
        tile.handle_click(500.0, 450.0).unwrap(),
        Some(ControlAction::TogglePause)
    );

    page.host.set_viewport(VIEWPORT);
    page.registry.renormalize();
    assert_eq!(tile.height(), 800.0);
    assert_eq!(page.host.canvas(0).pixel_size(), (1200, 800));
}

#[test]
fn hidden_controls_ignore_clicks() {
    let page = Page::new();
    let tile = page.tile("a.mp4");
    tile.init().unwrap();
    assert!(!tile.controls_visible());

    let action = tile.handle_click(600.0, 750.0).unwrap();
    assert_eq!(action, None);
    assert!(!tile.is_paused());
    assert!(!page.host.video(0).is_paused());
}

#[test]
fn rewind_has_no_lower_clamp() {
    let page = Page::new();
    let tile = page.tile("a.mp4");
    tile.init().unwrap();
    page.host.fire(0, TileEvent::PointerEnter);
    page.host.video(0).set_time(4.0);

    page.host.fire(
        0,
        TileEvent::Click {
            page_x: 500.0,
            page_y: 750.0,
        },
    );
    assert_eq!(page.host.video(0).time(), -6.0);

    let action = tile.handle_click(500.0, 750.0).unwrap();
    assert_eq!(action, Some(ControlAction::SeekBy(-10.0)));
    assert_eq!(page.host.video(0).current_time(), -16.0);
}

#[test]
fn play_pause_button_round_trip() {
    let page = Page::new();
    let tile = page.tile("a.mp4");
    tile.init().unwrap();
    tile.set_controls_visible(true).unwrap();
    let ctx = page.host.canvas(0).context();

    tile.handle_click(600.0, 750.0).unwrap();
    assert!(tile.is_paused());
    page.host.run_pending();
    assert!(!tile.has_pending_frame());

    ctx.clear();
    tile.handle_click(600.0, 750.0).unwrap();
    assert!(!tile.is_paused());
    assert_eq!(ctx.labels(), vec!["-10", "pause", "+10"]);
    assert!(tile.has_pending_frame());
}

#[test]
fn destroyed_tile_stops_drawing() {
    let page = Page::new();
    let tile = page.tile("a.mp4");
    tile.init().unwrap();
    let ctx = page.host.canvas(0).context();

    tile.destroy();
    ctx.clear();
    page.host.run_pending();
    page.host.fire(0, TileEvent::MediaPlay);

    assert_eq!(ctx.frames(), 0);
    assert_eq!(tile.redraw(), Err(vidtile_core::TileError::NotInitialized));
}

#[test]
fn reinit_after_destroy_uses_fresh_elements() {
    let page = Page::new();
    let tile = page.tile("a.mp4");
    tile.init().unwrap();
    tile.destroy();
    tile.init().unwrap();

    assert_eq!(tile.phase(), TilePhase::Initialized);
    assert!(!page.host.canvas(0).is_attached());
    assert!(page.host.canvas(1).is_attached());
    assert_eq!(page.host.video(1).source(), "a.mp4");
    assert_eq!(tile.width(), 1200.0);
}
