//! Compile-time check that the core API is reachable through `vidtile`.

#[allow(unused_imports)]
use vidtile::{
    hit_test, launch, ControlAction, ControlButton, ControlLayout, Launch, LaunchConfig,
    PlaybackTile, Registry, TileConfig, TileError, TileEvent, TileId, TilePhase, Viewport,
};

#[test]
fn control_layout_through_facade() {
    let buttons = ControlLayout::default().buttons(600.0, 400.0, true);
    let labels: Vec<_> = buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["-10", "play", "+10"]);
    assert_eq!(
        hit_test(&buttons, 300.0, 350.0).map(|b| b.action),
        Some(ControlAction::TogglePause)
    );
}
