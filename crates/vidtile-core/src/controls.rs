//! Circular overlay controls drawn on the tile canvas.
//!
//! Three buttons sit on a row near the bottom edge:
//!
//! ```text
//!        (-10)      (pause)      (+10)
//!   w/2 - spacing     w/2    w/2 + spacing      at y = h - bottom_inset
//! ```
//!
//! The set is rebuilt from scratch whenever tile geometry or pause state
//! changes; buttons are never edited in place.

use std::f64::consts::TAU;
use std::time::Duration;

use crate::error::TileError;
use crate::host::DrawContext;

/// Geometry and appearance of the overlay controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlLayout {
    /// Radius of every button
    pub radius: f64,
    /// Horizontal distance between adjacent button centres
    pub spacing: f64,
    /// Distance from the bottom edge to the button centres
    pub bottom_inset: f64,
    /// How far the seek buttons jump
    pub seek_step: Duration,
    /// Circle fill colour
    pub button_color: String,
    /// Label fill colour
    pub label_color: String,
    /// Label font (CSS shorthand)
    pub font: String,
}

impl Default for ControlLayout {
    fn default() -> Self {
        Self {
            radius: 40.0,
            spacing: 100.0,
            bottom_inset: 50.0,
            seek_step: Duration::from_secs(10),
            button_color: "#fff".to_string(),
            label_color: "#000".to_string(),
            font: "20px Arial".to_string(),
        }
    }
}

impl ControlLayout {
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_bottom_inset(mut self, inset: f64) -> Self {
        self.bottom_inset = inset;
        self
    }

    pub fn with_seek_step(mut self, step: Duration) -> Self {
        self.seek_step = step;
        self
    }

    /// Builds the button row for a `width` × `height` tile.
    ///
    /// The centre label reads `play` while paused and `pause` otherwise.
    pub fn buttons(&self, width: f64, height: f64, paused: bool) -> Vec<ControlButton> {
        let center_x = width / 2.0;
        let center_y = height - self.bottom_inset;
        // f64 Display drops a zero fraction: 10.0 prints as "10"
        let step = self.seek_step.as_secs_f64();

        vec![
            ControlButton {
                center_x: center_x - self.spacing,
                center_y,
                radius: self.radius,
                label: format!("-{step}"),
                action: ControlAction::SeekBy(-step),
            },
            ControlButton {
                center_x,
                center_y,
                radius: self.radius,
                label: if paused { "play" } else { "pause" }.to_string(),
                action: ControlAction::TogglePause,
            },
            ControlButton {
                center_x: center_x + self.spacing,
                center_y,
                radius: self.radius,
                label: format!("+{step}"),
                action: ControlAction::SeekBy(step),
            },
        ]
    }
}

/// What a button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Move the playback position by this many seconds (negative = back).
    SeekBy(f64),
    /// Flip between playing and paused.
    TogglePause,
}

/// One circular control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlButton {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub label: String,
    pub action: ControlAction,
}

impl ControlButton {
    /// True if `(x, y)` lies strictly inside the circle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        dx * dx + dy * dy < self.radius * self.radius
    }
}

/// Returns the first button (in list order) containing `(x, y)`.
pub fn hit_test(buttons: &[ControlButton], x: f64, y: f64) -> Option<&ControlButton> {
    buttons.iter().find(|button| button.contains(x, y))
}

/// Paints every button: filled circle, then a centred label.
pub fn draw_controls<C: DrawContext>(
    ctx: &C,
    buttons: &[ControlButton],
    layout: &ControlLayout,
) -> Result<(), TileError> {
    for button in buttons {
        ctx.begin_path();
        ctx.arc(button.center_x, button.center_y, button.radius, 0.0, TAU)?;
        ctx.set_fill_style(&layout.button_color);
        ctx.fill();
        ctx.set_font(&layout.font);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style(&layout.label_color);
        ctx.fill_text(&button.label, button.center_x, button.center_y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, FakeContext};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn button(x: f64, y: f64, r: f64, label: &str) -> ControlButton {
        ControlButton {
            center_x: x,
            center_y: y,
            radius: r,
            label: label.to_string(),
            action: ControlAction::TogglePause,
        }
    }

    #[test]
    fn test_default_row() {
        let buttons = ControlLayout::default().buttons(800.0, 600.0, false);
        let summary: Vec<_> = buttons
            .iter()
            .map(|b| (b.center_x, b.center_y, b.radius, b.label.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (300.0, 550.0, 40.0, "-10"),
                (400.0, 550.0, 40.0, "pause"),
                (500.0, 550.0, 40.0, "+10"),
            ]
        );
        assert_eq!(buttons[0].action, ControlAction::SeekBy(-10.0));
        assert_eq!(buttons[2].action, ControlAction::SeekBy(10.0));
    }

    #[test]
    fn test_paused_label() {
        let buttons = ControlLayout::default().buttons(800.0, 600.0, true);
        assert_eq!(buttons[1].label, "play");
    }

    #[test]
    fn test_custom_layout() {
        let layout = ControlLayout::default()
            .with_radius(20.0)
            .with_spacing(60.0)
            .with_bottom_inset(30.0)
            .with_seek_step(Duration::from_secs(5));
        let buttons = layout.buttons(200.0, 100.0, false);
        assert_eq!(buttons[0].center_x, 40.0);
        assert_eq!(buttons[0].center_y, 70.0);
        assert_eq!(buttons[0].label, "-5");
        assert_eq!(buttons[2].label, "+5");
        assert_eq!(buttons[2].radius, 20.0);
    }

    #[test]
    fn test_fractional_seek_step_label() {
        let layout = ControlLayout::default().with_seek_step(Duration::from_millis(2500));
        let buttons = layout.buttons(800.0, 600.0, false);
        assert_eq!(buttons[0].label, "-2.5");
        assert_eq!(buttons[2].label, "+2.5");
        assert_eq!(buttons[0].action, ControlAction::SeekBy(-2.5));
    }

    #[test]
    fn test_boundary_is_outside() {
        let b = button(0.0, 0.0, 5.0, "x");
        assert!(!b.contains(5.0, 0.0));
        assert!(!b.contains(3.0, 4.0));
        assert!(b.contains(3.0, 3.9));
    }

    #[test]
    fn test_overlap_first_wins() {
        let buttons = vec![button(0.0, 0.0, 10.0, "first"), button(5.0, 0.0, 10.0, "second")];
        assert_eq!(hit_test(&buttons, 4.0, 0.0).unwrap().label, "first");
        assert_eq!(hit_test(&buttons, 12.0, 0.0).unwrap().label, "second");
        assert!(hit_test(&buttons, 40.0, 0.0).is_none());
    }

    #[test]
    fn test_draw_sequence() {
        let ctx = FakeContext::default();
        let layout = ControlLayout::default();
        let buttons = vec![button(10.0, 20.0, 5.0, "ok")];
        draw_controls(&ctx, &buttons, &layout).unwrap();

        assert_eq!(
            ctx.ops(),
            vec![
                DrawOp::BeginPath,
                DrawOp::Arc {
                    x: 10.0,
                    y: 20.0,
                    radius: 5.0
                },
                DrawOp::FillStyle("#fff".into()),
                DrawOp::Fill,
                DrawOp::Font("20px Arial".into()),
                DrawOp::TextAlign("center".into()),
                DrawOp::TextBaseline("middle".into()),
                DrawOp::FillStyle("#000".into()),
                DrawOp::Text {
                    text: "ok".into(),
                    x: 10.0,
                    y: 20.0
                },
            ]
        );
    }

    proptest! {
        #[test]
        fn hit_matches_strict_distance(
            cx in -500.0f64..500.0,
            cy in -500.0f64..500.0,
            r in 1.0f64..100.0,
            x in -700.0f64..700.0,
            y in -700.0f64..700.0,
        ) {
            let buttons = vec![button(cx, cy, r, "only")];
            let inside = (x - cx) * (x - cx) + (y - cy) * (y - cy) < r * r;
            prop_assert_eq!(hit_test(&buttons, x, y).is_some(), inside);
        }
    }
}
