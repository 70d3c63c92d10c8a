//! Drawable rectangle bounded by the viewport.

use crate::error::TileError;
use crate::host::{CanvasElement, Host, Viewport};

/// A canvas-backed drawing region.
///
/// Geometry is validated against the viewport at assignment time: values
/// outside `[0, viewport dimension]` are ignored and the previous value is
/// kept. The canvas and its context are set-once while attached; only
/// [`Surface::release`] clears them.
pub struct Surface<H: Host> {
    width: f64,
    height: f64,
    canvas: Option<H::Canvas>,
    context: Option<H::Context>,
}

impl<H: Host> Surface<H> {
    /// Creates a detached surface covering the whole viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            canvas: None,
            context: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Stores `value` if it lies in `[0, viewport.width]`.
    pub fn set_width(&mut self, value: f64, viewport: Viewport) {
        if in_bounds(value, viewport.width) {
            self.width = value;
        } else {
            tracing::trace!(value, max = viewport.width, "rejected surface width");
        }
    }

    /// Stores `value` if it lies in `[0, viewport.height]`.
    pub fn set_height(&mut self, value: f64, viewport: Viewport) {
        if in_bounds(value, viewport.height) {
            self.height = value;
        } else {
            tracing::trace!(value, max = viewport.height, "rejected surface height");
        }
    }

    pub fn canvas(&self) -> Option<&H::Canvas> {
        self.canvas.as_ref()
    }

    pub fn context(&self) -> Option<&H::Context> {
        self.context.as_ref()
    }

    /// Sets the canvas unless one is already held.
    pub fn set_canvas(&mut self, canvas: H::Canvas) {
        if self.canvas.is_none() {
            self.canvas = Some(canvas);
        }
    }

    /// Sets the drawing context unless one is already held.
    pub fn set_context(&mut self, context: H::Context) {
        if self.context.is_none() {
            self.context = Some(context);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.canvas.is_some()
    }

    /// Creates the canvas on the page, acquires its 2D context and stamps the
    /// element size from the current geometry.
    pub fn initialize(&mut self, host: &H) -> Result<(), TileError> {
        if self.is_attached() {
            tracing::debug!("surface already attached, keeping existing canvas");
            return Ok(());
        }
        let canvas = host.create_canvas()?;
        let context = match canvas.context_2d() {
            Ok(context) => context,
            Err(e) => {
                canvas.detach();
                return Err(e);
            }
        };
        self.set_canvas(canvas);
        self.set_context(context);

        self.sync_pixel_size();
        Ok(())
    }

    /// Stamps the canvas `width`/`height` attributes from the current geometry.
    pub fn sync_pixel_size(&self) {
        if let Some(canvas) = &self.canvas {
            canvas.set_pixel_width(to_pixels(self.width));
            canvas.set_pixel_height(to_pixels(self.height));
        }
    }

    /// Detaches the canvas and clears the canvas/context slots.
    pub fn release(&mut self) {
        self.context = None;
        if let Some(canvas) = self.canvas.take() {
            canvas.detach();
        }
    }
}

fn in_bounds(value: f64, max: f64) -> bool {
    (0.0..=max).contains(&value)
}

/// Canvas attributes are integers; fractional widths truncate like the DOM does.
pub(crate) fn to_pixels(value: f64) -> u32 {
    value.max(0.0) as u32
}
