//! Canvas element and its 2D context.

use vidtile_core::{CanvasElement, DrawContext, TileError};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::web_video::WebVideo;

/// A `<canvas>` element attached to the page.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
}

impl WebCanvas {
    /// Creates a canvas element and appends it to `body`.
    pub(crate) fn create(document: &Document, body: &HtmlElement) -> Result<Self, TileError> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| TileError::create("canvas", format!("{e:?}")))?
            .dyn_into()
            .map_err(|_| TileError::create("canvas", "element is not a canvas"))?;

        body.append_child(&canvas)
            .map_err(|e| TileError::create("canvas", format!("failed to append: {e:?}")))?;

        Ok(Self { canvas })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl CanvasElement for WebCanvas {
    type Context = WebContext;

    fn context_2d(&self) -> Result<WebContext, TileError> {
        let ctx = self
            .canvas
            .get_context("2d")
            .map_err(|e| TileError::Context(format!("{e:?}")))?
            .ok_or_else(|| TileError::Context("canvas returned no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| TileError::Context("not a CanvasRenderingContext2d".to_string()))?;
        Ok(WebContext { ctx })
    }

    fn set_pixel_width(&self, width: u32) {
        self.canvas.set_width(width);
    }

    fn set_pixel_height(&self, height: u32) {
        self.canvas.set_height(height);
    }

    fn page_offset(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.offset_left()),
            f64::from(self.canvas.offset_top()),
        )
    }

    fn detach(&self) {
        self.canvas.remove();
    }
}

/// `CanvasRenderingContext2d` behind the core's drawing trait.
pub struct WebContext {
    ctx: CanvasRenderingContext2d,
}

impl DrawContext for WebContext {
    type Media = WebVideo;

    fn draw_media(
        &self,
        media: &WebVideo,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), TileError> {
        self.ctx
            .draw_image_with_html_video_element_and_dw_and_dh(media.element(), x, y, width, height)
            .map_err(|e| TileError::Draw(format!("drawImage failed: {e:?}")))
    }

    fn begin_path(&self) {
        self.ctx.begin_path();
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), TileError> {
        self.ctx
            .arc(x, y, radius, start, end)
            .map_err(|e| TileError::Draw(format!("arc failed: {e:?}")))
    }

    fn fill(&self) {
        self.ctx.fill();
    }

    fn set_fill_style(&self, css_color: &str) {
        self.ctx.set_fill_style_str(css_color);
    }

    fn set_font(&self, css_font: &str) {
        self.ctx.set_font(css_font);
    }

    fn set_text_align(&self, align: &str) {
        self.ctx.set_text_align(align);
    }

    fn set_text_baseline(&self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), TileError> {
        self.ctx
            .fill_text(text, x, y)
            .map_err(|e| TileError::Draw(format!("fillText failed: {e:?}")))
    }
}
