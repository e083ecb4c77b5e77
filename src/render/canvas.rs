//! Canvas renderer: every fly is a dot with a heading tick on one shared surface.
//!
//! The surface is cleared and fully redrawn each frame, so nothing needs to
//! be reconciled when flies come and go. Fade-in/out is drawn with the
//! eased [`Fly::opacity`] as global alpha.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DOT_RADIUS_PX, FrameView, Renderer, tick_end};
use crate::fly::Fly;
use crate::geom::Viewport;

/// Stroke width of the heading tick.
const TICK_WIDTH_PX: f64 = 1.5;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Bind to `canvas` and acquire its 2D context.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser refuses a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, ctx })
    }
}

/// Pixel size for a CSS dimension; negative and NaN collapse to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_len(css: f64) -> u32 {
    css.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

impl Renderer for CanvasRenderer {
    fn begin(&mut self, frame: &FrameView<'_>) -> Result<(), JsValue> {
        self.canvas
            .class_list()
            .toggle_with_force(&frame.config.visible_class, frame.container_visible)?;
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.set_global_alpha(1.0);
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        Ok(())
    }

    fn draw(&mut self, fly: &Fly, frame: &FrameView<'_>) -> Result<(), JsValue> {
        let alpha = fly.opacity(frame.now_ms, frame.config);
        if alpha <= 0.0 {
            return Ok(());
        }
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str(&frame.config.dot_color);
        ctx.set_stroke_style_str(&frame.config.dot_color);
        ctx.set_line_width(TICK_WIDTH_PX);

        ctx.begin_path();
        ctx.arc(fly.pos.x, fly.pos.y, DOT_RADIUS_PX, 0.0, TAU)?;
        ctx.fill();

        let tip = tick_end(fly);
        ctx.begin_path();
        ctx.move_to(fly.pos.x, fly.pos.y);
        ctx.line_to(tip.x, tip.y);
        ctx.stroke();

        ctx.restore();
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), JsValue> {
        self.canvas.set_width(pixel_len(viewport.width));
        self.canvas.set_height(pixel_len(viewport.height));
        Ok(())
    }
}
