//! Rendering: presents the simulation through a pluggable [`Renderer`].
//!
//! The simulation never knows how it is drawn. Each frame the host calls
//! [`draw_frame`], which hands every live fly to the renderer between a
//! `begin` and a `finish`. Two implementations exist:
//!
//! | Renderer | Presentation |
//! |----------|--------------|
//! | [`sprite::SpriteRenderer`] | one positioned `<img>` per fly, CSS opacity transitions |
//! | [`canvas::CanvasRenderer`] | one shared `<canvas>`, cleared and redrawn each frame |
//!
//! Renderers only read simulation state. Fallible `web-sys` calls propagate
//! as `Result<(), JsValue>`; the frame loop decides what to do with a failure.


pub mod canvas;
pub mod sprite;

use wasm_bindgen::JsValue;

use crate::config::FlyConfig;
use crate::fly::Fly;
use crate::geom::{Point, Viewport};
use crate::sim::SimCore;

/// Radius of the body dot drawn by the canvas renderer.
pub const DOT_RADIUS_PX: f64 = 4.0;

/// Length of the heading tick beyond the dot's edge.
pub const TICK_LENGTH_PX: f64 = 8.0;

/// Read-only view of the frame being drawn.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub now_ms: f64,
    pub viewport: Viewport,
    pub container_visible: bool,
    pub config: &'a FlyConfig,
}

impl<'a> FrameView<'a> {
    #[must_use]
    pub fn of(core: &'a SimCore) -> Self {
        Self {
            now_ms: core.now_ms(),
            viewport: core.viewport(),
            container_visible: core.container_visible(),
            config: &core.config,
        }
    }
}

/// A presentation layer for flies.
pub trait Renderer {
    /// Called once before any fly is drawn.
    ///
    /// # Errors
    ///
    /// Propagates a failed DOM/canvas call.
    fn begin(&mut self, frame: &FrameView<'_>) -> Result<(), JsValue>;

    /// Draw one fly.
    ///
    /// # Errors
    ///
    /// Propagates a failed DOM/canvas call.
    fn draw(&mut self, fly: &Fly, frame: &FrameView<'_>) -> Result<(), JsValue>;

    /// Called once after every fly was drawn.
    ///
    /// # Errors
    ///
    /// Propagates a failed DOM/canvas call.
    fn finish(&mut self, _frame: &FrameView<'_>) -> Result<(), JsValue> {
        Ok(())
    }

    /// The viewport changed size.
    ///
    /// # Errors
    ///
    /// Propagates a failed DOM/canvas call.
    fn resize(&mut self, _viewport: Viewport) -> Result<(), JsValue> {
        Ok(())
    }
}

/// Draw the whole scene with `renderer`.
///
/// # Errors
///
/// Stops at and returns the first renderer error.
pub fn draw_frame(renderer: &mut dyn Renderer, core: &SimCore) -> Result<(), JsValue> {
    let frame = FrameView::of(core);
    renderer.begin(&frame)?;
    for fly in core.flies() {
        renderer.draw(fly, &frame)?;
    }
    renderer.finish(&frame)
}

/// Where and how a sprite image sits on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePlacement {
    pub left_px: f64,
    pub top_px: f64,
    pub rotate_deg: f64,
    /// Target opacity; the CSS transition eases toward it.
    pub opacity: f64,
}

/// Center the sprite on the fly and turn it to its heading.
#[must_use]
pub fn sprite_placement(fly: &Fly, frame: &FrameView<'_>) -> SpritePlacement {
    let half = frame.config.fly_size_px / 2.0;
    SpritePlacement {
        left_px: fly.pos.x - half,
        top_px: fly.pos.y - half,
        rotate_deg: fly.heading_deg,
        opacity: if fly.is_shown(frame.now_ms, frame.config) { 1.0 } else { 0.0 },
    }
}

/// Far end of the canvas heading tick.
#[must_use]
pub fn tick_end(fly: &Fly) -> Point {
    fly.pos.advanced(fly.heading_deg, DOT_RADIUS_PX + TICK_LENGTH_PX)
}
