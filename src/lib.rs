//! A wandering fly that flees the cursor, plus a persisted dark-mode toggle.
//!
//! This crate is compiled to WebAssembly and runs in the browser. The
//! simulation itself is browser-free: [`sim::SimCore`] owns every fly, the
//! shared cursor position and a virtual-clock timer queue, and is advanced
//! once per animation frame with the frame timestamp. The [`web`] module is
//! the only place that wires DOM events, `requestAnimationFrame` and
//! `localStorage` to that core.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sim`] | Owned simulation context: flies, cursor, clock, primary cycle, extras |
//! | [`fly`] | Fly entity, edge spawning and the per-frame motion update |
//! | [`timer`] | Virtual-clock timer queue |
//! | [`config`] | Tunable parameters and delay ranges |
//! | [`geom`] | Points, viewport and heading math |
//! | [`input`] | Keyboard key to command mapping |
//! | [`theme`] | Dark/light preference and its persistence |
//! | [`render`] | Pluggable renderers (image sprites or a shared canvas) |
//! | [`web`] | `wasm-bindgen` entry points and browser wiring |
//! | [`consts`] | Default numeric constants |

pub mod config;
pub mod consts;
pub mod fly;
pub mod geom;
pub mod input;
pub mod render;
pub mod sim;
pub mod theme;
pub mod timer;
pub mod web;
