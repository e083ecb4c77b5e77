//! Browser wiring: `wasm-bindgen` entry points, DOM listeners and the frame loop.
//!
//! ARCHITECTURE
//! ============
//! `start*` builds one [`SimCore`] plus the configured [`Renderer`], wraps them
//! in an `Rc<RefCell<App>>` and hands clones of that handle to every browser
//! callback: `mousemove` (cursor), `keydown` (`M` spawns an extra), `resize`
//! (viewport and canvas size), the global `DONDE_HAY_UNA_MOSCA` function and
//! the self-rescheduling `requestAnimationFrame` loop that drives the clock.
//! Callbacks live for the page's lifetime, so their closures are leaked on
//! purpose.
//!
//! The theme toggle is independent: it restores the stored preference onto
//! `<body>` and flips it on button clicks. A page without the button still
//! gets its fly.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Storage, Window};

use crate::config::{ConfigError, FlyConfig, RendererKind, ThemeConfig};
use crate::geom::{Point, Viewport};
use crate::input::{Command, Key};
use crate::render::canvas::CanvasRenderer;
use crate::render::sprite::SpriteRenderer;
use crate::render::{Renderer, draw_frame};
use crate::sim::SimCore;
use crate::theme::{MemoryStore, PreferenceStore, Theme, ThemeToggle};

/// Name of the spawn function installed on `window`.
pub const GLOBAL_SPAWN_FN: &str = "DONDE_HAY_UNA_MOSCA";

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no <body>")]
    NoBody,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongElement { id: String, expected: &'static str },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("javascript error: {0}")]
    Js(String),
}

impl WebError {
    fn js(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// =============================================================
// Entry points
// =============================================================

/// Start the fly and the theme toggle with default settings.
///
/// # Errors
///
/// Fails when the page lacks the fly's container or canvas.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    boot(FlyConfig::default()).map_err(JsValue::from)
}

/// Start with a JSON object overriding any [`FlyConfig`] fields.
///
/// # Errors
///
/// Fails on invalid configuration or a missing container/canvas.
#[wasm_bindgen]
pub fn start_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = FlyConfig::from_json(config_json).map_err(WebError::from)?;
    boot(config).map_err(JsValue::from)
}

/// Start only the theme toggle.
///
/// # Errors
///
/// Fails when the document, `<body>` or toggle button is missing.
#[wasm_bindgen]
pub fn start_theme_toggle() -> Result<(), JsValue> {
    init_logging();
    let (window, document) = window_and_document()?;
    install_theme_toggle(&window, &document, &ThemeConfig::default()).map_err(JsValue::from)
}

fn boot(config: FlyConfig) -> Result<(), WebError> {
    init_logging();
    let (window, document) = window_and_document()?;
    if let Err(e) = install_theme_toggle(&window, &document, &config.theme) {
        log::warn!("theme toggle not installed: {e}");
    }
    install_fly(&window, &document, config)
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

fn window_and_document() -> Result<(Window, Document), WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    Ok((window, document))
}

fn element_by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T, WebError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WebError::MissingElement(id.to_owned()))?
        .dyn_into::<T>()
        .map_err(|_| WebError::WrongElement { id: id.to_owned(), expected })
}

fn window_viewport(window: &Window) -> Viewport {
    let css = |dim: Result<JsValue, JsValue>| match dim {
        Ok(value) => value.as_f64().unwrap_or(0.0),
        Err(_) => 0.0,
    };
    Viewport::new(css(window.inner_width()), css(window.inner_height()))
}

/// Seed for the simulation RNG, mixed from `Math.random` and the wall clock.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn random_seed() -> u64 {
    let noise = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    noise ^ (js_sys::Date::now() as u64).rotate_left(32)
}

// =============================================================
// Fly
// =============================================================

/// Everything the browser callbacks share.
struct App {
    core: SimCore,
    renderer: Box<dyn Renderer>,
}

impl App {
    fn frame(&mut self, now_ms: f64) {
        self.core.tick(now_ms);
        if let Err(e) = draw_frame(self.renderer.as_mut(), &self.core) {
            log::warn!("frame render failed: {e:?}");
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.core.set_viewport(viewport);
        if let Err(e) = self.renderer.resize(viewport) {
            log::warn!("resize failed: {e:?}");
        }
    }

    fn command(&mut self, command: Command) {
        match command {
            Command::SpawnExtra => {
                self.core.spawn_extra();
            }
        }
    }
}

fn build_renderer(document: &Document, config: &FlyConfig) -> Result<Box<dyn Renderer>, WebError> {
    match config.renderer {
        RendererKind::Sprite => {
            let container = element_by_id::<Element>(document, &config.container_id, "element")?;
            Ok(Box::new(SpriteRenderer::new(document.clone(), container)))
        }
        RendererKind::Canvas => {
            let canvas = element_by_id::<HtmlCanvasElement>(document, &config.canvas_id, "canvas")?;
            Ok(Box::new(CanvasRenderer::new(canvas).map_err(WebError::js)?))
        }
    }
}

fn install_fly(window: &Window, document: &Document, config: FlyConfig) -> Result<(), WebError> {
    let renderer = build_renderer(document, &config)?;
    let mut core = SimCore::new(config, random_seed());
    core.start();

    let app = Rc::new(RefCell::new(App { core, renderer }));
    app.borrow_mut().resize(window_viewport(window));

    listen_pointer(document, &app)?;
    listen_keys(document, &app)?;
    listen_resize(window, &app)?;
    install_global_spawn(window, &app)?;
    start_animation_loop(window, app)?;
    log::info!("fly simulation started");
    Ok(())
}

fn listen_pointer(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), WebError> {
    let app = Rc::clone(app);
    let cb = Closure::wrap(Box::new(move |e: MouseEvent| {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.core.set_cursor(Point::new(f64::from(e.client_x()), f64::from(e.client_y())));
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    document
        .add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref())
        .map_err(WebError::js)?;
    cb.forget();
    Ok(())
}

fn listen_keys(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), WebError> {
    let app = Rc::clone(app);
    let cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        let Some(command) = Key(e.key()).command() else {
            return;
        };
        if let Ok(mut app) = app.try_borrow_mut() {
            app.command(command);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document
        .add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())
        .map_err(WebError::js)?;
    cb.forget();
    Ok(())
}

fn listen_resize(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), WebError> {
    let app = Rc::clone(app);
    let window_for_cb = window.clone();
    let cb = Closure::wrap(Box::new(move || {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.resize(window_viewport(&window_for_cb));
        }
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
        .map_err(WebError::js)?;
    cb.forget();
    Ok(())
}

/// Expose `window.DONDE_HAY_UNA_MOSCA()` for consoles and other scripts.
fn install_global_spawn(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), WebError> {
    let app = Rc::clone(app);
    let cb = Closure::wrap(Box::new(move || {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.command(Command::SpawnExtra);
        }
    }) as Box<dyn FnMut()>);
    js_sys::Reflect::set(window, &JsValue::from_str(GLOBAL_SPAWN_FN), cb.as_ref()).map_err(WebError::js)?;
    cb.forget();
    Ok(())
}

/// Self-rescheduling `requestAnimationFrame` loop; each frame ticks the clock
/// with the frame timestamp and redraws.
fn start_animation_loop(window: &Window, app: Rc<RefCell<App>>) -> Result<(), WebError> {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let window_for_cb = window.clone();

    *holder.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.frame(now_ms);
        }
        if let Some(cb) = holder_for_cb.borrow().as_ref() {
            if let Err(e) = window_for_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::warn!("animation loop stopped: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = holder.borrow();
    let Some(cb) = first.as_ref() else {
        return Ok(());
    };
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(WebError::js)?;
    Ok(())
}

// =============================================================
// Theme
// =============================================================

/// `localStorage`-backed preference store. Storage failures are logged and
/// treated as a missing value.
struct LocalStorage(Storage);

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.0.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("could not read {key} from localStorage: {e:?}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.0.set_item(key, value) {
            log::warn!("could not persist {key}: {e:?}");
        }
    }
}

fn preference_store(window: &Window) -> Box<dyn PreferenceStore> {
    match window.local_storage() {
        Ok(Some(storage)) => Box::new(LocalStorage(storage)),
        _ => {
            log::warn!("localStorage unavailable; theme changes will not persist");
            Box::new(MemoryStore::default())
        }
    }
}

fn body_theme(body: &HtmlElement, class: &str) -> Theme {
    if body.class_list().contains(class) { Theme::Dark } else { Theme::Light }
}

fn apply_theme(body: &HtmlElement, class: &str, theme: Theme) {
    if let Err(e) = body.class_list().toggle_with_force(class, theme.is_dark()) {
        log::warn!("could not apply {} theme: {e:?}", theme.as_str());
    }
}

fn install_theme_toggle(window: &Window, document: &Document, cfg: &ThemeConfig) -> Result<(), WebError> {
    let body = document.body().ok_or(WebError::NoBody)?;
    let button = element_by_id::<Element>(document, &cfg.button_id, "element")?;

    let mut toggle = ThemeToggle::load(preference_store(window), cfg.storage_key.clone());
    if toggle.current().is_dark() {
        apply_theme(&body, &cfg.body_class, Theme::Dark);
    }

    let class = cfg.body_class.clone();
    let cb = Closure::wrap(Box::new(move || {
        let next = toggle.set(body_theme(&body, &class).toggled());
        apply_theme(&body, &class, next);
    }) as Box<dyn FnMut()>);
    button
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .map_err(WebError::js)?;
    cb.forget();
    Ok(())
}
