//! Image-sprite renderer: one `position: fixed` `<img>` per fly.
//!
//! Sprites are reconciled against the live fly list every frame. A fly seen
//! for the first time gets a fresh image (the primary's goes into the
//! container and carries its well-known id, extras go straight into
//! `<body>`); an image whose fly disappeared is detached in `finish`.
//! Fading is left to a CSS opacity transition set on creation.

use std::collections::{HashMap, HashSet};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlImageElement};

use super::{FrameView, Renderer, sprite_placement};
use crate::fly::{Fly, FlyId};

pub struct SpriteRenderer {
    document: Document,
    container: Element,
    sprites: HashMap<FlyId, HtmlImageElement>,
    drawn: HashSet<FlyId>,
}

impl SpriteRenderer {
    #[must_use]
    pub fn new(document: Document, container: Element) -> Self {
        Self { document, container, sprites: HashMap::new(), drawn: HashSet::new() }
    }

    fn create_sprite(&self, fly: &Fly, frame: &FrameView<'_>) -> Result<HtmlImageElement, JsValue> {
        let cfg = frame.config;
        let img = self
            .document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(JsValue::from)?;
        img.set_src(&cfg.image_path);
        img.set_class_name(&cfg.sprite_class);

        let style = img.style();
        style.set_property("position", "fixed")?;
        style.set_property("width", &format!("{}px", cfg.fly_size_px))?;
        style.set_property("height", &format!("{}px", cfg.fly_size_px))?;
        style.set_property("opacity", "0")?;
        style.set_property("transition", &format!("opacity {}ms ease-in-out", cfg.fade_in_ms))?;
        style.set_property("pointer-events", "none")?;

        if fly.is_primary() {
            img.set_id(&cfg.primary_sprite_id);
            self.container.append_child(&img)?;
        } else {
            let body = self
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no <body>"))?;
            body.append_child(&img)?;
        }
        log::debug!("sprite attached for fly {}", fly.id);
        Ok(img)
    }
}

impl Renderer for SpriteRenderer {
    fn begin(&mut self, frame: &FrameView<'_>) -> Result<(), JsValue> {
        self.drawn.clear();
        self.container
            .class_list()
            .toggle_with_force(&frame.config.visible_class, frame.container_visible)?;
        Ok(())
    }

    fn draw(&mut self, fly: &Fly, frame: &FrameView<'_>) -> Result<(), JsValue> {
        if !self.sprites.contains_key(&fly.id) {
            let img = self.create_sprite(fly, frame)?;
            self.sprites.insert(fly.id, img);
        }
        let Some(img) = self.sprites.get(&fly.id) else {
            return Ok(());
        };

        let placement = sprite_placement(fly, frame);
        let style = img.style();
        style.set_property("left", &format!("{}px", placement.left_px))?;
        style.set_property("top", &format!("{}px", placement.top_px))?;
        style.set_property("transform", &format!("rotate({}deg)", placement.rotate_deg))?;
        style.set_property("opacity", &placement.opacity.to_string())?;
        self.drawn.insert(fly.id);
        Ok(())
    }

    fn finish(&mut self, _frame: &FrameView<'_>) -> Result<(), JsValue> {
        let drawn = &self.drawn;
        self.sprites.retain(|id, img| {
            let keep = drawn.contains(id);
            if !keep {
                img.remove();
            }
            keep
        });
        Ok(())
    }
}
