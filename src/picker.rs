//! Flower picker strip.
//!
//! One control per distinct symbol (capped at [`MAX_ITEMS`]); picking one
//! highlights it exclusively and captions it with a random phrase. The strip
//! is rebuilt from scratch whenever the board is.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::{PHRASES, rng};

/// Upper bound on rendered picker controls.
pub const MAX_ITEMS: usize = 8;

/// (Re)build the picker controls. The delegated listener from [`wire`]
/// survives rebuilds since it sits on the strip itself.
pub fn render(doc: &Document) -> Result<(), JsValue> {
    let strip = doc
        .get_element_by_id("bm-picker")
        .ok_or_else(|| JsValue::from_str("no picker element"))?;
    strip.set_inner_html("");
    for flower in crate::FLOWERS.iter().copied().take(MAX_ITEMS) {
        let btn = doc.create_element("button")?;
        btn.set_class_name("picker-item");
        btn.set_attribute("type", "button")?;
        btn.set_attribute("aria-label", &format!("Elegir {flower}"))?;
        btn.set_text_content(Some(flower));
        strip.append_child(&btn)?;
    }
    Ok(())
}

pub fn wire(doc: &Document) -> Result<(), JsValue> {
    let strip = doc
        .get_element_by_id("bm-picker")
        .ok_or_else(|| JsValue::from_str("no picker element"))?;
    let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
        let item = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("button.picker-item").ok().flatten());
        if let Some(item) = item {
            on_pick(&item);
        }
    }) as Box<dyn FnMut(_)>);
    strip.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_pick(item: &Element) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    // Mutually exclusive highlight.
    if let Some(strip) = doc.get_element_by_id("bm-picker") {
        if let Ok(selected) = strip.query_selector_all(".picker-item.selected") {
            for i in 0..selected.length() {
                if let Some(el) = selected.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    el.class_list().remove_1("selected").ok();
                }
            }
        }
    }
    item.class_list().add_1("selected").ok();

    let Some(flower) = item.text_content() else {
        return;
    };
    let phrase = rng::with_global(|r| *r.pick(PHRASES));
    if let Some(caption) = doc.get_element_by_id("bm-phrase") {
        caption.set_text_content(Some(&format!("{flower}  —  {phrase}")));
    }
}
