//! Night overlay.
//!
//! A modal layer that, while open, rains decorative growing flowers: one
//! spawned immediately, then one every [`SPAWN_INTERVAL_MS`] until the burst
//! window closes on its own. Spawned elements remove themselves when their
//! animation ends; closing the overlay sweeps whatever is still on screen.
//! DOM faults on this path are cosmetic and deliberately swallowed.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

use crate::rng::{self, Rng};

/// Interval between decorative spawns while the burst is active.
pub const SPAWN_INTERVAL_MS: i32 = 180;
/// The burst stops spawning on its own after this long.
pub const SPAWN_WINDOW_MS: i32 = 3000;

struct OverlayTimers {
    // Interval handle plus its closure, dropped together on clear.
    spawn: Option<(i32, Closure<dyn FnMut()>)>,
    stop: Option<i32>,
}

thread_local! {
    static TIMERS: RefCell<OverlayTimers> = RefCell::new(OverlayTimers {
        spawn: None,
        stop: None,
    });
}

pub fn wire(doc: &Document) -> Result<(), JsValue> {
    // Hidden at startup regardless of how the scaffold was authored.
    if let Some(ov) = doc.get_element_by_id("bm-overlay") {
        set_hidden(&ov, true);
    }

    {
        let toggle_btn = doc
            .get_element_by_id("bm-night")
            .ok_or_else(|| JsValue::from_str("no night toggle"))?;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            toggle();
        }) as Box<dyn FnMut(_)>);
        toggle_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let close_btn = doc
            .get_element_by_id("bm-overlay-close")
            .ok_or_else(|| JsValue::from_str("no overlay close control"))?;
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            evt.prevent_default();
            close();
        }) as Box<dyn FnMut(_)>);
        close_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        close_btn
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Backdrop taps close, but only when the backdrop itself was hit.
    {
        let ov = doc
            .get_element_by_id("bm-overlay")
            .ok_or_else(|| JsValue::from_str("no overlay element"))?;
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            let on_backdrop = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.id() == "bm-overlay")
                .unwrap_or(false);
            if on_backdrop {
                close();
            }
        }) as Box<dyn FnMut(_)>);
        ov.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Escape" && is_open() {
                close();
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn is_open() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("bm-overlay"))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| !el.hidden())
        .unwrap_or(false)
}

pub fn toggle() {
    if is_open() { close() } else { open() }
}

pub fn open() {
    // Timer hygiene first: never two live spawn intervals.
    clear_timers();
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };

    if let Some(ov) = doc.get_element_by_id("bm-overlay") {
        set_hidden(&ov, false);
    }
    if let Some(body) = doc.body() {
        body.class_list().add_1("overlay-open").ok();
    }

    spawn_flower(&doc);

    let spawn_cb = Closure::wrap(Box::new(move || {
        if let Some(doc) = window().and_then(|w| w.document()) {
            spawn_flower(&doc);
        }
    }) as Box<dyn FnMut()>);
    let spawn = win
        .set_interval_with_callback_and_timeout_and_arguments_0(
            spawn_cb.as_ref().unchecked_ref(),
            SPAWN_INTERVAL_MS,
        )
        .ok()
        .map(|handle| (handle, spawn_cb));

    let stop_cb = Closure::once_into_js(clear_timers);
    let stop = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            stop_cb.unchecked_ref(),
            SPAWN_WINDOW_MS,
        )
        .ok();

    TIMERS.with(|t| {
        let mut timers = t.borrow_mut();
        timers.spawn = spawn;
        timers.stop = stop;
    });
}

pub fn close() {
    clear_timers();
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(ov) = doc.get_element_by_id("bm-overlay") {
        set_hidden(&ov, true);
        // Sweep every decorative element, mid-animation or not.
        if let Ok(flowers) = ov.query_selector_all(".growing-flower") {
            for i in 0..flowers.length() {
                if let Some(el) = flowers.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    el.remove();
                }
            }
        }
    }
    if let Some(body) = doc.body() {
        body.class_list().remove_1("overlay-open").ok();
    }
}

fn clear_timers() {
    TIMERS.with(|t| {
        let mut timers = t.borrow_mut();
        if let Some(win) = window() {
            if let Some((handle, _cb)) = timers.spawn.take() {
                win.clear_interval_with_handle(handle);
            }
            if let Some(handle) = timers.stop.take() {
                win.clear_timeout_with_handle(handle);
            }
        }
    });
}

fn set_hidden(overlay: &Element, hidden: bool) {
    if let Some(el) = overlay.dyn_ref::<HtmlElement>() {
        el.set_hidden(hidden);
    }
    overlay
        .set_attribute("aria-hidden", if hidden { "true" } else { "false" })
        .ok();
}

// --- Decorative spawns -------------------------------------------------------

/// Randomized placement for one growing flower:
/// symbol, left (vw), top (vh), font size (px), rotation (deg), duration (ms).
fn spawn_params(rng: &mut Rng) -> (&'static str, f64, f64, f64, f64, f64) {
    let symbol = *rng.pick(crate::FLOWERS);
    let left = rng.range(10.0, 90.0);
    let top = rng.range(40.0, 80.0);
    let size = rng.range(24.0, 72.0);
    let rot = rng.range(-20.0, 20.0);
    let duration = rng.range(2200.0, 3100.0);
    (symbol, left, top, size, rot, duration)
}

fn spawn_flower(doc: &Document) {
    let Some(overlay) = doc.get_element_by_id("bm-overlay") else {
        return;
    };
    let Ok(el) = doc.create_element("div") else {
        return;
    };
    el.set_class_name("growing-flower");
    let (symbol, left, top, size, rot, duration) = rng::with_global(spawn_params);
    el.set_text_content(Some(symbol));
    el.set_attribute(
        "style",
        &format!(
            "left:{left:.2}vw; top:{top:.2}vh; font-size:{size:.0}px; \
             transform:translateY(12vh) rotate({rot:.1}deg) scale(0.05); \
             animation-duration:{duration:.0}ms;"
        ),
    )
    .ok();
    if overlay.append_child(&el).is_err() {
        return;
    }
    // Self-cleanup once the grow animation finishes.
    let doomed = el.clone();
    let cb = Closure::once_into_js(move || doomed.remove());
    el.add_event_listener_with_callback("animationend", cb.unchecked_ref())
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_params_stay_in_their_bands() {
        let mut rng = Rng::from_seed(0xF10E);
        for _ in 0..500 {
            let (symbol, left, top, size, rot, duration) = spawn_params(&mut rng);
            assert!(crate::FLOWERS.contains(&symbol));
            assert!((10.0..90.0).contains(&left));
            assert!((40.0..80.0).contains(&top));
            assert!((24.0..72.0).contains(&size));
            assert!((-20.0..20.0).contains(&rot));
            assert!((2200.0..3100.0).contains(&duration));
        }
    }

    #[test]
    fn spawn_symbols_vary() {
        let mut rng = Rng::from_seed(0xF10F);
        let symbols: std::collections::HashSet<_> =
            (0..100).map(|_| spawn_params(&mut rng).0).collect();
        assert!(symbols.len() > 1);
    }
}
