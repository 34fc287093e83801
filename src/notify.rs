//! Transient toasts and the victory dialog.
//!
//! Stands in for a hosted notification service: quips surface as a
//! top-centred toast that removes itself after a short timer, and victory is
//! acknowledged through a blocking dialog. Both paths degrade to a plain
//! `alert` when the richer surface cannot be built, so no message is ever
//! silently dropped.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

/// How long a toast stays on screen.
const TOAST_MS: i32 = 2200;

pub const VICTORY_TITLE: &str = "¡Victoria!";
pub const VICTORY_TEXT: &str = "Lo lograste, felicitaciones 🌟";

/// Brief non-blocking notification.
pub fn toast(message: &str) {
    let Some(win) = window() else { return };
    if build_toast(&win, message).is_none() {
        win.alert_with_message(message).ok();
    }
}

fn build_toast(win: &web_sys::Window, message: &str) -> Option<()> {
    let doc = win.document()?;
    let body = doc.body()?;
    let el = doc.create_element("div").ok()?;
    el.set_class_name("bm-toast");
    el.set_text_content(Some(message));
    el.set_attribute(
        "style",
        "position:fixed; top:14px; left:50%; transform:translateX(-50%); \
         padding:8px 16px; background:rgba(20,20,30,0.92); color:#fff; \
         border-radius:8px; font-size:14px; z-index:60;",
    )
    .ok()?;
    body.append_child(&el).ok()?;
    let doomed = el.clone();
    let cb = Closure::once_into_js(move || doomed.remove());
    if win
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), TOAST_MS)
        .is_err()
    {
        el.remove();
        return None;
    }
    Some(())
}

/// Blocking victory acknowledgment. `confirm` carries the success framing;
/// if the user agent refuses it, a plain alert does.
pub fn victory_dialog() {
    let Some(win) = window() else { return };
    let text = format!("{VICTORY_TITLE}\n{VICTORY_TEXT}");
    if win.confirm_with_message(&text).is_err() {
        win.alert_with_message(&text).ok();
    }
}
