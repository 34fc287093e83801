//! Memory board wiring.
//!
//! Builds the page widgets, routes taps into the pure [`session`] core and
//! schedules the flip-back / victory delays. All shared state lives in a
//! thread-local cell; wasm runs single-threaded so no further synchronization
//! is involved. Timer handles are kept so a restart can cancel callbacks left
//! over from the previous session.

pub mod session;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::{notify, overlay, picker, rng};
use session::{MISMATCH_DELAY_MS, SelectionOutcome, Session, VICTORY_DELAY_MS};

pub const VICTORY_CAPTION: &str = "¡Felicidades! 🌟 Has encontrado todas las parejas.";

// --- Shared UI state ---------------------------------------------------------

struct GameUi {
    session: Session,
    flip_timer: Option<i32>,
    victory_timer: Option<i32>,
}

thread_local! {
    static GAME: std::cell::RefCell<Option<GameUi>> = std::cell::RefCell::new(None);
}

// --- Page scaffold -----------------------------------------------------------

const CSS: &str = "\
#bm-root { max-width: 560px; margin: 0 auto; font-family: system-ui, sans-serif; text-align: center; }\n\
#bm-stats { display: flex; justify-content: center; gap: 12px; align-items: center; flex-wrap: wrap; }\n\
#bm-board { display: grid; grid-template-columns: repeat(4, minmax(56px, 1fr)); gap: 10px; margin: 16px 0; }\n\
.card { position: relative; height: 84px; background: none; border: 0; padding: 0; cursor: pointer; perspective: 600px; }\n\
.card .inner { position: absolute; inset: 0; transition: transform 0.35s; transform-style: preserve-3d; }\n\
.card.flipped .inner { transform: rotateY(180deg); }\n\
.face { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; font-size: 32px; border-radius: 10px; backface-visibility: hidden; }\n\
.face.back { background: #2e7d32; color: #fff; }\n\
.face.front { background: #fff8f0; transform: rotateY(180deg); box-shadow: inset 0 0 0 2px #e8c8d8; }\n\
.card:disabled { cursor: default; opacity: 0.85; }\n\
#bm-picker { display: flex; justify-content: center; gap: 6px; margin: 12px 0; }\n\
.picker-item { font-size: 24px; background: none; border: 2px solid transparent; border-radius: 8px; cursor: pointer; padding: 4px 6px; }\n\
.picker-item.selected { border-color: #c2185b; }\n\
#bm-overlay { position: fixed; inset: 0; background: rgba(8, 10, 40, 0.88); z-index: 50; overflow: hidden; }\n\
#bm-overlay-close { position: absolute; top: 16px; right: 16px; font-size: 16px; padding: 6px 12px; cursor: pointer; }\n\
body.overlay-open { overflow: hidden; }\n\
.growing-flower { position: absolute; animation-name: bm-grow; animation-timing-function: ease-out; animation-fill-mode: forwards; pointer-events: none; }\n\
@keyframes bm-grow { to { transform: translateY(0) rotate(0deg) scale(1); } }\n";

fn ensure_stylesheet(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("bm-style").is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id("bm-style");
    style.set_text_content(Some(CSS));
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&style)?;
    Ok(())
}

fn ensure_scaffold(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("bm-root").is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let root = doc.create_element("div")?;
    root.set_id("bm-root");
    root.set_inner_html(
        "<div id='bm-stats'>\
           <span id='bm-moves'>Movimientos: 0</span>\
           <span id='bm-matches'>Parejas: 0/0</span>\
           <button id='bm-restart' type='button'>Reiniciar</button>\
           <button id='bm-night' type='button'>Noche</button>\
         </div>\
         <div id='bm-board'></div>\
         <div id='bm-picker'></div>\
         <p id='bm-phrase'></p>\
         <div id='bm-overlay' hidden aria-hidden='true'>\
           <button id='bm-overlay-close' type='button'>Cerrar</button>\
         </div>",
    );
    body.append_child(&root)?;
    Ok(())
}

// --- Entry point -------------------------------------------------------------

pub fn start_game_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    ensure_stylesheet(&doc)?;
    ensure_scaffold(&doc)?;

    let session = rng::with_global(|r| Session::deal(viewport_pair_count(&win), r));
    GAME.with(|g| {
        g.replace(Some(GameUi {
            session,
            flip_timer: None,
            victory_timer: None,
        }))
    });

    // Delegated tap handling for the whole card grid; touch taps prevent the
    // synthetic click that would otherwise fire a second selection.
    {
        let board = doc
            .get_element_by_id("bm-board")
            .ok_or_else(|| JsValue::from_str("no board element"))?;
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            evt.prevent_default();
            let card = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("button.card").ok().flatten());
            if let Some(card) = card {
                if let Some(index) = card
                    .get_attribute("data-index")
                    .and_then(|s| s.parse::<usize>().ok())
                {
                    on_card_tap(index);
                }
            }
        }) as Box<dyn FnMut(_)>);
        board.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        board.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let restart_btn = doc
            .get_element_by_id("bm-restart")
            .ok_or_else(|| JsValue::from_str("no restart control"))?;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            restart();
        }) as Box<dyn FnMut(_)>);
        restart_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resize / orientation changes re-derive the pair count and rebuild both
    // the board and the picker.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            restart();
            if let Some(doc) = window().and_then(|w| w.document()) {
                picker::render(&doc).ok();
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    picker::wire(&doc)?;
    picker::render(&doc)?;
    overlay::wire(&doc)?;

    GAME.with(|g| {
        if let Some(ui) = g.borrow().as_ref() {
            render_board(&doc, &ui.session).ok();
            update_stats(&doc, &ui.session);
        }
    });
    Ok(())
}

// --- Board rendering ---------------------------------------------------------

fn viewport_pair_count(win: &web_sys::Window) -> usize {
    let width = win
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0);
    let touch = win.navigator().max_touch_points() > 0;
    session::pair_count_for(width, touch)
}

fn render_board(doc: &Document, session: &Session) -> Result<(), JsValue> {
    let board = doc
        .get_element_by_id("bm-board")
        .ok_or_else(|| JsValue::from_str("no board element"))?;
    board.set_inner_html("");
    for (index, card) in session.cards().iter().enumerate() {
        let el = doc.create_element("button")?;
        el.set_class_name("card");
        el.set_attribute("type", "button")?;
        el.set_attribute("data-index", &index.to_string())?;
        el.set_attribute("aria-label", "Carta de flor")?;
        el.set_inner_html(&format!(
            "<div class='inner'><div class='face back'>?</div><div class='face front'>{}</div></div>",
            card.symbol
        ));
        board.append_child(&el)?;
    }
    Ok(())
}

fn card_element(doc: &Document, index: usize) -> Option<Element> {
    doc.query_selector(&format!("#bm-board button.card[data-index='{index}']"))
        .ok()
        .flatten()
}

fn set_card_flipped(doc: &Document, index: usize, flipped: bool) {
    if let Some(el) = card_element(doc, index) {
        if flipped {
            el.class_list().add_1("flipped").ok();
        } else {
            el.class_list().remove_1("flipped").ok();
        }
    }
}

fn set_card_disabled(doc: &Document, index: usize) {
    if let Some(el) = card_element(doc, index) {
        if let Some(btn) = el.dyn_ref::<web_sys::HtmlButtonElement>() {
            btn.set_disabled(true);
        }
    }
}

fn update_stats(doc: &Document, session: &Session) {
    if let Some(el) = doc.get_element_by_id("bm-moves") {
        el.set_text_content(Some(&session.moves_label()));
    }
    if let Some(el) = doc.get_element_by_id("bm-matches") {
        el.set_text_content(Some(&session.matches_label()));
    }
}

// --- Selection flow ----------------------------------------------------------

fn on_card_tap(index: usize) {
    let outcome = GAME.with(|g| {
        g.borrow_mut()
            .as_mut()
            .map(|ui| rng::with_global(|r| ui.session.submit_selection(index, r)))
    });
    let Some(outcome) = outcome else { return };
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    match outcome {
        SelectionOutcome::Ignored => {}
        SelectionOutcome::FirstUp { index } => set_card_flipped(&doc, index, true),
        SelectionOutcome::Matched {
            first,
            second,
            message,
            victory,
        } => {
            set_card_flipped(&doc, second, true);
            set_card_disabled(&doc, first);
            set_card_disabled(&doc, second);
            GAME.with(|g| {
                if let Some(ui) = g.borrow().as_ref() {
                    update_stats(&doc, &ui.session);
                }
            });
            if let Some(msg) = message {
                notify::toast(msg);
            }
            if victory {
                schedule_victory();
            }
        }
        SelectionOutcome::Mismatched {
            first,
            second,
            message,
        } => {
            set_card_flipped(&doc, second, true);
            GAME.with(|g| {
                if let Some(ui) = g.borrow().as_ref() {
                    update_stats(&doc, &ui.session);
                }
            });
            if let Some(msg) = message {
                notify::toast(msg);
            }
            schedule_flip_back(first, second);
        }
    }
}

fn schedule_flip_back(first: usize, second: usize) {
    let Some(win) = window() else { return };
    let cb = Closure::once_into_js(move || {
        GAME.with(|g| {
            if let Some(ui) = g.borrow_mut().as_mut() {
                ui.session.resolve_mismatch();
                ui.flip_timer = None;
            }
        });
        if let Some(doc) = window().and_then(|w| w.document()) {
            set_card_flipped(&doc, first, false);
            set_card_flipped(&doc, second, false);
        }
    });
    let handle = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            MISMATCH_DELAY_MS,
        )
        .ok();
    GAME.with(|g| {
        if let Some(ui) = g.borrow_mut().as_mut() {
            ui.flip_timer = handle;
        }
    });
}

fn schedule_victory() {
    let Some(win) = window() else { return };
    let cb = Closure::once_into_js(move || {
        GAME.with(|g| {
            if let Some(ui) = g.borrow_mut().as_mut() {
                ui.victory_timer = None;
            }
        });
        if let Some(doc) = window().and_then(|w| w.document()) {
            if let Some(el) = doc.get_element_by_id("bm-phrase") {
                el.set_text_content(Some(VICTORY_CAPTION));
            }
        }
        notify::victory_dialog();
    });
    let handle = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), VICTORY_DELAY_MS)
        .ok();
    GAME.with(|g| {
        if let Some(ui) = g.borrow_mut().as_mut() {
            ui.victory_timer = handle;
        }
    });
}

// --- Restart -----------------------------------------------------------------

/// Discard the current session and deal a fresh board sized to the viewport.
/// Outstanding flip-back / victory timers are cancelled first so a stale
/// callback cannot touch the new session.
pub fn restart() {
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };
    let pair_count = viewport_pair_count(&win);
    GAME.with(|g| {
        if let Some(ui) = g.borrow_mut().as_mut() {
            if let Some(h) = ui.flip_timer.take() {
                win.clear_timeout_with_handle(h);
            }
            if let Some(h) = ui.victory_timer.take() {
                win.clear_timeout_with_handle(h);
            }
            ui.session = rng::with_global(|r| Session::deal(pair_count, r));
        }
    });
    GAME.with(|g| {
        if let Some(ui) = g.borrow().as_ref() {
            render_board(&doc, &ui.session).ok();
            update_stats(&doc, &ui.session);
        }
    });
}
