//! Bloom Match core crate.
//!
//! A small flower-themed browser game made of three widgets that share one
//! symbol vocabulary and are otherwise independent: a memory-pairs board, a
//! flower picker that captions a random phrase, and a "night" overlay that
//! rains growing flowers for a short burst. `start_game()` builds and wires
//! all of them to the page DOM; the matching rules themselves live in a pure
//! session core so they test natively.

use wasm_bindgen::prelude::*;

pub mod game;
mod notify;
mod overlay;
mod picker;
pub mod rng;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Shared flower vocabulary (board, picker and overlay all draw from it)
// -----------------------------------------------------------------------------

pub const FLOWERS: &[&str] = &["🌸", "🌺", "🌼", "🌻", "💐", "🌷", "🌹", "🥀", "🌱", "🌿"];

/// Captions the picker pairs with a selected flower.
pub const PHRASES: &[&str] = &[
    "Eres la flor que alegra mis días.",
    "Contigo florece mi corazón.",
    "Tu sonrisa es mi primavera eterna.",
    "Donde estás tú, nace un jardín.",
    "Eres mi pétalo favorito en la tormenta.",
    "Amarte es regar mi alma cada día.",
    "Tu cariño es luz que todo lo ilumina.",
    "Tu risa hace brotar mil flores.",
];

/// Occasional mid-game quips, surfaced as toasts by the random-message rule.
pub const MESSAGE_POOL: &[&str] = &[
    "Demasiados intentos gusano perdedor",
    "levantate y sigue adelante",
    "Fracasar no es una opción",
    "¡Victoria! Lo lograste, felicidades",
    "MMm ya vas en 5 movimientos, ya hubieras terminado",
    "Uy, vas por buen camino... ¿lo harás en menos?",
    "Ey, eso estuvo cerca, ¡anímate!",
    "Casi, casi... sigue así",
    "¡Qué habilidad! o ¿pura suerte?",
    "No está mal, pero podrías hacerlo mejor 😉",
    "Se puso interesante, mantén la concentración",
    "Ese movimiento fue curioso... 😏",
    "Si sigues así, te quedará fácil",
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_game_mode()
}
