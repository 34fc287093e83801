//! Small gameplay PRNG.
//!
//! Every random decision in the crate (board shuffle, quip draws, picker
//! phrases, overlay spawn parameters) flows through [`Rng`] so the logic can
//! run deterministically from a fixed seed under native `cargo test`. In the
//! browser the generator is seeded from `getrandom`; if entropy acquisition
//! fails it falls back to a performance-clock derived seed.

use std::cell::RefCell;

pub struct Rng(u64);

impl Rng {
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        let seed = match getrandom::getrandom(&mut buf) {
            Ok(()) => u64::from_le_bytes(buf),
            Err(_) => fallback_seed(),
        };
        Self::from_seed(seed)
    }

    pub fn from_seed(seed: u64) -> Self {
        // Zero is the fixed point of the xorshift step; nudge it off.
        Rng(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    // xorshift step with a multiplicative output scramble; plenty for
    // gameplay, not crypto.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform draw in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Bernoulli draw with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniformly random element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, pool: &'a [T]) -> &'a T {
        &pool[self.index(pool.len())]
    }

    /// Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

fn fallback_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    // Same linear transform the prototype randomness used (not crypto secure).
    (now as u64).wrapping_mul(1664525).wrapping_add(1013904223)
}

thread_local! {
    static WIDGET_RNG: RefCell<Rng> = RefCell::new(Rng::from_entropy());
}

/// Crate-wide generator for the DOM widgets. Gameplay logic takes an explicit
/// `&mut Rng` instead so tests stay deterministic.
pub fn with_global<R>(f: impl FnOnce(&mut Rng) -> R) -> R {
    WIDGET_RNG.with(|cell| f(&mut cell.borrow_mut()))
}
