//! Pure matching-game state machine (no DOM).
//!
//! A [`Session`] is an explicit command/query object: the wasm layer feeds it
//! taps and timer completions and renders whatever the outcomes report back.
//! Keeping `web-sys` out of this module lets the whole rule set run under
//! native `cargo test`.

use std::collections::HashSet;

use crate::rng::Rng;
use crate::{FLOWERS, MESSAGE_POOL};

/// Delay before a mismatched pair flips back face-down.
pub const MISMATCH_DELAY_MS: i32 = 700;
/// Delay before the victory caption and dialog appear.
pub const VICTORY_DELAY_MS: i32 = 600;

/// Move counts that make a quip noticeably more likely (each counts ±1).
pub const INTERESTING_MOVE_COUNTS: &[u32] = &[3, 4, 5, 6, 7, 8, 10, 12, 15];
/// At most this many quips per session.
pub const MAX_MESSAGES_PER_SESSION: u32 = 2;

/// Board sizing heuristic: fewer pairs on small or touch screens.
pub fn pair_count_for(viewport_width: f64, touch_capable: bool) -> usize {
    if viewport_width <= 420.0 || (touch_capable && viewport_width < 500.0) {
        6
    } else {
        8
    }
}

/// One card slot on the board. Two cards may share a symbol but stay distinct.
#[derive(Clone, Debug)]
pub struct Card {
    pub symbol: &'static str,
    pub face_up: bool,
    pub matched: bool,
}

/// What a tap did, so the caller can schedule rendering and timers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Tap ignored: board locked, same card tapped again, or already matched.
    Ignored,
    /// First card of a pair turned face-up; no counter changed.
    FirstUp { index: usize },
    /// Second card matched the first. `victory` is set when this match
    /// completed the board; it is reported once per session.
    Matched {
        first: usize,
        second: usize,
        message: Option<&'static str>,
        victory: bool,
    },
    /// Second card did not match. The board stays locked until
    /// [`Session::resolve_mismatch`] runs after the flip-back delay.
    Mismatched {
        first: usize,
        second: usize,
        message: Option<&'static str>,
    },
}

pub struct Session {
    cards: Vec<Card>,
    pair_count: usize,
    moves: u32,
    matches: u32,
    first: Option<usize>,
    locked: bool,
    pending_mismatch: Option<(usize, usize)>,
    victory_reported: bool,
    messages_shown: u32,
    evaluated_moves: HashSet<u32>,
}

impl Session {
    /// Deal a fresh board: cycle the flower alphabet until `pair_count`
    /// symbols, duplicate the pool and shuffle the combined sequence.
    pub fn deal(pair_count: usize, rng: &mut Rng) -> Self {
        let mut symbols: Vec<&'static str> = Vec::with_capacity(pair_count * 2);
        for i in 0..pair_count {
            symbols.push(FLOWERS[i % FLOWERS.len()]);
        }
        symbols.extend_from_within(..);
        rng.shuffle(&mut symbols);
        let cards = symbols
            .into_iter()
            .map(|symbol| Card {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect();
        Session {
            cards,
            pair_count,
            moves: 0,
            matches: 0,
            first: None,
            locked: false,
            pending_mismatch: None,
            victory_reported: false,
            messages_shown: 0,
            evaluated_moves: HashSet::new(),
        }
    }

    /// Tap the card at `index`. Counters only move on the second tap of a
    /// pair; a lone first tap just records the pending selection.
    pub fn submit_selection(&mut self, index: usize, rng: &mut Rng) -> SelectionOutcome {
        if self.locked || index >= self.cards.len() {
            return SelectionOutcome::Ignored;
        }
        if self.first == Some(index) || self.cards[index].matched {
            return SelectionOutcome::Ignored;
        }

        self.cards[index].face_up = true;

        let Some(first) = self.first else {
            self.first = Some(index);
            return SelectionOutcome::FirstUp { index };
        };

        self.moves += 1;
        let message = self.message_roll(self.moves, rng);

        if self.cards[first].symbol == self.cards[index].symbol {
            self.cards[first].matched = true;
            self.cards[index].matched = true;
            self.first = None;
            self.matches += 1;
            let victory = self.is_complete() && !self.victory_reported;
            if victory {
                self.victory_reported = true;
            }
            SelectionOutcome::Matched {
                first,
                second: index,
                message,
                victory,
            }
        } else {
            self.first = None;
            self.locked = true;
            self.pending_mismatch = Some((first, index));
            SelectionOutcome::Mismatched {
                first,
                second: index,
                message,
            }
        }
    }

    /// Delayed half of the mismatch path: flip both cards back face-down and
    /// release the lock. No-op when no mismatch is pending.
    pub fn resolve_mismatch(&mut self) {
        if let Some((a, b)) = self.pending_mismatch.take() {
            self.cards[a].face_up = false;
            self.cards[b].face_up = false;
            self.locked = false;
        }
    }

    /// Random-message rule: evaluated once per distinct move count, at most
    /// [`MAX_MESSAGES_PER_SESSION`] hits per session. Counts near a milestone
    /// raise the odds, very early moves a little more.
    pub fn message_roll(&mut self, move_count: u32, rng: &mut Rng) -> Option<&'static str> {
        if self.messages_shown >= MAX_MESSAGES_PER_SESSION {
            return None;
        }
        // Marked evaluated regardless of the draw below.
        if !self.evaluated_moves.insert(move_count) {
            return None;
        }
        let interesting = INTERESTING_MOVE_COUNTS
            .iter()
            .any(|&t| move_count.abs_diff(t) <= 1);
        let mut p = if interesting { 0.20 } else { 0.06 };
        if move_count <= 4 {
            p += 0.03;
        }
        if !rng.chance(p) {
            return None;
        }
        self.messages_shown += 1;
        Some(rng.pick(MESSAGE_POOL))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_complete(&self) -> bool {
        self.matches as usize == self.pair_count
    }

    pub fn moves_label(&self) -> String {
        format!("Movimientos: {}", self.moves)
    }

    pub fn matches_label(&self) -> String {
        format!("Parejas: {}/{}", self.matches, self.pair_count)
    }
}
