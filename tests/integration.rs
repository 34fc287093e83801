// Integration tests (native) for the `bloom-match` crate.
// These tests avoid wasm-specific functionality and exercise the pure session
// logic so they can run under `cargo test` on the host.

use bloom_match::game::session::{
    MAX_MESSAGES_PER_SESSION, SelectionOutcome, Session, pair_count_for,
};
use bloom_match::rng::Rng;

fn board_symbols(session: &Session) -> Vec<&'static str> {
    session.cards().iter().map(|c| c.symbol).collect()
}

// Index of the unmatched partner sharing the symbol at `index`.
fn partner_of(session: &Session, index: usize) -> usize {
    let symbol = session.cards()[index].symbol;
    session
        .cards()
        .iter()
        .enumerate()
        .find(|(i, c)| *i != index && c.symbol == symbol && !c.matched)
        .map(|(i, _)| i)
        .expect("every symbol is dealt in pairs")
}

#[test]
fn board_holds_each_symbol_exactly_twice() {
    for pairs in [6usize, 8] {
        let mut rng = Rng::from_seed(pairs as u64);
        let session = Session::deal(pairs, &mut rng);
        assert_eq!(session.cards().len(), pairs * 2);
        let mut counts = std::collections::HashMap::new();
        for c in session.cards() {
            *counts.entry(c.symbol).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), pairs);
        assert!(counts.values().all(|&n| n == 2));
    }
}

#[test]
fn board_order_is_not_fixed_across_deals() {
    let mut orders = std::collections::HashSet::new();
    for seed in 1..=20u64 {
        let mut rng = Rng::from_seed(seed);
        orders.insert(board_symbols(&Session::deal(8, &mut rng)));
    }
    assert!(orders.len() > 1, "20 deals never produced a second ordering");
}

#[test]
fn matching_pair_disables_both_and_counts_one_match() {
    let mut rng = Rng::from_seed(3);
    let mut session = Session::deal(8, &mut rng);
    let first = 0;
    let second = partner_of(&session, first);
    assert!(matches!(
        session.submit_selection(first, &mut rng),
        SelectionOutcome::FirstUp { .. }
    ));
    assert_eq!(session.moves(), 0, "a lone first tap must not count a move");
    let outcome = session.submit_selection(second, &mut rng);
    assert!(matches!(outcome, SelectionOutcome::Matched { .. }));
    assert!(session.cards()[first].matched);
    assert!(session.cards()[second].matched);
    assert_eq!(session.moves(), 1);
    assert_eq!(session.matches(), 1);
    // Permanently disabled: neither card can become a selection again.
    assert_eq!(
        session.submit_selection(first, &mut rng),
        SelectionOutcome::Ignored
    );
    assert_eq!(
        session.submit_selection(second, &mut rng),
        SelectionOutcome::Ignored
    );
}

#[test]
fn mismatched_pair_flips_back_after_resolution() {
    let mut rng = Rng::from_seed(4);
    let mut session = Session::deal(8, &mut rng);
    let first = 0;
    let second = session
        .cards()
        .iter()
        .position(|c| c.symbol != session.cards()[0].symbol)
        .expect("two symbols always exist");
    session.submit_selection(first, &mut rng);
    let outcome = session.submit_selection(second, &mut rng);
    assert!(matches!(outcome, SelectionOutcome::Mismatched { .. }));
    assert_eq!(session.moves(), 1);
    assert_eq!(session.matches(), 0);
    assert!(session.is_locked());
    // The lock swallows taps until the flip-back delay resolves.
    assert_eq!(
        session.submit_selection(2, &mut rng),
        SelectionOutcome::Ignored
    );
    session.resolve_mismatch();
    assert!(!session.is_locked());
    assert!(!session.cards()[first].face_up);
    assert!(!session.cards()[second].face_up);
    assert_eq!(session.moves(), 1);
    assert_eq!(session.matches(), 0);
}

#[test]
fn completing_the_board_reports_victory_once() {
    let mut rng = Rng::from_seed(5);
    let mut session = Session::deal(6, &mut rng);
    let mut victories = 0;
    for _ in 0..session.pair_count() {
        let first = session
            .cards()
            .iter()
            .position(|c| !c.matched)
            .expect("unmatched card remains");
        let second = partner_of(&session, first);
        session.submit_selection(first, &mut rng);
        match session.submit_selection(second, &mut rng) {
            SelectionOutcome::Matched { victory, .. } => {
                if victory {
                    victories += 1;
                }
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }
    assert!(session.is_complete());
    assert_eq!(victories, 1);
    assert_eq!(session.matches() as usize, session.pair_count());
}

#[test]
fn restart_discards_all_session_state() {
    let mut rng = Rng::from_seed(6);
    let mut session = Session::deal(8, &mut rng);
    let first = 0;
    let second = partner_of(&session, first);
    session.submit_selection(first, &mut rng);
    session.submit_selection(second, &mut rng);
    assert_eq!(session.matches(), 1);

    session = Session::deal(8, &mut rng);
    assert_eq!(session.moves(), 0);
    assert_eq!(session.matches(), 0);
    assert!(!session.is_locked());
    assert!(session.cards().iter().all(|c| !c.matched && !c.face_up));
    assert_eq!(session.moves_label(), "Movimientos: 0");
    assert_eq!(session.matches_label(), "Parejas: 0/8");
}

#[test]
fn quips_cap_at_two_and_never_reevaluate_a_count() {
    let mut rng = Rng::from_seed(7);
    let mut session = Session::deal(8, &mut rng);
    let mut shown = 0;
    for count in 1..=5000u32 {
        if session.message_roll(count, &mut rng).is_some() {
            shown += 1;
        }
        // A count that was already evaluated never fires again.
        assert_eq!(session.message_roll(count, &mut rng), None);
    }
    assert_eq!(shown, MAX_MESSAGES_PER_SESSION);
}

#[test]
fn viewport_heuristic_matches_the_breakpoints() {
    assert_eq!(pair_count_for(360.0, true), 6);
    assert_eq!(pair_count_for(420.0, false), 6);
    assert_eq!(pair_count_for(421.0, false), 8);
    assert_eq!(pair_count_for(470.0, true), 6);
    assert_eq!(pair_count_for(470.0, false), 8);
    assert_eq!(pair_count_for(500.0, true), 8);
    assert_eq!(pair_count_for(1280.0, false), 8);
}
