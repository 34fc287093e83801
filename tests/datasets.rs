// Vocabulary invariants for the shared flower datasets.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use bloom_match::{FLOWERS, MESSAGE_POOL, PHRASES};

#[test]
fn flowers_are_unique_and_nonempty() {
    let mut seen = HashSet::new();
    for f in FLOWERS {
        assert!(!f.is_empty(), "empty symbol in FLOWERS");
        assert!(seen.insert(*f), "duplicate symbol '{}' in FLOWERS", f);
    }
    // The picker caps at 8 controls and the largest board uses 8 pairs, so
    // the alphabet must cover at least that many distinct symbols.
    assert!(FLOWERS.len() >= 8);
}

#[test]
fn phrases_are_unique_and_trimmed() {
    let mut seen = HashSet::new();
    for p in PHRASES {
        assert!(!p.is_empty(), "empty phrase in PHRASES");
        assert_eq!(p.trim(), *p, "untrimmed phrase '{}'", p);
        assert!(seen.insert(*p), "duplicate phrase '{}'", p);
    }
}

#[test]
fn message_pool_is_unique_and_trimmed() {
    let mut seen = HashSet::new();
    for m in MESSAGE_POOL {
        assert!(!m.is_empty(), "empty message in MESSAGE_POOL");
        assert_eq!(m.trim(), *m, "untrimmed message '{}'", m);
        assert!(seen.insert(*m), "duplicate message '{}'", m);
    }
}

#[test]
fn interesting_move_counts_are_sorted_and_unique() {
    use bloom_match::game::session::INTERESTING_MOVE_COUNTS;
    assert!(!INTERESTING_MOVE_COUNTS.is_empty());
    for pair in INTERESTING_MOVE_COUNTS.windows(2) {
        assert!(pair[0] < pair[1], "milestones out of order: {:?}", pair);
    }
}
