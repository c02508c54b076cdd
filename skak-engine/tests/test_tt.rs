use skak_core::Move;
use skak_engine::{Evaluation, NodeType, TTEntry, TTable};

#[test]
fn store_then_probe_roundtrip() {
    let mut tt = TTable::new(1 << 10);
    let mv = Move::from_notation("e2e4").unwrap();
    let entry = TTEntry::new(0xDEADBEEF, 5, Evaluation::new(42), NodeType::Exact, Some(mv));

    tt.store(entry);

    let probed = tt.probe(0xDEADBEEF).unwrap();
    assert_eq!(probed.zobrist(), 0xDEADBEEF);
    assert_eq!(probed.depth(), 5);
    assert_eq!(probed.score(), Evaluation::new(42));
    assert!(matches!(probed.node_type(), NodeType::Exact));
    assert_eq!(probed.best_move(), Some(mv));
}

#[test]
fn probe_miss_and_index_collision() {
    let mut tt = TTable::new(1 << 10);
    tt.store(TTEntry::new(7, 3, Evaluation::new(-10), NodeType::Lowerbound, None));

    // Unknown key
    assert!(tt.probe(8).is_none());

    // A key that maps to the same slot must not leak the stored entry
    let colliding = 7 + (1 << 10);
    assert!(tt.probe(colliding).is_none());
}

#[test]
fn store_overwrites_slot() {
    let mut tt = TTable::new(1 << 10);
    tt.store(TTEntry::new(7, 3, Evaluation::new(-10), NodeType::Lowerbound, None));
    tt.store(TTEntry::new(7 + (1 << 10), 6, Evaluation::new(99), NodeType::Upperbound, None));

    assert!(tt.probe(7).is_none());
    assert_eq!(tt.probe(7 + (1 << 10)).unwrap().score(), Evaluation::new(99));
}

#[test]
fn reset_clears_everything() {
    let mut tt = TTable::new(1 << 8);
    for key in 0..100u64 {
        tt.store(TTEntry::new(key, 1, Evaluation::new(key as i32), NodeType::Exact, None));
    }

    tt.reset();

    for key in 0..100u64 {
        assert!(tt.probe(key).is_none());
    }
}
