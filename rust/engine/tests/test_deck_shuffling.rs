use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::deck::{build, draw, shuffle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn build_has_52_unique_cards() {
    let deck = build();
    let set: HashSet<Card> = deck.iter().copied().collect();
    assert_eq!(deck.len(), 52);
    assert_eq!(set.len(), 52);
}

#[test]
fn every_shuffle_is_a_permutation_of_the_canonical_deck() {
    let canonical: HashSet<Card> = build().into_iter().collect();
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for _ in 0..200 {
        let shuffled = shuffle(&build(), &mut rng);
        assert_eq!(shuffled.len(), 52);
        let set: HashSet<Card> = shuffled.iter().copied().collect();
        assert_eq!(set, canonical);
    }
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut r1 = ChaCha20Rng::seed_from_u64(12345);
    let mut r2 = ChaCha20Rng::seed_from_u64(12345);
    assert_eq!(shuffle(&build(), &mut r1), shuffle(&build(), &mut r2));
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut r1 = ChaCha20Rng::seed_from_u64(1);
    let mut r2 = ChaCha20Rng::seed_from_u64(2);
    assert_ne!(
        shuffle(&build(), &mut r1),
        shuffle(&build(), &mut r2),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn sequential_draws_never_repeat_a_card() {
    let mut rng = ChaCha20Rng::seed_from_u64(777);
    let mut deck = shuffle(&build(), &mut rng);
    let mut seen = HashSet::new();
    // 4 seats x 2 hole cards, then flop, turn, river
    for n in [1, 1, 1, 1, 1, 1, 1, 1, 3, 1, 1] {
        let d = draw(&deck, n);
        assert_eq!(d.drawn.len(), n);
        for c in &d.drawn {
            assert!(seen.insert(*c), "card {c} drawn twice");
        }
        deck = d.rest;
    }
    assert_eq!(deck.len(), 52 - 13);
}
