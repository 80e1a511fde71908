use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{all_ranks, all_suits, Card};

/// Result of [`draw`]: the cards taken from the top and what is left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub drawn: Vec<Card>,
    pub rest: Vec<Card>,
}

/// Builds the 52 cards in suit-major (S, H, D, C), rank-minor (2..A) order.
pub fn build() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

/// Returns a uniformly shuffled copy of `deck` (Fisher-Yates). The input is left untouched.
pub fn shuffle<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut copy = deck.to_vec();
    copy.shuffle(rng);
    copy
}

/// Splits off the first `n` cards.
///
/// If `n` exceeds the number of remaining cards nothing is drawn and `rest`
/// is the whole deck; the table never asks for more than a 52-card deck holds.
pub fn draw(deck: &[Card], n: usize) -> Draw {
    if n > deck.len() {
        return Draw {
            drawn: Vec::new(),
            rest: deck.to_vec(),
        };
    }
    let (drawn, rest) = deck.split_at(n);
    Draw {
        drawn: drawn.to_vec(),
        rest: rest.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn build_starts_with_spades_and_ends_with_clubs() {
        let deck = build();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck[0], Card::new(Rank::Two, Suit::Spades));
        assert_eq!(deck[12], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(deck[13], Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(deck[51], Card::new(Rank::Ace, Suit::Clubs));
    }

    #[test]
    fn shuffle_does_not_mutate_input() {
        let deck = build();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let shuffled = shuffle(&deck, &mut rng);
        assert_eq!(deck, build());
        assert_ne!(shuffled, deck);
    }

    #[test]
    fn draw_splits_in_order() {
        let deck = build();
        let d = draw(&deck, 3);
        assert_eq!(d.drawn, deck[..3].to_vec());
        assert_eq!(d.rest.len(), 49);
        assert_eq!(d.rest[0], deck[3]);
    }

    #[test]
    fn overdraw_takes_nothing() {
        let deck = build();
        let d = draw(&deck[..4], 5);
        assert!(d.drawn.is_empty());
        assert_eq!(d.rest.len(), 4);
    }
}
