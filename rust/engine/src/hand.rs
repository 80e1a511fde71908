use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

/// Hand category. Discriminants are the hundreds digit of a flattened [`Score`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl Category {
    pub fn base(self) -> u32 {
        self as u32 * 100
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

/// Strength of a five-card hand.
///
/// Kept as `{category, high_card}` and flattened with [`Score::value`] only
/// where an integer is needed. Field order makes the derived `Ord` agree with
/// `value()`, since `high_card` never exceeds 14.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Score {
    pub category: Category,
    /// Highest card value in the five (2..=14). Tiebreak inside a category.
    pub high_card: u8,
}

impl Score {
    pub fn value(self) -> u32 {
        self.category.base() + u32::from(self.high_card)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category.label(), self.value())
    }
}

/// Scores exactly five cards.
///
/// The wheel (A-2-3-4-5) counts as a straight but keeps the Ace as its high
/// card, so it scores 514 rather than 505.
pub fn evaluate_five(cards: &[Card; 5]) -> Score {
    let mut rank_counts = [0u8; 15];
    let mut suit_counts = [0u8; 4];
    let mut values = [0u8; 5];
    for (i, c) in cards.iter().enumerate() {
        let v = c.rank.value();
        values[i] = v;
        rank_counts[v as usize] += 1;
        suit_counts[suit_index(c.suit)] += 1;
    }
    values.sort_unstable();
    let high_card = values[4];

    let is_flush = suit_counts.iter().any(|&n| n == 5);
    let is_straight = values.windows(2).all(|w| w[1] == w[0] + 1) || values == [2, 3, 4, 5, 14];

    let mut groups: Vec<u8> = rank_counts.iter().copied().filter(|&n| n > 0).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let first = groups.first().copied().unwrap_or(0);
    let second = groups.get(1).copied().unwrap_or(0);

    let category = if is_straight && is_flush {
        Category::StraightFlush
    } else if first == 4 {
        Category::FourOfAKind
    } else if first == 3 && second == 2 {
        Category::FullHouse
    } else if is_flush {
        Category::Flush
    } else if is_straight {
        Category::Straight
    } else if first == 3 {
        Category::ThreeOfAKind
    } else if first == 2 && second == 2 {
        Category::TwoPair
    } else if first == 2 {
        Category::OnePair
    } else {
        Category::HighCard
    };

    Score {
        category,
        high_card,
    }
}

/// Best five-card score from the union of hole and community cards.
///
/// Returns `None` when fewer than five cards are available (e.g. preflop);
/// callers treat that as a score of zero.
pub fn best_score(hole: &[Card], community: &[Card]) -> Option<Score> {
    let all: Vec<Card> = hole.iter().chain(community).copied().collect();
    combinations(&all, 5)
        .into_iter()
        .map(|combo| evaluate_five(&[combo[0], combo[1], combo[2], combo[3], combo[4]]))
        .max()
}

/// All `k`-card subsets of `cards`, in lexicographic index order.
pub fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    fn backtrack(
        cards: &[Card],
        k: usize,
        start: usize,
        combo: &mut Vec<Card>,
        out: &mut Vec<Vec<Card>>,
    ) {
        if combo.len() == k {
            out.push(combo.clone());
            return;
        }
        for i in start..cards.len() {
            combo.push(cards[i]);
            backtrack(cards, k, i + 1, combo, out);
            combo.pop();
        }
    }

    let mut out = Vec::new();
    if k <= cards.len() {
        backtrack(cards, k, 0, &mut Vec::with_capacity(k), &mut out);
    }
    out
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    }
}
