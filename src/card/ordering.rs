use crate::card::types::Card;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type LessFn = dyn Fn(&Card, &Card) -> bool + Send + Sync;

/// A less-than relation over card values, used to sort a deck.
///
/// Any closure can be wrapped; it should be a strict weak ordering; two cards
/// for which neither is less than the other are treated as equal and keep
/// their relative order.
#[derive(Clone)]
pub struct CardOrdering {
    less: Arc<LessFn>,
}

impl CardOrdering {
    pub fn new<F>(less: F) -> Self
    where
        F: Fn(&Card, &Card) -> bool + Send + Sync + 'static,
    {
        CardOrdering {
            less: Arc::new(less),
        }
    }

    /// Suit major (Hearts, Diamonds, Clubs, Spades, Joker), rank minor
    pub fn by_absolute_rank() -> Self {
        CardOrdering::new(|a, b| a.absolute_rank() < b.absolute_rank())
    }

    /// Rank only; suits keep their input order within a rank
    pub fn by_rank() -> Self {
        CardOrdering::new(|a, b| a.rank.value() < b.rank.value())
    }

    /// Suit only; ranks keep their input order within a suit
    pub fn by_suit() -> Self {
        CardOrdering::new(|a, b| a.suit < b.suit)
    }

    /// Flip the relation. Equal cards still keep their input order.
    pub fn reversed(self) -> Self {
        let less = self.less;
        CardOrdering::new(move |a, b| less(b, a))
    }

    pub fn less(&self, a: &Card, b: &Card) -> bool {
        (self.less)(a, b)
    }

    /// Three-way comparison derived from the less-than relation
    pub fn compare(&self, a: &Card, b: &Card) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Stable insertion sort driven by the less-than relation.
    ///
    /// Never panics and always yields a permutation of the input, even when
    /// the relation is inconsistent (random, cyclic, always true).
    pub fn sort(&self, cards: &mut [Card]) {
        for i in 1..cards.len() {
            let mut j = i;
            while j > 0 && self.less(&cards[j], &cards[j - 1]) {
                cards.swap(j, j - 1);
                j -= 1;
            }
        }
    }
}

impl fmt::Debug for CardOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CardOrdering(..)")
    }
}
