use crate::card::{Card, Rank, Suit};
use crate::deck::options::DeckOptions;
use crate::rng::DeckRng;
use tracing::debug;

/// Cards in one standard deck
pub const STANDARD_DECK_SIZE: usize = 52;

// Upper bound on the up-front reservation; larger decks grow on demand.
const MAX_RESERVED: usize = 1 << 16;

fn reserved_len(decks: usize, jokers: usize) -> usize {
    STANDARD_DECK_SIZE
        .saturating_mul(decks)
        .saturating_add(jokers)
        .min(MAX_RESERVED)
}

/// Generate one standard deck: Hearts, Diamonds, Clubs, Spades, ranks 1..K
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
    for suit in Suit::STANDARD {
        for rank in Rank::STANDARD {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Build a deck from the given options.
///
/// Steps run in a fixed order: generate one standard deck, sort, shuffle,
/// append jokers, filter ranks. `composed_decks` is ignored here; see
/// [`build_composed`] for the variant that honors it.
pub fn build(options: &DeckOptions, rng: &mut DeckRng) -> Vec<Card> {
    apply_options(standard_deck(), options, rng)
}

/// Build a deck made of `composed_decks` concatenated standard decks, then
/// apply the remaining options exactly as [`build`] does. Zero is treated
/// as one deck.
pub fn build_composed(options: &DeckOptions, rng: &mut DeckRng) -> Vec<Card> {
    let decks = options.composed_decks.max(1);
    let mut cards = Vec::with_capacity(reserved_len(decks, options.jokers));
    for _ in 0..decks {
        cards.extend(standard_deck());
    }
    apply_options(cards, options, rng)
}

fn apply_options(mut cards: Vec<Card>, options: &DeckOptions, rng: &mut DeckRng) -> Vec<Card> {
    debug!(cards = cards.len(), "generated base cards");

    if let Some(ordering) = &options.ordering {
        ordering.sort(&mut cards);
    }

    if options.shuffle {
        rng.shuffle(&mut cards);
        debug!(seed = rng.seed(), "shuffled deck");
    }

    cards.extend(std::iter::repeat(Card::joker()).take(options.jokers));

    if options.filter_ranks.is_some() {
        let before = cards.len();
        cards.retain(|card| !options.filters_rank(card.rank.as_str()));
        debug!(removed = before - cards.len(), "filtered ranks");
    }

    debug!(cards = cards.len(), "deck built");
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardOrdering;
    use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

    fn options_with_filter(ranks: &[&str]) -> DeckOptions {
        DeckOptions {
            filter_ranks: Some(ranks.iter().map(|r| r.to_string()).collect()),
            ..DeckOptions::default()
        }
    }

    #[test]
    fn test_standard_deck_order() {
        let cards = standard_deck();
        assert_eq!(cards.len(), STANDARD_DECK_SIZE);
        assert_eq!(cards[0], Card::new(Rank::One, Suit::Hearts));
        assert_eq!(cards[12], Card::new(Rank::King, Suit::Hearts));
        assert_eq!(cards[13], Card::new(Rank::One, Suit::Diamonds));
        assert_eq!(cards[51], Card::new(Rank::King, Suit::Spades));
    }

    #[test]
    fn test_no_options_is_standard_deck() {
        let mut rng = DeckRng::new(Some(1));
        assert_eq!(build(&DeckOptions::default(), &mut rng), standard_deck());
    }

    #[test]
    fn test_jokers_appended_at_end() {
        let mut rng = DeckRng::new(Some(1));
        let options = DeckOptions {
            jokers: 3,
            ..DeckOptions::default()
        };
        let cards = build(&options, &mut rng);
        assert_eq!(cards.len(), 55);
        assert!(cards[52..].iter().all(Card::is_joker));
        assert!(cards[..52].iter().all(|c| !c.is_joker()));
    }

    #[test]
    fn test_jokers_not_shuffled_in() {
        let mut rng = DeckRng::new(Some(99));
        let options = DeckOptions {
            shuffle: true,
            jokers: 2,
            ..DeckOptions::default()
        };
        let cards = build(&options, &mut rng);
        assert_eq!(&cards[52..], &[Card::joker(), Card::joker()]);
    }

    #[test]
    fn test_filter_removes_jokers_too() {
        let mut rng = DeckRng::new(Some(1));
        let options = DeckOptions {
            jokers: 2,
            ..options_with_filter(&["Joker"])
        };
        assert_eq!(build(&options, &mut rng), standard_deck());
    }

    #[test]
    fn test_filter_unknown_rank_removes_nothing() {
        let mut rng = DeckRng::new(Some(1));
        let cards = build(&options_with_filter(&["A", "11"]), &mut rng);
        assert_eq!(cards.len(), STANDARD_DECK_SIZE);
    }

    #[test]
    fn test_empty_filter_removes_nothing() {
        let mut rng = DeckRng::new(Some(1));
        let cards = build(&options_with_filter(&[]), &mut rng);
        assert_eq!(cards, standard_deck());
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut rng = DeckRng::new(Some(1));
        let cards = build(&options_with_filter(&["J", "Q", "K"]), &mut rng);
        let expected: Vec<Card> = standard_deck()
            .into_iter()
            .filter(|c| c.rank.value() <= 10)
            .collect();
        assert_eq!(cards, expected);
    }

    #[test]
    fn test_sort_then_jokers() {
        let mut rng = DeckRng::new(Some(1));
        let options = DeckOptions {
            ordering: Some(CardOrdering::by_absolute_rank().reversed()),
            jokers: 1,
            ..DeckOptions::default()
        };
        let cards = build(&options, &mut rng);
        assert_eq!(cards[0], Card::new(Rank::King, Suit::Spades));
        assert_eq!(cards[51], Card::new(Rank::One, Suit::Hearts));
        assert_eq!(cards[52], Card::joker());
    }

    #[test]
    fn test_composed_decks_ignored_by_build() {
        let mut rng = DeckRng::new(Some(1));
        let options = DeckOptions {
            composed_decks: 3,
            ..DeckOptions::default()
        };
        assert_eq!(build(&options, &mut rng).len(), STANDARD_DECK_SIZE);
    }

    #[test]
    fn test_build_composed_concatenates() {
        let mut rng = DeckRng::new(Some(1));
        let options = DeckOptions {
            composed_decks: 3,
            jokers: 2,
            ..DeckOptions::default()
        };
        let cards = build_composed(&options, &mut rng);
        assert_eq!(cards.len(), 3 * STANDARD_DECK_SIZE + 2);
        assert_eq!(&cards[52..104], standard_deck().as_slice());
    }

    #[test]
    fn test_reserved_len_saturates() {
        assert_eq!(reserved_len(2, 3), 107);
        assert_eq!(reserved_len(1, usize::MAX), MAX_RESERVED);
        assert_eq!(reserved_len(usize::MAX, usize::MAX), MAX_RESERVED);
    }

    #[test]
    fn test_random_relation_keeps_cards() {
        // xorshift coin flip: neither consistent nor deterministic per pair
        let state = AtomicU64::new(0x9E37_79B9_7F4A_7C15);
        let coin_flip = CardOrdering::new(move |_, _| {
            let mut x = state.load(AtomicOrdering::Relaxed);
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            state.store(x, AtomicOrdering::Relaxed);
            x & 1 == 1
        });
        let options = DeckOptions {
            ordering: Some(coin_flip),
            jokers: 2,
            ..DeckOptions::default()
        };

        for seed in 0..50 {
            let mut cards = build(&options, &mut DeckRng::new(Some(seed)));
            assert_eq!(cards.len(), 54);
            assert_eq!(&cards[52..], &[Card::joker(), Card::joker()]);
            cards.truncate(52);
            cards.sort_by_key(Card::absolute_rank);
            assert_eq!(cards, standard_deck());
        }
    }

    #[test]
    fn test_build_composed_zero_is_one_deck() {
        let mut rng = DeckRng::new(Some(1));
        let options = DeckOptions {
            composed_decks: 0,
            ..DeckOptions::default()
        };
        assert_eq!(build_composed(&options, &mut rng), standard_deck());
    }
}
