use crate::card::CardOrdering;
use std::collections::HashSet;

/// Construction options for a deck.
///
/// Every field is optional in effect; `DeckOptions::default()` yields a plain
/// 52-card deck in generation order.
#[derive(Debug, Clone)]
pub struct DeckOptions {
    /// Stable sort applied to the standard cards before shuffling
    pub ordering: Option<CardOrdering>,
    pub shuffle: bool,
    /// Jokers appended after sorting and shuffling
    pub jokers: usize,
    /// Rank strings ("1".."10", "J", "Q", "K", "Joker") to drop
    pub filter_ranks: Option<HashSet<String>>,
    /// Number of standard decks to concatenate.
    /// Only `build_composed` honors it; `build` always generates one deck.
    pub composed_decks: usize,
}

impl Default for DeckOptions {
    fn default() -> Self {
        DeckOptions {
            ordering: None,
            shuffle: false,
            jokers: 0,
            filter_ranks: None,
            composed_decks: 1,
        }
    }
}

impl DeckOptions {
    /// Whether a card with this rank string is filtered out
    pub fn filters_rank(&self, rank: &str) -> bool {
        self.filter_ranks
            .as_ref()
            .is_some_and(|ranks| ranks.contains(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DeckOptions::default();
        assert!(options.ordering.is_none());
        assert!(!options.shuffle);
        assert_eq!(options.jokers, 0);
        assert!(options.filter_ranks.is_none());
        assert_eq!(options.composed_decks, 1);
    }

    #[test]
    fn test_filters_rank() {
        let options = DeckOptions {
            filter_ranks: Some(["2".to_string(), "Joker".to_string()].into_iter().collect()),
            ..DeckOptions::default()
        };
        assert!(options.filters_rank("2"));
        assert!(options.filters_rank("Joker"));
        assert!(!options.filters_rank("3"));
        assert!(!DeckOptions::default().filters_rank("2"));
    }
}
