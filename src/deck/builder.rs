use crate::card::{Card, CardOrdering};
use crate::deck::build::{build, build_composed};
use crate::deck::options::DeckOptions;
use crate::rng::DeckRng;

/// Chainable front end over [`DeckOptions`].
///
/// Setters may be called in any order; a later call overrides an earlier one
/// for the same field. The build steps themselves always run in the same
/// order.
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    options: DeckOptions,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: DeckOptions) -> Self {
        DeckBuilder { options }
    }

    /// Sort with a less-than closure over card values
    pub fn sorted_by<F>(self, less: F) -> Self
    where
        F: Fn(&Card, &Card) -> bool + Send + Sync + 'static,
    {
        self.ordering(CardOrdering::new(less))
    }

    pub fn ordering(mut self, ordering: CardOrdering) -> Self {
        self.options.ordering = Some(ordering);
        self
    }

    pub fn shuffled(mut self) -> Self {
        self.options.shuffle = true;
        self
    }

    pub fn jokers(mut self, count: usize) -> Self {
        self.options.jokers = count;
        self
    }

    pub fn filter_ranks<I, S>(mut self, ranks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.filter_ranks = Some(ranks.into_iter().map(Into::into).collect());
        self
    }

    pub fn composed_decks(mut self, count: usize) -> Self {
        self.options.composed_decks = count;
        self
    }

    pub fn options(&self) -> &DeckOptions {
        &self.options
    }

    pub fn into_options(self) -> DeckOptions {
        self.options
    }

    pub fn build(&self, rng: &mut DeckRng) -> Vec<Card> {
        build(&self.options, rng)
    }

    pub fn build_composed(&self, rng: &mut DeckRng) -> Vec<Card> {
        build_composed(&self.options, rng)
    }

    /// Build with a fresh generator; `None` picks a random seed
    pub fn build_seeded(&self, seed: Option<u64>) -> Vec<Card> {
        let mut rng = DeckRng::new(seed);
        self.build(&mut rng)
    }
}
