pub mod build;
pub mod builder;
pub mod options;

pub use build::{build, build_composed, standard_deck, STANDARD_DECK_SIZE};
pub use builder::DeckBuilder;
pub use options::DeckOptions;
