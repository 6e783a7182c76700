pub mod card;
pub mod cli;
pub mod deck;
pub mod rng;

pub use card::{Card, CardOrdering, Rank, Suit};
pub use deck::{build, build_composed, DeckBuilder, DeckOptions};
pub use rng::DeckRng;
