pub mod ordering;
pub mod types;

pub use ordering::CardOrdering;
pub use types::{Card, CardParseError, Rank, Suit};
