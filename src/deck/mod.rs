//! Cards, what is known about them, and the clue tokens spent on them.

pub mod card;
pub mod card_state;
pub mod token;

pub use card::{CardOrder, Clue, Identity, PlayerIndex};
pub use card_state::{CardLocation, CardState};

/// Cards on a stack whose identity is `identity`.
pub fn count_identity(deck: &[CardState], orders: &[CardOrder], identity: Identity) -> usize {
    orders
        .iter()
        .filter_map(|&order| deck.get(order))
        .filter(|card| card.identity() == Some(identity))
        .count()
}
