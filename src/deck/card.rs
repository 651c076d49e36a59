use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Draw order of a card. Doubles as its index in the deck.
pub type CardOrder = usize;

/// Seat of a player, 0-based.
pub type PlayerIndex = usize;

/// The true face of a card: which suit and which rank.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, JsonSchema,
)]
pub struct Identity {
    pub suit_index: usize,
    pub rank: u8,
}

impl Identity {
    pub fn new(suit_index: usize, rank: u8) -> Self {
        Identity { suit_index, rank }
    }
}

/// A clue as given by a player.
///
/// Colour clues carry an index into the variant's clue colours, rank clues
/// carry the rank itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Clue {
    Color(usize),
    Rank(u8),
}
