use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::card::{CardOrder, Clue, Identity, PlayerIndex};

/// Where a drawn card currently lives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "place", content = "player", rename_all = "camelCase")]
pub enum CardLocation {
    Hand(PlayerIndex),
    PlayStack,
    Discard,
    Hole,
}

/// Everything known or true about one physical card.
///
/// Owned by the deck; hands and stacks only hold the card's order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct CardState {
    pub order: CardOrder,
    pub location: CardLocation,
    /// True suit, when the viewer can see it.
    pub suit_index: Option<usize>,
    /// True rank, when the viewer can see it.
    pub rank: Option<u8>,
    /// Identities consistent with every clue the card has (or has not) been touched by.
    pub possible_cards: Vec<Identity>,
    /// Clue-derived possibilities further narrowed by our own note, if any.
    pub possible_cards_from_notes: Option<Vec<Identity>>,
    pub positive_color_clues: Vec<usize>,
    pub positive_rank_clues: Vec<u8>,
    pub negative_color_clues: Vec<usize>,
    pub negative_rank_clues: Vec<u8>,
    pub num_positive_clues: u32,
    pub segment_drawn: Option<usize>,
    pub segment_first_clued: Option<usize>,
    pub segment_played: Option<usize>,
    pub segment_discarded: Option<usize>,
    pub is_misplayed: bool,
    pub dealt_to_starting_hand: bool,
    /// Set by the double-discard pass.
    pub in_double_discard: bool,
    /// Set by the known-trash pass.
    pub is_known_trash: bool,
}

impl CardState {
    /// A freshly drawn card.
    pub fn drawn(
        order: CardOrder,
        player_index: PlayerIndex,
        identity: (Option<usize>, Option<u8>),
        possible_cards: Vec<Identity>,
        segment: Option<usize>,
    ) -> Self {
        CardState {
            order,
            location: CardLocation::Hand(player_index),
            suit_index: identity.0,
            rank: identity.1,
            possible_cards,
            possible_cards_from_notes: None,
            positive_color_clues: Vec::new(),
            positive_rank_clues: Vec::new(),
            negative_color_clues: Vec::new(),
            negative_rank_clues: Vec::new(),
            num_positive_clues: 0,
            segment_drawn: segment,
            segment_first_clued: None,
            segment_played: None,
            segment_discarded: None,
            is_misplayed: false,
            dealt_to_starting_hand: segment.is_none(),
            in_double_discard: false,
            is_known_trash: false,
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        match (self.suit_index, self.rank) {
            (Some(suit_index), Some(rank)) => Some(Identity { suit_index, rank }),
            _ => None,
        }
    }

    pub fn is_clued(&self) -> bool {
        self.num_positive_clues > 0
    }

    pub fn holder(&self) -> Option<PlayerIndex> {
        match self.location {
            CardLocation::Hand(player_index) => Some(player_index),
            _ => None,
        }
    }

    pub fn is_in_hand(&self) -> bool {
        self.holder().is_some()
    }

    pub fn could_be(&self, identity: Identity) -> bool {
        self.possible_cards.contains(&identity)
    }

    /// Reveal the true face. Unknown halves leave the card untouched.
    pub fn reveal(&mut self, suit_index: Option<usize>, rank: Option<u8>) {
        if let (Some(suit_index), Some(rank)) = (suit_index, rank) {
            self.suit_index = Some(suit_index);
            self.rank = Some(rank);
            self.possible_cards = vec![Identity { suit_index, rank }];
        }
    }

    /// Fill in whichever halves of the face became known. What the holder
    /// could deduce from clues is left alone.
    pub fn learn_identity(&mut self, suit_index: Option<usize>, rank: Option<u8>) {
        if suit_index.is_some() {
            self.suit_index = suit_index;
        }
        if rank.is_some() {
            self.rank = rank;
        }
    }

    /// Record a clue the card was part of, touched or not.
    pub fn record_clue(&mut self, clue: Clue, touched: bool, segment: Option<usize>) {
        match (clue, touched) {
            (Clue::Color(color), true) => push_unique(&mut self.positive_color_clues, color),
            (Clue::Rank(rank), true) => push_unique(&mut self.positive_rank_clues, rank),
            (Clue::Color(color), false) => push_unique(&mut self.negative_color_clues, color),
            (Clue::Rank(rank), false) => push_unique(&mut self.negative_rank_clues, rank),
        }
        if touched {
            self.num_positive_clues += 1;
            if self.segment_first_clued.is_none() {
                self.segment_first_clued = segment;
            }
        }
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}
