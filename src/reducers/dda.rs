//! Double-discard alert: warn the player on turn which of their cards could
//! be the last copy of the card just discarded.

use crate::deck::{CardOrder, CardState, PlayerIndex};

/// Recompute every `in_double_discard` flag from scratch.
pub fn dda_reducer(
    deck: &[CardState],
    double_discard: Option<CardOrder>,
    current_player_index: Option<PlayerIndex>,
) -> Vec<CardState> {
    let candidate = double_discard
        .and_then(|order| deck.get(order))
        .and_then(CardState::identity);

    deck.iter()
        .map(|card| {
            let in_double_discard = match (candidate, current_player_index) {
                (Some(identity), Some(player_index)) => {
                    card.holder() == Some(player_index)
                        && !card.is_clued()
                        && card.could_be(identity)
                }
                _ => false,
            };
            CardState {
                in_double_discard,
                ..card.clone()
            }
        })
        .collect()
}
