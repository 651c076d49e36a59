//! What is known about each card: where it is, what it is, and what it could be.

use crate::deck::{CardLocation, CardState};
use crate::error::ReduceError;
use crate::game::action::GameAction;
use crate::game::metadata::CardNote;
use crate::game::types::GameState;
use crate::variant::Variant;

/// New deck after `action`.
///
/// `state` is the draft after the action branch ran, so hands, stacks and the
/// hole already show where a played card went.
pub fn cards_reducer(
    deck: &[CardState],
    action: &GameAction,
    state: &GameState,
    variant: &Variant,
    our_notes: Option<&[CardNote]>,
) -> Result<Vec<CardState>, ReduceError> {
    let mut deck = deck.to_vec();
    let segment = state.turn.segment;

    match action {
        GameAction::Clue {
            clue, list, target, ..
        } => {
            let hand = state.hands.get(*target).map(Vec::as_slice).unwrap_or(&[]);
            for &order in hand {
                let Some(card) = deck.get_mut(order) else {
                    continue;
                };
                let touched = list.contains(&order);
                card.record_clue(*clue, touched, segment);
                card.possible_cards
                    .retain(|&identity| variant.touches(*clue, identity) == touched);
            }
        }
        GameAction::Play {
            player_index,
            order,
            suit_index,
            rank,
        }
        | GameAction::Discard {
            player_index,
            order,
            suit_index,
            rank,
            ..
        } => {
            let failed = matches!(action, GameAction::Discard { failed: true, .. });
            let is_play = matches!(action, GameAction::Play { .. });
            if *order > deck.len() {
                return Err(ReduceError::Sequencing {
                    action: action.name(),
                    requirement: "every card with a lower order",
                });
            }
            if *order == deck.len() {
                // Taken straight from the deck without a draw.
                deck.push(CardState::drawn(
                    *order,
                    *player_index,
                    (None, None),
                    variant.all_identities(),
                    segment,
                ));
            }
            if let Some(card) = deck.get_mut(*order) {
                card.location = if state.hole.contains(order) {
                    CardLocation::Hole
                } else if is_play {
                    CardLocation::PlayStack
                } else {
                    CardLocation::Discard
                };
                card.reveal(*suit_index, *rank);
                if is_play {
                    card.segment_played = segment;
                } else {
                    card.segment_discarded = segment;
                }
                card.is_misplayed = failed;
            }
        }
        GameAction::Draw {
            player_index,
            order,
            suit_index,
            rank,
        } => {
            if *order != deck.len() {
                return Err(ReduceError::Sequencing {
                    action: action.name(),
                    requirement: "every card with a lower order",
                });
            }
            deck.push(CardState::drawn(
                *order,
                *player_index,
                (*suit_index, *rank),
                variant.all_identities(),
                segment,
            ));
        }
        GameAction::CardIdentity {
            order,
            suit_index,
            rank,
            ..
        } => {
            if let Some(card) = deck.get_mut(*order) {
                card.learn_identity(*suit_index, *rank);
            }
        }
        _ => {}
    }

    if let Some(notes) = our_notes {
        apply_note_inferences(&mut deck, notes);
    }
    Ok(deck)
}

/// Narrow each card in a hand to the identities our note on it names.
fn apply_note_inferences(deck: &mut [CardState], notes: &[CardNote]) {
    for card in deck.iter_mut() {
        if !card.is_in_hand() {
            card.possible_cards_from_notes = None;
            continue;
        }
        let named = notes
            .iter()
            .find(|note| note.order == card.order)
            .map(|note| note.possible_cards.as_slice())
            .filter(|named| !named.is_empty());
        card.possible_cards_from_notes = named.map(|named| {
            card.possible_cards
                .iter()
                .copied()
                .filter(|identity| named.contains(identity))
                .collect()
        });
    }
}
