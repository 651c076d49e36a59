//! Action-specific effects on hands, stacks, tokens, score and the log.

use log::warn;

use super::ReduceContext;
use crate::deck::{token, CardOrder, Identity, PlayerIndex};
use crate::error::ReduceError;
use crate::game::action::GameAction;
use crate::game::types::{ClueRecord, EndCondition, GameState, LogEntry, StrikeState, TurnPhase};
use crate::narration::Narration;
use crate::variant::Variant;

pub fn apply_action(
    draft: &mut GameState,
    prior: &GameState,
    action: &GameAction,
    ctx: &ReduceContext<'_>,
    variant: &Variant,
) -> Result<(), ReduceError> {
    let log_turn = prior.turn.turn_num + 1;
    let narrate = |narration: Narration| LogEntry {
        turn: log_turn,
        text: ctx.narrator.narrate(&narration, &ctx.narration(variant)),
    };

    match action {
        GameAction::Clue {
            clue,
            giver,
            list,
            target,
        } => {
            let segment = require_segment(draft, action)?;
            draft.clue_tokens -= token::clue_cost(variant);
            let negative_list = draft
                .hands
                .get(*target)
                .map(|hand| {
                    hand.iter()
                        .copied()
                        .filter(|order| !list.contains(order))
                        .collect()
                })
                .unwrap_or_default();
            draft.clues.push(ClueRecord {
                clue: *clue,
                giver: *giver,
                target: *target,
                segment,
                list: list.clone(),
                negative_list,
            });
            draft.log.push(narrate(Narration::Clue {
                giver: *giver,
                target: *target,
                clue: *clue,
                num_touched: list.len(),
            }));
            if ctx.metadata.options.card_cycle {
                cycle_chop(draft, *giver);
            }
        }
        GameAction::Discard {
            player_index,
            order,
            suit_index,
            rank,
            failed,
        } => {
            let slot = take_from_hand(draft, *player_index, *order);
            let into_hole = *failed && ctx.hole_hidden(variant);
            if into_hole {
                draft.hole.push(*order);
                draft.num_attempted_cards_played += 1;
            } else {
                let suit = valid_suit(action, *suit_index, variant)?;
                draft.discard_stacks[suit].push(*order);
                if !*failed {
                    draft.clue_tokens = token::gain(draft.clue_tokens, variant);
                }
            }
            draft.log.push(narrate(Narration::Discard {
                player_index: *player_index,
                identity: identity_of(*suit_index, *rank),
                slot,
                failed: *failed,
                into_hole,
            }));
        }
        GameAction::Play {
            player_index,
            order,
            suit_index,
            rank,
        } => {
            let slot = take_from_hand(draft, *player_index, *order);
            let into_hole = ctx.hole_hidden(variant);
            if into_hole {
                draft.hole.push(*order);
                draft.num_attempted_cards_played += 1;
            } else {
                let suit = valid_suit(action, *suit_index, variant)?;
                let stack = &mut draft.play_stacks[suit];
                stack.push(*order);
                if stack.len() == usize::from(variant.stack_size) {
                    draft.clue_tokens = token::gain(draft.clue_tokens, variant);
                }
            }
            draft.score += 1;
            draft.log.push(narrate(Narration::Play {
                player_index: *player_index,
                identity: identity_of(*suit_index, *rank),
                slot,
                into_hole,
            }));
        }
        GameAction::Draw {
            player_index,
            order,
            ..
        } => {
            let hand = draft
                .hands
                .get_mut(*player_index)
                .ok_or_else(|| ReduceError::InvalidInput {
                    action: action.name(),
                    field: "player_index",
                    detail: format!("no player at seat {player_index}"),
                })?;
            hand.push(*order);
            draft.cards_remaining_in_the_deck = draft.cards_remaining_in_the_deck.saturating_sub(1);

            let deal_complete = draft.turn.phase == TurnPhase::PreDeal
                && draft.turn.segment.is_none()
                && draft.cards_in_hands() == ctx.metadata.options.initial_deal_size();
            if deal_complete {
                draft.log.push(narrate(Narration::GoesFirst {
                    player_index: ctx.metadata.options.starting_player,
                }));
            }
        }
        GameAction::GameOver {
            end_condition,
            player_index,
            ..
        } => {
            if *end_condition != EndCondition::Normal {
                draft.score = 0;
            }
            draft.log.push(narrate(Narration::GameOver {
                end_condition: *end_condition,
                player_index: *player_index,
                score: draft.score,
            }));
        }
        GameAction::PlayerTimes {
            player_times,
            duration,
        } => {
            for (player_index, millis) in player_times.iter().enumerate() {
                draft.log.push(narrate(Narration::PlayerTime {
                    player_index,
                    millis: *millis,
                }));
            }
            draft.log.push(narrate(Narration::GameDuration { millis: *duration }));
        }
        GameAction::Strike { order, .. } => {
            let segment = require_segment(draft, action)?;
            draft.strikes.push(StrikeState {
                order: *order,
                segment,
            });
        }
        GameAction::SetEffMod { .. }
        | GameAction::EditNote { .. }
        | GameAction::NoteList { .. }
        | GameAction::NoteListPlayer { .. }
        | GameAction::ReceiveNote { .. }
        | GameAction::Turn { .. }
        | GameAction::CardIdentity { .. } => {}
    }
    Ok(())
}

fn require_segment(state: &GameState, action: &GameAction) -> Result<usize, ReduceError> {
    state.turn.segment.ok_or(ReduceError::Sequencing {
        action: action.name(),
        requirement: "the initial deal completed",
    })
}

fn valid_suit(
    action: &GameAction,
    suit_index: Option<usize>,
    variant: &Variant,
) -> Result<usize, ReduceError> {
    suit_index
        .filter(|&suit_index| suit_index < variant.num_suits())
        .ok_or_else(|| ReduceError::invalid_suit(action.name(), suit_index, variant.num_suits()))
}

fn identity_of(suit_index: Option<usize>, rank: Option<u8>) -> Option<Identity> {
    Some(Identity::new(suit_index?, rank?))
}

/// Remove `order` from the actor's hand, returning its 1-based slot.
///
/// A card held by someone else still leaves that hand, and an undrawn card
/// leaves the deck. Neither has a slot.
fn take_from_hand(draft: &mut GameState, player_index: PlayerIndex, order: CardOrder) -> Option<usize> {
    if let Some(hand) = draft.hands.get_mut(player_index) {
        if let Some(index) = hand.iter().position(|&held| held == order) {
            let slot = hand.len() - index;
            hand.remove(index);
            return Some(slot);
        }
    }
    warn!("card {order} is not in the hand of player {player_index}");
    match draft.deck.get(order).and_then(|card| card.holder()) {
        Some(holder) => {
            if let Some(hand) = draft.hands.get_mut(holder) {
                hand.retain(|&held| held != order);
            }
        }
        None if order == draft.deck.len() => {
            draft.cards_remaining_in_the_deck = draft.cards_remaining_in_the_deck.saturating_sub(1);
        }
        None => {}
    }
    None
}

/// Move the giver's chop (oldest unclued card) to the newest slot.
fn cycle_chop(draft: &mut GameState, giver: PlayerIndex) {
    let Some(hand) = draft.hands.get(giver) else {
        return;
    };
    let chop = hand.iter().position(|&order| {
        draft
            .deck
            .get(order)
            .is_some_and(|card| !card.is_clued())
    });
    let newest = hand.len().saturating_sub(1);
    if let Some(index) = chop.filter(|&index| index != newest) {
        let hand = &mut draft.hands[giver];
        let order = hand.remove(index);
        hand.push(order);
    }
}
