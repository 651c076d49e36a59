//! Efficiency and risk statistics shown alongside the game.

use super::ReduceContext;
use crate::deck::{token, CardState};
use crate::game::action::GameAction;
use crate::game::metadata::CardNote;
use crate::game::types::{CardStatus, GameState, PaceRisk, StatsState, TurnPhase};
use crate::variant::play_stacks::StackView;
use crate::variant::Variant;

/// Statistics after `action`. `prior_state` is the state before the action,
/// `state` the draft with everything but stats and the annotation passes done.
pub fn stats_reducer(
    prior: &StatsState,
    action: &GameAction,
    prior_state: &GameState,
    state: &GameState,
    ctx: &ReduceContext<'_>,
    variant: &Variant,
) -> StatsState {
    let view = StackView::of(state, variant);
    let hole_hidden = ctx.hole_hidden(variant);
    let end_game_length = ctx.metadata.options.end_game_length();

    let max_score_per_stack = view.max_score_per_stack();
    let max_score: u32 = max_score_per_stack.iter().sum();

    let pace = if state.turn.phase == TurnPhase::Ended
        || state.cards_remaining_in_the_deck == 0
        || hole_hidden
    {
        None
    } else {
        Some(
            state.score as i32 + state.cards_remaining_in_the_deck as i32
                + end_game_length as i32
                - max_score as i32,
        )
    };
    let final_round_effectively_started =
        matches!(state.turn.phase, TurnPhase::FinalRound | TurnPhase::Ended)
            || pace.is_some_and(|pace| pace <= 0);

    let clues_still_usable_not_rounded =
        pace.map(|pace| clues_still_usable(state, &max_score_per_stack, pace, variant));

    StatsState {
        max_score,
        pace,
        pace_risk: pace_risk(pace, end_game_length),
        final_round_effectively_started,
        cards_gotten: cards_gotten(state, &view, hole_hidden),
        potential_clues_lost: potential_clues_lost(prior, action, prior_state, state, hole_hidden, variant),
        clues_still_usable: clues_still_usable_not_rounded
            .map(|clues| clues.floor().max(0.0) as u32),
        clues_still_usable_not_rounded,
        cards_gotten_by_notes: ctx
            .our_notes
            .map(|notes| cards_gotten_by_notes(state, &view, notes)),
        double_discard: double_discard(prior, action, state),
        num_subsequent_blind_plays: subsequent_blind_plays(prior, action, prior_state),
        num_subsequent_misplays: subsequent_misplays(prior, action),
        num_attempted_cards_played: state.num_attempted_cards_played,
        max_score_per_stack,
    }
}

pub fn pace_risk(pace: Option<i32>, end_game_length: usize) -> Option<PaceRisk> {
    let pace = pace?;
    let length = end_game_length as i32;
    Some(if pace <= 0 {
        PaceRisk::Zero
    } else if pace <= length / 2 {
        PaceRisk::High
    } else if pace < length {
        PaceRisk::Medium
    } else {
        PaceRisk::Low
    })
}

fn hand_cards(state: &GameState) -> impl Iterator<Item = &CardState> {
    state
        .hands
        .iter()
        .flatten()
        .filter_map(|&order| state.deck.get(order))
}

fn cards_gotten(state: &GameState, view: &StackView<'_>, hole_hidden: bool) -> u32 {
    let on_stacks: usize = state.play_stacks.iter().map(Vec::len).sum();
    let in_hole = if hole_hidden { state.hole.len() } else { 0 };
    let clued = hand_cards(state)
        .filter(|card| card.is_clued() && !view.all_trash(&card.possible_cards))
        .count();
    (on_stacks + in_hole + clued) as u32
}

fn potential_clues_lost(
    prior: &StatsState,
    action: &GameAction,
    prior_state: &GameState,
    state: &GameState,
    hole_hidden: bool,
    variant: &Variant,
) -> f64 {
    let mut lost = prior.potential_clues_lost;
    match action {
        GameAction::Clue { .. } => lost += 1.0,
        GameAction::Strike { .. } if !hole_hidden => lost += token::discard_value(variant),
        GameAction::Play {
            suit_index: Some(suit_index),
            ..
        } => {
            let full = usize::from(variant.stack_size);
            let before = prior_state.play_stacks.get(*suit_index).map_or(0, Vec::len);
            let after = state.play_stacks.get(*suit_index).map_or(0, Vec::len);
            if before < full && after == full && token::at_max(prior_state.clue_tokens, variant) {
                lost += token::suit_value(variant);
            }
        }
        _ => {}
    }
    lost
}

fn clues_still_usable(
    state: &GameState,
    max_score_per_stack: &[u32],
    pace: i32,
    variant: &Variant,
) -> f64 {
    let full = usize::from(variant.stack_size);
    let completable = max_score_per_stack
        .iter()
        .zip(&state.play_stacks)
        .filter(|(max, stack)| **max as usize == full && stack.len() < full)
        .count();
    let discards = pace
        .min(state.cards_remaining_in_the_deck as i32)
        .max(0);
    token::unadjusted(state.clue_tokens, variant)
        + completable as f64 * token::suit_value(variant)
        + f64::from(discards) * token::discard_value(variant)
}

fn cards_gotten_by_notes(state: &GameState, view: &StackView<'_>, notes: &[CardNote]) -> i32 {
    hand_cards(state)
        .map(|card| {
            let by_clues = card.is_clued() && !view.all_trash(&card.possible_cards);
            let by_notes = match notes.iter().find(|note| note.order == card.order) {
                Some(note) => {
                    let possible = card
                        .possible_cards_from_notes
                        .as_deref()
                        .unwrap_or(&card.possible_cards);
                    let trash = note.known_trash || view.all_trash(possible);
                    !trash && (card.is_clued() || note.finessed || note.chop_moved)
                }
                None => by_clues,
            };
            i32::from(by_notes) - i32::from(by_clues)
        })
        .sum()
}

fn double_discard(prior: &StatsState, action: &GameAction, state: &GameState) -> Option<usize> {
    match action {
        GameAction::Discard {
            order,
            failed: false,
            ..
        } => state
            .deck
            .get(*order)
            .and_then(CardState::identity)
            .and_then(|identity| {
                state
                    .card_status
                    .get(identity.suit_index)?
                    .get(&identity.rank)
                    .copied()
            })
            .filter(|&status| status == CardStatus::Critical)
            .map(|_| *order),
        GameAction::Discard { failed: true, .. } | GameAction::Play { .. } | GameAction::Clue { .. } => {
            None
        }
        _ => prior.double_discard,
    }
}

fn subsequent_blind_plays(prior: &StatsState, action: &GameAction, prior_state: &GameState) -> u32 {
    match action {
        GameAction::Play { order, .. } | GameAction::Discard { order, failed: true, .. } => {
            let blind = prior_state
                .deck
                .get(*order)
                .is_some_and(|card| !card.is_clued());
            if blind {
                prior.num_subsequent_blind_plays + 1
            } else {
                0
            }
        }
        GameAction::Discard { .. } | GameAction::Clue { .. } => 0,
        _ => prior.num_subsequent_blind_plays,
    }
}

fn subsequent_misplays(prior: &StatsState, action: &GameAction) -> u32 {
    match action {
        GameAction::Discard { failed: true, .. } => prior.num_subsequent_misplays + 1,
        GameAction::Play { .. } | GameAction::Discard { .. } | GameAction::Clue { .. } => 0,
        _ => prior.num_subsequent_misplays,
    }
}
