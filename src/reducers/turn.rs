use crate::game::action::GameAction;
use crate::game::metadata::GameMetadata;
use crate::game::types::{EndCondition, GameState, TurnPhase, TurnState};
use crate::variant::Variant;

const MAX_STRIKES: usize = 3;

/// Turn bookkeeping after `action`. `state` is the draft whose hands, stacks
/// and counters already reflect the action.
pub fn turn_reducer(
    prior: &TurnState,
    action: &GameAction,
    state: &GameState,
    metadata: &GameMetadata,
    variant: &Variant,
) -> TurnState {
    let mut turn = prior.clone();

    match action {
        GameAction::Clue { .. } => {
            turn.clues_given_this_turn += 1;
            end_turn(&mut turn, state, metadata);
        }
        GameAction::Play { .. } | GameAction::Discard { .. } => {
            turn.cards_played_or_discarded_this_turn += 1;
            if matches!(action, GameAction::Discard { failed: false, .. }) {
                turn.cards_discarded_this_turn += 1;
            }
            // No draw will follow.
            if state.cards_remaining_in_the_deck == 0 {
                end_turn(&mut turn, state, metadata);
            }
        }
        GameAction::Draw { .. } => {
            if turn.segment.is_none() {
                if state.cards_in_hands() == metadata.options.initial_deal_size() {
                    turn.segment = Some(0);
                    turn.phase = TurnPhase::InProgress;
                }
            } else if turn.cards_played_or_discarded_this_turn > 0 {
                end_turn(&mut turn, state, metadata);
            }
        }
        GameAction::GameOver { end_condition, .. } => {
            turn.phase = TurnPhase::Ended;
            turn.end_condition = Some(*end_condition);
            turn.current_player_index = None;
            turn.segment = Some(turn.segment.map_or(0, |segment| segment + 1));
        }
        GameAction::Turn {
            num,
            current_player_index,
        } => {
            turn.turn_num = *num;
            turn.current_player_index = *current_player_index;
        }
        _ => {}
    }

    if turn.phase != TurnPhase::Ended {
        if let Some(end_condition) = terminal_condition(&turn, state, variant) {
            turn.phase = TurnPhase::Ended;
            turn.end_condition = Some(end_condition);
            turn.current_player_index = None;
        }
    }
    turn
}

fn end_turn(turn: &mut TurnState, state: &GameState, metadata: &GameMetadata) {
    if turn.phase == TurnPhase::Ended {
        return;
    }
    let num_players = metadata.options.num_players.max(1);
    turn.turn_num += 1;
    turn.segment = Some(turn.segment.map_or(0, |segment| segment + 1));
    turn.current_player_index = turn
        .current_player_index
        .map(|player_index| (player_index + 1) % num_players);
    turn.cards_played_or_discarded_this_turn = 0;
    turn.cards_discarded_this_turn = 0;
    turn.clues_given_this_turn = 0;

    if state.cards_remaining_in_the_deck == 0 && turn.end_turn_num.is_none() {
        turn.end_turn_num = Some(turn.turn_num + metadata.options.end_game_length());
        turn.phase = TurnPhase::FinalRound;
    }
}

fn terminal_condition(turn: &TurnState, state: &GameState, variant: &Variant) -> Option<EndCondition> {
    if state.strikes.len() >= MAX_STRIKES {
        return Some(EndCondition::Strikeout);
    }
    if turn.segment.is_some() && state.score >= variant.perfect_score() {
        return Some(EndCondition::Normal);
    }
    match turn.end_turn_num {
        Some(end_turn_num) if turn.turn_num >= end_turn_num => Some(EndCondition::Normal),
        _ => None,
    }
}
