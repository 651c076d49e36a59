// End-to-end scenarios driven through the public reducer
mod common;

use common::{assert_orders_partitioned, draw, Table};
use hanab_state::game::TurnPhase;
use hanab_state::{apply, Clue, GameAction, Identity, ReduceError};

fn two_player_deal(table: &Table) -> hanab_state::GameState {
    let faces = [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 4),
        (1, 1),
        (2, 1),
        (2, 2),
        (3, 1),
        (4, 1),
        (4, 2),
    ];
    let mut state = table.initial();
    for (order, &(suit_index, rank)) in faces.iter().enumerate() {
        state = table.step(&state, &draw(order / 5, order, Identity::new(suit_index, rank)));
    }
    state
}

#[test]
fn scenario_deal_logs_the_starting_player() {
    let mut table = Table::new("No Variant", 2);
    table.metadata.options.starting_player = 1;
    let mut state = table.initial();
    for order in 0..9 {
        state = table.step(&state, &draw(order / 5, order, Identity::new(0, 1)));
        assert!(state.log.is_empty());
        assert_eq!(state.turn.phase, TurnPhase::PreDeal);
    }
    let state = table.step(&state, &draw(1, 9, Identity::new(1, 1)));
    assert_eq!(state.log.len(), 1);
    assert_eq!(state.log[0].text, "Bob goes first");
    assert_eq!(state.turn.segment, Some(0));
    assert_eq!(state.turn.current_player_index, Some(1));
}

#[test]
fn scenario_completing_a_suit_grants_a_token() {
    let table = Table::new("No Variant", 2);
    let mut state = two_player_deal(&table);
    // Spend two clues so the bonus is visible.
    state = table.step(
        &state,
        &GameAction::Clue {
            clue: Clue::Rank(1),
            giver: 0,
            list: vec![5, 7, 8],
            target: 1,
        },
    );
    state = table.step(
        &state,
        &GameAction::Clue {
            clue: Clue::Color(2),
            giver: 1,
            list: Vec::new(),
            target: 0,
        },
    );
    assert_eq!(state.clue_tokens, 6);

    for (order, rank) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
        state = table.step(
            &state,
            &GameAction::Play {
                player_index: 0,
                order,
                suit_index: Some(0),
                rank: Some(rank),
            },
        );
    }
    state = table.step(&state, &draw(0, 10, Identity::new(0, 5)));
    let before = state.clone();
    state = table.step(
        &state,
        &GameAction::Play {
            player_index: 0,
            order: 10,
            suit_index: Some(0),
            rank: Some(5),
        },
    );
    assert_eq!(state.play_stacks[0].len(), 5);
    assert_eq!(state.score, before.score + 1);
    assert_eq!(state.clue_tokens, before.clue_tokens + 1);
}

#[test]
fn scenario_bonus_token_respects_the_cap() {
    let table = Table::new("No Variant", 2);
    let mut state = two_player_deal(&table);
    for (order, rank) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
        state = table.step(
            &state,
            &GameAction::Play {
                player_index: 0,
                order,
                suit_index: Some(0),
                rank: Some(rank),
            },
        );
    }
    state = table.step(&state, &draw(0, 10, Identity::new(0, 5)));
    state = table.step(
        &state,
        &GameAction::Play {
            player_index: 0,
            order: 10,
            suit_index: Some(0),
            rank: Some(5),
        },
    );
    assert_eq!(state.clue_tokens, 8);
    assert_eq!(state.score, 5);
    assert_eq!(state.stats.potential_clues_lost, 1.0);
}

#[test]
fn scenario_missing_card_then_invalid_suit() {
    let table = Table::new("No Variant", 2);
    let state = two_player_deal(&table);
    let missing = GameAction::Discard {
        player_index: 0,
        order: 10,
        suit_index: Some(4),
        rank: Some(2),
        failed: false,
    };
    let state = table.step(&state, &missing);
    let entry = state.log.last().expect("discard is logged");
    assert!(entry.text.ends_with("(from the deck)"), "{}", entry.text);
    assert_eq!(state.discard_stacks[4], vec![10]);
    assert_eq!(state.hands[0].len(), 5);
    assert_orders_partitioned(&state);

    let taken = GameAction::Discard {
        player_index: 0,
        order: 9,
        suit_index: Some(4),
        rank: Some(2),
        failed: false,
    };
    let state = table.step(&state, &taken);
    assert_eq!(state.hands[1], vec![5, 6, 7, 8]);
    assert_orders_partitioned(&state);

    let invalid = GameAction::Discard {
        player_index: 0,
        order: 4,
        suit_index: None,
        rank: Some(1),
        failed: false,
    };
    let err = apply(&state, &invalid, &table.ctx()).expect_err("unknown suit is rejected");
    assert!(matches!(
        err,
        ReduceError::InvalidInput {
            field: "suit_index",
            ..
        }
    ));
}

#[test]
fn scenario_hole_play_is_hidden_from_players() {
    let mut table = Table::new("Throw It in a Hole (5 Suits)", 2);
    table.flags.playing = true;
    let state = two_player_deal(&table);
    let state = table.step(
        &state,
        &GameAction::Play {
            player_index: 0,
            order: 2,
            suit_index: Some(0),
            rank: Some(3),
        },
    );
    assert_eq!(state.hole, vec![2]);
    assert_eq!(state.num_attempted_cards_played, 1);
    assert_eq!(state.stats.num_attempted_cards_played, 1);
    assert_eq!(state.score, 1);
    assert!(state.play_stacks.iter().all(Vec::is_empty));
    assert_eq!(state.deck[2].location, hanab_state::CardLocation::Hole);
}

#[test]
fn scenario_hole_play_is_visible_to_spectators() {
    let table = Table::new("Throw It in a Hole (5 Suits)", 2);
    let state = two_player_deal(&table);
    let state = table.step(
        &state,
        &GameAction::Play {
            player_index: 0,
            order: 0,
            suit_index: Some(0),
            rank: Some(1),
        },
    );
    assert!(state.hole.is_empty());
    assert_eq!(state.play_stacks[0], vec![0]);
    assert_eq!(state.num_attempted_cards_played, 0);
}

#[test]
fn scenario_consecutive_blind_misplays_reset_on_clue() {
    let table = Table::new("No Variant", 2);
    let state = two_player_deal(&table);
    let misplay = |order, suit_index, rank| GameAction::Discard {
        player_index: 0,
        order,
        suit_index: Some(suit_index),
        rank: Some(rank),
        failed: true,
    };
    let state = table.step(&state, &misplay(3, 0, 4));
    let state = table.step(&state, &misplay(2, 0, 3));
    assert_eq!(state.stats.num_subsequent_blind_plays, 2);
    assert_eq!(state.stats.num_subsequent_misplays, 2);

    let state = table.step(
        &state,
        &GameAction::Clue {
            clue: Clue::Rank(1),
            giver: 0,
            list: vec![5, 7, 8],
            target: 1,
        },
    );
    assert_eq!(state.stats.num_subsequent_blind_plays, 0);
    assert_eq!(state.stats.num_subsequent_misplays, 0);
}
