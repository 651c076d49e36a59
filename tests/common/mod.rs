// Shared fixtures: a table of players and a legal random game generator
#![allow(dead_code)]

use hanab_state::deck::token;
use hanab_state::game::{EndCondition, TurnPhase};
use hanab_state::{
    apply, ApplyFlags, BasicNarrator, CardOrder, Clue, GameAction, GameMetadata, GameState,
    Identity, Options, PlayerIndex, ReduceContext, Variant, VariantRegistry,
};

pub struct Table {
    pub registry: VariantRegistry,
    pub metadata: GameMetadata,
    pub flags: ApplyFlags,
}

impl Table {
    pub fn new(variant_name: &str, num_players: usize) -> Self {
        let names = ["Alice", "Bob", "Cathy", "Donald", "Emily", "Frank"];
        Table {
            registry: VariantRegistry::with_canonical(),
            metadata: GameMetadata::new(
                names
                    .iter()
                    .take(num_players)
                    .map(|name| name.to_string())
                    .collect(),
                Options {
                    num_players,
                    variant_name: variant_name.to_string(),
                    ..Options::default()
                },
            ),
            flags: ApplyFlags::default(),
        }
    }

    pub fn ctx(&self) -> ReduceContext<'_> {
        ReduceContext::new(&self.metadata, &self.registry, &BasicNarrator).with_flags(self.flags)
    }

    pub fn variant(&self) -> &Variant {
        self.ctx().variant().expect("known variant")
    }

    pub fn initial(&self) -> GameState {
        GameState::new(&self.metadata, self.variant())
    }

    pub fn step(&self, state: &GameState, action: &GameAction) -> GameState {
        apply(state, action, &self.ctx()).expect("action applies")
    }

    /// Every state of `actions`, starting with the initial one.
    pub fn states(&self, actions: &[GameAction]) -> Vec<GameState> {
        let mut states = vec![self.initial()];
        for action in actions {
            let next = self.step(states.last().expect("non-empty"), action);
            states.push(next);
        }
        states
    }
}

pub fn draw(player_index: PlayerIndex, order: CardOrder, identity: Identity) -> GameAction {
    GameAction::Draw {
        player_index,
        order,
        suit_index: Some(identity.suit_index),
        rank: Some(identity.rank),
    }
}

/// A shuffled physical deck; `choose(n)` must return a value below `n`.
pub fn shuffled_deck(variant: &Variant, choose: &mut impl FnMut(usize) -> usize) -> Vec<Identity> {
    let mut deck: Vec<Identity> = variant
        .all_identities()
        .into_iter()
        .flat_map(|identity| std::iter::repeat(identity).take(variant.num_copies(identity)))
        .collect();
    for index in (1..deck.len()).rev() {
        let other = choose(index + 1);
        deck.swap(index, other);
    }
    deck
}

/// Build a legal game, applying each action as it is generated.
///
/// Stops at the end of the game or after `max_actions` actions.
pub fn random_game(
    table: &Table,
    mut choose: impl FnMut(usize) -> usize,
    max_actions: usize,
) -> Vec<GameAction> {
    let variant = table.variant().clone();
    let faces = shuffled_deck(&variant, &mut choose);
    let per_hand = table.metadata.options.cards_per_hand();
    let num_players = table.metadata.options.num_players;

    let mut actions = Vec::new();
    let mut state = table.initial();
    let push = |state: &mut GameState, actions: &mut Vec<GameAction>, action: GameAction| {
        *state = table.step(state, &action);
        actions.push(action);
    };

    for order in 0..per_hand * num_players {
        push(&mut state, &mut actions, draw(order / per_hand, order, faces[order]));
    }

    while actions.len() < max_actions {
        if state.turn.phase == TurnPhase::Ended {
            let end_condition = state.turn.end_condition.unwrap_or(EndCondition::Normal);
            push(
                &mut state,
                &mut actions,
                GameAction::GameOver {
                    end_condition,
                    player_index: 0,
                    votes: None,
                },
            );
            break;
        }
        let Some(player) = state.turn.current_player_index else {
            break;
        };
        let hand = state.hands[player].clone();
        if hand.is_empty() {
            break;
        }

        let mut moves = vec![0];
        if state.clue_tokens < token::max_clue_tokens(&variant) {
            moves.push(1);
        }
        if state.clue_tokens >= token::clue_cost(&variant) && num_players > 1 {
            moves.push(2);
        }

        match moves[choose(moves.len())] {
            2 => {
                let target = (player + 1 + choose(num_players - 1)) % num_players;
                let target_hand = &state.hands[target];
                if target_hand.is_empty() {
                    break;
                }
                let focus = faces[target_hand[choose(target_hand.len())]];
                let clue = if choose(2) == 0 {
                    Clue::Rank(focus.rank)
                } else {
                    Clue::Color(focus.suit_index)
                };
                let list = target_hand
                    .iter()
                    .copied()
                    .filter(|&order| variant.touches(clue, faces[order]))
                    .collect();
                push(
                    &mut state,
                    &mut actions,
                    GameAction::Clue {
                        clue,
                        giver: player,
                        list,
                        target,
                    },
                );
            }
            kind => {
                let order = hand[choose(hand.len())];
                let face = faces[order];
                let next_rank = state.play_stacks[face.suit_index].len() as u8 + 1;
                let playable = kind == 0 && face.rank == next_rank;
                let action = if playable {
                    GameAction::Play {
                        player_index: player,
                        order,
                        suit_index: Some(face.suit_index),
                        rank: Some(face.rank),
                    }
                } else {
                    GameAction::Discard {
                        player_index: player,
                        order,
                        suit_index: Some(face.suit_index),
                        rank: Some(face.rank),
                        failed: kind == 0,
                    }
                };
                push(&mut state, &mut actions, action);
                if kind == 0 && !playable {
                    let strike = GameAction::Strike {
                        num: state.strikes.len() as u32 + 1,
                        order,
                        turn: state.turn.turn_num,
                    };
                    push(&mut state, &mut actions, strike);
                }
                if state.turn.phase != TurnPhase::Ended && state.deck.len() < faces.len() {
                    let next = state.deck.len();
                    push(&mut state, &mut actions, draw(player, next, faces[next]));
                }
            }
        }
    }
    actions
}

/// Every card order sits in exactly one place.
pub fn assert_orders_partitioned(state: &GameState) {
    let mut seen: Vec<CardOrder> = state
        .hands
        .iter()
        .chain(&state.play_stacks)
        .chain(&state.discard_stacks)
        .flatten()
        .chain(&state.hole)
        .copied()
        .collect();
    seen.sort_unstable();
    let expected: Vec<CardOrder> = (0..state.deck.len()).collect();
    assert_eq!(seen, expected);
}
