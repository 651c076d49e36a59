use crate::deck::{CardOrder, Clue, PlayerIndex};
use crate::game::action::GameAction;
use crate::game::metadata::{ApplyFlags, GameMetadata, Options};
use crate::game::types::GameState;
use crate::narration::BasicNarrator;
use crate::reducers::{apply, ReduceContext};
use crate::variant::{Variant, VariantRegistry};

pub struct Table {
    pub registry: VariantRegistry,
    pub metadata: GameMetadata,
    pub flags: ApplyFlags,
}

impl Table {
    pub fn new(variant_name: &str, num_players: usize) -> Self {
        let names = ["Alice", "Bob", "Cathy", "Donald", "Emily", "Frank"];
        let metadata = GameMetadata::new(
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
        );
        Table {
            registry: VariantRegistry::with_canonical(),
            metadata,
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

    pub fn step(&self, state: &GameState, action: GameAction) -> GameState {
        apply(state, &action, &self.ctx()).expect("action applies")
    }

    pub fn run(&self, state: &GameState, actions: Vec<GameAction>) -> GameState {
        actions
            .into_iter()
            .fold(state.clone(), |state, action| self.step(&state, action))
    }

    /// Deal `identities` in order, a full hand to each player in turn.
    pub fn deal(&self, identities: &[(usize, u8)]) -> GameState {
        let per_hand = self.metadata.options.cards_per_hand();
        let actions = identities
            .iter()
            .enumerate()
            .map(|(order, &(suit_index, rank))| draw(order / per_hand, order, suit_index, rank))
            .collect();
        self.run(&self.initial(), actions)
    }
}

/// Two-player deal: Alice holds r1 r2 y1 b3 g5, Bob holds r1 y2 b1 p4 g3.
pub fn standard_deal() -> Vec<(usize, u8)> {
    vec![
        (0, 1),
        (0, 2),
        (1, 1),
        (3, 3),
        (2, 5),
        (0, 1),
        (1, 2),
        (3, 1),
        (4, 4),
        (2, 3),
    ]
}

pub fn draw(player_index: PlayerIndex, order: CardOrder, suit_index: usize, rank: u8) -> GameAction {
    GameAction::Draw {
        player_index,
        order,
        suit_index: Some(suit_index),
        rank: Some(rank),
    }
}

pub fn play(player_index: PlayerIndex, order: CardOrder, suit_index: usize, rank: u8) -> GameAction {
    GameAction::Play {
        player_index,
        order,
        suit_index: Some(suit_index),
        rank: Some(rank),
    }
}

pub fn discard(
    player_index: PlayerIndex,
    order: CardOrder,
    suit_index: usize,
    rank: u8,
) -> GameAction {
    GameAction::Discard {
        player_index,
        order,
        suit_index: Some(suit_index),
        rank: Some(rank),
        failed: false,
    }
}

pub fn misplay(
    player_index: PlayerIndex,
    order: CardOrder,
    suit_index: usize,
    rank: u8,
) -> GameAction {
    GameAction::Discard {
        player_index,
        order,
        suit_index: Some(suit_index),
        rank: Some(rank),
        failed: true,
    }
}

pub fn clue(giver: PlayerIndex, target: PlayerIndex, clue: Clue, list: Vec<CardOrder>) -> GameAction {
    GameAction::Clue {
        clue,
        giver,
        list,
        target,
    }
}
