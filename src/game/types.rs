use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::deck::{token, CardOrder, CardState, Clue, PlayerIndex};
use crate::game::metadata::GameMetadata;
use crate::variant::play_stacks::StackView;
use crate::variant::Variant;

/// Direction a play stack is built in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
pub enum StackDirection {
    Undecided,
    Up,
    Down,
    Finished,
}

/// Playability of an identity given the stacks and the discard pile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
pub enum CardStatus {
    NeedsToBePlayed,
    /// Still needed and the last copy that is not discarded.
    Critical,
    Trash,
}

/// Risk tiers for pace, from comfortable to dead.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, JsonSchema,
)]
pub enum PaceRisk {
    Low,
    Medium,
    High,
    Zero,
}

/// Why a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
pub enum EndCondition {
    Normal,
    Strikeout,
    Timeout,
    TerminatedByPlayer,
    SpeedrunFail,
    IdleTimeout,
    CharacterSoftlock,
    AllOrNothingFail,
    TerminatedByVote,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
pub enum TurnPhase {
    /// Cards are still being dealt; there is no segment yet.
    PreDeal,
    InProgress,
    /// The deck is empty and every player has one turn left.
    FinalRound,
    Ended,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Replay scrubbing boundary; `None` until the initial deal completes.
    pub segment: Option<usize>,
    /// 0-based.
    pub turn_num: usize,
    pub current_player_index: Option<PlayerIndex>,
    /// Turn number at which the game ends, known once the deck runs out.
    pub end_turn_num: Option<usize>,
    pub cards_played_or_discarded_this_turn: u32,
    pub cards_discarded_this_turn: u32,
    pub clues_given_this_turn: u32,
    pub end_condition: Option<EndCondition>,
}

impl TurnState {
    pub fn new(starting_player: PlayerIndex) -> Self {
        TurnState {
            phase: TurnPhase::PreDeal,
            segment: None,
            turn_num: 0,
            current_player_index: Some(starting_player),
            end_turn_num: None,
            cards_played_or_discarded_this_turn: 0,
            cards_discarded_this_turn: 0,
            clues_given_this_turn: 0,
            end_condition: None,
        }
    }
}

/// Statistics derived after every action.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatsState {
    pub max_score: u32,
    pub max_score_per_stack: Vec<u32>,
    /// `None` once pace stops being meaningful.
    pub pace: Option<i32>,
    pub pace_risk: Option<PaceRisk>,
    pub final_round_effectively_started: bool,
    pub cards_gotten: u32,
    pub potential_clues_lost: f64,
    pub clues_still_usable: Option<u32>,
    pub clues_still_usable_not_rounded: Option<f64>,
    pub cards_gotten_by_notes: Option<i32>,
    /// Card whose discard put the next player in a double-discard situation.
    pub double_discard: Option<CardOrder>,
    pub num_subsequent_blind_plays: u32,
    pub num_subsequent_misplays: u32,
    pub num_attempted_cards_played: u32,
}

/// A clue as it landed on a hand.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ClueRecord {
    pub clue: Clue,
    pub giver: PlayerIndex,
    pub target: PlayerIndex,
    pub segment: usize,
    pub list: Vec<CardOrder>,
    pub negative_list: Vec<CardOrder>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct StrikeState {
    pub order: CardOrder,
    pub segment: usize,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogEntry {
    /// 1-based turn number the entry belongs to.
    pub turn: usize,
    pub text: String,
}

/// Full derived state of one game after some prefix of its action log.
///
/// Produced only by the reducers; every action yields a new value.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct GameState {
    pub turn: TurnState,
    pub log: Vec<LogEntry>,
    pub deck: Vec<CardState>,
    pub cards_remaining_in_the_deck: usize,
    pub card_status: Vec<BTreeMap<u8, CardStatus>>,
    pub score: u32,
    pub num_attempted_cards_played: u32,
    /// Adjusted units, see [`crate::deck::token`].
    pub clue_tokens: i32,
    pub strikes: Vec<StrikeState>,
    pub hands: Vec<Vec<CardOrder>>,
    pub play_stacks: Vec<Vec<CardOrder>>,
    pub play_stack_directions: Vec<Option<StackDirection>>,
    pub play_stack_starts: Vec<Option<u8>>,
    pub hole: Vec<CardOrder>,
    pub discard_stacks: Vec<Vec<CardOrder>>,
    pub clues: Vec<ClueRecord>,
    pub stats: StatsState,
}

impl GameState {
    /// State before the first card is dealt.
    pub fn new(metadata: &GameMetadata, variant: &Variant) -> Self {
        let num_suits = variant.num_suits();
        let num_players = metadata.options.num_players;
        let mut state = GameState {
            turn: TurnState::new(metadata.options.starting_player),
            log: Vec::new(),
            deck: Vec::new(),
            cards_remaining_in_the_deck: variant.total_cards(),
            card_status: Vec::new(),
            score: 0,
            num_attempted_cards_played: 0,
            clue_tokens: token::max_clue_tokens(variant),
            strikes: Vec::new(),
            hands: vec![Vec::new(); num_players],
            play_stacks: vec![Vec::new(); num_suits],
            play_stack_directions: vec![None; num_suits],
            play_stack_starts: vec![None; num_suits],
            hole: Vec::new(),
            discard_stacks: vec![Vec::new(); num_suits],
            clues: Vec::new(),
            stats: StatsState {
                max_score: variant.perfect_score(),
                max_score_per_stack: vec![u32::from(variant.stack_size); num_suits],
                pace: None,
                pace_risk: None,
                final_round_effectively_started: false,
                cards_gotten: 0,
                potential_clues_lost: 0.0,
                clues_still_usable: None,
                clues_still_usable_not_rounded: None,
                cards_gotten_by_notes: None,
                double_discard: None,
                num_subsequent_blind_plays: 0,
                num_subsequent_misplays: 0,
                num_attempted_cards_played: 0,
            },
        };
        state.card_status = StackView::of(&state, variant).status_table();
        state
    }

    /// Cards currently held across all hands.
    pub fn cards_in_hands(&self) -> usize {
        self.hands.iter().map(Vec::len).sum()
    }

    pub fn card(&self, order: CardOrder) -> Option<&CardState> {
        self.deck.get(order)
    }
}
