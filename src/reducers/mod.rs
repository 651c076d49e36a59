//! The reducer: one action in, one new state out.
//!
//! [`apply`] first runs the action-specific branch in [`game_state`], then the
//! derived passes in [`PIPELINE`] order. Each pass reads only what earlier
//! passes produced.

pub mod cards;
pub mod dda;
pub mod game_state;
pub mod known_trash;
pub mod stats;
pub mod turn;

#[cfg(test)]
pub(crate) mod test_support;

use log::{debug, trace};

use crate::error::ReduceError;
use crate::game::action::GameAction;
use crate::game::metadata::{ApplyFlags, CardNote, GameMetadata};
use crate::game::types::GameState;
use crate::narration::{NarrationContext, Narrator};
use crate::variant::play_stacks::{self, StackView};
use crate::variant::{Variant, VariantTable};

/// Everything besides the state and the action that a reduction may read.
#[derive(Clone, Copy)]
pub struct ReduceContext<'a> {
    pub flags: ApplyFlags,
    pub metadata: &'a GameMetadata,
    pub variants: &'a (dyn VariantTable + Sync),
    pub narrator: &'a (dyn Narrator + Sync),
    /// The viewer's parsed notes, when the viewer keeps any.
    pub our_notes: Option<&'a [CardNote]>,
}

impl<'a> ReduceContext<'a> {
    pub fn new(
        metadata: &'a GameMetadata,
        variants: &'a (dyn VariantTable + Sync),
        narrator: &'a (dyn Narrator + Sync),
    ) -> Self {
        ReduceContext {
            flags: ApplyFlags::default(),
            metadata,
            variants,
            narrator,
            our_notes: None,
        }
    }

    pub fn with_flags(self, flags: ApplyFlags) -> Self {
        ReduceContext { flags, ..self }
    }

    pub fn with_notes(self, notes: &'a [CardNote]) -> Self {
        ReduceContext {
            our_notes: Some(notes),
            ..self
        }
    }

    /// Rules of the game's variant.
    pub fn variant(&self) -> Result<&'a Variant, ReduceError> {
        let name = &self.metadata.options.variant_name;
        self.variants
            .lookup(name)
            .ok_or_else(|| ReduceError::UnknownVariant(name.clone()))
    }

    pub fn narration<'v>(&'v self, variant: &'v Variant) -> NarrationContext<'v> {
        NarrationContext {
            metadata: self.metadata,
            variant,
        }
    }

    /// Whether misplays and hole plays stay hidden from the viewer.
    pub fn hole_hidden(&self, variant: &Variant) -> bool {
        variant.throw_it_in_a_hole && self.flags.sees_as_player()
    }
}

/// Derived passes run after the action branch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    CardIdentity,
    StackDirection,
    StackStart,
    CardStatus,
    Turn,
    Stats,
    DoubleDiscard,
    KnownTrash,
}

/// Stats reads card status and the turn; DDA and known trash read the stats
/// and the revealed deck.
pub const PIPELINE: [Stage; 8] = [
    Stage::CardIdentity,
    Stage::StackDirection,
    Stage::StackStart,
    Stage::CardStatus,
    Stage::Turn,
    Stage::Stats,
    Stage::DoubleDiscard,
    Stage::KnownTrash,
];

/// Apply one action to `prior`, returning the next state.
///
/// `prior` is never modified. On error nothing of the partial work escapes.
pub fn apply(
    prior: &GameState,
    action: &GameAction,
    ctx: &ReduceContext<'_>,
) -> Result<GameState, ReduceError> {
    let variant = ctx.variant()?;
    debug!(
        "applying {} at turn {} (segment {:?})",
        action.name(),
        prior.turn.turn_num,
        prior.turn.segment
    );

    let mut draft = prior.clone();
    game_state::apply_action(&mut draft, prior, action, ctx, variant)?;

    if matches!(
        action,
        GameAction::NoteList { .. } | GameAction::ReceiveNote { .. }
    ) {
        return Ok(draft);
    }

    for stage in PIPELINE {
        trace!("stage {stage:?}");
        run_stage(stage, &mut draft, prior, action, ctx, variant)?;
    }
    Ok(draft)
}

/// Suit touched by a play or discard, when it names a suit of the variant.
fn played_suit(action: &GameAction, variant: &Variant) -> Option<usize> {
    match action {
        GameAction::Play { suit_index, .. } | GameAction::Discard { suit_index, .. } => {
            suit_index.filter(|&suit_index| suit_index < variant.num_suits())
        }
        _ => None,
    }
}

fn run_stage(
    stage: Stage,
    draft: &mut GameState,
    prior: &GameState,
    action: &GameAction,
    ctx: &ReduceContext<'_>,
    variant: &Variant,
) -> Result<(), ReduceError> {
    let is_play = matches!(action, GameAction::Play { .. });
    match stage {
        Stage::CardIdentity => {
            draft.deck = cards::cards_reducer(&prior.deck, action, draft, variant, ctx.our_notes)?;
        }
        Stage::StackDirection => {
            if let Some(suit_index) = played_suit(action, variant).filter(|_| is_play) {
                if variant.has_reversed_suits() || variant.sudoku {
                    let direction = play_stacks::direction(
                        suit_index,
                        &draft.play_stacks[suit_index],
                        &draft.deck,
                        variant,
                    );
                    draft.play_stack_directions[suit_index] = Some(direction);
                }
            }
        }
        Stage::StackStart => {
            if let Some(suit_index) = played_suit(action, variant).filter(|_| is_play) {
                if variant.sudoku {
                    draft.play_stack_starts[suit_index] =
                        play_stacks::start_rank(&draft.play_stacks[suit_index], &draft.deck);
                }
            }
        }
        Stage::CardStatus => {
            let known_rank = match action {
                GameAction::Play { rank, .. } | GameAction::Discard { rank, .. } => rank.is_some(),
                _ => false,
            };
            if let Some(suit_index) = played_suit(action, variant).filter(|_| known_rank) {
                let statuses = StackView::of(draft, variant).suit_statuses(suit_index);
                draft.card_status[suit_index] = statuses;
            }
        }
        Stage::Turn => {
            draft.turn = turn::turn_reducer(&prior.turn, action, draft, ctx.metadata, variant);
        }
        Stage::Stats => {
            draft.stats = stats::stats_reducer(&prior.stats, action, prior, draft, ctx, variant);
        }
        Stage::DoubleDiscard => {
            draft.deck = dda::dda_reducer(
                &draft.deck,
                draft.stats.double_discard,
                draft.turn.current_player_index,
            );
        }
        Stage::KnownTrash => {
            draft.deck = known_trash::known_trash_reducer(
                &draft.deck,
                &draft.play_stacks,
                &draft.play_stack_directions,
                &draft.play_stack_starts,
                variant,
            );
        }
    }
    Ok(())
}
