//! Stack rules: which ranks can still be played on a suit, in what order, and
//! what that means for every identity of the suit.

use std::collections::BTreeMap;

use super::Variant;
use crate::deck::{count_identity, CardLocation, CardOrder, CardState, Identity};
use crate::game::types::{CardStatus, GameState, StackDirection};

pub fn last_played_rank(stack: &[CardOrder], deck: &[CardState]) -> Option<u8> {
    stack
        .last()
        .and_then(|&order| deck.get(order))
        .and_then(|card| card.rank)
}

/// Rank of the first card on the stack.
pub fn start_rank(stack: &[CardOrder], deck: &[CardState]) -> Option<u8> {
    stack
        .first()
        .and_then(|&order| deck.get(order))
        .and_then(|card| card.rank)
}

/// Direction of a suit before anything has been played on it.
pub fn default_direction(suit_index: usize, variant: &Variant) -> StackDirection {
    if variant.up_or_down || variant.sudoku {
        StackDirection::Undecided
    } else if variant
        .suits
        .get(suit_index)
        .is_some_and(|suit| suit.reversed)
    {
        StackDirection::Down
    } else {
        StackDirection::Up
    }
}

/// Direction of a suit given the cards on its stack.
pub fn direction(
    suit_index: usize,
    stack: &[CardOrder],
    deck: &[CardState],
    variant: &Variant,
) -> StackDirection {
    if stack.len() >= usize::from(variant.stack_size) {
        return StackDirection::Finished;
    }
    if variant.sudoku {
        return if stack.is_empty() {
            StackDirection::Undecided
        } else {
            StackDirection::Up
        };
    }
    if !variant.up_or_down {
        return default_direction(suit_index, variant);
    }
    match last_played_rank(stack, deck) {
        None => StackDirection::Undecided,
        Some(top) if usize::from(top) + 1 == stack.len() + usize::from(variant.min_rank()) => {
            StackDirection::Up
        }
        Some(_) => StackDirection::Down,
    }
}

/// Copies of `identity` sitting in the discard pile, misplays included.
pub fn num_discarded_copies(deck: &[CardState], identity: Identity) -> usize {
    deck.iter()
        .filter(|card| card.location == CardLocation::Discard && card.identity() == Some(identity))
        .count()
}

/// Ranks in ascending order starting at `start` and wrapping around.
fn cyclic_from(ascending: &[u8], start: u8) -> Vec<u8> {
    let pivot = ascending.iter().position(|&rank| rank == start).unwrap_or(0);
    ascending[pivot..]
        .iter()
        .chain(&ascending[..pivot])
        .copied()
        .collect()
}

/// Borrowed view of everything the stack rules look at.
#[derive(Clone, Copy)]
pub struct StackView<'a> {
    pub deck: &'a [CardState],
    pub play_stacks: &'a [Vec<CardOrder>],
    pub directions: &'a [Option<StackDirection>],
    pub starts: &'a [Option<u8>],
    pub variant: &'a Variant,
}

impl<'a> StackView<'a> {
    pub fn of(state: &'a GameState, variant: &'a Variant) -> Self {
        StackView {
            deck: &state.deck,
            play_stacks: &state.play_stacks,
            directions: &state.play_stack_directions,
            starts: &state.play_stack_starts,
            variant,
        }
    }

    fn stack(&self, suit_index: usize) -> &'a [CardOrder] {
        self.play_stacks
            .get(suit_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolved direction, or the variant default when none was resolved yet.
    pub fn direction(&self, suit_index: usize) -> StackDirection {
        self.directions
            .get(suit_index)
            .copied()
            .flatten()
            .unwrap_or_else(|| default_direction(suit_index, self.variant))
    }

    fn start(&self, suit_index: usize) -> Option<u8> {
        self.starts
            .get(suit_index)
            .copied()
            .flatten()
            .or_else(|| start_rank(self.stack(suit_index), self.deck))
    }

    /// Every order in which the rest of the suit could still be played.
    pub fn remaining_sequences(&self, suit_index: usize) -> Vec<Vec<u8>> {
        let stack = self.stack(suit_index);
        let played = stack.len();
        if played >= usize::from(self.variant.stack_size) {
            return Vec::new();
        }

        let mut ascending = self.variant.ranks.clone();
        ascending.sort_unstable();
        let descending: Vec<u8> = ascending.iter().rev().copied().collect();

        match self.direction(suit_index) {
            StackDirection::Finished => Vec::new(),
            StackDirection::Up if self.variant.sudoku => match self.start(suit_index) {
                Some(start) => vec![cyclic_from(&ascending, start)
                    .into_iter()
                    .skip(played)
                    .collect()],
                None => self.open_sudoku_sequences(suit_index, &ascending),
            },
            StackDirection::Up => vec![ascending.into_iter().skip(played).collect()],
            StackDirection::Down => vec![descending.into_iter().skip(played).collect()],
            StackDirection::Undecided if self.variant.sudoku => {
                self.open_sudoku_sequences(suit_index, &ascending)
            }
            StackDirection::Undecided => vec![
                ascending.into_iter().skip(played).collect(),
                descending.into_iter().skip(played).collect(),
            ],
        }
    }

    /// Sudoku stacks may start on any rank no other suit has started on.
    fn open_sudoku_sequences(&self, suit_index: usize, ascending: &[u8]) -> Vec<Vec<u8>> {
        let used: Vec<u8> = (0..self.variant.num_suits())
            .filter(|&other| other != suit_index)
            .filter_map(|other| self.start(other))
            .collect();
        ascending
            .iter()
            .filter(|rank| !used.contains(rank))
            .map(|&start| cyclic_from(ascending, start))
            .collect()
    }

    fn has_surviving_copy(&self, identity: Identity) -> bool {
        num_discarded_copies(self.deck, identity) < self.variant.num_copies(identity)
    }

    /// Whether a card of `identity` is still required for the best score.
    pub fn needs_to_be_played(&self, identity: Identity) -> bool {
        if identity.suit_index >= self.variant.num_suits() {
            return false;
        }
        if count_identity(self.deck, self.stack(identity.suit_index), identity) > 0 {
            return false;
        }
        self.remaining_sequences(identity.suit_index)
            .iter()
            .any(|sequence| match sequence.iter().position(|&rank| rank == identity.rank) {
                Some(position) => sequence[..position].iter().all(|&rank| {
                    self.has_surviving_copy(Identity::new(identity.suit_index, rank))
                }),
                None => false,
            })
    }

    pub fn status(&self, identity: Identity) -> CardStatus {
        if !self.needs_to_be_played(identity) {
            return CardStatus::Trash;
        }
        let copies = self.variant.num_copies(identity);
        if num_discarded_copies(self.deck, identity) + 1 >= copies {
            CardStatus::Critical
        } else {
            CardStatus::NeedsToBePlayed
        }
    }

    pub fn suit_statuses(&self, suit_index: usize) -> BTreeMap<u8, CardStatus> {
        self.variant
            .ranks
            .iter()
            .map(|&rank| (rank, self.status(Identity::new(suit_index, rank))))
            .collect()
    }

    pub fn status_table(&self) -> Vec<BTreeMap<u8, CardStatus>> {
        (0..self.variant.num_suits())
            .map(|suit_index| self.suit_statuses(suit_index))
            .collect()
    }

    /// True when none of `identities` can still be useful.
    pub fn all_trash(&self, identities: &[Identity]) -> bool {
        !identities.is_empty()
            && identities
                .iter()
                .all(|&identity| !self.needs_to_be_played(identity))
    }

    pub fn max_score_for_suit(&self, suit_index: usize) -> u32 {
        let played = self.stack(suit_index).len() as u32;
        let best_run = self
            .remaining_sequences(suit_index)
            .iter()
            .map(|sequence| {
                sequence
                    .iter()
                    .take_while(|&&rank| self.has_surviving_copy(Identity::new(suit_index, rank)))
                    .count() as u32
            })
            .max()
            .unwrap_or(0);
        played + best_run
    }

    pub fn max_score_per_stack(&self) -> Vec<u32> {
        (0..self.variant.num_suits())
            .map(|suit_index| self.max_score_for_suit(suit_index))
            .collect()
    }
}
