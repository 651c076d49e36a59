//! Variant rule facts.
//!
//! The reducer only reads these. Where they come from (the built-in table or a
//! JSON file shipped alongside the server) is up to the caller.

pub mod play_stacks;
pub mod registry;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::deck::{Clue, Identity};

pub use registry::VariantRegistry;

/// Read-only lookup of variant rules by name.
pub trait VariantTable {
    fn lookup(&self, name: &str) -> Option<&Variant>;
}

/// One suit of a variant and the way clues interact with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SuitDef {
    pub name: String,
    /// Names of the clue colours that touch this suit.
    pub clue_colors: Vec<String>,
    /// Touched by every colour clue (rainbow-like).
    pub all_clue_colors: bool,
    /// Touched by no colour clue (white-like).
    pub no_clue_colors: bool,
    /// Touched by every rank clue (pink-like).
    pub all_clue_ranks: bool,
    /// Touched by no rank clue (brown-like).
    pub no_clue_ranks: bool,
    /// Played from the top rank down.
    pub reversed: bool,
    /// A single copy of every rank (black-like).
    pub one_of_each: bool,
}

impl Default for SuitDef {
    fn default() -> Self {
        SuitDef {
            name: String::new(),
            clue_colors: Vec::new(),
            all_clue_colors: false,
            no_clue_colors: false,
            all_clue_ranks: false,
            no_clue_ranks: false,
            reversed: false,
            one_of_each: false,
        }
    }
}

impl SuitDef {
    /// A plain suit touched by the colour of the same name.
    pub fn basic(name: &str) -> Self {
        SuitDef {
            name: name.to_string(),
            clue_colors: vec![name.to_string()],
            ..SuitDef::default()
        }
    }
}

/// Static rules for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Variant {
    pub name: String,
    pub suits: Vec<SuitDef>,
    pub clue_colors: Vec<String>,
    pub clue_ranks: Vec<u8>,
    pub ranks: Vec<u8>,
    pub stack_size: u8,
    pub up_or_down: bool,
    pub throw_it_in_a_hole: bool,
    pub sudoku: bool,
    pub clue_starved: bool,
    /// Rank that has a single copy in every suit.
    pub critical_rank: Option<u8>,
}

impl Default for Variant {
    fn default() -> Self {
        Variant {
            name: String::new(),
            suits: Vec::new(),
            clue_colors: Vec::new(),
            clue_ranks: vec![1, 2, 3, 4, 5],
            ranks: vec![1, 2, 3, 4, 5],
            stack_size: 5,
            up_or_down: false,
            throw_it_in_a_hole: false,
            sudoku: false,
            clue_starved: false,
            critical_rank: None,
        }
    }
}

impl Variant {
    pub fn num_suits(&self) -> usize {
        self.suits.len()
    }

    /// Any stack in this variant may run downwards.
    pub fn has_reversed_suits(&self) -> bool {
        self.up_or_down || self.suits.iter().any(|suit| suit.reversed)
    }

    /// Stacks whose direction or starting rank is decided by play.
    pub fn has_flexible_stacks(&self) -> bool {
        self.has_reversed_suits() || self.sudoku
    }

    pub fn max_rank(&self) -> u8 {
        self.ranks.iter().copied().max().unwrap_or(self.stack_size)
    }

    pub fn min_rank(&self) -> u8 {
        self.ranks.iter().copied().min().unwrap_or(1)
    }

    /// Every identity that exists in this variant, suit-major.
    pub fn all_identities(&self) -> Vec<Identity> {
        (0..self.suits.len())
            .flat_map(|suit_index| {
                self.ranks
                    .iter()
                    .map(move |&rank| Identity::new(suit_index, rank))
            })
            .collect()
    }

    /// Physical copies of `identity` in the deck.
    pub fn num_copies(&self, identity: Identity) -> usize {
        let Some(suit) = self.suits.get(identity.suit_index) else {
            return 0;
        };
        if !self.ranks.contains(&identity.rank) {
            return 0;
        }
        if suit.one_of_each || self.critical_rank == Some(identity.rank) {
            return 1;
        }
        if self.sudoku {
            return 2;
        }
        if identity.rank == self.min_rank() {
            return if suit.reversed || self.up_or_down { 1 } else { 3 };
        }
        if identity.rank == self.max_rank() {
            return if suit.reversed { 3 } else { 1 };
        }
        2
    }

    pub fn total_cards(&self) -> usize {
        self.all_identities()
            .into_iter()
            .map(|identity| self.num_copies(identity))
            .sum()
    }

    /// Score once every stack is complete.
    pub fn perfect_score(&self) -> u32 {
        self.suits.len() as u32 * u32::from(self.stack_size)
    }

    /// Whether `clue` touches a card of `identity`.
    pub fn touches(&self, clue: Clue, identity: Identity) -> bool {
        let Some(suit) = self.suits.get(identity.suit_index) else {
            return false;
        };
        match clue {
            Clue::Color(color_index) => {
                if suit.no_clue_colors {
                    return false;
                }
                if suit.all_clue_colors {
                    return true;
                }
                self.clue_colors
                    .get(color_index)
                    .is_some_and(|color| suit.clue_colors.contains(color))
            }
            Clue::Rank(rank) => {
                if suit.no_clue_ranks {
                    return false;
                }
                suit.all_clue_ranks || identity.rank == rank
            }
        }
    }
}
