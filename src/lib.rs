//! # Hanab State
//!
//! Deterministic state engine for a cooperative clue card game.
//!
//! ## Overview
//!
//! A game is a stream of actions (clues, plays, discards, draws, strikes and
//! bookkeeping). Folding that stream through [`reducers::apply`] rebuilds the
//! full state at any point: hands, stacks, clue tokens, score, what every
//! card could be, stack directions for flexible variants, and efficiency
//! statistics.
//!
//! ## Architecture
//!
//! `apply` clones the prior [`GameState`], runs the action branch, then a fixed
//! pipeline of derived passes (card identity, stack rules, turn, stats,
//! double-discard alert, known trash). States are plain data, so replays,
//! hypothetical branches and independent games can run on any thread.
//!
//! ```
//! use hanab_state::{apply, BasicNarrator, GameAction, GameMetadata, GameState, ReduceContext, VariantRegistry};
//!
//! let variants = VariantRegistry::with_canonical();
//! let metadata = GameMetadata::default();
//! let ctx = ReduceContext::new(&metadata, &variants, &BasicNarrator);
//! let variant = ctx.variant().expect("known variant");
//!
//! let state = GameState::new(&metadata, variant);
//! let draw = GameAction::Draw { player_index: 0, order: 0, suit_index: Some(0), rank: Some(1) };
//! let state = apply(&state, &draw, &ctx).expect("draw applies");
//! assert_eq!(state.hands[0], vec![0]);
//! ```

pub mod deck;
pub mod error;
pub mod game;
pub mod narration;
pub mod reducers;
pub mod variant;

pub use crate::deck::{CardLocation, CardOrder, CardState, Clue, Identity, PlayerIndex};
pub use crate::error::{ActionLogError, ReduceError, ReplayError};
pub use crate::game::{
    replay_from_log, replay_timeline, ActionKind, ActionLog, ApplyFlags, CardNote, GameAction,
    GameMetadata, GameState, Options,
};
pub use crate::narration::{BasicNarrator, Narration, Narrator};
pub use crate::reducers::{apply, ReduceContext};
pub use crate::variant::{Variant, VariantRegistry, VariantTable};

/// Install the `env_logger` backend. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
