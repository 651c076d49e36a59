//! Game state snapshots, the action taxonomy, per-game options and the action log.

pub mod action;
pub mod action_log;
pub mod metadata;
pub mod types;

pub use action::{ActionKind, GameAction};
pub use action_log::{initial_state, replay_from_log, replay_timeline, ActionEntry, ActionLog};
pub use metadata::{ApplyFlags, CardNote, GameMetadata, Options};
pub use types::{
    CardStatus, ClueRecord, EndCondition, GameState, LogEntry, PaceRisk, StackDirection,
    StatsState, StrikeState, TurnPhase, TurnState,
};
