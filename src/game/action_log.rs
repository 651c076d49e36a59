use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::action::GameAction;
use super::types::GameState;
use crate::error::{ActionLogError, ReplayError};
use crate::reducers::{self, ReduceContext};

/// One recorded action with its position in the stream.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ActionEntry {
    /// 1-based and strictly increasing.
    pub seq: u64,
    pub action: GameAction,
}

/// Append-only action stream of one game.
///
/// Appends may come from several threads; the log hands out sequence numbers
/// in the order the appends land.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: Arc<Mutex<Vec<ActionEntry>>>,
    seq: AtomicU64,
}

impl Clone for ActionLog {
    fn clone(&self) -> Self {
        ActionLog {
            entries: Arc::new(Mutex::new(self.entries())),
            seq: AtomicU64::new(self.seq.load(Ordering::SeqCst)),
        }
    }
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions(actions: impl IntoIterator<Item = GameAction>) -> Self {
        let log = Self::new();
        for action in actions {
            log.append(action);
        }
        log
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ActionEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Append an action, assigning the next sequence number.
    pub fn append(&self, action: GameAction) -> ActionEntry {
        let mut entries = self.lock();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = ActionEntry { seq, action };
        entries.push(entry.clone());
        entry
    }

    /// Snapshot of the entries, ordered by sequence number.
    pub fn entries(&self) -> Vec<ActionEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Read a JSON-lines log. Blank lines are skipped.
    pub fn load_from_reader(reader: impl BufRead) -> Result<ActionLog, ActionLogError> {
        let mut entries = Vec::new();
        let mut max_seq = 0u64;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: ActionEntry =
                serde_json::from_str(&line).map_err(|source| ActionLogError::Malformed {
                    line: index + 1,
                    source,
                })?;
            max_seq = max_seq.max(entry.seq);
            entries.push(entry);
        }
        entries.sort_by_key(|entry| entry.seq);
        debug!("loaded {} action log entries", entries.len());
        Ok(ActionLog {
            entries: Arc::new(Mutex::new(entries)),
            seq: AtomicU64::new(max_seq),
        })
    }

    /// Write every entry as one JSON object per line.
    pub fn write_all(&self, mut writer: impl Write) -> Result<(), ActionLogError> {
        for entry in self.entries() {
            let line = serde_json::to_string(&entry)?;
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Initial state of the game described by `ctx`.
pub fn initial_state(ctx: &ReduceContext<'_>) -> Result<GameState, ReplayError> {
    let variant = ctx.variant()?;
    Ok(GameState::new(ctx.metadata, variant))
}

/// Rebuild the state after every action of `log`.
pub fn replay_from_log(log: &ActionLog, ctx: &ReduceContext<'_>) -> Result<GameState, ReplayError> {
    let entries = log.entries();
    debug!("replaying {} actions", entries.len());
    entries
        .iter()
        .try_fold(initial_state(ctx)?, |state, entry| {
            reducers::apply(&state, &entry.action, ctx).map_err(|source| ReplayError::Rejected {
                seq: entry.seq,
                source,
            })
        })
}

/// Every intermediate state of `log`; index 0 is the state before any action.
pub fn replay_timeline(
    log: &ActionLog,
    ctx: &ReduceContext<'_>,
) -> Result<Vec<GameState>, ReplayError> {
    let entries = log.entries();
    let mut state = initial_state(ctx)?;
    let mut timeline = Vec::with_capacity(entries.len() + 1);
    for entry in &entries {
        let next = reducers::apply(&state, &entry.action, ctx).map_err(|source| {
            ReplayError::Rejected {
                seq: entry.seq,
                source,
            }
        })?;
        timeline.push(std::mem::replace(&mut state, next));
    }
    timeline.push(state);
    Ok(timeline)
}
