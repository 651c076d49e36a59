use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::deck::{CardOrder, Clue, PlayerIndex};
use crate::game::types::EndCondition;

/// Serde helpers for indices that the server sends as `-1` when unknown.
pub mod unknown_as_negative {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Copy + TryInto<i64>,
        S: Serializer,
    {
        let raw = (*value)
            .and_then(|index| index.try_into().ok())
            .unwrap_or(-1);
        serializer.serialize_i64(raw)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: TryFrom<i64>,
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            return Ok(None);
        }
        T::try_from(raw)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("index {raw} is out of range")))
    }
}

/// One entry of a game's action stream.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameAction {
    Clue {
        clue: Clue,
        giver: PlayerIndex,
        /// Orders of the cards the clue touched.
        list: Vec<CardOrder>,
        target: PlayerIndex,
    },
    /// A discard, or a misplay when `failed` is set.
    Discard {
        player_index: PlayerIndex,
        order: CardOrder,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        suit_index: Option<usize>,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        rank: Option<u8>,
        failed: bool,
    },
    Play {
        player_index: PlayerIndex,
        order: CardOrder,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        suit_index: Option<usize>,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        rank: Option<u8>,
    },
    Draw {
        player_index: PlayerIndex,
        order: CardOrder,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        suit_index: Option<usize>,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        rank: Option<u8>,
    },
    GameOver {
        end_condition: EndCondition,
        player_index: PlayerIndex,
        #[serde(default)]
        votes: Option<Vec<PlayerIndex>>,
    },
    /// Per-player clock totals in milliseconds, sent once the game is over.
    PlayerTimes {
        player_times: Vec<i64>,
        duration: i64,
    },
    Strike {
        num: u32,
        order: CardOrder,
        turn: usize,
    },
    SetEffMod {
        modifier: i32,
    },
    EditNote {
        order: CardOrder,
        text: String,
    },
    NoteList {
        notes: Vec<String>,
    },
    NoteListPlayer {
        texts: Vec<String>,
    },
    ReceiveNote {
        order: CardOrder,
        notes: Vec<String>,
    },
    Turn {
        num: usize,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        current_player_index: Option<PlayerIndex>,
    },
    /// Late reveal of a card's face, e.g. when a replay shows hidden hands.
    CardIdentity {
        player_index: PlayerIndex,
        order: CardOrder,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        suit_index: Option<usize>,
        #[serde(default, with = "unknown_as_negative")]
        #[schemars(with = "i64")]
        rank: Option<u8>,
    },
}

/// Fieldless mirror of [`GameAction`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
pub enum ActionKind {
    Clue,
    Discard,
    Play,
    Draw,
    GameOver,
    PlayerTimes,
    Strike,
    SetEffMod,
    EditNote,
    NoteList,
    NoteListPlayer,
    ReceiveNote,
    Turn,
    CardIdentity,
}

impl ActionKind {
    pub const ALL: [ActionKind; 14] = [
        ActionKind::Clue,
        ActionKind::Discard,
        ActionKind::Play,
        ActionKind::Draw,
        ActionKind::GameOver,
        ActionKind::PlayerTimes,
        ActionKind::Strike,
        ActionKind::SetEffMod,
        ActionKind::EditNote,
        ActionKind::NoteList,
        ActionKind::NoteListPlayer,
        ActionKind::ReceiveNote,
        ActionKind::Turn,
        ActionKind::CardIdentity,
    ];

    /// Wire name, as used in the `type` tag.
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Clue => "clue",
            ActionKind::Discard => "discard",
            ActionKind::Play => "play",
            ActionKind::Draw => "draw",
            ActionKind::GameOver => "gameOver",
            ActionKind::PlayerTimes => "playerTimes",
            ActionKind::Strike => "strike",
            ActionKind::SetEffMod => "setEffMod",
            ActionKind::EditNote => "editNote",
            ActionKind::NoteList => "noteList",
            ActionKind::NoteListPlayer => "noteListPlayer",
            ActionKind::ReceiveNote => "receiveNote",
            ActionKind::Turn => "turn",
            ActionKind::CardIdentity => "cardIdentity",
        }
    }
}

impl GameAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            GameAction::Clue { .. } => ActionKind::Clue,
            GameAction::Discard { .. } => ActionKind::Discard,
            GameAction::Play { .. } => ActionKind::Play,
            GameAction::Draw { .. } => ActionKind::Draw,
            GameAction::GameOver { .. } => ActionKind::GameOver,
            GameAction::PlayerTimes { .. } => ActionKind::PlayerTimes,
            GameAction::Strike { .. } => ActionKind::Strike,
            GameAction::SetEffMod { .. } => ActionKind::SetEffMod,
            GameAction::EditNote { .. } => ActionKind::EditNote,
            GameAction::NoteList { .. } => ActionKind::NoteList,
            GameAction::NoteListPlayer { .. } => ActionKind::NoteListPlayer,
            GameAction::ReceiveNote { .. } => ActionKind::ReceiveNote,
            GameAction::Turn { .. } => ActionKind::Turn,
            GameAction::CardIdentity { .. } => ActionKind::CardIdentity,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Play or misplay, i.e. an attempt to play the card.
    pub fn is_play_attempt(&self) -> bool {
        matches!(
            self,
            GameAction::Play { .. } | GameAction::Discard { failed: true, .. }
        )
    }
}
