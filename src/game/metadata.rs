//! Static per-game configuration and the flags describing who is looking.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::deck::{CardOrder, Identity, PlayerIndex};

/// Table options chosen when the game was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Options {
    pub num_players: usize,
    pub starting_player: PlayerIndex,
    pub variant_name: String,
    /// The giver's chop moves to slot 1 after every clue.
    pub card_cycle: bool,
    pub one_extra_card: bool,
    pub one_less_card: bool,
    pub timed: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            num_players: 2,
            starting_player: 0,
            variant_name: "No Variant".to_string(),
            card_cycle: false,
            one_extra_card: false,
            one_less_card: false,
            timed: false,
        }
    }
}

impl Options {
    /// Hand size for the table.
    pub fn cards_per_hand(&self) -> usize {
        let base: usize = match self.num_players {
            0..=3 => 5,
            4 | 5 => 4,
            _ => 3,
        };
        let base = if self.one_extra_card { base + 1 } else { base };
        if self.one_less_card {
            base.saturating_sub(1)
        } else {
            base
        }
    }

    /// Cards dealt before the first turn.
    pub fn initial_deal_size(&self) -> usize {
        self.num_players * self.cards_per_hand()
    }

    /// Turns left once the deck is empty.
    pub fn end_game_length(&self) -> usize {
        self.num_players
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GameMetadata {
    pub player_names: Vec<String>,
    pub options: Options,
    /// Seat of the viewer, when the viewer is a player.
    pub our_player_index: Option<PlayerIndex>,
}

impl Default for GameMetadata {
    fn default() -> Self {
        GameMetadata {
            player_names: vec!["Alice".to_string(), "Bob".to_string()],
            options: Options::default(),
            our_player_index: None,
        }
    }
}

impl GameMetadata {
    pub fn new(player_names: Vec<String>, options: Options) -> Self {
        GameMetadata {
            player_names,
            options,
            our_player_index: None,
        }
    }

    pub fn player_name(&self, player_index: PlayerIndex) -> String {
        self.player_names
            .get(player_index)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", player_index + 1))
    }
}

/// How the viewer relates to the game being reduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApplyFlags {
    /// The viewer is a player in an ongoing game.
    pub playing: bool,
    /// A spectator replaying from a player's point of view.
    pub shadowing: bool,
    pub finished: bool,
    pub hypothetical: bool,
}

impl ApplyFlags {
    /// Whether the viewer sees the game as a player would.
    pub fn sees_as_player(&self) -> bool {
        self.playing || self.shadowing
    }
}

/// The viewer's own note on a card, already parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CardNote {
    pub order: CardOrder,
    /// Identities the note names; empty when it names none.
    pub possible_cards: Vec<Identity>,
    pub known_trash: bool,
    pub needs_fix: bool,
    pub chop_moved: bool,
    pub finessed: bool,
    pub blank: bool,
    pub unclued: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_sizes_follow_player_count() {
        let mut options = Options::default();
        assert_eq!(options.cards_per_hand(), 5);
        options.num_players = 4;
        assert_eq!(options.cards_per_hand(), 4);
        options.num_players = 6;
        assert_eq!(options.cards_per_hand(), 3);
        options.one_extra_card = true;
        assert_eq!(options.cards_per_hand(), 4);
        assert_eq!(options.initial_deal_size(), 24);
    }

    #[test]
    fn metadata_deserializes_with_defaults() {
        let metadata: GameMetadata =
            serde_json::from_str(r#"{"options": {"num_players": 3}}"#).expect("valid json");
        assert_eq!(metadata.options.num_players, 3);
        assert_eq!(metadata.options.variant_name, "No Variant");
        assert_eq!(metadata.player_name(2), "Player 3");
    }
}
