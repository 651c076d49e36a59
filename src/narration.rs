//! Human-readable log lines.
//!
//! The reducer describes what happened as a [`Narration`] and stores whatever
//! text the [`Narrator`] returns for it.

use crate::deck::{Clue, Identity, PlayerIndex};
use crate::game::metadata::GameMetadata;
use crate::game::types::EndCondition;
use crate::variant::Variant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    Clue {
        giver: PlayerIndex,
        target: PlayerIndex,
        clue: Clue,
        num_touched: usize,
    },
    Play {
        player_index: PlayerIndex,
        identity: Option<Identity>,
        /// 1-based slot, `None` when the card was not in the hand.
        slot: Option<usize>,
        into_hole: bool,
    },
    Discard {
        player_index: PlayerIndex,
        identity: Option<Identity>,
        slot: Option<usize>,
        failed: bool,
        into_hole: bool,
    },
    GoesFirst {
        player_index: PlayerIndex,
    },
    GameOver {
        end_condition: EndCondition,
        player_index: PlayerIndex,
        score: u32,
    },
    PlayerTime {
        player_index: PlayerIndex,
        millis: i64,
    },
    GameDuration {
        millis: i64,
    },
}

/// What a narrator may look at besides the event itself.
#[derive(Clone, Copy)]
pub struct NarrationContext<'a> {
    pub metadata: &'a GameMetadata,
    pub variant: &'a Variant,
}

pub trait Narrator {
    fn narrate(&self, narration: &Narration, ctx: &NarrationContext<'_>) -> String;
}

/// Plain English narration.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicNarrator;

impl Narrator for BasicNarrator {
    fn narrate(&self, narration: &Narration, ctx: &NarrationContext<'_>) -> String {
        let name = |player_index: PlayerIndex| ctx.metadata.player_name(player_index);
        match narration {
            Narration::Clue {
                giver,
                target,
                clue,
                num_touched,
            } => format!(
                "{} tells {} about {} {}",
                name(*giver),
                name(*target),
                count_word(*num_touched),
                clue_name(*clue, *num_touched != 1, ctx.variant)
            ),
            Narration::Play {
                player_index,
                identity,
                slot,
                into_hole,
            } => {
                let card = if *into_hole {
                    "a card".to_string()
                } else {
                    card_name(*identity, ctx.variant)
                };
                format!("{} plays {} {}", name(*player_index), card, slot_text(*slot))
            }
            Narration::Discard {
                player_index,
                identity,
                slot,
                failed,
                into_hole,
            } => {
                let card = if *into_hole {
                    "a card".to_string()
                } else {
                    card_name(*identity, ctx.variant)
                };
                let verb = if *failed { "fails to play" } else { "discards" };
                format!("{} {} {} {}", name(*player_index), verb, card, slot_text(*slot))
            }
            Narration::GoesFirst { player_index } => format!("{} goes first", name(*player_index)),
            Narration::GameOver {
                end_condition,
                player_index,
                score,
            } => match end_condition {
                EndCondition::Normal => format!("Players score {score} points."),
                EndCondition::Strikeout => "Players lose due to 3 strikes!".to_string(),
                EndCondition::Timeout => format!("{} ran out of time!", name(*player_index)),
                EndCondition::TerminatedByPlayer => {
                    format!("{} terminated the game!", name(*player_index))
                }
                EndCondition::TerminatedByVote => {
                    "The players voted to terminate the game!".to_string()
                }
                EndCondition::SpeedrunFail => "Players failed to achieve a perfect score.".to_string(),
                EndCondition::IdleTimeout => "Players were idle for too long.".to_string(),
                EndCondition::CharacterSoftlock => {
                    format!("{} was left with no way to act!", name(*player_index))
                }
                EndCondition::AllOrNothingFail => {
                    "Players failed to achieve a perfect score.".to_string()
                }
            },
            Narration::PlayerTime {
                player_index,
                millis,
            } => {
                if ctx.metadata.options.timed {
                    format!("{} had {} left", name(*player_index), clock(*millis))
                } else {
                    format!("{} took: {}", name(*player_index), clock(*millis))
                }
            }
            Narration::GameDuration { millis } => {
                format!("The total game duration was: {}", clock(*millis))
            }
        }
    }
}

fn count_word(count: usize) -> String {
    match count {
        0 => "no".to_string(),
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        other => other.to_string(),
    }
}

fn clue_name(clue: Clue, plural: bool, variant: &Variant) -> String {
    let base = match clue {
        Clue::Color(color_index) => variant
            .clue_colors
            .get(color_index)
            .cloned()
            .unwrap_or_else(|| format!("color {}", color_index.saturating_add(1))),
        Clue::Rank(rank) => rank.to_string(),
    };
    if plural {
        format!("{base}s")
    } else {
        base
    }
}

fn card_name(identity: Option<Identity>, variant: &Variant) -> String {
    match identity {
        Some(identity) => match variant.suits.get(identity.suit_index) {
            Some(suit) => format!("{} {}", suit.name, identity.rank),
            None => format!("a {}", identity.rank),
        },
        None => "a card".to_string(),
    }
}

fn slot_text(slot: Option<usize>) -> String {
    match slot {
        Some(slot) => format!("from slot #{slot}"),
        None => "(from the deck)".to_string(),
    }
}

/// `m:ss` for a duration in milliseconds; negative values render as zero.
fn clock(millis: i64) -> String {
    let seconds = millis.max(0) / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
