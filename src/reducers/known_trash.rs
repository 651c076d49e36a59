use crate::deck::{CardOrder, CardState};
use crate::game::types::StackDirection;
use crate::variant::play_stacks::StackView;
use crate::variant::Variant;

/// Mark every card that cannot be anything still worth playing.
pub fn known_trash_reducer(
    deck: &[CardState],
    play_stacks: &[Vec<CardOrder>],
    play_stack_directions: &[Option<StackDirection>],
    play_stack_starts: &[Option<u8>],
    variant: &Variant,
) -> Vec<CardState> {
    let view = StackView {
        deck,
        play_stacks,
        directions: play_stack_directions,
        starts: play_stack_starts,
        variant,
    };
    deck.iter()
        .map(|card| CardState {
            is_known_trash: view.all_trash(&card.possible_cards),
            ..card.clone()
        })
        .collect()
}
