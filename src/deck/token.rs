//! Clue token economy.
//!
//! Clue-starved variants hand out half a clue per discard, so tokens are kept
//! in "adjusted" units: doubled in those variants, unchanged elsewhere.

use crate::variant::Variant;

/// The clue token cap in unadjusted units.
pub const MAX_CLUE_NUM: i32 = 8;

pub fn adjusted(clue_tokens: i32, variant: &Variant) -> i32 {
    if variant.clue_starved {
        clue_tokens * 2
    } else {
        clue_tokens
    }
}

pub fn unadjusted(clue_tokens_adjusted: i32, variant: &Variant) -> f64 {
    if variant.clue_starved {
        f64::from(clue_tokens_adjusted) / 2.0
    } else {
        f64::from(clue_tokens_adjusted)
    }
}

pub fn max_clue_tokens(variant: &Variant) -> i32 {
    adjusted(MAX_CLUE_NUM, variant)
}

pub fn at_max(clue_tokens: i32, variant: &Variant) -> bool {
    clue_tokens >= max_clue_tokens(variant)
}

/// Adjusted tokens spent on one clue.
pub fn clue_cost(variant: &Variant) -> i32 {
    adjusted(1, variant)
}

/// Tokens after a discard or a completed stack.
pub fn gain(clue_tokens: i32, variant: &Variant) -> i32 {
    if at_max(clue_tokens, variant) {
        clue_tokens
    } else {
        clue_tokens + 1
    }
}

/// Unadjusted clue value of one discard.
pub fn discard_value(variant: &Variant) -> f64 {
    if variant.clue_starved {
        0.5
    } else {
        1.0
    }
}

/// Unadjusted clue value of one completed stack.
pub fn suit_value(variant: &Variant) -> f64 {
    if variant.clue_starved {
        0.5
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::VariantRegistry;

    #[test]
    fn gain_stops_at_cap() {
        let registry = VariantRegistry::with_canonical();
        let variant = registry.get("No Variant").expect("canonical variant");
        assert_eq!(gain(7, variant), 8);
        assert_eq!(gain(8, variant), 8);
        assert_eq!(clue_cost(variant), 1);
    }

    #[test]
    fn clue_starved_uses_half_tokens() {
        let registry = VariantRegistry::with_canonical();
        let variant = registry.get("Clue Starved (5 Suits)").expect("canonical variant");
        assert_eq!(max_clue_tokens(variant), 16);
        assert_eq!(clue_cost(variant), 2);
        assert_eq!(gain(10, variant), 11);
        assert_eq!(unadjusted(11, variant), 5.5);
        assert_eq!(discard_value(variant), 0.5);
    }
}
