use std::collections::BTreeMap;

use super::{SuitDef, Variant, VariantTable};

const BASE_COLORS: [&str; 5] = ["Red", "Yellow", "Green", "Blue", "Purple"];

#[derive(Debug, Default, Clone)]
pub struct VariantRegistry {
    pub variants: BTreeMap<String, Variant>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self {
            variants: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, variant: Variant) {
        self.variants.insert(variant.name.clone(), variant);
    }

    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.variants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Load a table from a JSON array of variants.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let variants: Vec<Variant> = serde_json::from_str(json)?;
        let mut r = Self::new();
        for variant in variants {
            r.register(variant);
        }
        Ok(r)
    }

    /// The built-in table of commonly played variants.
    pub fn with_canonical() -> Self {
        let mut r = Self::new();

        r.register(five_suit("No Variant", Vec::new()));
        r.register(Variant {
            name: "6 Suits".to_string(),
            suits: base_suits()
                .into_iter()
                .chain([SuitDef::basic("Teal")])
                .collect(),
            clue_colors: base_colors().into_iter().chain(["Teal".to_string()]).collect(),
            ..Variant::default()
        });
        r.register(Variant {
            name: "Black (6 Suits)".to_string(),
            suits: base_suits()
                .into_iter()
                .chain([SuitDef {
                    one_of_each: true,
                    ..SuitDef::basic("Black")
                }])
                .collect(),
            clue_colors: base_colors().into_iter().chain(["Black".to_string()]).collect(),
            ..Variant::default()
        });
        r.register(five_suit(
            "Rainbow (5 Suits)",
            vec![SuitDef {
                name: "Rainbow".to_string(),
                all_clue_colors: true,
                ..SuitDef::default()
            }],
        ));
        r.register(five_suit(
            "Pink (5 Suits)",
            vec![SuitDef {
                all_clue_ranks: true,
                ..SuitDef::basic("Pink")
            }],
        ));
        r.register(five_suit(
            "Brown (5 Suits)",
            vec![SuitDef {
                no_clue_ranks: true,
                ..SuitDef::basic("Brown")
            }],
        ));
        r.register(five_suit(
            "White (5 Suits)",
            vec![SuitDef {
                name: "White".to_string(),
                no_clue_colors: true,
                ..SuitDef::default()
            }],
        ));
        r.register(five_suit(
            "Reversed (5 Suits)",
            vec![SuitDef {
                name: "Purple Reversed".to_string(),
                clue_colors: vec!["Purple".to_string()],
                reversed: true,
                ..SuitDef::default()
            }],
        ));
        r.register(Variant {
            up_or_down: true,
            ..five_suit("Up or Down (5 Suits)", Vec::new())
        });
        r.register(Variant {
            sudoku: true,
            ..five_suit("Sudoku (5 Suits)", Vec::new())
        });
        r.register(Variant {
            throw_it_in_a_hole: true,
            ..five_suit("Throw It in a Hole (5 Suits)", Vec::new())
        });
        r.register(Variant {
            clue_starved: true,
            ..five_suit("Clue Starved (5 Suits)", Vec::new())
        });
        r.register(Variant {
            critical_rank: Some(4),
            ..five_suit("Critical Fours (5 Suits)", Vec::new())
        });
        r
    }
}

impl VariantTable for VariantRegistry {
    fn lookup(&self, name: &str) -> Option<&Variant> {
        self.get(name)
    }
}

fn base_colors() -> Vec<String> {
    BASE_COLORS.iter().map(|color| color.to_string()).collect()
}

fn base_suits() -> Vec<SuitDef> {
    BASE_COLORS.iter().map(|color| SuitDef::basic(color)).collect()
}

/// Five suits where `special` replaces the last base suits.
fn five_suit(name: &str, special: Vec<SuitDef>) -> Variant {
    let keep = BASE_COLORS.len() - special.len();
    let suits: Vec<SuitDef> = base_suits().into_iter().take(keep).chain(special).collect();
    let clue_colors = suits
        .iter()
        .flat_map(|suit| suit.clue_colors.iter().cloned())
        .fold(Vec::new(), |mut colors: Vec<String>, color| {
            if !colors.contains(&color) {
                colors.push(color);
            }
            colors
        });
    Variant {
        name: name.to_string(),
        suits,
        clue_colors,
        ..Variant::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_table_has_expected_entries() {
        let r = VariantRegistry::with_canonical();
        for name in [
            "No Variant",
            "6 Suits",
            "Black (6 Suits)",
            "Rainbow (5 Suits)",
            "Reversed (5 Suits)",
            "Up or Down (5 Suits)",
            "Sudoku (5 Suits)",
            "Throw It in a Hole (5 Suits)",
            "Clue Starved (5 Suits)",
            "Critical Fours (5 Suits)",
        ] {
            assert!(r.contains(name), "missing {name}");
        }
        assert!(r.lookup("Mystery Variant").is_none());
    }

    #[test]
    fn rainbow_and_white_only_offer_four_colors() {
        let r = VariantRegistry::with_canonical();
        assert_eq!(r.get("Rainbow (5 Suits)").map(|v| v.clue_colors.len()), Some(4));
        assert_eq!(r.get("White (5 Suits)").map(|v| v.clue_colors.len()), Some(4));
        assert_eq!(r.get("Pink (5 Suits)").map(|v| v.clue_colors.len()), Some(5));
    }

    #[test]
    fn loads_from_json_with_defaults() {
        let json = r#"[
            {"name": "Tiny", "suits": [{"name": "Red", "clue_colors": ["Red"]}], "clue_colors": ["Red"]}
        ]"#;
        let r = VariantRegistry::from_json(json).expect("valid json");
        let tiny = r.get("Tiny").expect("registered");
        assert_eq!(tiny.stack_size, 5);
        assert_eq!(tiny.total_cards(), 10);
        assert!(!tiny.sudoku);
    }
}
