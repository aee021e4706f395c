//! Property-based tests for the material grammar and chain resolution.

use evoplan_core::material::{parse_requirement, total_quantity};
use evoplan_core::test_utils::*;
use evoplan_core::{EvolutionChain, MaterialRequirement, ParsedMaterial};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// Material names: words of letters and apostrophes, never ending in a
/// count suffix.
fn arb_name() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-z'][a-z']{0,8}", 1..4)
        .prop_map(|words| words.join(" "))
        .prop_filter("name must not end with the count marker", |name| {
            !name.ends_with('x') && !name.ends_with('X')
        })
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Formatting a requirement as "Name xN" and parsing it back is identity.
    #[test]
    fn counted_strings_parse_back(name in arb_name(), quantity in 1u32..10_000) {
        let raw = format!("{name} x{quantity}");
        prop_assert_eq!(parse_requirement(&raw), MaterialRequirement::new(name, quantity));
    }

    /// A bare name always parses to quantity 1 with the name untouched.
    #[test]
    fn bare_names_get_quantity_one(name in arb_name()) {
        prop_assert_eq!(parse_requirement(&name), MaterialRequirement::new(name.clone(), 1));
    }

    /// A number separated from a name ending in the marker letter is part of
    /// the name, not a count.
    #[test]
    fn spaced_trailing_number_stays_in_name(name in arb_name(), quantity in 0u32..1_000) {
        let raw = format!("{name}x {quantity}");
        prop_assert_eq!(
            ParsedMaterial::parse(&raw),
            ParsedMaterial::Bare { name: raw.clone() }
        );
    }

    /// Surrounding whitespace never changes the result.
    #[test]
    fn outer_whitespace_is_ignored(name in arb_name(), quantity in 1u32..100, pad in " {0,3}") {
        let raw = format!("{pad}{name} x{quantity}{pad}");
        prop_assert_eq!(ParsedMaterial::parse(&raw), ParsedMaterial::parse(raw.trim()));
    }

    /// Parsing never panics and never yields a zero quantity.
    #[test]
    fn parse_is_total(raw in ".{0,40}") {
        let req = parse_requirement(&raw);
        prop_assert!(req.quantity >= 1);
    }

    /// Combining a chain's materials preserves the total quantity.
    #[test]
    fn combined_materials_conserve_quantity(
        raws in proptest::collection::vec(
            (prop_oneof![Just("Dust"), Just("Ash"), Just("Ore"), Just("Gem")], 1u32..20),
            0..12,
        )
    ) {
        let strings: Vec<String> = raws.iter().map(|(n, q)| format!("{n} x{q}")).collect();
        let refs: Vec<&str> = strings.iter().map(String::as_str).collect();
        let tiers = vec![
            evolution_tier(1, "Base", 0, 0, &[]),
            evolution_tier(2, "Evolved", 100, 0, &refs),
        ];
        let chain = EvolutionChain::from_tiers(unit("hero", true), &tiers);

        let expected: u64 = raws.iter().map(|(_, q)| u64::from(*q)).sum();
        prop_assert_eq!(total_quantity(&chain.combined_materials()), expected);
    }
}
