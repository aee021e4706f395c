//! The material requirement grammar.
//!
//! Evolution tables list materials as strings: `"Water Essence x3"` or a bare
//! `"Training Manual"` (quantity 1). Every consumer goes through
//! [`ParsedMaterial::parse`] so the grammar lives in exactly one place.
//!
//! The accepted form is `name [ws] x|X digits`, with surrounding
//! whitespace trimmed. Anything without a count suffix is a bare name. A
//! count suffix of zero, or one too large for `u32`, cannot produce a valid
//! requirement and is reported as [`ParsedMaterial::Unparsed`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Normalized requirement
// ---------------------------------------------------------------------------

/// A normalized `(name, quantity)` pair. `quantity` is always >= 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub name: String,
    pub quantity: u32,
}

impl MaterialRequirement {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Total quantity across a list of requirements.
pub fn total_quantity(materials: &[MaterialRequirement]) -> u64 {
    materials.iter().map(|m| u64::from(m.quantity)).sum()
}

// ---------------------------------------------------------------------------
// Parse result
// ---------------------------------------------------------------------------

/// Tagged outcome of parsing one raw material string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMaterial {
    /// `"Name xN"` with N >= 1.
    Counted { name: String, quantity: u32 },

    /// `"Name"` with no count suffix.
    Bare { name: String },

    /// The string did not yield a valid requirement. `raw` is the trimmed
    /// input; it becomes the material name with quantity 1.
    Unparsed { raw: String },
}

impl ParsedMaterial {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ParsedMaterial::Unparsed {
                raw: String::new(),
            };
        }

        if let Some((name, digits)) = split_count_suffix(trimmed) {
            return match digits.parse::<u32>() {
                Ok(quantity) if quantity > 0 => ParsedMaterial::Counted {
                    name: name.to_string(),
                    quantity,
                },
                _ => ParsedMaterial::Unparsed {
                    raw: trimmed.to_string(),
                },
            };
        }

        ParsedMaterial::Bare {
            name: trimmed.to_string(),
        }
    }

    /// Whether parsing fell back to the raw string.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedMaterial::Unparsed { .. })
    }

    /// Collapse into a requirement. Bare names and fallbacks get quantity 1.
    pub fn into_requirement(self) -> MaterialRequirement {
        match self {
            ParsedMaterial::Counted { name, quantity } => MaterialRequirement { name, quantity },
            ParsedMaterial::Bare { name } => MaterialRequirement { name, quantity: 1 },
            ParsedMaterial::Unparsed { raw } => MaterialRequirement {
                name: raw,
                quantity: 1,
            },
        }
    }
}

/// Split `"Name x12"` into `("Name", "12")`. Returns `None` when the string
/// has no count suffix or the name part would be empty.
fn split_count_suffix(s: &str) -> Option<(&str, &str)> {
    let digit_count = s.bytes().rev().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }
    let digits = &s[s.len() - digit_count..];
    let head = &s[..s.len() - digit_count];

    // The marker must sit directly against the digits.
    let marker_stripped = head
        .strip_suffix('x')
        .or_else(|| head.strip_suffix('X'))?;
    let name = marker_stripped.trim_end();
    if name.is_empty() {
        return None;
    }
    Some((name, digits))
}

/// Parse a raw string straight to a requirement.
pub fn parse_requirement(raw: &str) -> MaterialRequirement {
    ParsedMaterial::parse(raw).into_requirement()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_material() {
        assert_eq!(
            parse_requirement("Water Essence x3"),
            MaterialRequirement::new("Water Essence", 3)
        );
    }

    #[test]
    fn bare_material_defaults_to_one() {
        assert_eq!(
            parse_requirement("Training Manual"),
            MaterialRequirement::new("Training Manual", 1)
        );
    }

    #[test]
    fn uppercase_marker_and_loose_whitespace() {
        assert_eq!(
            ParsedMaterial::parse("  Fire Essence X5  "),
            ParsedMaterial::Counted {
                name: "Fire Essence".to_string(),
                quantity: 5
            }
        );
        assert_eq!(
            parse_requirement("Sun Stone  x2"),
            MaterialRequirement::new("Sun Stone", 2)
        );
    }

    #[test]
    fn space_between_marker_and_digits_is_a_bare_name() {
        assert_eq!(
            ParsedMaterial::parse("Sun Stone x 2"),
            ParsedMaterial::Bare {
                name: "Sun Stone x 2".to_string()
            }
        );
        assert_eq!(parse_requirement("Onyx 7"), MaterialRequirement::new("Onyx 7", 1));
        assert_eq!(parse_requirement("Loot Box 2"), MaterialRequirement::new("Loot Box 2", 1));
        assert_eq!(parse_requirement("Loot Box x2"), MaterialRequirement::new("Loot Box", 2));
    }

    #[test]
    fn marker_without_space() {
        assert_eq!(parse_requirement("Ore x12"), MaterialRequirement::new("Ore", 12));
        assert_eq!(parse_requirement("Orex12"), MaterialRequirement::new("Ore", 12));
    }

    #[test]
    fn apostrophes_survive() {
        assert_eq!(
            parse_requirement("Master's Teachings"),
            MaterialRequirement::new("Master's Teachings", 1)
        );
    }

    #[test]
    fn trailing_digits_without_marker_are_part_of_name() {
        assert_eq!(
            ParsedMaterial::parse("Relic 7"),
            ParsedMaterial::Bare {
                name: "Relic 7".to_string()
            }
        );
    }

    #[test]
    fn marker_alone_is_a_bare_name() {
        assert_eq!(
            ParsedMaterial::parse("x3"),
            ParsedMaterial::Bare {
                name: "x3".to_string()
            }
        );
    }

    #[test]
    fn zero_quantity_falls_back() {
        let parsed = ParsedMaterial::parse("Cinder Shard x0");
        assert!(parsed.is_fallback());
        assert_eq!(
            parsed.into_requirement(),
            MaterialRequirement::new("Cinder Shard x0", 1)
        );
    }

    #[test]
    fn overflowing_quantity_falls_back() {
        let parsed = ParsedMaterial::parse("Gem x99999999999");
        assert!(parsed.is_fallback());
        assert_eq!(parsed.into_requirement().quantity, 1);
    }

    #[test]
    fn empty_string_falls_back() {
        let parsed = ParsedMaterial::parse("   ");
        assert!(parsed.is_fallback());
        assert_eq!(parsed.into_requirement(), MaterialRequirement::new("", 1));
    }

    #[test]
    fn total_quantity_sums() {
        let list = vec![
            MaterialRequirement::new("A", 3),
            MaterialRequirement::new("B", 1),
            MaterialRequirement::new("C", 1),
        ];
        assert_eq!(total_quantity(&list), 5);
        assert_eq!(total_quantity(&[]), 0);
    }
}
