use serde::Serialize;
use std::fmt;

/// A problem the engine recovered from without failing. Collected into the
/// plan result so callers can surface data quality issues.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A raw material string did not parse; it was used verbatim with
    /// quantity 1.
    MaterialParseFallback { tier: u32, raw: String },

    /// A material has no catalog entry. It is priced at 0, assumed to drop
    /// every run, and routed to the unknown source.
    MetadataMiss { material: String },

    /// A static table's declared material count for a tier disagrees with
    /// the count recomputed from its requirement strings. The recomputed
    /// count is used.
    DeclaredCountMismatch {
        unit: String,
        tier: u32,
        declared: u64,
        recomputed: u64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MaterialParseFallback { tier, raw } => {
                write!(f, "tier {tier}: could not parse material '{raw}', using quantity 1")
            }
            Diagnostic::MetadataMiss { material } => {
                write!(f, "no catalog entry for material '{material}'")
            }
            Diagnostic::DeclaredCountMismatch {
                unit,
                tier,
                declared,
                recomputed,
            } => write!(
                f,
                "unit '{unit}' tier {tier}: table declares {declared} materials, requirements total {recomputed}"
            ),
        }
    }
}

/// Append `diagnostic` unless an equal one is already present. Keeps
/// discovery order.
pub fn push_unique(list: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    if !list.contains(&diagnostic) {
        list.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_unique_skips_duplicates() {
        let mut list = Vec::new();
        push_unique(&mut list, Diagnostic::MetadataMiss { material: "Ash".into() });
        push_unique(&mut list, Diagnostic::MetadataMiss { material: "Dust".into() });
        push_unique(&mut list, Diagnostic::MetadataMiss { material: "Ash".into() });
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], Diagnostic::MetadataMiss { material: "Ash".into() });
    }

    #[test]
    fn display_messages() {
        let d = Diagnostic::MaterialParseFallback {
            tier: 2,
            raw: "Shard x0".into(),
        };
        let msg = format!("{d}");
        assert!(msg.contains("tier 2"));
        assert!(msg.contains("Shard x0"));

        let d = Diagnostic::DeclaredCountMismatch {
            unit: "aqua-disciple".into(),
            tier: 3,
            declared: 7,
            recomputed: 9,
        };
        let msg = format!("{d}");
        assert!(msg.contains("7"));
        assert!(msg.contains("9"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let d = Diagnostic::MetadataMiss {
            material: "Phantom Ash".into(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "metadata_miss");
        assert_eq!(json["material"], "Phantom Ash");
    }
}
