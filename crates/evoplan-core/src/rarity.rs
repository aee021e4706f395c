use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal rarity of a material. Declaration order is the rarity order, so
/// `Ord` compares Common < Uncommon < Rare < Epic < Legendary < Mythic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    #[serde(alias = "Mythical")]
    Mythic,
}

impl Rarity {
    /// Every rarity, lowest first.
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a rarity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rarity '{0}'")]
pub struct UnknownRarity(pub String);

impl FromStr for Rarity {
    type Err = UnknownRarity;

    /// Case-insensitive. Accepts "Mythical" as a synonym for Mythic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            "mythic" | "mythical" => Ok(Rarity::Mythic),
            _ => Err(UnknownRarity(s.to_string())),
        }
    }
}
