//! Category model
//!
//! The closed set of labels that partition backups into independent
//! namespaces. Each label doubles as the name of its directory under the
//! backup root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character class a profile (and its backups) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Death Knight")]
    DeathKnight,
    #[serde(rename = "Demon Hunter")]
    DemonHunter,
    Druid,
    Evoker,
    Hunter,
    Mage,
    Monk,
    Paladin,
    Priest,
    Rogue,
    Shaman,
    Warlock,
    Warrior,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 13] = [
        Self::DeathKnight,
        Self::DemonHunter,
        Self::Druid,
        Self::Evoker,
        Self::Hunter,
        Self::Mage,
        Self::Monk,
        Self::Paladin,
        Self::Priest,
        Self::Rogue,
        Self::Shaman,
        Self::Warlock,
        Self::Warrior,
    ];

    /// Human-readable label, also used as the backup directory name
    pub fn label(&self) -> &'static str {
        match self {
            Self::DeathKnight => "Death Knight",
            Self::DemonHunter => "Demon Hunter",
            Self::Druid => "Druid",
            Self::Evoker => "Evoker",
            Self::Hunter => "Hunter",
            Self::Mage => "Mage",
            Self::Monk => "Monk",
            Self::Paladin => "Paladin",
            Self::Priest => "Priest",
            Self::Rogue => "Rogue",
            Self::Shaman => "Shaman",
            Self::Warlock => "Warlock",
            Self::Warrior => "Warrior",
        }
    }

    /// Parse a category from user input
    ///
    /// Case-insensitive; spaces, hyphens and underscores are ignored, so
    /// "Death Knight", "death-knight" and "deathknight" all match.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL.into_iter().find(|category| {
            category
                .label()
                .chars()
                .filter(|c| *c != ' ')
                .flat_map(char::to_lowercase)
                .eq(normalized.chars())
        })
    }

    /// Comma-separated list of valid labels, for error messages
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_categories() {
        assert_eq!(Category::ALL.len(), 13);
        assert_eq!(Category::ALL[0], Category::DeathKnight);
        assert_eq!(Category::ALL[12], Category::Warrior);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(Category::parse("Mage"), Some(Category::Mage));
        assert_eq!(Category::parse("mage"), Some(Category::Mage));
        assert_eq!(Category::parse("Death Knight"), Some(Category::DeathKnight));
        assert_eq!(Category::parse("death-knight"), Some(Category::DeathKnight));
        assert_eq!(Category::parse("DEMON_HUNTER"), Some(Category::DemonHunter));
        assert_eq!(Category::parse("Bard"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.label()), Some(category));
        }
    }

    #[test]
    fn test_serialization_uses_label() {
        let json = serde_json::to_string(&Category::DeathKnight).unwrap();
        assert_eq!(json, "\"Death Knight\"");

        let parsed: Category = serde_json::from_str("\"Paladin\"").unwrap();
        assert_eq!(parsed, Category::Paladin);
    }
}
