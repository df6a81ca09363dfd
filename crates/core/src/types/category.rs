//! Grocery item categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known category.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(String);

/// Category of a grocery item.
///
/// The set is fixed; `Other` is the default for items that fit nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemCategory {
    Produce,
    Deli,
    Bakery,
    Pantry,
    Frozen,
    #[default]
    Other,
}

impl ItemCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 6] = [
        Self::Produce,
        Self::Deli,
        Self::Bakery,
        Self::Pantry,
        Self::Frozen,
        Self::Other,
    ];

    /// Static (value, label) pairs for rendering a select field.
    pub const CHOICES: [(&'static str, &'static str); 6] = [
        ("Produce", "Produce"),
        ("Deli", "Deli"),
        ("Bakery", "Bakery"),
        ("Pantry", "Pantry"),
        ("Frozen", "Frozen"),
        ("Other", "Other"),
    ];

    /// Stable string value, used both as the form value and the stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::Deli => "Deli",
            Self::Bakery => "Bakery",
            Self::Pantry => "Pantry",
            Self::Frozen => "Frozen",
            Self::Other => "Other",
        }
    }

    /// Human-readable label. Currently identical to the stored value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Produce" => Ok(Self::Produce),
            "Deli" => Ok(Self::Deli),
            "Bakery" => Ok(Self::Bakery),
            "Pantry" => Ok(Self::Pantry),
            "Frozen" => Ok(Self::Frozen),
            "Other" => Ok(Self::Other),
            other => Err(ParseCategoryError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_other() {
        assert_eq!(ItemCategory::default(), ItemCategory::Other);
    }

    #[test]
    fn test_parse_all_values() {
        for category in ItemCategory::ALL {
            let parsed: ItemCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("Electronics".parse::<ItemCategory>().is_err());
        // Parsing is case-sensitive; form values come from CHOICES verbatim
        assert!("produce".parse::<ItemCategory>().is_err());
    }

    #[test]
    fn test_choices_match_all() {
        assert_eq!(ItemCategory::CHOICES.len(), ItemCategory::ALL.len());
        for ((value, label), category) in ItemCategory::CHOICES.iter().zip(ItemCategory::ALL) {
            assert_eq!(*value, category.as_str());
            assert_eq!(*label, category.label());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemCategory::Frozen.to_string(), "Frozen");
    }
}
