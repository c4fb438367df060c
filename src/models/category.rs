//! Spending and income categories
//!
//! The store sends category names as free text. They are resolved once, at
//! construction, into a closed set plus `Custom` for labels outside it, so
//! the engine groups by value instead of matching strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A transaction or budget category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Housing,
    Food,
    Transportation,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Salary,
    Freelance,
    Investment,
    /// Explicit catch-all chosen by the user or the suggestion service
    Other,
    /// A user-defined label outside the built-in set (trimmed, non-empty)
    Custom(String),
}

impl Category {
    /// Built-in categories, in display order
    pub const BUILT_IN: [Category; 11] = [
        Category::Housing,
        Category::Food,
        Category::Transportation,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Other,
    ];

    /// Resolve a category label
    ///
    /// Matching is case-insensitive and accepts a few aliases the store uses
    /// interchangeably ("Transport", "Groceries", "Rent").
    pub fn parse(label: &str) -> Result<Self, CategoryValidationError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if trimmed.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(trimmed.chars().count()));
        }

        let category = match trimmed.to_lowercase().as_str() {
            "housing" | "rent" | "home" => Self::Housing,
            "food" | "groceries" | "dining" | "food & dining" => Self::Food,
            "transportation" | "transport" | "travel" => Self::Transportation,
            "utilities" | "bills" => Self::Utilities,
            "entertainment" => Self::Entertainment,
            "shopping" => Self::Shopping,
            "health" | "healthcare" | "medical" => Self::Health,
            "salary" => Self::Salary,
            "freelance" => Self::Freelance,
            "investment" | "investments" => Self::Investment,
            "other" | "uncategorized" | "misc" => Self::Other,
            _ => Self::Custom(trimmed.to_string()),
        };
        Ok(category)
    }

    /// Display label
    pub fn name(&self) -> &str {
        match self {
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Other => "Other",
            Self::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Categories that normally carry income rather than spending
    pub fn is_income_category(&self) -> bool {
        matches!(self, Self::Salary | Self::Freelance | Self::Investment)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Category::parse(&label).map_err(serde::de::Error::custom)
    }
}

/// Validation errors for category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builtin_case_insensitive() {
        assert_eq!(Category::parse("food").unwrap(), Category::Food);
        assert_eq!(Category::parse("  FOOD ").unwrap(), Category::Food);
        assert_eq!(Category::parse("Housing").unwrap(), Category::Housing);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Category::parse("Transport").unwrap(), Category::Transportation);
        assert_eq!(Category::parse("Groceries").unwrap(), Category::Food);
        assert_eq!(Category::parse("Rent").unwrap(), Category::Housing);
        assert_eq!(Category::parse("Uncategorized").unwrap(), Category::Other);
    }

    #[test]
    fn test_unknown_label_is_kept() {
        let cat = Category::parse(" Pets ").unwrap();
        assert_eq!(cat, Category::Custom("Pets".into()));
        assert!(cat.is_custom());
        assert_eq!(cat.to_string(), "Pets");
    }

    #[test]
    fn test_rejects_empty_and_long() {
        assert_eq!(Category::parse("  "), Err(CategoryValidationError::EmptyName));
        let long = "x".repeat(51);
        assert_eq!(
            Category::parse(&long),
            Err(CategoryValidationError::NameTooLong(51))
        );
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Category::Transportation).unwrap();
        assert_eq!(json, "\"Transportation\"");
        let back: Category = serde_json::from_str("\"transport\"").unwrap();
        assert_eq!(back, Category::Transportation);
        assert!(serde_json::from_str::<Category>("\"\"").is_err());
    }

    #[test]
    fn test_income_categories() {
        assert!(Category::Salary.is_income_category());
        assert!(!Category::Food.is_income_category());
    }
}
