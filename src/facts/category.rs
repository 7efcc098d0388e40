//! Fact categories
//!
//! The closed set of topical tags a fact can carry, each with its display color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Topical tag of a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Science,
    Finance,
    Society,
    Entertainment,
    Health,
    History,
    News,
}

impl Category {
    /// Every category, in sidebar order
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Science,
        Category::Finance,
        Category::Society,
        Category::Entertainment,
        Category::Health,
        Category::History,
        Category::News,
    ];

    /// Name as stored in the `category` column
    pub fn name(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Finance => "finance",
            Category::Society => "society",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::History => "history",
            Category::News => "news",
        }
    }

    /// Get display color RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Category::Technology => (0x3b, 0x82, 0xf6),
            Category::Science => (0x16, 0xa3, 0x4a),
            Category::Finance => (0xef, 0x44, 0x44),
            Category::Society => (0xea, 0xb3, 0x08),
            Category::Entertainment => (0xdb, 0x27, 0x77),
            Category::Health => (0x14, 0xb8, 0xa6),
            Category::History => (0xf9, 0x73, 0x16),
            Category::News => (0x8b, 0x5c, 0xf6),
        }
    }

    /// Look up a category by its stored name
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Next category in sidebar order, wrapping around
    pub fn next(&self) -> Category {
        let idx = Category::ALL.iter().position(|c| c == self).unwrap_or(0);
        Category::ALL[(idx + 1) % Category::ALL.len()]
    }

    /// Previous category in sidebar order, wrapping around
    pub fn prev(&self) -> Category {
        let idx = Category::ALL.iter().position(|c| c == self).unwrap_or(0);
        Category::ALL[(idx + Category::ALL.len() - 1) % Category::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not one of the known category names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_name(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Which facts the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Sidebar entries: "All" first, then every category
    pub fn entries() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    /// The filter value as the sidebar and the logs name it
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.name(),
        }
    }

    /// The category to filter on, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
        assert!("sports".parse::<Category>().is_err());
        assert!("Science".parse::<Category>().is_err());
    }

    #[test]
    fn test_colors() {
        assert_eq!(Category::Technology.color(), (59, 130, 246));
        assert_eq!(Category::News.color(), (139, 92, 246));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Category::News.next(), Category::Technology);
        assert_eq!(Category::Technology.prev(), Category::News);
        assert_eq!(Category::Science.next(), Category::Finance);
    }

    #[test]
    fn test_filter_entries() {
        let entries = CategoryFilter::entries();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0], CategoryFilter::All);
        assert_eq!(entries[0].as_str(), "all");
        assert_eq!(entries[2].category(), Some(Category::Science));
    }
}
