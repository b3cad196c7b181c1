use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::board::ItemId;

/// Urgency of an item. Ordering is display order: `High` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    /// Editor sentinel for "nothing selected". Never stored on a board.
    Invalid,
}

/// Derived lifecycle state of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Completed,
    Blocked,
    Available,
}

/// A task node on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Short display name
    pub name: String,
    /// Longer free-form text
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    /// Category names, in the order they were attached
    #[serde(default)]
    pub category: IndexSet<String>,
    /// Items that must complete before this one is unblocked.
    /// Insertion order; significant only for display.
    #[serde(default)]
    pub depends_on: Vec<ItemId>,
}

impl Item {
    /// Create an item that is not yet on any board
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Item {
            name: name.into(),
            description: description.into(),
            priority,
            completed: false,
            category: IndexSet::new(),
            depends_on: Vec::new(),
        }
    }

    /// Case-insensitive substring match against name, description, or any
    /// category string. Empty text matches everything.
    pub fn matches(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .category
                .iter()
                .any(|c| c.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let item = Item::new("Write Parser", "", Priority::Medium);
        assert!(item.matches("parser"));
        assert!(item.matches("WRITE"));
        assert!(!item.matches("render"));
    }

    #[test]
    fn test_matches_description_and_category() {
        let mut item = Item::new("x", "the storage backend", Priority::Low);
        item.category.insert("Infrastructure".to_string());
        assert!(item.matches("Storage"));
        assert!(item.matches("infra"));
    }

    #[test]
    fn test_empty_query_matches_all() {
        let item = Item::new("anything", "", Priority::High);
        assert!(item.matches(""));
    }
}
