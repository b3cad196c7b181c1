use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::category::CategoryStyle;
use super::item::Item;

/// Stable handle to an item on a board. Ids are never reused within a
/// board, so removing one item does not invalidate handles to the rest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemId(u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The owning collection of items plus category metadata.
///
/// Items are stored in insertion order, which is also display order.
/// Dependency edges are [`ItemId`] handles into the same board.
#[derive(Debug, Clone, Default)]
pub struct Board {
    items: IndexMap<ItemId, Item>,
    categories: IndexSet<String>,
    category_style: IndexMap<String, CategoryStyle>,
    next_id: u64,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// All items in board order
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// All ids in board order
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    /// Position of an id in board order
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    /// All items whose `depends_on` contains `id`, in board order
    pub fn dependents_of(&self, id: ItemId) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|(_, item)| item.depends_on.contains(&id))
            .map(|(dependent, _)| *dependent)
            .collect()
    }

    /// All items matching the text, in board order
    pub fn find_matching(&self, text: &str) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|(_, item)| item.matches(text))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Category names known to the board
    pub fn categories(&self) -> &IndexSet<String> {
        &self.categories
    }

    pub fn category_style(&self, name: &str) -> Option<&CategoryStyle> {
        self.category_style.get(name)
    }

    pub fn category_styles(&self) -> &IndexMap<String, CategoryStyle> {
        &self.category_style
    }

    // Crate-internal mutation surface; hosts go through `ops::board_ops`
    // so invariants (id allocation, cascade removal, category sync) hold.

    pub(crate) fn allocate(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    /// Remove an item, preserving board order of the rest
    pub(crate) fn take(&mut self, id: ItemId) -> Option<Item> {
        self.items.shift_remove(&id)
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut Item)> {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }

    pub(crate) fn register_category(&mut self, name: &str) {
        if !self.categories.contains(name) {
            self.categories.insert(name.to_string());
        }
    }

    pub(crate) fn set_style(&mut self, name: &str, style: CategoryStyle) {
        self.register_category(name);
        self.category_style.insert(name.to_string(), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Priority;

    #[test]
    fn test_board_order_is_insertion_order() {
        let mut board = Board::new();
        let a = board.allocate(Item::new("a", "", Priority::Medium));
        let b = board.allocate(Item::new("b", "", Priority::High));
        let c = board.allocate(Item::new("c", "", Priority::Low));
        let order: Vec<ItemId> = board.ids().collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn test_removal_keeps_order_and_ids() {
        let mut board = Board::new();
        let a = board.allocate(Item::new("a", "", Priority::Medium));
        let b = board.allocate(Item::new("b", "", Priority::Medium));
        let c = board.allocate(Item::new("c", "", Priority::Medium));
        board.take(b);
        let order: Vec<ItemId> = board.ids().collect();
        assert_eq!(order, vec![a, c]);
        // Fresh allocations never reuse a removed id
        let d = board.allocate(Item::new("d", "", Priority::Medium));
        assert_ne!(d, b);
    }

    #[test]
    fn test_dependents_of_in_board_order() {
        let mut board = Board::new();
        let dep = board.allocate(Item::new("dep", "", Priority::Medium));
        let first = board.allocate(Item::new("first", "", Priority::Medium));
        let second = board.allocate(Item::new("second", "", Priority::Medium));
        board.item_mut(second).unwrap().depends_on.push(dep);
        board.item_mut(first).unwrap().depends_on.push(dep);
        assert_eq!(board.dependents_of(dep), vec![first, second]);
    }

    #[test]
    fn test_find_matching() {
        let mut board = Board::new();
        let a = board.allocate(Item::new("write docs", "", Priority::Medium));
        let _b = board.allocate(Item::new("fix bug", "", Priority::Medium));
        let c = board.allocate(Item::new("review", "docs pass", Priority::Medium));
        assert_eq!(board.find_matching("docs"), vec![a, c]);
    }
}
