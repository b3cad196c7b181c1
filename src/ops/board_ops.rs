use log::debug;

use crate::model::board::{Board, ItemId};
use crate::model::category::CategoryStyle;
use crate::model::item::{Item, Priority};

/// Error type for board mutations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("cannot add an item with the invalid priority sentinel")]
    InvalidPriority,
}

// ---------------------------------------------------------------------------
// Item CRUD
// ---------------------------------------------------------------------------

/// Add an item to the board. Any categories already attached to the item
/// are registered with the board-level category set. Returns the new id.
pub fn add_item(board: &mut Board, item: Item) -> Result<ItemId, BoardError> {
    if item.priority == Priority::Invalid {
        return Err(BoardError::InvalidPriority);
    }
    let names: Vec<String> = item.category.iter().cloned().collect();
    let id = board.allocate(item);
    for name in &names {
        board.register_category(name);
    }
    Ok(id)
}

/// Remove an item and strip it out of every other item's `depends_on`
/// list, so no dangling edges survive. Returns the removed item.
pub fn remove_item(board: &mut Board, id: ItemId) -> Result<Item, BoardError> {
    let removed = board.take(id).ok_or(BoardError::NotFound(id))?;
    let mut stripped = 0usize;
    for (_, item) in board.items_mut() {
        let before = item.depends_on.len();
        item.depends_on.retain(|dep| *dep != id);
        stripped += before - item.depends_on.len();
    }
    debug!("removed item {id}, stripped {stripped} dependency edges");
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Dependencies
// ---------------------------------------------------------------------------

/// Add a dependency edge. Both endpoints must be on the board; adding an
/// edge that already exists is a no-op. Cycles are not rejected here, see
/// `ops::graph::has_cycle` for the diagnostic.
pub fn add_dependency(board: &mut Board, item: ItemId, dep: ItemId) -> Result<(), BoardError> {
    if !board.contains(dep) {
        return Err(BoardError::NotFound(dep));
    }
    let entry = board.item_mut(item).ok_or(BoardError::NotFound(item))?;
    if !entry.depends_on.contains(&dep) {
        entry.depends_on.push(dep);
    }
    Ok(())
}

/// Remove a dependency edge. Removing an edge that is not present is a
/// no-op, as long as the item exists.
pub fn remove_dependency(board: &mut Board, item: ItemId, dep: ItemId) -> Result<(), BoardError> {
    let entry = board.item_mut(item).ok_or(BoardError::NotFound(item))?;
    entry.depends_on.retain(|d| *d != dep);
    Ok(())
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Set the completed flag. Returns true if the flag changed.
pub fn set_completed(board: &mut Board, id: ItemId, completed: bool) -> Result<bool, BoardError> {
    let item = board.item_mut(id).ok_or(BoardError::NotFound(id))?;
    if item.completed == completed {
        return Ok(false);
    }
    item.completed = completed;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Attach a category to an item, registering the name with the board.
pub fn add_category(board: &mut Board, id: ItemId, name: &str) -> Result<(), BoardError> {
    let item = board.item_mut(id).ok_or(BoardError::NotFound(id))?;
    if !item.category.contains(name) {
        item.category.insert(name.to_string());
    }
    board.register_category(name);
    Ok(())
}

/// Detach a category from an item. The name stays registered with the
/// board so its styling survives for other items.
pub fn remove_category(board: &mut Board, id: ItemId, name: &str) -> Result<(), BoardError> {
    let item = board.item_mut(id).ok_or(BoardError::NotFound(id))?;
    item.category.shift_remove(name);
    Ok(())
}

/// Set (or replace) the display styling for a category name.
pub fn set_category_style(board: &mut Board, name: &str, style: CategoryStyle) {
    board.set_style(name, style);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
