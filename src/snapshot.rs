//! Flat, serde-friendly image of a board.
//!
//! Handles are meaningless outside the process, so a snapshot encodes
//! dependency edges as indices into its own item list (board order).
//! How the snapshot is serialized, and whether it ever touches a disk,
//! is the host's business.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::board::{Board, ItemId};
use crate::model::category::CategoryStyle;
use crate::model::item::{Item, Priority};

/// Error type for snapshot restoration
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("item {item} depends on out-of-range index {dependency}")]
    DanglingDependency { item: usize, dependency: usize },
    #[error("item {item} carries the invalid priority sentinel")]
    InvalidPriority { item: usize },
}

/// One item, with edges as indices into the snapshot's item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<usize>,
}

/// A whole board, in board order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub items: Vec<ItemSnapshot>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub category_style: IndexMap<String, CategoryStyle>,
}

impl BoardSnapshot {
    /// Flatten a board. Edges become indices into the emitted item list;
    /// a dangling edge (only possible via direct model mutation) is
    /// dropped rather than emitted as garbage.
    pub fn capture(board: &Board) -> Self {
        let items = board
            .items()
            .map(|(_, item)| ItemSnapshot {
                name: item.name.clone(),
                description: item.description.clone(),
                priority: item.priority,
                completed: item.completed,
                category: item.category.iter().cloned().collect(),
                depends_on: item
                    .depends_on
                    .iter()
                    .filter_map(|dep| board.index_of(*dep))
                    .collect(),
            })
            .collect();
        BoardSnapshot {
            items,
            categories: board.categories().iter().cloned().collect(),
            category_style: board.category_styles().clone(),
        }
    }

    /// Rebuild a board, allocating fresh handles in snapshot order and
    /// rewiring edges through them.
    pub fn restore(&self) -> Result<Board, SnapshotError> {
        let mut board = Board::new();
        let mut handles: Vec<ItemId> = Vec::with_capacity(self.items.len());
        for (index, snap) in self.items.iter().enumerate() {
            if snap.priority == Priority::Invalid {
                return Err(SnapshotError::InvalidPriority { item: index });
            }
            let mut item = Item::new(&snap.name, &snap.description, snap.priority);
            item.completed = snap.completed;
            item.category = snap.category.iter().cloned().collect();
            handles.push(board.allocate(item));
        }
        for (index, snap) in self.items.iter().enumerate() {
            for &dep in &snap.depends_on {
                let target = *handles.get(dep).ok_or(SnapshotError::DanglingDependency {
                    item: index,
                    dependency: dep,
                })?;
                if let Some(item) = board.item_mut(handles[index]) {
                    item.depends_on.push(target);
                }
            }
        }
        for name in &self.categories {
            board.register_category(name);
        }
        for (name, style) in &self.category_style {
            board.set_style(name, *style);
        }
        Ok(board)
    }
}
