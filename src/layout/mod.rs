pub mod engine;
pub mod projection;

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::board::ItemId;

pub use engine::relayout;
pub use projection::{BoardEvent, RelayoutAction, TreeProjection};

/// A grid slot assigned to an item for one layout pass.
/// `x` is a horizontal column index, `y` is depth below the chosen root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Positions for one pass, in the order items were committed.
/// Items absent from the map are not visible for that pass.
pub type PositionMap = IndexMap<ItemId, Position>;

/// Per-pass layout behavior. Passed into every call rather than held as
/// engine state, so a pass is a pure function of (board, root, options).
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Items whose dependencies are excluded from the pass
    pub collapsed: HashSet<ItemId>,
    /// Elide completed leaves and stop descending through completed items
    pub hide_completed: bool,
    /// Pack sibling subtrees leftward when the row below has room
    pub extra_compact: bool,
}
