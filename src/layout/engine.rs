use std::collections::HashSet;

use log::debug;

use crate::model::board::{Board, ItemId};

use super::{LayoutOptions, Position, PositionMap};

/// Assign every reachable, non-excluded item a unique grid slot, working
/// down from `root`. Returns an empty map when no root is selected or the
/// root is not on the board.
///
/// The pass is a pure function of its inputs; callers rerun it on any
/// structural change (see `projection` for the classification).
pub fn relayout(board: &Board, root: Option<ItemId>, options: &LayoutOptions) -> PositionMap {
    let Some(root) = root else {
        return PositionMap::new();
    };
    if !board.contains(root) {
        return PositionMap::new();
    }
    let mut pass = Pass {
        board,
        options,
        positions: PositionMap::new(),
        occupied: HashSet::new(),
        visiting: HashSet::new(),
    };
    pass.reposition(root, 0, 0);
    debug!(
        "relayout from {root}: {} of {} items positioned",
        pass.positions.len(),
        board.len()
    );
    pass.positions
}

/// State for one layout pass. `occupied` mirrors the cells held by
/// `positions` so collision checks stay O(1); `visiting` holds the open
/// recursion path so a dependency cycle cannot recurse forever.
struct Pass<'a> {
    board: &'a Board,
    options: &'a LayoutOptions,
    positions: PositionMap,
    occupied: HashSet<(i32, i32)>,
    visiting: HashSet<ItemId>,
}

impl Pass<'_> {
    /// Place `item` and its dependency subtree starting at column `x`.
    /// Returns the next free column after the subtree, and whether the
    /// whole subtree is completed.
    fn reposition(&mut self, item: ItemId, x: i32, depth: i32) -> (i32, bool) {
        let Some(it) = self.board.item(item) else {
            // Dangling edge: nothing to place, nothing consumed.
            return (x, true);
        };

        // Back-edge of a cycle: the call that opened `item` is still on
        // the stack and will commit its position. Do not descend again.
        if self.visiting.contains(&item) {
            return (x + 1, it.completed);
        }

        let leaf = it.depends_on.is_empty();
        let hidden_done = self.options.hide_completed && it.completed;

        // Terminal cases: nothing below this item takes part in the pass.
        if self.positions.contains_key(&item)
            || leaf
            || self.options.collapsed.contains(&item)
            || hidden_done
        {
            if hidden_done && leaf {
                // Completed leaf under hide-completed: elided entirely.
                return (x + 1, it.completed);
            }
            let px = self.place(item, x, depth);
            return (px + 1, it.completed);
        }

        if let [child] = it.depends_on[..] {
            return self.reposition_over_single(item, it.completed, child, x, depth);
        }
        let deps = it.depends_on.clone();
        self.reposition_over_fanout(item, it.completed, deps, x, depth)
    }

    /// One dependency: stack this item directly above it.
    fn reposition_over_single(
        &mut self,
        item: ItemId,
        completed: bool,
        child: ItemId,
        x: i32,
        depth: i32,
    ) -> (i32, bool) {
        if !self.positions.contains_key(&child) {
            self.visiting.insert(item);
            let (next_x, child_done) = self.reposition(child, x, depth + 1);
            self.visiting.remove(&item);
            // Inherit the child's column; an elided child leaves us at x.
            let cx = self.positions.get(&child).map(|p| p.x).unwrap_or(x);
            let px = self.place(item, cx, depth);
            return (next_x.max(px + 1), completed && child_done);
        }

        // Child was already claimed by a sibling branch: sit at x without
        // consuming the child's slot. A shared leaf sinks below this row
        // so parents always stay above their dependencies.
        let child_item = self.board.item(child);
        if child_item.is_some_and(|c| c.depends_on.is_empty()) {
            self.bump_depth(child, depth + 1);
        }
        let child_done = child_item.is_none_or(|c| c.completed);
        let px = self.place(item, x, depth);
        (px + 1, completed && child_done)
    }

    /// Several dependencies: lay the viable ones left to right, then
    /// center this item over them.
    fn reposition_over_fanout(
        &mut self,
        item: ItemId,
        completed: bool,
        deps: Vec<ItemId>,
        x: i32,
        depth: i32,
    ) -> (i32, bool) {
        let mut all_done = completed;

        let mut cursor = x;
        if self.options.extra_compact {
            // Slide left while the row below has room for the first child.
            while cursor > 0 && !self.occupied.contains(&(cursor - 1, depth + 1)) {
                cursor -= 1;
            }
        }

        self.visiting.insert(item);
        let mut max_next = cursor;
        let mut x_sum: i64 = 0;
        let mut viable: i64 = 0;
        for child in deps {
            let Some(c) = self.board.item(child) else {
                continue;
            };
            let child_leaf = c.depends_on.is_empty();
            if self.options.hide_completed && c.completed && child_leaf {
                // Elided leaf: no slot, but its completion still counts.
                continue;
            }
            if self.positions.contains_key(&child) {
                // Claimed by an earlier sibling's subtree. Leaves sink to
                // keep them below every parent; deeper structure is left
                // where its own branch put it.
                if child_leaf {
                    self.bump_depth(child, depth + 1);
                }
                all_done &= c.completed;
                continue;
            }
            let (next_x, child_done) = self.reposition(child, cursor, depth + 1);
            all_done &= child_done;
            if let Some(p) = self.positions.get(&child) {
                x_sum += p.x as i64;
                viable += 1;
            }
            cursor = next_x;
            max_next = max_next.max(next_x);
        }
        self.visiting.remove(&item);

        // Center over the viable children; with none left (all elided or
        // shared) fall back to the cursor.
        let own_x = if viable > 0 {
            (x_sum / viable) as i32
        } else {
            cursor
        };
        let px = self.place(item, own_x, depth);
        (max_next.max(px + 1), all_done)
    }

    /// Commit a position, nudging x rightward past occupied cells.
    /// Returns the x actually used.
    fn place(&mut self, item: ItemId, x: i32, depth: i32) -> i32 {
        if let Some(old) = self.positions.get(&item) {
            self.occupied.remove(&(old.x, old.y));
        }
        let mut x = x;
        while self.occupied.contains(&(x, depth)) {
            x += 1;
        }
        self.occupied.insert((x, depth));
        self.positions.insert(item, Position { x, y: depth });
        x
    }

    /// Sink an already-placed item to at least `min_depth`, keeping its
    /// column. A taken cell pushes it further down, never sideways.
    fn bump_depth(&mut self, item: ItemId, min_depth: i32) {
        let Some(p) = self.positions.get(&item).copied() else {
            return;
        };
        if p.y >= min_depth {
            return;
        }
        self.occupied.remove(&(p.x, p.y));
        let mut y = min_depth;
        while self.occupied.contains(&(p.x, y)) {
            y += 1;
        }
        self.occupied.insert((p.x, y));
        self.positions.insert(item, Position { x: p.x, y });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
