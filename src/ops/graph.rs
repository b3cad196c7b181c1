use std::collections::HashSet;

use crate::model::board::{Board, ItemId};
use crate::model::item::ItemState;

/// Whether an item is waiting on incomplete dependencies.
/// A completed item is never blocked.
pub fn blocked(board: &Board, id: ItemId) -> bool {
    let Some(item) = board.item(id) else {
        return false;
    };
    if item.completed {
        return false;
    }
    item.depends_on
        .iter()
        .filter_map(|dep| board.item(*dep))
        .any(|dep| !dep.completed)
}

/// Derived lifecycle state: completed wins, then blocked, then available.
pub fn state(board: &Board, id: ItemId) -> ItemState {
    let Some(item) = board.item(id) else {
        return ItemState::Available;
    };
    if item.completed {
        ItemState::Completed
    } else if blocked(board, id) {
        ItemState::Blocked
    } else {
        ItemState::Available
    }
}

/// Everything standing between an item and being unblocked: for each
/// dependency in order, the dependency's own blockers when it is itself
/// blocked, then the dependency itself when it is not completed.
///
/// An item reachable along several paths shows up once per path, and a
/// dependency that is merely incomplete (not blocked) is still included.
/// Callers wanting a distinct set should dedup; the raw walk order is the
/// displayed order.
pub fn blockers(board: &Board, id: ItemId) -> Vec<ItemId> {
    let mut out = Vec::new();
    let mut path = HashSet::new();
    collect_blockers(board, id, &mut path, &mut out);
    out
}

fn collect_blockers(
    board: &Board,
    id: ItemId,
    path: &mut HashSet<ItemId>,
    out: &mut Vec<ItemId>,
) {
    // Path guard: a dependency cycle would otherwise recurse forever.
    if !path.insert(id) {
        return;
    }
    if let Some(item) = board.item(id) {
        for &dep in &item.depends_on {
            let Some(dep_item) = board.item(dep) else {
                continue;
            };
            if blocked(board, dep) {
                collect_blockers(board, dep, path, out);
            }
            if !dep_item.completed {
                out.push(dep);
            }
        }
    }
    path.remove(&id);
}

// ---------------------------------------------------------------------------
// Cycle diagnostics
// ---------------------------------------------------------------------------

/// Whether any dependency cycle exists on the board. Diagnostic only:
/// mutations never call this, and the layout engine tolerates cycles.
pub fn has_cycle(board: &Board) -> bool {
    let mut done = HashSet::new();
    let mut path = HashSet::new();
    board
        .ids()
        .any(|id| dfs_cycle(board, id, &mut done, &mut path))
}

/// Whether a dependency cycle is reachable from one item.
pub fn has_cycle_from(board: &Board, id: ItemId) -> bool {
    let mut done = HashSet::new();
    let mut path = HashSet::new();
    dfs_cycle(board, id, &mut done, &mut path)
}

fn dfs_cycle(
    board: &Board,
    id: ItemId,
    done: &mut HashSet<ItemId>,
    path: &mut HashSet<ItemId>,
) -> bool {
    if done.contains(&id) {
        return false;
    }
    if !path.insert(id) {
        return true;
    }
    let found = board
        .item(id)
        .map(|item| {
            item.depends_on
                .iter()
                .any(|dep| dfs_cycle(board, *dep, done, path))
        })
        .unwrap_or(false);
    path.remove(&id);
    done.insert(id);
    found
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{Item, Priority};
    use crate::ops::board_ops::{add_dependency, add_item, set_completed};

    fn item(name: &str) -> Item {
        Item::new(name, "", Priority::Medium)
    }

    /// dep chain: root -> [a, b]; a -> [leaf]; b -> [leaf]
    fn diamond() -> (Board, ItemId, ItemId, ItemId, ItemId) {
        let mut board = Board::new();
        let leaf = add_item(&mut board, item("leaf")).unwrap();
        let a = add_item(&mut board, item("a")).unwrap();
        let b = add_item(&mut board, item("b")).unwrap();
        let root = add_item(&mut board, item("root")).unwrap();
        add_dependency(&mut board, a, leaf).unwrap();
        add_dependency(&mut board, b, leaf).unwrap();
        add_dependency(&mut board, root, a).unwrap();
        add_dependency(&mut board, root, b).unwrap();
        (board, root, a, b, leaf)
    }

    #[test]
    fn test_blocked_basic() {
        let (mut board, root, a, _b, leaf) = diamond();
        assert!(blocked(&board, root));
        assert!(blocked(&board, a));
        assert!(!blocked(&board, leaf));

        set_completed(&mut board, leaf, true).unwrap();
        assert!(!blocked(&board, a));
        assert!(blocked(&board, root));
    }

    #[test]
    fn test_completed_item_is_not_blocked() {
        let (mut board, root, _a, _b, _leaf) = diamond();
        set_completed(&mut board, root, true).unwrap();
        assert!(!blocked(&board, root));
        assert_eq!(state(&board, root), ItemState::Completed);
    }

    #[test]
    fn test_state_transitions() {
        let (mut board, _root, a, _b, leaf) = diamond();
        assert_eq!(state(&board, a), ItemState::Blocked);
        assert_eq!(state(&board, leaf), ItemState::Available);
        set_completed(&mut board, leaf, true).unwrap();
        assert_eq!(state(&board, a), ItemState::Available);
    }

    #[test]
    fn test_blockers_preserves_duplicates() {
        let (board, root, a, b, leaf) = diamond();
        // Both branches report the shared leaf, so it appears twice.
        assert_eq!(blockers(&board, root), vec![leaf, a, leaf, b]);
    }

    #[test]
    fn test_blockers_includes_incomplete_unblocked_dep() {
        let mut board = Board::new();
        let dep = add_item(&mut board, item("dep")).unwrap();
        let top = add_item(&mut board, item("top")).unwrap();
        add_dependency(&mut board, top, dep).unwrap();
        // `dep` has nothing of its own to wait on, but it is incomplete.
        assert_eq!(blockers(&board, top), vec![dep]);
    }

    #[test]
    fn test_blockers_skips_completed_dep() {
        let (mut board, root, a, b, leaf) = diamond();
        set_completed(&mut board, a, true).unwrap();
        assert_eq!(blockers(&board, root), vec![leaf, b]);
        set_completed(&mut board, leaf, true).unwrap();
        assert_eq!(blockers(&board, root), vec![b]);
    }

    #[test]
    fn test_blockers_terminates_on_cycle() {
        let mut board = Board::new();
        let a = add_item(&mut board, item("a")).unwrap();
        let b = add_item(&mut board, item("b")).unwrap();
        add_dependency(&mut board, a, b).unwrap();
        add_dependency(&mut board, b, a).unwrap();
        let result = blockers(&board, a);
        assert!(result.contains(&b));
    }

    #[test]
    fn test_has_cycle() {
        let (mut board, root, a, _b, _leaf) = diamond();
        assert!(!has_cycle(&board));
        assert!(!has_cycle_from(&board, root));

        add_dependency(&mut board, a, root).unwrap();
        assert!(has_cycle(&board));
        assert!(has_cycle_from(&board, root));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let mut board = Board::new();
        let a = add_item(&mut board, item("a")).unwrap();
        add_dependency(&mut board, a, a).unwrap();
        assert!(has_cycle_from(&board, a));
    }
}
