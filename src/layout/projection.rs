use crate::model::board::{Board, ItemId};

use super::{engine, LayoutOptions, Position, PositionMap};

/// A mutation the projection may need to react to. The board itself has
/// already been updated when the event is applied; the event only names
/// what changed so the reaction can be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    ItemAdded(ItemId),
    ItemRemoved(ItemId),
    /// An edge on `item` was added or removed
    DependencyChanged { item: ItemId },
    CompletionToggled { item: ItemId, completed: bool },
    CollapseToggled(ItemId),
    RootChanged(Option<ItemId>),
    HideCompletedToggled(bool),
    ExtraCompactToggled(bool),
    FilterChanged(String),
}

/// How much recomputation a mutation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayoutAction {
    /// Nothing to do
    None,
    /// Visibility or state indicators change; positions stay valid
    Patch,
    /// Positions must be recomputed from the root
    Full,
}

/// The tree view's slice of state: a chosen root, the layout options, a
/// text filter, and the positions from the latest pass. The projection
/// decides which items a view shows and where, and classifies mutations
/// so hosts relayout only when positions actually change.
#[derive(Debug, Clone, Default)]
pub struct TreeProjection {
    root: Option<ItemId>,
    options: LayoutOptions,
    filter: String,
    positions: PositionMap,
}

impl TreeProjection {
    pub fn new() -> Self {
        TreeProjection::default()
    }

    pub fn root(&self) -> Option<ItemId> {
        self.root
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn position(&self, item: ItemId) -> Option<Position> {
        self.positions.get(&item).copied()
    }

    /// An item takes part in the current layout iff it was positioned.
    pub fn visible(&self, item: ItemId) -> bool {
        self.positions.contains_key(&item)
    }

    /// An item is shown iff it is visible and matches the active filter.
    /// The empty filter matches everything.
    pub fn displayed(&self, board: &Board, item: ItemId) -> bool {
        self.visible(item)
            && board
                .item(item)
                .is_some_and(|it| it.matches(&self.filter))
    }

    /// Recompute positions for the current root and options.
    pub fn refresh(&mut self, board: &Board) {
        self.positions = engine::relayout(board, self.root, &self.options);
    }

    /// Decide how much work an event costs against the current view.
    /// Deterministic: same event, same view state, same answer.
    pub fn classify(&self, event: &BoardEvent) -> RelayoutAction {
        // With no root there is no layout to maintain; only gaining a
        // root changes that.
        if self.root.is_none() {
            return match event {
                BoardEvent::RootChanged(Some(_)) => RelayoutAction::Full,
                _ => RelayoutAction::None,
            };
        }
        match event {
            // Text filtering layers over positions without moving them.
            BoardEvent::FilterChanged(_) => RelayoutAction::Patch,
            // Completion only moves items when elision depends on it.
            BoardEvent::CompletionToggled { .. } => {
                if self.options.hide_completed {
                    RelayoutAction::Full
                } else {
                    RelayoutAction::Patch
                }
            }
            BoardEvent::ItemAdded(_)
            | BoardEvent::ItemRemoved(_)
            | BoardEvent::DependencyChanged { .. }
            | BoardEvent::CollapseToggled(_)
            | BoardEvent::RootChanged(_)
            | BoardEvent::HideCompletedToggled(_)
            | BoardEvent::ExtraCompactToggled(_) => RelayoutAction::Full,
        }
    }

    /// Fold an event into the view: update the view's own state, then
    /// relayout if (and only if) the classification calls for it.
    /// Returns the action that was taken.
    pub fn apply(&mut self, board: &Board, event: BoardEvent) -> RelayoutAction {
        let action = self.classify(&event);
        match &event {
            BoardEvent::RootChanged(root) => self.root = *root,
            BoardEvent::ItemRemoved(id) => {
                if self.root == Some(*id) {
                    self.root = None;
                }
                self.options.collapsed.remove(id);
            }
            BoardEvent::CollapseToggled(id) => {
                if !self.options.collapsed.remove(id) {
                    self.options.collapsed.insert(*id);
                }
            }
            BoardEvent::HideCompletedToggled(on) => self.options.hide_completed = *on,
            BoardEvent::ExtraCompactToggled(on) => self.options.extra_compact = *on,
            BoardEvent::FilterChanged(text) => self.filter = text.clone(),
            BoardEvent::ItemAdded(_)
            | BoardEvent::DependencyChanged { .. }
            | BoardEvent::CompletionToggled { .. } => {}
        }
        match action {
            RelayoutAction::Full => self.refresh(board),
            RelayoutAction::Patch | RelayoutAction::None => {}
        }
        action
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
