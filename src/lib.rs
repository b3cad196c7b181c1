//! Dependency-aware kanban board core.
//!
//! A [`model::Board`] owns task [`model::Item`]s joined by `depends_on`
//! edges. [`layout::relayout`] assigns grid positions for a tree view of
//! those edges, and [`layout::TreeProjection`] turns the position map
//! into per-item visibility plus a relayout-or-patch decision for every
//! mutation. Rendering, persistence, and input handling stay with the
//! host application.

pub mod layout;
pub mod model;
pub mod ops;
pub mod snapshot;
