//! Error types for the `homestead-world` crate.
//!
//! Collaborator trait methods report failure with `bool`/`Option` as the
//! agent layer expects; these errors cover the richer host-facing calls
//! (planting, direct inventory edits).

use homestead_types::{ItemId, PlotId};

/// Errors that can occur in the in-memory world collaborators.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A plot was not found in the field.
    #[error("plot not found: {0}")]
    PlotNotFound(PlotId),

    /// The plot already holds a crop.
    #[error("plot {0} is already planted")]
    PlotOccupied(PlotId),

    /// Every inventory slot is taken by other items.
    #[error("no free inventory slot for {item} ({slots} slots)")]
    NoFreeSlot {
        /// The item that did not fit.
        item: ItemId,
        /// Total slot count.
        slots: u32,
    },

    /// The stack would exceed the per-slot limit.
    #[error("stack of {item} would exceed {limit}")]
    StackFull {
        /// The item being added.
        item: ItemId,
        /// Per-slot limit.
        limit: u32,
    },

    /// Not enough of an item to remove.
    #[error("insufficient {item}: requested {requested}, available {available}")]
    InsufficientItem {
        /// The item requested.
        item: ItemId,
        /// Units requested.
        requested: u32,
        /// Units held.
        available: u32,
    },
}
