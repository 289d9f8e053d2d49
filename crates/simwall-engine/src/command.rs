//! Control commands applied between ticks.

use simwall_core::{Cell, GridError};
use thiserror::Error;

/// A request to change the running simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Stop advancing. Frames are still published.
    Pause,
    /// Continue advancing.
    Resume,
    /// Kill every cell.
    Clear,
    /// Overwrite one cell.
    SetCell {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
        /// New tag, which must be valid for the automaton.
        value: Cell,
    },
    /// Repopulate now, ignoring the stale check and the enabled switch.
    Restock,
    /// Rebuild the start state: fresh grid, original ants, counters reset.
    Restart,
}

/// A command that could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// `SetCell` named a cell off the grid or a tag the automaton lacks.
    #[error("cannot set cell: {0}")]
    InvalidCell(#[from] GridError),
}
