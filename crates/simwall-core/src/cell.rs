//! Cell values and the tags shared by the life-like automata.

/// The value stored in one grid cell.
///
/// For the life-like automata this is a state tag ([`DEAD`], [`ALIVE`],
/// [`DYING`]). For Langton's Ant it is the step count of the cell modulo
/// the ruleset length, which selects a palette colour.
pub type Cell = u8;

/// Dead (or "ready" in Brian's Brain).
pub const DEAD: Cell = 0;

/// Alive.
pub const ALIVE: Cell = 1;

/// Dying. Only reachable in Brian's Brain.
pub const DYING: Cell = 2;
