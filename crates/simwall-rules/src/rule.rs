//! The [`AutomatonRule`] trait.

use simwall_core::{AgentSet, AutomatonKind, Grid, RuleError};

/// One automaton's transition function.
///
/// # Contract
///
/// - `step()` returns a grid with the same dimensions as its input.
/// - Rules hold no per-tick state. The only mutable state they touch is
///   the agent set passed in, and only Langton's Ant uses it.
/// - A grid holding a value outside the rule's tag range, or an agent
///   outside the grid, is an invariant violation and yields `Err`.
///
/// # Object safety
///
/// This trait is object-safe; the clock stores its rule as
/// `Box<dyn AutomatonRule>`.
///
/// # Examples
///
/// ```
/// use simwall_core::{AgentSet, Grid};
/// use simwall_rules::{AutomatonRule, GameOfLife};
///
/// let blinker = Grid::from_rows(&[vec![0, 1, 0], vec![0, 1, 0], vec![0, 1, 0]]).unwrap();
/// let next = GameOfLife.step(&blinker, &mut AgentSet::new()).unwrap();
/// assert_eq!(next.cells(), &[0, 0, 0, 1, 1, 1, 0, 0, 0]);
/// ```
pub trait AutomatonRule: Send + 'static {
    /// Human-readable name for logs and errors.
    fn name(&self) -> &str;

    /// Which automaton this rule implements.
    fn kind(&self) -> AutomatonKind;

    /// Number of valid cell tags, `0..state_count()`.
    fn state_count(&self) -> u8;

    /// Compute the next generation from `grid`.
    fn step(&self, grid: &Grid, agents: &mut AgentSet) -> Result<Grid, RuleError>;
}
