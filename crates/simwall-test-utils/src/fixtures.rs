//! Reusable rule fixtures.
//!
//! Three rules for exercising the engine around the real automata:
//!
//! - [`CountingRule`]: leaves the grid unchanged and counts calls.
//! - [`FailingRule`]: succeeds N times, then fails deterministically.
//! - [`ResizingRule`]: returns a grid one column wider than its input.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use simwall_core::{AgentSet, AutomatonKind, Dims, Grid, GridError, RuleError};
use simwall_rules::AutomatonRule;

/// Identity rule with a shared call counter.
pub struct CountingRule {
    calls: Arc<AtomicUsize>,
}

impl CountingRule {
    /// The rule plus a handle to read its call count from outside.
    pub fn with_counter() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl AutomatonRule for CountingRule {
    fn name(&self) -> &str {
        "counting"
    }

    fn kind(&self) -> AutomatonKind {
        AutomatonKind::GameOfLife
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn step(&self, grid: &Grid, _agents: &mut AgentSet) -> Result<Grid, RuleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(grid.clone())
    }
}

/// Returns the grid unchanged for `succeed_count` calls, then reports a
/// cell holding an impossible tag.
pub struct FailingRule {
    succeed_count: usize,
    calls: AtomicUsize,
}

impl FailingRule {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: AtomicUsize::new(0),
        }
    }
}

impl AutomatonRule for FailingRule {
    fn name(&self) -> &str {
        "failing"
    }

    fn kind(&self) -> AutomatonKind {
        AutomatonKind::GameOfLife
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn step(&self, grid: &Grid, _agents: &mut AgentSet) -> Result<Grid, RuleError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(RuleError::InvalidGrid(GridError::TagOutOfRange {
                index: 0,
                value: u8::MAX,
                states: 2,
            }));
        }
        Ok(grid.clone())
    }
}

/// Breaks the same-dimensions contract on every call.
pub struct ResizingRule;

impl AutomatonRule for ResizingRule {
    fn name(&self) -> &str {
        "resizing"
    }

    fn kind(&self) -> AutomatonKind {
        AutomatonKind::GameOfLife
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn step(&self, grid: &Grid, _agents: &mut AgentSet) -> Result<Grid, RuleError> {
        let wider = Dims::new(grid.width() + 1, grid.height())?;
        Ok(Grid::empty(wider))
    }
}
