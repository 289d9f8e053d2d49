//! Stale-board detection and repopulation.
//!
//! Each automaton goes stale differently. Game of Life and Brian's Brain
//! are stale once live cells fall to a small fraction of the board, but
//! only after an iteration gate so a fresh restock has time to develop.
//! Brian's Brain counts its dying cells as life too.
//! Seeds explodes or fizzles quickly, so it simply restarts from a small
//! seed every 100 iterations. Langton's Ant never restocks.

use rand::Rng;
use simwall_core::cell::ALIVE;
use simwall_core::{AutomatonKind, Dims, Grid};
use tracing::debug;

use crate::config::{RestockStrategy, SimulationConfig};

/// Iterations a life-fraction automaton must run before it can be stale.
pub const LIFE_GATE: u64 = 150;

/// Iterations after which Seeds restarts.
pub const SEEDS_PERIOD: u64 = 100;

/// Game of Life goes stale at or below this live fraction.
pub const GOL_THRESHOLD: f64 = 0.05;

/// Brian's Brain goes stale at or below this value density.
///
/// Dying cells count towards it, see [`Grid::value_density`].
pub const BB_THRESHOLD: f64 = GOL_THRESHOLD / 3.0;

/// Per-run restock bookkeeping, owned by the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestockState {
    /// Ticks since the last restock or restart.
    pub iterations_since_reset: u64,
    /// Restocks since the clock was built.
    pub restocks: u64,
}

/// Why a grid was restocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestockReason {
    /// Live fraction fell to the automaton's threshold.
    LowLife,
    /// Seeds reached its iteration period.
    IterationLimit,
    /// A control command asked for it.
    Requested,
}

/// Decides when a grid has gone stale and what replaces it.
#[derive(Clone, Debug)]
pub struct RestockPolicy {
    kind: AutomatonKind,
    dims: Dims,
    enabled: bool,
    start_empty: bool,
    strategy: RestockStrategy,
    percent_alive: u8,
    pattern: Option<Grid>,
}

impl RestockPolicy {
    /// Build from config. `pattern` is the start pattern already centred
    /// in a grid of size `dims`, if one was loaded.
    pub fn new(config: &SimulationConfig, dims: Dims, pattern: Option<Grid>) -> Self {
        Self {
            kind: config.kind,
            dims,
            enabled: config.restock.enabled,
            start_empty: config.restock.start_empty,
            strategy: config.restock.strategy,
            percent_alive: config.percent_alive,
            pattern,
        }
    }

    /// Whether this policy can ever replace a grid on its own.
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.kind.is_life_like()
    }

    /// The grid a run starts from.
    pub fn initial_grid<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        if self.start_empty {
            return Grid::empty(self.dims);
        }
        if let Some(p) = &self.pattern {
            return p.clone();
        }
        match self.kind {
            AutomatonKind::GameOfLife | AutomatonKind::BriansBrain => {
                Grid::random_uniform(self.dims, self.percent_alive, rng)
            }
            AutomatonKind::Seeds => Grid::small_random(self.dims, rng),
            AutomatonKind::LangtonsAnt => Grid::empty(self.dims),
        }
    }

    /// Whether `grid` is stale after `iterations` ticks.
    pub fn should_restock(&self, grid: &Grid, iterations: u64) -> Option<RestockReason> {
        if !self.enabled {
            return None;
        }
        match self.kind {
            AutomatonKind::GameOfLife => (iterations > LIFE_GATE
                && grid.life_fraction(ALIVE) <= GOL_THRESHOLD)
                .then_some(RestockReason::LowLife),
            AutomatonKind::BriansBrain => (iterations > LIFE_GATE
                && grid.value_density() <= BB_THRESHOLD)
                .then_some(RestockReason::LowLife),
            AutomatonKind::Seeds => {
                (iterations >= SEEDS_PERIOD).then_some(RestockReason::IterationLimit)
            }
            AutomatonKind::LangtonsAnt => None,
        }
    }

    /// Repopulate `grid` according to the strategy.
    ///
    /// Langton's Ant grids are returned untouched.
    pub fn replenish<R: Rng + ?Sized>(&self, mut grid: Grid, rng: &mut R) -> Grid {
        match (self.kind, self.strategy) {
            (AutomatonKind::LangtonsAnt, _) => grid,
            _ if self.start_empty => Grid::empty(self.dims),
            (AutomatonKind::GameOfLife | AutomatonKind::BriansBrain, RestockStrategy::Sprinkle) => {
                grid.sprinkle(self.percent_alive, rng);
                grid
            }
            _ => self.initial_grid(rng),
        }
    }

    /// Check `grid` and replace it if stale.
    ///
    /// The clock counts the tick in `state` before calling this. On
    /// restock, resets the iteration counter and bumps the restock total.
    pub fn check<R: Rng + ?Sized>(
        &self,
        grid: Grid,
        state: &mut RestockState,
        rng: &mut R,
    ) -> (Grid, Option<RestockReason>) {
        match self.should_restock(&grid, state.iterations_since_reset) {
            Some(reason) => {
                debug!(
                    kind = %self.kind,
                    iterations = state.iterations_since_reset,
                    life = grid.value_density(),
                    ?reason,
                    "restocking"
                );
                state.iterations_since_reset = 0;
                state.restocks += 1;
                (self.replenish(grid, rng), Some(reason))
            }
            None => (grid, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RestockConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn policy(kind: AutomatonKind, restock: RestockConfig) -> RestockPolicy {
        let config = SimulationConfig {
            restock,
            ..SimulationConfig::new(kind, 10, 10)
        };
        RestockPolicy::new(&config, config.dims().unwrap(), None)
    }

    /// A 10x10 grid with exactly `alive` live cells.
    fn grid_with(alive: usize) -> Grid {
        let dims = Dims::new(10, 10).unwrap();
        let mut cells = vec![0; 100];
        cells[..alive].fill(ALIVE);
        Grid::from_cells(dims, cells).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    // ── Game of Life ────────────────────────────────────────────

    #[test]
    fn gol_restocks_sparse_board_after_gate() {
        let p = policy(AutomatonKind::GameOfLife, RestockConfig::default());
        let mut state = RestockState {
            iterations_since_reset: 200,
            restocks: 0,
        };
        let (g, reason) = p.check(grid_with(1), &mut state, &mut rng());
        assert_eq!(reason, Some(RestockReason::LowLife));
        assert_eq!(state.iterations_since_reset, 0);
        assert_eq!(state.restocks, 1);
        assert_ne!(g, grid_with(1));
    }

    #[test]
    fn gol_waits_for_gate_even_when_empty() {
        let p = policy(AutomatonKind::GameOfLife, RestockConfig::default());
        assert_eq!(p.should_restock(&grid_with(0), 10), None);
        assert_eq!(p.should_restock(&grid_with(0), LIFE_GATE), None);
        assert_eq!(
            p.should_restock(&grid_with(0), LIFE_GATE + 1),
            Some(RestockReason::LowLife)
        );
    }

    #[test]
    fn gol_threshold_is_inclusive() {
        let p = policy(AutomatonKind::GameOfLife, RestockConfig::default());
        assert!(p.should_restock(&grid_with(5), 200).is_some());
        assert!(p.should_restock(&grid_with(6), 200).is_none());
    }

    // ── Brian's Brain ───────────────────────────────────────────

    #[test]
    fn brians_brain_uses_stricter_threshold() {
        let p = policy(AutomatonKind::BriansBrain, RestockConfig::default());
        // 1% is under 5%/3, 2% is not.
        assert!(p.should_restock(&grid_with(1), 200).is_some());
        assert!(p.should_restock(&grid_with(2), 200).is_none());
    }

    #[test]
    fn brians_brain_counts_dying_cells_as_life() {
        let p = policy(AutomatonKind::BriansBrain, RestockConfig::default());
        let mut g = grid_with(0);
        g.cells_mut()[..50].fill(simwall_core::cell::DYING);
        assert_eq!(p.should_restock(&g, 200), None);

        // One dying cell weighs 0.02, above the 0.0167 bar.
        let mut g = grid_with(0);
        g.cells_mut()[0] = simwall_core::cell::DYING;
        assert_eq!(p.should_restock(&g, 200), None);
        assert_eq!(
            p.should_restock(&grid_with(0), 200),
            Some(RestockReason::LowLife)
        );
    }

    // ── Seeds ───────────────────────────────────────────────────

    #[test]
    fn seeds_restarts_on_period_regardless_of_life() {
        let p = policy(AutomatonKind::Seeds, RestockConfig::default());
        assert_eq!(p.should_restock(&grid_with(100), 99), None);
        assert_eq!(
            p.should_restock(&grid_with(100), 100),
            Some(RestockReason::IterationLimit)
        );
    }

    #[test]
    fn seeds_regenerates_small_seed_even_with_sprinkle() {
        let p = policy(
            AutomatonKind::Seeds,
            RestockConfig {
                strategy: RestockStrategy::Sprinkle,
                ..RestockConfig::default()
            },
        );
        let g = p.replenish(grid_with(100), &mut rng());
        // Only the 7x7 centre block can be alive.
        assert!(g.count(ALIVE) <= 49);
    }

    // ── Langton's Ant ───────────────────────────────────────────

    #[test]
    fn ant_never_restocks() {
        let p = policy(AutomatonKind::LangtonsAnt, RestockConfig::default());
        assert!(!p.is_enabled());
        assert_eq!(p.should_restock(&grid_with(0), u64::MAX), None);
        let mut state = RestockState::default();
        let (_, reason) = p.check(grid_with(0), &mut state, &mut rng());
        assert_eq!(reason, None);
        assert_eq!(state, RestockState::default());
    }

    // ── Switches ────────────────────────────────────────────────

    #[test]
    fn disabled_policy_never_restocks() {
        let p = policy(
            AutomatonKind::GameOfLife,
            RestockConfig {
                enabled: false,
                ..RestockConfig::default()
            },
        );
        assert_eq!(p.should_restock(&grid_with(0), 10_000), None);
    }

    #[test]
    fn start_empty_keeps_board_clean() {
        let p = policy(
            AutomatonKind::GameOfLife,
            RestockConfig {
                start_empty: true,
                ..RestockConfig::default()
            },
        );
        assert_eq!(p.initial_grid(&mut rng()).count(ALIVE), 0);
        assert_eq!(p.replenish(grid_with(3), &mut rng()).count(ALIVE), 0);
    }

    #[test]
    fn sprinkle_keeps_existing_life() {
        let p = policy(
            AutomatonKind::GameOfLife,
            RestockConfig {
                strategy: RestockStrategy::Sprinkle,
                ..RestockConfig::default()
            },
        );
        let g = p.replenish(grid_with(3), &mut rng());
        assert!(g.cells()[..3].iter().all(|&c| c == ALIVE));
        assert!(g.count(ALIVE) >= 3);
    }

    #[test]
    fn pattern_is_reused_on_regenerate() {
        let config = SimulationConfig::new(AutomatonKind::GameOfLife, 10, 10);
        let dims = config.dims().unwrap();
        let pattern = grid_with(7);
        let p = RestockPolicy::new(&config, dims, Some(pattern.clone()));
        assert_eq!(p.initial_grid(&mut rng()), pattern);
        assert_eq!(p.replenish(grid_with(0), &mut rng()), pattern);
    }
}
