//! Lockstep (synchronous) simulation driver.
//!
//! [`SimulationClock`] owns the grid, the ants, the rule and the restock
//! policy. Each call to [`step()`](SimulationClock::step) runs one tick:
//! rule, then restock check, then returns a [`Frame`] borrowing the new
//! state. [`tick()`](SimulationClock::tick) does the same and hands the
//! frame to a [`FrameSink`].
//!
//! # Ownership model
//!
//! `SimulationClock` is [`Send`] (it can move onto a tick thread) but not
//! [`Sync`]. The frame returned by `step()` borrows from `self`, so the
//! next tick cannot start while a frame is still being read.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simwall_core::cell::ALIVE;
use simwall_core::{AgentSet, AutomatonKind, Dims, Grid, Rgba, RuleError};
use simwall_pattern::{load_agent_file, load_grid_file, AntDefinition};
use simwall_rules::{rule_for, AutomatonRule};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::command::{Command, CommandError};
use crate::config::{ConfigError, SimulationConfig};
use crate::frame::{Frame, FrameSink};
use crate::metrics::StepMetrics;
use crate::restock::{RestockPolicy, RestockReason, RestockState};

// Compile-time assertion: SimulationClock is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<SimulationClock>();
    }
};

// ── StepError ─────────────────────────────────────────────────────

/// An invariant violation that stops the simulation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// The rule rejected its input or produced a malformed grid.
    #[error("rule '{rule}' failed: {source}")]
    RuleFailed {
        /// Name of the failing rule.
        rule: String,
        /// What went wrong.
        #[source]
        source: RuleError,
    },
}

// ── ClockState ────────────────────────────────────────────────────

/// Lifecycle of a clock. Shutdown is external: the owner drops it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    /// Built, no tick run yet (or just restarted).
    Idle,
    /// At least one tick has run.
    Running,
}

// ── StepResult ────────────────────────────────────────────────────

/// Result of a successful [`SimulationClock::step()`] call.
#[derive(Debug)]
pub struct StepResult<'c> {
    /// Read-only view of the state after this tick.
    pub frame: Frame<'c>,
    /// Set when the restock policy replaced the grid this tick.
    pub restocked: Option<RestockReason>,
    /// Performance metrics for this tick. `publish_us` is always zero.
    pub metrics: StepMetrics,
}

// ── SimulationClock ───────────────────────────────────────────────

/// Single-threaded simulation driver.
///
/// Created from a [`SimulationConfig`] via [`new()`](SimulationClock::new),
/// which loads every input file and fails before any tick if the input is
/// bad.
///
/// # Example
///
/// ```
/// use simwall_core::AutomatonKind;
/// use simwall_engine::{SimulationClock, SimulationConfig};
///
/// let config = SimulationConfig {
///     seed: Some(42),
///     ..SimulationConfig::new(AutomatonKind::GameOfLife, 32, 32)
/// };
/// let mut clock = SimulationClock::new(config).unwrap();
/// for _ in 0..10 {
///     let result = clock.step().unwrap();
///     assert_eq!(result.frame.grid.width(), 32);
/// }
/// assert_eq!(clock.tick_count(), 10);
/// ```
pub struct SimulationClock {
    config: SimulationConfig,
    dims: Dims,
    rule: Box<dyn AutomatonRule>,
    policy: RestockPolicy,
    grid: Grid,
    agents: AgentSet,
    initial_agents: AgentSet,
    palette: Vec<Rgba>,
    rng: ChaCha8Rng,
    seed: u64,
    tick: u64,
    restock: RestockState,
    state: ClockState,
    paused: bool,
}

impl SimulationClock {
    /// Build a clock, loading the pattern and ant files named in `config`.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: invalid settings, unreadable or malformed
    /// files, a pattern that does not fit the grid or holds tags the
    /// automaton lacks, or ants placed off the grid.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::build(config, None)
    }

    /// Like [`new()`](Self::new) but stepping with `rule` instead of the
    /// rule for `config.kind`. Ant files and palettes still follow
    /// `config.kind`.
    pub fn with_rule(
        config: SimulationConfig,
        rule: Box<dyn AutomatonRule>,
    ) -> Result<Self, ConfigError> {
        Self::build(config, Some(rule))
    }

    fn build(
        config: SimulationConfig,
        custom_rule: Option<Box<dyn AutomatonRule>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dims = config.dims()?;

        let ants = match (config.kind, &config.ant_path) {
            (AutomatonKind::LangtonsAnt, Some(path)) => {
                let def = load_agent_file(path)?;
                def.agents.check_bounds(dims)?;
                Some(def)
            }
            (AutomatonKind::LangtonsAnt, None) => {
                let mut def = AntDefinition::single_centered(dims, config.ruleset()?);
                for a in def.agents.iter_mut() {
                    a.color = config.render.ant;
                }
                Some(def)
            }
            _ => None,
        };

        let (ruleset, agents, palette) = match ants {
            Some(def) => (def.ruleset, def.agents, def.palette),
            None => (
                config.ruleset().unwrap_or_default(),
                AgentSet::new(),
                config.render.life_palette(),
            ),
        };
        let rule =
            custom_rule.unwrap_or_else(|| rule_for(config.kind, &ruleset, config.ant_update));

        let pattern = match &config.pattern_path {
            Some(path) => {
                let loaded = load_grid_file(path)?;
                let centred = Grid::centered_from_pattern(dims, &loaded)?;
                centred.validate_tags(rule.state_count())?;
                Some(centred)
            }
            None => None,
        };

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let policy = RestockPolicy::new(&config, dims, pattern);
        let grid = policy.initial_grid(&mut rng);

        info!(
            kind = %config.kind,
            %dims,
            seed,
            agents = agents.len(),
            restock = policy.is_enabled(),
            "simulation ready"
        );

        Ok(Self {
            dims,
            rule,
            policy,
            grid,
            initial_agents: agents.clone(),
            agents,
            palette,
            rng,
            seed,
            tick: 0,
            restock: RestockState::default(),
            state: ClockState::Idle,
            paused: false,
            config,
        })
    }

    /// Run one tick and return a view of the result.
    ///
    /// While paused, nothing advances and the current state is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] if the rule detects an invariant violation.
    /// The grid and counters are left as they were before the tick.
    pub fn step(&mut self) -> Result<StepResult<'_>, StepError> {
        let start = Instant::now();
        let mut metrics = StepMetrics::default();
        let mut restocked = None;

        if !self.paused {
            self.state = ClockState::Running;

            let rule_start = Instant::now();
            let next = self
                .rule
                .step(&self.grid, &mut self.agents)
                .and_then(|g| {
                    if g.dims() == self.dims {
                        Ok(g)
                    } else {
                        Err(RuleError::DimensionsChanged {
                            before: self.dims,
                            after: g.dims(),
                        })
                    }
                })
                .map_err(|source| StepError::RuleFailed {
                    rule: self.rule.name().to_string(),
                    source,
                })?;
            metrics.rule_us = rule_start.elapsed().as_micros() as u64;

            self.restock.iterations_since_reset += 1;
            let restock_start = Instant::now();
            let (grid, reason) = self.policy.check(next, &mut self.restock, &mut self.rng);
            self.grid = grid;
            restocked = reason;
            metrics.restock_us = restock_start.elapsed().as_micros() as u64;

            self.tick += 1;
        }

        metrics.live_cells = self.grid.count(ALIVE);
        metrics.life_fraction = self.grid.life_fraction(ALIVE);
        metrics.iterations_since_reset = self.restock.iterations_since_reset;
        metrics.restocks_total = self.restock.restocks;
        metrics.total_us = start.elapsed().as_micros() as u64;

        trace!(
            tick = self.tick,
            live = metrics.live_cells,
            rule_us = metrics.rule_us,
            paused = self.paused,
            "tick"
        );

        Ok(StepResult {
            frame: self.frame(),
            restocked,
            metrics,
        })
    }

    /// Run one tick and publish the resulting frame to `sink`.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<StepMetrics, StepError> {
        let result = self.step()?;
        let publish_start = Instant::now();
        sink.publish(&result.frame);
        let mut metrics = result.metrics;
        metrics.publish_us = publish_start.elapsed().as_micros() as u64;
        metrics.total_us += metrics.publish_us;
        Ok(metrics)
    }

    /// Apply a control command between ticks.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        debug!(?command, "applying command");
        match command {
            Command::Pause => self.paused = true,
            Command::Resume => self.paused = false,
            Command::Clear => {
                self.grid.clear();
                self.restock.iterations_since_reset = 0;
            }
            Command::SetCell { x, y, value } => {
                let states = self.rule.state_count();
                if value >= states {
                    return Err(simwall_core::GridError::TagOutOfRange {
                        index: self.dims.index(x, y).unwrap_or(usize::MAX),
                        value,
                        states,
                    }
                    .into());
                }
                self.grid.set(x, y, value)?;
            }
            Command::Restock => {
                if self.config.kind.is_life_like() {
                    let grid = std::mem::replace(&mut self.grid, Grid::empty(self.dims));
                    self.grid = self.policy.replenish(grid, &mut self.rng);
                    self.restock.iterations_since_reset = 0;
                    self.restock.restocks += 1;
                    debug!(reason = ?RestockReason::Requested, "restocked on request");
                }
            }
            Command::Restart => self.restart(),
        }
        Ok(())
    }

    /// Rebuild the start state. The RNG keeps its position, so a restart
    /// gives a fresh random board rather than a replay.
    pub fn restart(&mut self) {
        self.grid = self.policy.initial_grid(&mut self.rng);
        self.agents = self.initial_agents.clone();
        self.restock.iterations_since_reset = 0;
        self.tick = 0;
        self.state = ClockState::Idle;
        info!(kind = %self.config.kind, seed = self.seed, "simulation restarted");
    }

    /// A view of the current state.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.tick,
            kind: self.config.kind,
            grid: &self.grid,
            agents: self.agents.as_slice(),
            palette: &self.palette,
            render: &self.config.render,
            paused: self.paused,
        }
    }

    /// Live fraction of the current grid.
    pub fn measure_life(&self) -> f64 {
        self.grid.life_fraction(ALIVE)
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current ants.
    pub fn agents(&self) -> &AgentSet {
        &self.agents
    }

    /// Ticks executed since construction or the last restart.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Restock bookkeeping.
    pub fn restock_state(&self) -> RestockState {
        self.restock
    }

    /// Lifecycle state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Whether ticks are currently frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The RNG seed in use.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The configuration this clock was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The active rule.
    pub fn rule(&self) -> &dyn AutomatonRule {
        self.rule.as_ref()
    }
}

impl std::fmt::Debug for SimulationClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationClock")
            .field("kind", &self.config.kind)
            .field("dims", &self.dims)
            .field("tick", &self.tick)
            .field("state", &self.state)
            .field("paused", &self.paused)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
