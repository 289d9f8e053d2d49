//! SimWall: cellular automata for animated wallpapers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all SimWall sub-crates. For most users, adding `simwall` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use simwall::prelude::*;
//!
//! let config = SimulationConfig {
//!     seed: Some(7),
//!     ..SimulationConfig::new(AutomatonKind::BriansBrain, 64, 36)
//! };
//! let mut clock = SimulationClock::new(config).unwrap();
//! let mut frames = 0;
//! let mut sink = |frame: &Frame<'_>| {
//!     assert_eq!(frame.palette.len(), 3);
//!     frames += 1;
//! };
//! for _ in 0..10 {
//!     clock.tick(&mut sink).unwrap();
//! }
//! assert_eq!(frames, 10);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `simwall-core` | Grid, cells, colours, ants, errors |
//! | [`pattern`] | `simwall-pattern` | Pattern and ant definition files |
//! | [`rules`] | `simwall-rules` | The `AutomatonRule` trait and the four automata |
//! | [`engine`] | `simwall-engine` | Clock, restock policy, realtime tick thread |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid, cell tags, colours, ants and error types (`simwall-core`).
pub use simwall_core as types;

/// Pattern and ant definition file loading (`simwall-pattern`).
///
/// [`pattern::load_grid_file`] reads digit grids,
/// [`pattern::load_agent_file`] reads Langton's Ant definitions.
pub use simwall_pattern as pattern;

/// Transition rules (`simwall-rules`).
///
/// [`rules::AutomatonRule`] is the extension point; [`rules::rule_for`]
/// picks the built-in rule for an automaton kind.
pub use simwall_rules as rules;

/// Simulation drivers (`simwall-engine`).
///
/// [`engine::SimulationClock`] for caller-driven stepping,
/// [`engine::RealtimeSimulation`] for ticking on a background thread.
pub use simwall_engine as engine;

/// Common imports for typical SimWall usage.
///
/// ```rust
/// use simwall::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use simwall_core::{
        Agent, AgentSet, AutomatonKind, Cell, Dims, EdgeBehavior, Grid, Heading, Rgba, Ruleset,
        Turn,
    };

    // Errors
    pub use simwall_core::{GridError, RuleError};
    pub use simwall_pattern::PatternError;

    // Rules
    pub use simwall_rules::{AntUpdate, AutomatonRule};

    // Engine
    pub use simwall_engine::{
        Command, ConfigError, Frame, FrameSink, LatestFrame, RealtimeSimulation, RestockReason,
        SimulationClock, SimulationConfig, StepError, StepMetrics, StepResult,
    };
}
