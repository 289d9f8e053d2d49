//! Simulation engine for SimWall.
//!
//! Owns the grid, the ants, the automaton rule and the restock policy,
//! and advances them one tick at a time. Supports both lockstep
//! ([`SimulationClock`], driven by the caller) and realtime
//! ([`RealtimeSimulation`], ticking on its own thread at the configured
//! frame rate) modes. Every tick is published as a [`Frame`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod command;
pub mod config;
pub mod frame;
pub mod metrics;
pub mod realtime;
pub mod restock;
pub(crate) mod tick_thread;

pub use clock::{ClockState, SimulationClock, StepError, StepResult};
pub use command::{Command, CommandError};
pub use config::{
    ConfigError, RenderConfig, RestockConfig, RestockStrategy, Shape, SimulationConfig,
};
pub use frame::{Frame, FrameSink, LatestFrame, NullSink, OwnedFrame};
pub use metrics::StepMetrics;
pub use realtime::{RealtimeSimulation, ShutdownError, SpawnError, StoppedSimulation, SubmitError};
pub use restock::{RestockPolicy, RestockReason, RestockState};
