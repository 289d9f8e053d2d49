//! Core types for the SimWall automaton engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! data model shared by every other crate in the workspace: grid
//! dimensions and storage, cell tags, edge behaviour, automaton kinds,
//! the Langton's Ant agent model, colours, and the error types raised by
//! grid construction and rule execution.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod cell;
pub mod color;
pub mod edge;
pub mod error;
pub mod grid;
pub mod kind;

pub use agent::{Agent, AgentSet, Heading, Ruleset, Turn};
pub use cell::Cell;
pub use color::Rgba;
pub use edge::EdgeBehavior;
pub use error::{ColorError, GridError, RuleError, RulesetError};
pub use grid::{Dims, Grid};
pub use kind::{AutomatonKind, UnknownKind};
