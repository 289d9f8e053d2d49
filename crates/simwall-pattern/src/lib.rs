//! Loaders for SimWall's two input file formats.
//!
//! - **Grid patterns**: digit-per-cell text, one row per line
//!   ([`parse_grid`], [`load_grid_file`]).
//! - **Ant definitions**: a ruleset line, a palette line and one agent per
//!   line after that ([`parse_ant_definition`], [`load_agent_file`]).
//!
//! Loading is pure parsing. Fitting a pattern into a simulation grid and
//! checking agents against grid bounds happen at simulation startup.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ant_file;
pub mod error;
pub mod grid_file;

pub use ant_file::{grey_palette, load_agent_file, parse_ant_definition, AntDefinition};
pub use error::PatternError;
pub use grid_file::{load_grid_file, parse_grid};
