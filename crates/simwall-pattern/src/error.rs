//! Errors raised while reading pattern and ant definition files.

use std::io;
use std::path::PathBuf;

use simwall_core::{ColorError, GridError, RulesetError};
use thiserror::Error;

/// A pattern or ant file could not be turned into simulation input.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A grid pattern contained no digit cells.
    #[error("pattern contains no cells")]
    EmptyPattern,
    /// The digits could not form a grid.
    #[error("invalid pattern: {0}")]
    Grid(#[from] GridError),
    /// An ant file has no ruleset line.
    #[error("ant file is missing its ruleset line")]
    MissingRuleset,
    /// The ruleset line is not a valid ruleset.
    #[error("line 1: {source}")]
    InvalidRuleset {
        /// Parse failure.
        #[source]
        source: RulesetError,
    },
    /// An ant file has no palette line.
    #[error("ant file is missing its colour line")]
    MissingPalette,
    /// An explicit palette lists fewer colours than the ruleset needs.
    #[error("colour list has {found} colours, ruleset needs {needed}")]
    PaletteTooShort {
        /// Ruleset length.
        needed: usize,
        /// Colours supplied.
        found: usize,
    },
    /// A colour token is not RRGGBBAA hex.
    #[error("line {line}: {source}")]
    InvalidColor {
        /// Line holding the token.
        line: usize,
        /// Parse failure.
        #[source]
        source: ColorError,
    },
    /// An agent line does not read `x y heading RRGGBBAA`.
    #[error("line {line}: malformed agent ({reason})")]
    MalformedAgent {
        /// Offending line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// An ant file defines no agents.
    #[error("ant file defines no agents")]
    NoAgents,
}
