//! Error types for grid construction, rulesets, colours and rule execution.
//!
//! Grid, ruleset and colour errors are configuration errors: they are
//! raised while building the initial state and abort startup. A
//! [`RuleError`] is an invariant violation detected while stepping and
//! stops the simulation at the point of detection.

use thiserror::Error;

/// Errors arising from grid construction or cell access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Attempted to construct a grid with zero width or height.
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    /// A dimension exceeds the supported maximum.
    #[error("{name} {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension ("width" or "height").
        name: &'static str,
        /// The rejected value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// A flat cell buffer does not hold exactly `width * height` cells.
    #[error("cell buffer holds {actual} cells, expected {expected}")]
    SizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A coordinate lies outside the grid.
    #[error("coordinate ({x}, {y}) out of bounds for {width}x{height} grid")]
    CoordOutOfBounds {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A pattern is larger than the grid it should be centred in.
    #[error(
        "pattern {pattern_width}x{pattern_height} does not fit in {width}x{height} grid"
    )]
    PatternTooLarge {
        /// Pattern width.
        pattern_width: u32,
        /// Pattern height.
        pattern_height: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A cell holds a value outside the automaton's tag range.
    #[error("cell {index} holds {value}, valid tags are 0..{states}")]
    TagOutOfRange {
        /// Flat index of the offending cell.
        index: usize,
        /// The offending value.
        value: u8,
        /// Number of valid tags.
        states: u8,
    },
}

/// Errors from parsing a Langton's Ant ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesetError {
    /// The ruleset string has no symbols.
    #[error("ruleset is empty")]
    Empty,
    /// A symbol outside `L`, `R`, `U`, `C`.
    #[error("invalid rule symbol '{symbol}' at position {position}")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Zero-based position in the ruleset string.
        position: usize,
    },
    /// More symbols than distinct cell values.
    #[error("ruleset has {len} symbols, at most {max} are supported")]
    TooLong {
        /// Number of symbols given.
        len: usize,
        /// Largest supported ruleset.
        max: usize,
    },
}

/// Errors from parsing an RRGGBBAA colour token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Token is not exactly eight characters long.
    #[error("colour '{token}' must be 8 hex digits (RRGGBBAA)")]
    WrongLength {
        /// The rejected token.
        token: String,
    },
    /// Token contains a non-hex character.
    #[error("colour '{token}' contains non-hex digits")]
    NotHex {
        /// The rejected token.
        token: String,
    },
}

/// Invariant violations detected while executing a rule.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    /// An agent sits outside the grid.
    #[error("agent {index} at ({x}, {y}) is outside the {width}x{height} grid")]
    AgentOutOfBounds {
        /// Position of the agent in its set.
        index: usize,
        /// Agent column.
        x: u32,
        /// Agent row.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A rule produced a grid whose dimensions differ from its input.
    #[error("rule changed grid dimensions from {before} to {after}")]
    DimensionsChanged {
        /// Dimensions going in.
        before: crate::Dims,
        /// Dimensions coming out.
        after: crate::Dims,
    },
    /// A cell holds a value the rule has no transition for.
    #[error(transparent)]
    InvalidGrid(#[from] GridError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_error_messages_name_the_problem() {
        let e = GridError::SizeMismatch {
            expected: 12,
            actual: 10,
        };
        assert_eq!(e.to_string(), "cell buffer holds 10 cells, expected 12");

        let e = GridError::PatternTooLarge {
            pattern_width: 30,
            pattern_height: 3,
            width: 20,
            height: 20,
        };
        assert!(e.to_string().contains("30x3"));
    }

    #[test]
    fn rule_error_wraps_grid_error() {
        let e: RuleError = GridError::EmptyGrid.into();
        assert_eq!(
            e.to_string(),
            "grid must have at least one row and one column"
        );
    }
}
