//! Langton's Ant agents, headings and turn rulesets.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::color::Rgba;
use crate::error::{RuleError, RulesetError};
use crate::grid::Dims;

/// Compass heading of an ant. Discriminants are clockwise quarter turns
/// from `Up`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Heading {
    /// Towards row 0.
    Up = 0,
    /// Towards the last column.
    Right = 1,
    /// Towards the last row.
    Down = 2,
    /// Towards column 0.
    Left = 3,
}

impl Heading {
    /// Heading from a clockwise quarter-turn count. Values wrap mod 4.
    pub fn from_index(i: u8) -> Self {
        match i % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    /// Clockwise quarter turns from `Up`.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Heading after applying `turn`.
    pub fn turn(self, turn: Turn) -> Self {
        Self::from_index(self.index() + turn.quarter_turns())
    }

    /// `(dx, dy)` of one step forward. `y` grows downwards.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// One ruleset symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// `L`: turn 90 degrees counter-clockwise.
    Left,
    /// `R`: turn 90 degrees clockwise.
    Right,
    /// `U`: turn around.
    UTurn,
    /// `C`: carry on straight.
    Continue,
}

impl Turn {
    /// Clockwise quarter turns this symbol applies.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Self::Continue => 0,
            Self::Right => 1,
            Self::UTurn => 2,
            Self::Left => 3,
        }
    }

    /// The ruleset character for this turn.
    pub fn symbol(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
            Self::UTurn => 'U',
            Self::Continue => 'C',
        }
    }

    /// Parse one ruleset character. Case-insensitive.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            'U' => Some(Self::UTurn),
            'C' => Some(Self::Continue),
            _ => None,
        }
    }
}

/// An ordered sequence of turns indexed by cell value.
///
/// A cell holding value `v` tells an ant standing on it to apply
/// `turns[v]`, after which the cell becomes `(v + 1) % len`.
///
/// ```
/// use simwall_core::{Ruleset, Turn};
///
/// let rs: Ruleset = "RL".parse().unwrap();
/// assert_eq!(rs.len(), 2);
/// assert_eq!(rs.turn_for(0), Turn::Right);
/// assert_eq!(rs.turn_for(1), Turn::Left);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ruleset {
    turns: SmallVec<[Turn; 8]>,
}

impl Ruleset {
    /// Longest accepted ruleset. Cell values are `u8`.
    pub const MAX_LEN: usize = u8::MAX as usize;

    /// Parse a ruleset string such as `"RL"` or `"LRRRRRLLR"`.
    ///
    /// Surrounding whitespace is ignored. Every other character must be
    /// one of `L`, `R`, `U`, `C`.
    pub fn parse(text: &str) -> Result<Self, RulesetError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RulesetError::Empty);
        }
        let turns = text
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Turn::from_symbol(symbol).ok_or(RulesetError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<SmallVec<[Turn; 8]>, _>>()?;
        if turns.len() > Self::MAX_LEN {
            return Err(RulesetError::TooLong {
                len: turns.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self { turns })
    }

    /// Number of symbols, also the number of distinct cell values.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always `false`: parsing rejects empty rulesets.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Cell tag count for an ant grid driven by this ruleset.
    pub fn state_count(&self) -> u8 {
        // MAX_LEN bounds the length to u8.
        self.turns.len() as u8
    }

    /// Turn applied on a cell holding `cell`. Values wrap mod `len`.
    pub fn turn_for(&self, cell: u8) -> Turn {
        self.turns[cell as usize % self.turns.len()]
    }

    /// Value a cell takes after an ant leaves it.
    pub fn next_value(&self, cell: u8) -> u8 {
        ((cell as usize + 1) % self.turns.len()) as u8
    }

    /// The turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

impl Default for Ruleset {
    /// Classic Langton's Ant, `RL`.
    fn default() -> Self {
        Self {
            turns: SmallVec::from_slice(&[Turn::Right, Turn::Left]),
        }
    }
}

impl FromStr for Ruleset {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.turns {
            write!(f, "{}", t.symbol())?;
        }
        Ok(())
    }
}

/// A single ant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Agent {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Facing direction.
    pub heading: Heading,
    /// Render colour.
    pub color: Rgba,
}

impl Agent {
    /// The default ant: grid centre, heading up, red.
    pub fn centered(dims: Dims) -> Self {
        let (x, y) = dims.center();
        Self {
            x,
            y,
            heading: Heading::Up,
            color: Rgba::RED,
        }
    }
}

/// An ordered collection of ants. Order decides who moves first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgentSet {
    agents: Vec<Agent>,
}

impl AgentSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ant.
    pub fn push(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Number of ants.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// True if there are no ants.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Ants in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    /// Mutable ants in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent> {
        self.agents.iter_mut()
    }

    /// Ants as a slice.
    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    /// Remove every ant.
    pub fn clear(&mut self) {
        self.agents.clear();
    }

    /// Fail on the first ant lying outside `dims`.
    pub fn check_bounds(&self, dims: Dims) -> Result<(), RuleError> {
        for (index, a) in self.agents.iter().enumerate() {
            if !dims.contains(a.x, a.y) {
                return Err(RuleError::AgentOutOfBounds {
                    index,
                    x: a.x,
                    y: a.y,
                    width: dims.width(),
                    height: dims.height(),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<Agent>> for AgentSet {
    fn from(agents: Vec<Agent>) -> Self {
        Self { agents }
    }
}

impl FromIterator<Agent> for AgentSet {
    fn from_iter<I: IntoIterator<Item = Agent>>(iter: I) -> Self {
        Self {
            agents: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AgentSet {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}
