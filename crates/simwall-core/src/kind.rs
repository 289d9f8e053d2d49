//! The closed set of supported automata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which automaton a simulation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomatonKind {
    /// Conway's Game of Life (B3/S23).
    GameOfLife,
    /// Brian's Brain: alive -> dying -> dead, born on exactly two neighbours.
    BriansBrain,
    /// Seeds (B2/S): every live cell dies, born on exactly two neighbours.
    Seeds,
    /// Langton's Ant, generalised to arbitrary turn rulesets.
    LangtonsAnt,
}

impl AutomatonKind {
    /// Every variant, in declaration order.
    pub const ALL: [AutomatonKind; 4] = [
        AutomatonKind::GameOfLife,
        AutomatonKind::BriansBrain,
        AutomatonKind::Seeds,
        AutomatonKind::LangtonsAnt,
    ];

    /// Canonical snake_case name, as accepted by config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::GameOfLife => "game_of_life",
            Self::BriansBrain => "brians_brain",
            Self::Seeds => "seeds",
            Self::LangtonsAnt => "langtons_ant",
        }
    }

    /// True for the neighbour-counting automata (everything but the ant).
    pub fn is_life_like(self) -> bool {
        !matches!(self, Self::LangtonsAnt)
    }

    /// Number of cell tags, when fixed by the automaton.
    ///
    /// `None` for Langton's Ant, whose tag count is its ruleset length.
    pub fn fixed_state_count(self) -> Option<u8> {
        match self {
            Self::GameOfLife | Self::Seeds => Some(2),
            Self::BriansBrain => Some(3),
            Self::LangtonsAnt => None,
        }
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised automaton name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown automaton '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for AutomatonKind {
    type Err = UnknownKind;

    /// Accepts canonical names, short aliases (`gol`, `bb`, `ant`) and
    /// hyphenated spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        match norm.as_str() {
            "game_of_life" | "gol" | "life" => Ok(Self::GameOfLife),
            "brians_brain" | "bb" => Ok(Self::BriansBrain),
            "seeds" => Ok(Self::Seeds),
            "langtons_ant" | "ant" => Ok(Self::LangtonsAnt),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}
