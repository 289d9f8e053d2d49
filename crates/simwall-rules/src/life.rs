//! The three neighbour-counting automata.

use simwall_core::cell::{ALIVE, DEAD, DYING};
use simwall_core::{AgentSet, AutomatonKind, Grid, RuleError};

use crate::neighbourhood::step_cells;
use crate::rule::AutomatonRule;

/// Conway's Game of Life, B3/S23 with hard edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameOfLife;

impl AutomatonRule for GameOfLife {
    fn name(&self) -> &str {
        "game_of_life"
    }

    fn kind(&self) -> AutomatonKind {
        AutomatonKind::GameOfLife
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn step(&self, grid: &Grid, _agents: &mut AgentSet) -> Result<Grid, RuleError> {
        Ok(step_cells(grid, self.state_count(), |cell, n| match (cell, n) {
            (ALIVE, 2 | 3) | (DEAD, 3) => Some(ALIVE),
            (ALIVE | DEAD, _) => Some(DEAD),
            _ => None,
        })?)
    }
}

/// Brian's Brain: dead cells fire on exactly two alive neighbours, alive
/// cells always start dying, dying cells always die.
#[derive(Clone, Copy, Debug, Default)]
pub struct BriansBrain;

impl AutomatonRule for BriansBrain {
    fn name(&self) -> &str {
        "brians_brain"
    }

    fn kind(&self) -> AutomatonKind {
        AutomatonKind::BriansBrain
    }

    fn state_count(&self) -> u8 {
        3
    }

    fn step(&self, grid: &Grid, _agents: &mut AgentSet) -> Result<Grid, RuleError> {
        Ok(step_cells(grid, self.state_count(), |cell, n| match cell {
            DEAD if n == 2 => Some(ALIVE),
            DEAD => Some(DEAD),
            ALIVE => Some(DYING),
            DYING => Some(DEAD),
            _ => None,
        })?)
    }
}

/// Seeds, B2/S: every live cell dies, dead cells are born on exactly two
/// live neighbours.
#[derive(Clone, Copy, Debug, Default)]
pub struct Seeds;

impl AutomatonRule for Seeds {
    fn name(&self) -> &str {
        "seeds"
    }

    fn kind(&self) -> AutomatonKind {
        AutomatonKind::Seeds
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn step(&self, grid: &Grid, _agents: &mut AgentSet) -> Result<Grid, RuleError> {
        Ok(step_cells(grid, self.state_count(), |cell, n| match cell {
            DEAD if n == 2 => Some(ALIVE),
            DEAD | ALIVE => Some(DEAD),
            _ => None,
        })?)
    }
}
