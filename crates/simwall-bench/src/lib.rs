//! Benchmark profiles for the SimWall automata.
//!
//! Provides pre-built [`SimulationConfig`] profiles for benchmarking:
//!
//! - [`desktop_profile`]: 76x43 grid, a 1920x1080 screen at 25 px cells
//! - [`fullscreen_profile`]: 1920x1080 grid, one cell per pixel
//! - [`scatter_ants`]: deterministic ant placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use simwall_core::{Agent, AgentSet, AutomatonKind, Dims, Heading, Rgba};
use simwall_engine::{RestockConfig, SimulationConfig};

/// Screen size the profiles are derived from.
pub const SCREEN: (u32, u32) = (1920, 1080);

/// Default-sized board for `kind`, seeded for repeatable runs.
pub fn desktop_profile(kind: AutomatonKind, seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::new(kind, SCREEN.0 / 25, SCREEN.1 / 25)
    }
}

/// One cell per screen pixel, restocking off so every tick runs the rule
/// on the same population regime.
pub fn fullscreen_profile(kind: AutomatonKind, seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig {
        seed: Some(seed),
        restock: RestockConfig {
            enabled: false,
            ..RestockConfig::default()
        },
        ..SimulationConfig::new(kind, SCREEN.0, SCREEN.1)
    };
    config.render.cell_size = 1;
    config
}

/// Place `n` ants at distinct cells of `dims` using a simple hash of
/// `seed`. Headings cycle through all four directions.
pub fn scatter_ants(dims: Dims, n: usize, seed: u64) -> AgentSet {
    let cells = dims.cell_count() as u64;
    let mut occupied = HashSet::new();
    let mut ants = AgentSet::new();

    for i in 0..n.min(dims.cell_count()) as u64 {
        let mut pos = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i.wrapping_mul(1442695040888963407))
            % cells;
        // Linear probe to avoid collisions
        while !occupied.insert(pos) {
            pos = (pos + 1) % cells;
        }
        let width = u64::from(dims.width());
        ants.push(Agent {
            x: (pos % width) as u32,
            y: (pos / width) as u32,
            heading: Heading::from_index((i % 4) as u8),
            color: Rgba::RED,
        });
    }
    ants
}
