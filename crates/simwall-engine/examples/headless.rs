//! SimWall headless: run an automaton and print frames to the terminal.
//!
//! Demonstrates:
//!   1. Loading a `SimulationConfig` from TOML (or using defaults)
//!   2. Driving a `RealtimeSimulation` with a `LatestFrame` sink
//!   3. Sending control commands between ticks
//!   4. Shutting down and inspecting the recovered clock
//!
//! Run with:
//!   cargo run --example headless -- [config.toml]
//!
//! Set `RUST_LOG=simwall_engine=debug` to see restock decisions.

use std::time::Duration;

use simwall_core::AutomatonKind;
use simwall_engine::{Command, LatestFrame, OwnedFrame, RealtimeSimulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

// ─── Terminal-sized defaults ────────────────────────────────────

const WIDTH: u32 = 60;
const HEIGHT: u32 = 20;
const FRAMES_SHOWN: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig {
            frame_rate: 20.0,
            ..SimulationConfig::new(AutomatonKind::BriansBrain, WIDTH, HEIGHT)
        },
    };
    println!("running {} on {}x{}", config.kind, config.width, config.height);

    let frames = LatestFrame::new();
    let mut sim = RealtimeSimulation::spawn(config, frames.clone())?;

    let mut last_tick = None;
    let mut shown = 0;
    while shown < FRAMES_SHOWN {
        std::thread::sleep(Duration::from_millis(250));
        let Some(frame) = frames.latest() else {
            continue;
        };
        if Some(frame.tick) == last_tick {
            continue;
        }
        last_tick = Some(frame.tick);
        print_frame(&frame);
        shown += 1;

        if shown == 2 {
            sim.submit(Command::Pause)??;
            println!("-- paused --");
            std::thread::sleep(Duration::from_millis(500));
            sim.submit(Command::Resume)??;
        }
    }

    let stopped = sim.shutdown()?;
    let restock = stopped.clock.restock_state();
    println!(
        "stopped after {} ticks, {} restocks, seed {}",
        stopped.clock.tick_count(),
        restock.restocks,
        stopped.clock.seed()
    );
    if let Some(e) = stopped.error {
        return Err(e.into());
    }
    Ok(())
}

/// One character per cell: `@` for an ant, `#` alive, `+` dying or a
/// non-zero ant cell, `.` for the background.
fn print_frame(owned: &OwnedFrame) {
    let frame = owned.as_frame();
    println!("tick {}{}", frame.tick, if frame.paused { " (paused)" } else { "" });
    for y in 0..frame.grid.height() {
        let line: String = (0..frame.grid.width())
            .map(|x| {
                if frame.agents.iter().any(|a| a.x == x && a.y == y) {
                    return '@';
                }
                match frame.grid.get(x, y) {
                    Some(0) | None => '.',
                    Some(1) if frame.kind.is_life_like() => '#',
                    Some(_) => '+',
                }
            })
            .collect();
        println!("{line}");
    }
    println!();
}
