//! Published frames and the [`FrameSink`] trait.
//!
//! A [`Frame`] borrows the clock's state after a tick. Sinks that need to
//! hand a frame to another thread copy it into an [`OwnedFrame`].

use std::sync::{Arc, Mutex, PoisonError};

use simwall_core::{Agent, AutomatonKind, Grid, Rgba};

use crate::config::RenderConfig;

/// The state a renderer needs to draw one tick.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Ticks executed so far. Paused ticks do not count.
    pub tick: u64,
    /// Automaton being run.
    pub kind: AutomatonKind,
    /// Cell values.
    pub grid: &'a Grid,
    /// Ants to draw over the grid. Empty for the life-like automata.
    pub agents: &'a [Agent],
    /// Colour per cell value, indexed by `value % palette.len()`.
    pub palette: &'a [Rgba],
    /// Presentation settings.
    pub render: &'a RenderConfig,
    /// Whether the simulation is paused.
    pub paused: bool,
}

impl Frame<'_> {
    /// Colour of the cell value at `(x, y)`, ignoring ants.
    pub fn cell_color(&self, x: u32, y: u32) -> Option<Rgba> {
        let value = self.grid.get(x, y)?;
        palette_color(self.palette, value)
    }

    /// Colour drawn at `(x, y)`: the last ant standing there, else the cell.
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgba> {
        self.agents
            .iter()
            .rev()
            .find(|a| a.x == x && a.y == y)
            .map(|a| a.color)
            .or_else(|| self.cell_color(x, y))
    }

    /// Window background colour, `palette[0]`.
    pub fn background(&self) -> Rgba {
        self.palette.first().copied().unwrap_or(Rgba::BLACK)
    }

    /// Copy into an [`OwnedFrame`].
    pub fn to_owned_frame(&self) -> OwnedFrame {
        OwnedFrame {
            tick: self.tick,
            kind: self.kind,
            grid: self.grid.clone(),
            agents: self.agents.to_vec(),
            palette: self.palette.to_vec(),
            render: self.render.clone(),
            paused: self.paused,
        }
    }
}

fn palette_color(palette: &[Rgba], value: u8) -> Option<Rgba> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[value as usize % palette.len()])
}

/// A [`Frame`] that owns its data.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedFrame {
    /// Ticks executed so far.
    pub tick: u64,
    /// Automaton being run.
    pub kind: AutomatonKind,
    /// Cell values.
    pub grid: Grid,
    /// Ants to draw over the grid.
    pub agents: Vec<Agent>,
    /// Colour per cell value.
    pub palette: Vec<Rgba>,
    /// Presentation settings.
    pub render: RenderConfig,
    /// Whether the simulation is paused.
    pub paused: bool,
}

impl OwnedFrame {
    /// Borrow as a [`Frame`].
    pub fn as_frame(&self) -> Frame<'_> {
        Frame {
            tick: self.tick,
            kind: self.kind,
            grid: &self.grid,
            agents: &self.agents,
            palette: &self.palette,
            render: &self.render,
            paused: self.paused,
        }
    }
}

/// Receives one frame per tick.
///
/// Called on the thread that drives the clock. Implementations should
/// return quickly; the tick budget includes publishing.
pub trait FrameSink {
    /// Accept the frame for the tick that just ran.
    fn publish(&mut self, frame: &Frame<'_>);
}

impl<F> FrameSink for F
where
    F: FnMut(&Frame<'_>),
{
    fn publish(&mut self, frame: &Frame<'_>) {
        self(frame)
    }
}

/// A sink that discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn publish(&mut self, _frame: &Frame<'_>) {}
}

/// Single-slot sink holding the most recent frame.
///
/// Clones share the slot: hand one clone to the tick thread and read from
/// another on the render thread. Older frames are overwritten, never
/// queued.
#[derive(Clone, Debug, Default)]
pub struct LatestFrame {
    slot: Arc<Mutex<Option<OwnedFrame>>>,
}

impl LatestFrame {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the latest frame, if any has been published.
    pub fn latest(&self) -> Option<OwnedFrame> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the latest frame.
    pub fn take(&self) -> Option<OwnedFrame> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Tick number of the latest frame.
    pub fn latest_tick(&self) -> Option<u64> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|f| f.tick)
    }
}

impl FrameSink for LatestFrame {
    fn publish(&mut self, frame: &Frame<'_>) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_mut() {
            // Reuse the grid buffer when the shape is unchanged.
            Some(owned) if owned.grid.dims() == frame.grid.dims() => {
                owned.grid.cells_mut().copy_from_slice(frame.grid.cells());
                owned.tick = frame.tick;
                owned.kind = frame.kind;
                owned.agents.clear();
                owned.agents.extend_from_slice(frame.agents);
                owned.palette.clear();
                owned.palette.extend_from_slice(frame.palette);
                owned.paused = frame.paused;
            }
            _ => *slot = Some(frame.to_owned_frame()),
        }
    }
}
