//! Tick loop and command channel draining for the realtime simulation.
//!
//! The tick thread owns [`SimulationClock`] exclusively (moved in via
//! `thread::spawn`). No locks on the hot path: commands arrive via a
//! bounded crossbeam channel and replies go back via per-request
//! oneshot channels.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error, warn};

use crate::clock::{SimulationClock, StepError};
use crate::command::{Command, CommandError};
use crate::frame::FrameSink;

/// A command submitted by a user thread, paired with a reply channel.
pub(crate) struct CommandRequest {
    pub command: Command,
    pub reply: Sender<Result<(), CommandError>>,
}

/// What the tick thread hands back when it exits.
pub(crate) struct TickOutcome {
    pub clock: SimulationClock,
    pub error: Option<StepError>,
}

/// State held by the tick thread's main loop.
pub(crate) struct TickThreadState<S> {
    clock: SimulationClock,
    sink: S,
    cmd_rx: Receiver<CommandRequest>,
    shutdown_flag: Arc<AtomicBool>,
    tick_stopped: Arc<AtomicBool>,
    tick_budget: Duration,
}

impl<S: FrameSink> TickThreadState<S> {
    pub fn new(
        clock: SimulationClock,
        sink: S,
        cmd_rx: Receiver<CommandRequest>,
        shutdown_flag: Arc<AtomicBool>,
        tick_stopped: Arc<AtomicBool>,
        frame_rate: f64,
    ) -> Self {
        Self {
            clock,
            sink,
            cmd_rx,
            shutdown_flag,
            tick_stopped,
            tick_budget: Duration::try_from_secs_f64(1.0 / frame_rate).unwrap_or(Duration::MAX),
        }
    }

    /// Main tick loop. Runs until `shutdown_flag` is set or a tick fails.
    ///
    /// Consumes self and returns the clock so the owner can inspect the
    /// final state via `JoinHandle<TickOutcome>`.
    pub fn run(mut self) -> TickOutcome {
        let mut failure = None;
        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                break;
            }

            let tick_start = Instant::now();

            // 1. Drain command channel.
            self.drain_command_channel();

            // 2. Execute tick and publish.
            if let Err(e) = self.clock.tick(&mut self.sink) {
                error!(error = %e, tick = self.clock.tick_count(), "tick failed, stopping");
                failure = Some(e);
                break;
            }

            // 3. Park for the remaining budget. unpark() cuts it short.
            let elapsed = tick_start.elapsed();
            match self.tick_budget.checked_sub(elapsed) {
                Some(remaining) => std::thread::park_timeout(remaining),
                None => warn!(
                    elapsed_us = elapsed.as_micros() as u64,
                    budget_us = self.tick_budget.as_micros() as u64,
                    "tick overran its budget"
                ),
            }
        }

        debug!(tick = self.clock.tick_count(), "tick thread stopping");
        self.tick_stopped.store(true, Ordering::Release);
        TickOutcome {
            clock: self.clock,
            error: failure,
        }
    }

    /// Apply every pending command before the next tick.
    fn drain_command_channel(&mut self) {
        while let Ok(req) = self.cmd_rx.try_recv() {
            let result = self.clock.apply(req.command);
            // Best-effort reply: the caller may have dropped their receiver.
            let _ = req.reply.send(result);
        }
    }
}
