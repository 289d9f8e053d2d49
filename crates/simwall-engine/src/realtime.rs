//! User-facing [`RealtimeSimulation`] API and shutdown handling.
//!
//! The clock runs on a dedicated background thread at the configured
//! frame rate and publishes every tick to a [`FrameSink`]. Control
//! commands travel over a bounded channel and are applied between ticks.
//!
//! ```text
//! User Thread(s)              Tick Thread
//!     |                           |
//!     |--submit()---------------->| cmd_rx.try_recv()
//!     |   [cmd_tx: bounded(64)]   | clock.apply()
//!     |<--result via reply_tx-----| clock.tick(sink)
//!     |                           | park(budget - elapsed)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::clock::{SimulationClock, StepError};
use crate::command::{Command, CommandError};
use crate::config::{ConfigError, SimulationConfig};
use crate::frame::FrameSink;
use crate::tick_thread::{CommandRequest, TickOutcome, TickThreadState};

/// Capacity of the command channel.
const COMMAND_CAPACITY: usize = 64;

/// How long `shutdown()` waits for the tick thread to notice the flag
/// before joining anyway.
const DRAIN_BUDGET: Duration = Duration::from_millis(100);

// ── Error types ──────────────────────────────────────────────────

/// Error submitting a command to the tick thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The tick thread has shut down.
    #[error("tick thread has shut down")]
    Shutdown,
    /// The command channel is full (back-pressure).
    #[error("command channel full")]
    ChannelFull,
}

/// Error stopping the tick thread.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// `shutdown()` already ran.
    #[error("simulation already shut down")]
    AlreadyShutdown,
    /// The tick thread panicked; the clock is lost.
    #[error("tick thread panicked")]
    TickThreadPanicked,
}

// ── StoppedSimulation ────────────────────────────────────────────

/// The clock recovered from a stopped tick thread.
#[derive(Debug)]
pub struct StoppedSimulation {
    /// Final state. Can be stepped again synchronously.
    pub clock: SimulationClock,
    /// The failure that stopped the thread early, if any.
    pub error: Option<StepError>,
    /// Time spent in the shutdown sequence, in milliseconds.
    pub shutdown_ms: u64,
}

// ── RealtimeSimulation ───────────────────────────────────────────

/// A simulation ticking on its own thread.
///
/// Dropping it stops the thread.
pub struct RealtimeSimulation {
    cmd_tx: Option<crossbeam_channel::Sender<CommandRequest>>,
    shutdown_flag: Arc<AtomicBool>,
    tick_stopped: Arc<AtomicBool>,
    tick_thread: Option<JoinHandle<TickOutcome>>,
}

impl RealtimeSimulation {
    /// Build the clock from `config` and start ticking.
    ///
    /// Input errors are reported here, before the thread starts.
    pub fn spawn<S>(config: SimulationConfig, sink: S) -> Result<Self, SpawnError>
    where
        S: FrameSink + Send + 'static,
    {
        let clock = SimulationClock::new(config)?;
        Self::from_clock(clock, sink)
    }

    /// Start ticking an existing clock.
    pub fn from_clock<S>(clock: SimulationClock, sink: S) -> Result<Self, SpawnError>
    where
        S: FrameSink + Send + 'static,
    {
        let frame_rate = clock.config().frame_rate;
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let tick_stopped = Arc::new(AtomicBool::new(false));
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(COMMAND_CAPACITY);

        let tick_shutdown = Arc::clone(&shutdown_flag);
        let tick_stopped_flag = Arc::clone(&tick_stopped);
        let tick_thread = thread::Builder::new()
            .name("simwall-tick".into())
            .spawn(move || {
                TickThreadState::new(
                    clock,
                    sink,
                    cmd_rx,
                    tick_shutdown,
                    tick_stopped_flag,
                    frame_rate,
                )
                .run()
            })
            .map_err(SpawnError::Thread)?;

        info!(frame_rate, "tick thread started");
        Ok(Self {
            cmd_tx: Some(cmd_tx),
            shutdown_flag,
            tick_stopped,
            tick_thread: Some(tick_thread),
        })
    }

    /// Send a command and wait for the tick thread to apply it.
    ///
    /// Blocks for at most one tick period.
    pub fn submit(&self, command: Command) -> Result<Result<(), CommandError>, SubmitError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(SubmitError::Shutdown)?;

        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        let request = CommandRequest {
            command,
            reply: reply_tx,
        };

        cmd_tx.try_send(request).map_err(|e| match e {
            crossbeam_channel::TrySendError::Full(_) => SubmitError::ChannelFull,
            crossbeam_channel::TrySendError::Disconnected(_) => SubmitError::Shutdown,
        })?;

        reply_rx.recv().map_err(|_| SubmitError::Shutdown)
    }

    /// Whether the tick thread is still ticking.
    pub fn is_running(&self) -> bool {
        self.tick_thread.is_some() && !self.tick_stopped.load(Ordering::Acquire)
    }

    /// Stop the tick thread and recover the clock.
    ///
    /// Sets the shutdown flag, wakes the thread from its budget park, waits
    /// briefly for it to acknowledge, then joins.
    pub fn shutdown(&mut self) -> Result<StoppedSimulation, ShutdownError> {
        let handle = self
            .tick_thread
            .take()
            .ok_or(ShutdownError::AlreadyShutdown)?;
        let start = Instant::now();

        self.shutdown_flag.store(true, Ordering::Release);
        handle.thread().unpark();

        let deadline = Instant::now() + DRAIN_BUDGET;
        while !self.tick_stopped.load(Ordering::Acquire) {
            if Instant::now() > deadline {
                warn!("tick thread slow to stop, joining anyway");
                break;
            }
            thread::yield_now();
        }

        // Dropping the sender fails any submit() racing with shutdown.
        self.cmd_tx.take();

        let outcome = handle
            .join()
            .map_err(|_| ShutdownError::TickThreadPanicked)?;
        let shutdown_ms = start.elapsed().as_millis() as u64;
        info!(
            tick = outcome.clock.tick_count(),
            shutdown_ms,
            failed = outcome.error.is_some(),
            "tick thread stopped"
        );
        Ok(StoppedSimulation {
            clock: outcome.clock,
            error: outcome.error,
            shutdown_ms,
        })
    }
}

impl Drop for RealtimeSimulation {
    fn drop(&mut self) {
        if self.tick_thread.is_some() {
            if let Err(e) = self.shutdown() {
                warn!(error = %e, "shutdown on drop failed");
            }
        }
    }
}

impl std::fmt::Debug for RealtimeSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeSimulation")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

/// Error starting a [`RealtimeSimulation`].
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The configuration or its input files were rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The OS refused to start the tick thread.
    #[error("failed to spawn tick thread: {0}")]
    Thread(#[source] std::io::Error),
}
