//! Clock that drives the breathing sequencer.
//!
//! The driver is single-threaded: one `wait()` then one `tick()`, so ticks
//! can never overlap. Pausing ends the loop, which stops the clock itself
//! rather than leaving it firing into a paused sequencer.

use std::thread;
use std::time::{Duration, Instant};

use super::{Sequencer, TickOutcome};

/// Source of the fixed tick cadence
pub trait Ticker {
    /// Block until the next tick boundary
    fn wait(&mut self);
}

/// Wall-clock ticker with a fixed interval.
///
/// Deadlines are computed from the first wait, so time spent rendering
/// between ticks does not accumulate as drift.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: None,
        }
    }

    /// One tick per second
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now + self.interval);
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.next_deadline = Some(deadline.max(now) + self.interval);
    }
}

/// Ticker that returns immediately
#[derive(Debug, Default)]
pub struct ManualTicker {
    waits: u64,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks handed out so far
    pub fn waits(&self) -> u64 {
        self.waits
    }
}

impl Ticker for ManualTicker {
    fn wait(&mut self) {
        self.waits += 1;
    }
}

/// When a session should stop on its own
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionLimit {
    /// Run until paused
    Unbounded,
    /// Stop once this many cycles have completed in this session
    Cycles(u64),
    /// Stop after this many ticks
    Ticks(u64),
}

impl SessionLimit {
    fn reached(&self, ticks: u64, cycles: u64) -> bool {
        match *self {
            SessionLimit::Unbounded => false,
            SessionLimit::Cycles(n) => cycles >= n,
            SessionLimit::Ticks(n) => ticks >= n,
        }
    }
}

/// Totals for one driven session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub completed_cycles: u64,
}

/// Drive `sequencer` from `ticker` until it is paused or `limit` is reached.
///
/// The observer sees every tick outcome and the resulting state. It may call
/// `pause()` on the sequencer to end the session early. When the limit is
/// reached the sequencer is left paused.
pub fn run_session<T, F>(
    sequencer: &mut Sequencer,
    ticker: &mut T,
    limit: SessionLimit,
    mut observer: F,
) -> SessionSummary
where
    T: Ticker + ?Sized,
    F: FnMut(&mut Sequencer, TickOutcome),
{
    let cycles_at_start = sequencer.state().completed_cycles;
    let mut ticks = 0u64;

    sequencer.start();
    tracing::info!(
        "Breathing session started with {:?} ({:?})",
        sequencer.profile().name,
        limit
    );

    while sequencer.is_running()
        && !limit.reached(ticks, sequencer.state().completed_cycles - cycles_at_start)
    {
        ticker.wait();
        let outcome = sequencer.tick();
        ticks += 1;
        observer(sequencer, outcome);
    }

    sequencer.pause();

    let summary = SessionSummary {
        ticks,
        completed_cycles: sequencer.state().completed_cycles - cycles_at_start,
    };
    tracing::info!(
        "Breathing session ended after {} ticks, {} cycles",
        summary.ticks,
        summary.completed_cycles
    );
    summary
}
