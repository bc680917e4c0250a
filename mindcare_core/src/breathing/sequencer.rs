//! Breathing phase sequencer.
//!
//! A countdown that cycles through the phases of the active profile, one
//! step per `tick()`. It does not own a clock: the caller invokes `tick()`
//! once per elapsed second while the sequencer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Inhale -> Hold -> Exhale -> (Rest) -> Inhale -> ...
//! ```
//!
//! Phases other than Inhale are skipped when their duration is zero.
//! Returning to Inhale completes a cycle.

use serde::{Deserialize, Serialize};

use super::{BreathingProfile, Phase};

/// Live state of one countdown
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SequencerState {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub completed_cycles: u64,
    pub running: bool,
}

impl SequencerState {
    /// Fresh, paused state at the start of Inhale
    pub fn initial(profile: &BreathingProfile) -> Self {
        Self {
            phase: Phase::Inhale,
            remaining_seconds: profile.inhale_seconds,
            completed_cycles: 0,
            running: false,
        }
    }
}

/// What a single tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Idle,
    /// Counted down within the current phase
    Counted,
    /// Entered a new phase other than Inhale
    PhaseChanged { phase: Phase },
    /// Returned to Inhale, completing a cycle
    CycleCompleted { cycles: u64 },
}

/// Countdown state machine for a single active profile
#[derive(Clone, Debug)]
pub struct Sequencer {
    profile: BreathingProfile,
    state: SequencerState,
}

impl Sequencer {
    /// Create a paused sequencer for `profile`.
    ///
    /// The profile is expected to have passed [`BreathingProfile::validate`].
    pub fn new(profile: BreathingProfile) -> Self {
        let state = SequencerState::initial(&profile);
        Self { profile, state }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn profile(&self) -> &BreathingProfile {
        &self.profile
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// 0.0 .. 1.0 progress within the current phase
    pub fn phase_progress(&self) -> f64 {
        let total = self.profile.duration_of(self.state.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.remaining_seconds);
        f64::from(elapsed) / f64::from(total)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Resume counting from the frozen state. No-op if already running.
    pub fn start(&mut self) {
        if !self.state.running {
            self.state.running = true;
            tracing::debug!(
                "Breathing started in {:?} with {}s remaining",
                self.state.phase,
                self.state.remaining_seconds
            );
        }
    }

    /// Freeze the countdown. No-op if already paused.
    pub fn pause(&mut self) {
        if self.state.running {
            self.state.running = false;
            tracing::debug!(
                "Breathing paused in {:?} with {}s remaining",
                self.state.phase,
                self.state.remaining_seconds
            );
        }
    }

    /// Stop and return to the start of Inhale with no completed cycles
    pub fn reset(&mut self) {
        self.state = SequencerState::initial(&self.profile);
    }

    /// Swap the active profile and reset. Progress in the old profile is discarded.
    pub fn select_profile(&mut self, profile: BreathingProfile) {
        tracing::info!("Selected breathing profile {:?}", profile.name);
        self.profile = profile;
        self.reset();
    }

    /// Apply the transition rule once. No-op while paused.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }

        if self.state.remaining_seconds > 1 {
            self.state.remaining_seconds -= 1;
            return TickOutcome::Counted;
        }

        let next = self.next_phase(self.state.phase);
        self.state.phase = next;
        self.state.remaining_seconds = self.profile.duration_of(next);

        if next == Phase::Inhale {
            self.state.completed_cycles += 1;
            tracing::debug!("Completed breathing cycle {}", self.state.completed_cycles);
            TickOutcome::CycleCompleted {
                cycles: self.state.completed_cycles,
            }
        } else {
            TickOutcome::PhaseChanged { phase: next }
        }
    }

    /// Next phase in cycle order, skipping zero-length phases other than Inhale
    fn next_phase(&self, from: Phase) -> Phase {
        let mut next = from.successor();
        while next != Phase::Inhale && self.profile.duration_of(next) == 0 {
            next = next.successor();
        }
        next
    }
}
