//! Guided breathing: profiles, the phase sequencer and the ticker that drives it.
//!
//! The sequencer is a plain state machine with no notion of time. A
//! [`Ticker`] supplies the one-second cadence and [`run_session`] couples the
//! two on a single thread.

pub mod profile;
pub mod sequencer;
pub mod ticker;

use serde::{Deserialize, Serialize};

pub use profile::{builtin_profiles, find_profile, validate_profiles, BreathingProfile};
pub use sequencer::{Sequencer, SequencerState, TickOutcome};
pub use ticker::{
    run_session, IntervalTicker, ManualTicker, SessionLimit, SessionSummary, Ticker,
};

/// A stage of one breathing cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl Phase {
    /// Fixed cycle order
    pub const ALL: [Phase; 4] = [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::Rest];

    /// The phase after this one, before any skipping
    pub fn successor(self) -> Phase {
        match self {
            Phase::Inhale => Phase::Hold,
            Phase::Hold => Phase::Exhale,
            Phase::Exhale => Phase::Rest,
            Phase::Rest => Phase::Inhale,
        }
    }

    /// Instruction shown to the user
    pub fn label(self) -> &'static str {
        match self {
            Phase::Inhale => "Breathe In",
            Phase::Hold => "Hold",
            Phase::Exhale => "Breathe Out",
            Phase::Rest => "Rest",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
