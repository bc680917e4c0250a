//! Breathing exercise profiles.
//!
//! A profile is a named table of per-phase durations. Profiles are immutable:
//! selecting a different exercise swaps which profile is active.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Phase;

/// A named breathing exercise configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreathingProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub inhale_seconds: u32,
    #[serde(default)]
    pub hold_seconds: u32,
    pub exhale_seconds: u32,
    /// Zero skips the Rest phase entirely
    #[serde(default)]
    pub rest_seconds: u32,
}

impl BreathingProfile {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        inhale_seconds: u32,
        hold_seconds: u32,
        exhale_seconds: u32,
        rest_seconds: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            inhale_seconds,
            hold_seconds,
            exhale_seconds,
            rest_seconds,
        }
    }

    /// Configured duration of a phase
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale_seconds,
            Phase::Hold => self.hold_seconds,
            Phase::Exhale => self.exhale_seconds,
            Phase::Rest => self.rest_seconds,
        }
    }

    /// Phases visited in one cycle, in order
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        Phase::ALL
            .into_iter()
            .filter(move |&p| p == Phase::Inhale || self.duration_of(p) > 0)
    }

    /// Seconds in one full cycle
    pub fn cycle_seconds(&self) -> u32 {
        self.phases().map(|p| self.duration_of(p)).sum()
    }

    /// Reject degenerate profiles. The sequencer assumes a positive inhale.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Profile("profile name must not be empty".into()));
        }
        if self.inhale_seconds == 0 {
            return Err(Error::Profile(format!(
                "profile {:?} must have a positive inhale duration",
                self.name
            )));
        }
        Ok(())
    }

    /// Compact "4-7-8" style pattern
    pub fn pattern(&self) -> String {
        self.phases()
            .map(|p| self.duration_of(p).to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

static BUILTIN_PROFILES: Lazy<Vec<BreathingProfile>> = Lazy::new(|| {
    vec![
        BreathingProfile::new(
            "4-7-8 Breathing",
            "Calming technique for anxiety",
            4,
            7,
            8,
            0,
        ),
        BreathingProfile::new("Box Breathing", "Used by Navy SEALs for focus", 4, 4, 4, 4),
        BreathingProfile::new("Simple Deep Breathing", "Easy stress relief", 4, 2, 6, 0),
    ]
});

/// Built-in exercises; the first one is the default selection
pub fn builtin_profiles() -> &'static [BreathingProfile] {
    &BUILTIN_PROFILES
}

/// Validate each profile and check names are unique (case-insensitive)
pub fn validate_profiles(profiles: &[BreathingProfile]) -> Result<()> {
    let mut seen = HashSet::new();
    for profile in profiles {
        profile.validate()?;
        if !seen.insert(profile.name.trim().to_lowercase()) {
            return Err(Error::Profile(format!(
                "duplicate profile name {:?}",
                profile.name
            )));
        }
    }
    Ok(())
}

/// Find a profile by name, ignoring case and surrounding whitespace
pub fn find_profile<'a>(
    profiles: &'a [BreathingProfile],
    name: &str,
) -> Option<&'a BreathingProfile> {
    let wanted = name.trim().to_lowercase();
    profiles
        .iter()
        .find(|p| p.name.trim().to_lowercase() == wanted)
}
