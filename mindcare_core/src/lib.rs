#![forbid(unsafe_code)]

//! Core domain model and logic for the MindCare wellness companion.
//!
//! This crate provides:
//! - Breathing profiles, the phase sequencer and its ticker
//! - Mood log, journal and affirmation favorites over record stores
//! - Key-value persistence (file and in-memory)
//! - Static resource catalog
//! - Plain-text view rendering
//! - Configuration, logging and CSV export

pub mod error;
pub mod config;
pub mod logging;
pub mod storage;
pub mod records;
pub mod breathing;
pub mod mood;
pub mod journal;
pub mod affirmations;
pub mod resources;
pub mod view;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use config::Config;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use records::{Record, RecordStore};
pub use breathing::{BreathingProfile, Phase, Sequencer, SequencerState, TickOutcome};
pub use mood::{DayBoundary, MoodEntry, MoodLevel};
pub use journal::JournalEntry;
