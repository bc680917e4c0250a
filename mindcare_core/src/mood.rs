//! Daily mood log.
//!
//! At most one entry is kept per calendar day: saving again on the same day
//! replaces that day's entry. What counts as "the same day" is decided by an
//! explicit [`DayBoundary`] policy rather than by whatever the ambient
//! locale happens to be.

use crate::records::{Record, RecordStore};
use crate::storage::{KeyValueStore, MOOD_ENTRIES_KEY};
use crate::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record store holding the mood history, newest first
pub const MOOD_STORE: RecordStore<MoodEntry> = RecordStore::new(MOOD_ENTRIES_KEY);

/// Self-reported mood on a 1-5 scale
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum MoodLevel {
    VeryLow = 1,
    Low = 2,
    Okay = 3,
    Good = 4,
    Great = 5,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::VeryLow,
        MoodLevel::Low,
        MoodLevel::Okay,
        MoodLevel::Good,
        MoodLevel::Great,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "Very Low",
            MoodLevel::Low => "Low",
            MoodLevel::Okay => "Okay",
            MoodLevel::Good => "Good",
            MoodLevel::Great => "Great",
        }
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        MoodLevel::ALL
            .into_iter()
            .find(|m| m.value() == value)
            .ok_or_else(|| format!("mood level must be between 1 and 5, got {}", value))
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> u8 {
        level.value()
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day's mood
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub date: DateTime<Utc>,
    pub mood: MoodLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Record for MoodEntry {
    fn record_id(&self) -> String {
        self.date.to_rfc3339()
    }
}

/// Which clock decides where one calendar day ends
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    /// The machine's local time zone
    #[default]
    Local,
    /// UTC midnight
    Utc,
}

impl DayBoundary {
    /// Calendar date of `at` under this policy
    pub fn calendar_day(self, at: DateTime<Utc>) -> NaiveDate {
        match self {
            DayBoundary::Local => at.with_timezone(&Local).date_naive(),
            DayBoundary::Utc => at.date_naive(),
        }
    }

    pub fn same_day(self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.calendar_day(a) == self.calendar_day(b)
    }
}

/// Record today's mood, replacing any entry already logged today.
///
/// Returns `Ok(None)` without touching storage when no mood was selected.
/// Blank notes are dropped.
pub fn save_mood(
    kv: &mut dyn KeyValueStore,
    policy: DayBoundary,
    now: DateTime<Utc>,
    mood: Option<MoodLevel>,
    note: &str,
) -> Result<Option<MoodEntry>> {
    let Some(mood) = mood else {
        tracing::debug!("No mood selected, nothing saved");
        return Ok(None);
    };

    let note = note.trim();
    let entry = MoodEntry {
        date: now,
        mood,
        note: (!note.is_empty()).then(|| note.to_string()),
    };

    let mut entries = MOOD_STORE.load_all(kv);
    let before = entries.len();
    entries.retain(|e| !policy.same_day(e.date, now));
    if entries.len() != before {
        tracing::info!("Replacing mood already logged for {}", policy.calendar_day(now));
    }

    entries.insert(0, entry.clone());
    MOOD_STORE.save_all(kv, &entries)?;

    tracing::info!("Logged mood {} for {}", mood.value(), policy.calendar_day(now));
    Ok(Some(entry))
}

/// Entry logged on the same calendar day as `now`, if any
pub fn today_entry(
    entries: &[MoodEntry],
    policy: DayBoundary,
    now: DateTime<Utc>,
) -> Option<&MoodEntry> {
    entries.iter().find(|e| policy.same_day(e.date, now))
}

/// The first `count` entries of the history (newest first by convention)
pub fn recent(entries: &[MoodEntry], count: usize) -> &[MoodEntry] {
    &entries[..entries.len().min(count)]
}

/// Mean mood of the given entries
pub fn average(entries: &[MoodEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.mood.value())).sum();
    Some(f64::from(total) / entries.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_same_day_save_replaces() {
        let mut kv = MemoryStore::new();
        let morning = at(2024, 3, 10, 8, 0);
        let evening = at(2024, 3, 10, 21, 30);

        save_mood(&mut kv, DayBoundary::Utc, morning, Some(MoodLevel::Low), "tired").unwrap();
        save_mood(&mut kv, DayBoundary::Utc, evening, Some(MoodLevel::Great), "  walked  ")
            .unwrap();

        let entries = MOOD_STORE.load_all(&kv);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, MoodLevel::Great);
        assert_eq!(entries[0].note.as_deref(), Some("walked"));
        assert_eq!(entries[0].date, evening);
    }

    #[test]
    fn test_new_day_is_prepended() {
        let mut kv = MemoryStore::new();
        let day_one = at(2024, 3, 10, 12, 0);
        let day_two = day_one + Duration::days(1);

        save_mood(&mut kv, DayBoundary::Utc, day_one, Some(MoodLevel::Okay), "").unwrap();
        save_mood(&mut kv, DayBoundary::Utc, day_two, Some(MoodLevel::Good), "").unwrap();

        let entries = MOOD_STORE.load_all(&kv);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, day_two);
        assert_eq!(entries[1].date, day_one);
    }

    #[test]
    fn test_utc_boundary_splits_at_midnight() {
        let mut kv = MemoryStore::new();
        let late = at(2024, 3, 10, 23, 30);
        let early = at(2024, 3, 11, 0, 30);

        save_mood(&mut kv, DayBoundary::Utc, late, Some(MoodLevel::Okay), "").unwrap();
        save_mood(&mut kv, DayBoundary::Utc, early, Some(MoodLevel::Good), "").unwrap();

        assert_eq!(MOOD_STORE.load_all(&kv).len(), 2);
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_local_boundary_splits_at_local_midnight() {
        // Mid-June keeps clear of daylight saving switches
        let midnight = local(2024, 6, 15, 0, 0);
        let before = midnight - Duration::minutes(1);
        let after = midnight + Duration::minutes(1);

        assert!(!DayBoundary::Local.same_day(before, after));
        assert_eq!(
            DayBoundary::Local.calendar_day(after),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert_eq!(
            DayBoundary::Local.calendar_day(before),
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
        );
    }

    #[test]
    fn test_local_day_spans_whole_local_date() {
        let mut kv = MemoryStore::new();
        let early = local(2024, 6, 15, 0, 30);
        let late = local(2024, 6, 15, 23, 30);
        assert!(DayBoundary::Local.same_day(early, late));

        save_mood(&mut kv, DayBoundary::Local, early, Some(MoodLevel::Low), "").unwrap();
        save_mood(&mut kv, DayBoundary::Local, late, Some(MoodLevel::Good), "").unwrap();

        let entries = MOOD_STORE.load_all(&kv);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, MoodLevel::Good);
        assert_eq!(entries[0].date, late);
    }

    #[test]
    fn test_no_mood_is_refused() {
        let mut kv = MemoryStore::new();
        let saved = save_mood(&mut kv, DayBoundary::Utc, Utc::now(), None, "note").unwrap();
        assert!(saved.is_none());
        assert!(kv.is_empty());
    }

    #[test]
    fn test_blank_note_is_dropped() {
        let mut kv = MemoryStore::new();
        let entry = save_mood(&mut kv, DayBoundary::Local, Utc::now(), Some(MoodLevel::Okay), "   ")
            .unwrap()
            .unwrap();
        assert!(entry.note.is_none());

        let json = kv.get(MOOD_ENTRIES_KEY).unwrap().unwrap();
        assert!(!json.contains("note"));
    }

    #[test]
    fn test_today_entry_and_recent() {
        let now = at(2024, 5, 20, 9, 0);
        let entries: Vec<MoodEntry> = (0..10)
            .map(|i| MoodEntry {
                date: now - Duration::days(i),
                mood: MoodLevel::Okay,
                note: None,
            })
            .collect();

        assert_eq!(today_entry(&entries, DayBoundary::Utc, now), Some(&entries[0]));
        assert!(today_entry(&entries[1..], DayBoundary::Utc, now).is_none());
        assert_eq!(recent(&entries, 7).len(), 7);
        assert_eq!(recent(&entries[..3], 7).len(), 3);
    }

    #[test]
    fn test_average() {
        let now = Utc::now();
        let entries = vec![
            MoodEntry { date: now, mood: MoodLevel::Great, note: None },
            MoodEntry { date: now, mood: MoodLevel::Low, note: None },
        ];
        assert_eq!(average(&entries), Some(3.5));
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn test_reads_browser_format() {
        let json = r#"[{"date":"2024-03-10T08:15:30.000Z","mood":4,"note":"sunny"},{"date":"2024-03-09T20:00:00.000Z","mood":2}]"#;
        let entries: Vec<MoodEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].mood, MoodLevel::Good);
        assert_eq!(entries[1].note, None);
        assert_eq!(entries[1].date, at(2024, 3, 9, 20, 0));
    }

    #[test]
    fn test_out_of_range_mood_is_corrupt() {
        let mut kv = MemoryStore::new();
        kv.set(MOOD_ENTRIES_KEY, r#"[{"date":"2024-03-10T08:15:30Z","mood":9}]"#)
            .unwrap();
        assert!(MOOD_STORE.load_all(&kv).is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let entries = vec![
            MoodEntry {
                date: at(2024, 1, 2, 3, 4),
                mood: MoodLevel::VeryLow,
                note: Some("rough day".into()),
            },
            MoodEntry {
                date: at(2024, 1, 1, 3, 4),
                mood: MoodLevel::Great,
                note: None,
            },
        ];
        let json = serde_json::to_string(&entries).unwrap();
        let parsed: Vec<MoodEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entries);
    }
}
