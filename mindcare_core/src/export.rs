//! CSV export of the mood history and journal.
//!
//! Each export rewrites its file from scratch with a header row and is
//! synced to disk before returning.

use crate::journal::JournalEntry;
use crate::mood::MoodEntry;
use crate::Result;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

pub const MOOD_CSV: &str = "mood.csv";
pub const JOURNAL_CSV: &str = "journal.csv";

#[derive(Debug, Serialize)]
struct MoodRow<'a> {
    date: String,
    mood: u8,
    label: &'static str,
    note: Option<&'a str>,
}

impl<'a> From<&'a MoodEntry> for MoodRow<'a> {
    fn from(entry: &'a MoodEntry) -> Self {
        MoodRow {
            date: entry.date.to_rfc3339(),
            mood: entry.mood.value(),
            label: entry.mood.label(),
            note: entry.note.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JournalRow<'a> {
    id: &'a str,
    date: String,
    content: &'a str,
}

impl<'a> From<&'a JournalEntry> for JournalRow<'a> {
    fn from(entry: &'a JournalEntry) -> Self {
        JournalRow {
            id: &entry.id,
            date: entry.date.to_rfc3339(),
            content: &entry.content,
        }
    }
}

const MOOD_HEADERS: [&str; 4] = ["date", "mood", "label", "note"];
const JOURNAL_HEADERS: [&str; 3] = ["id", "date", "content"];

fn write_rows<T, I>(path: &Path, headers: &[&str], rows: I) -> Result<usize>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Header is written up front so an empty export still has one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    writer.write_record(headers)?;

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} rows to {:?}", count, path);
    Ok(count)
}

/// Write the mood history to `path`. Returns the number of rows written.
pub fn export_moods(entries: &[MoodEntry], path: &Path) -> Result<usize> {
    write_rows(path, &MOOD_HEADERS, entries.iter().map(MoodRow::from))
}

/// Write journal entries to `path`. Returns the number of rows written.
pub fn export_journal(entries: &[JournalEntry], path: &Path) -> Result<usize> {
    write_rows(path, &JOURNAL_HEADERS, entries.iter().map(JournalRow::from))
}
