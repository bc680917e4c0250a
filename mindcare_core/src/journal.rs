//! Free-form journal entries, newest first.

use crate::records::{Record, RecordStore};
use crate::storage::{KeyValueStore, JOURNAL_ENTRIES_KEY};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record store holding journal entries
pub const JOURNAL_STORE: RecordStore<JournalEntry> = RecordStore::new(JOURNAL_ENTRIES_KEY);

/// Writing prompts offered when starting an entry
pub const PROMPTS: [&str; 5] = [
    "What's one thing I'm grateful for today?",
    "What emotions am I experiencing right now?",
    "What's a small win I had today?",
    "What's been on my mind lately?",
    "What would make tomorrow better?",
];

/// How many prompts are featured on the journal view
pub const FEATURED_PROMPTS: usize = 3;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub content: String,
}

impl Record for JournalEntry {
    fn record_id(&self) -> String {
        self.id.clone()
    }
}

/// Text an entry starts from when the user picks a prompt
pub fn prompt_starter(prompt: &str) -> String {
    format!("{}\n\n", prompt)
}

/// Save a new entry at the top of the journal.
///
/// Whitespace-only text is refused with `Ok(None)`.
pub fn write_entry(
    kv: &mut dyn KeyValueStore,
    now: DateTime<Utc>,
    text: &str,
) -> Result<Option<JournalEntry>> {
    let content = text.trim();
    if content.is_empty() {
        tracing::debug!("Empty journal entry, nothing saved");
        return Ok(None);
    }

    let entry = JournalEntry {
        id: Uuid::new_v4().to_string(),
        date: now,
        content: content.to_string(),
    };

    JOURNAL_STORE.prepend(kv, entry.clone())?;
    tracing::info!("Saved journal entry {}", entry.id);
    Ok(Some(entry))
}

/// Delete an entry by id. Returns whether anything was removed.
pub fn delete_entry(kv: &mut dyn KeyValueStore, id: &str) -> Result<bool> {
    let before = JOURNAL_STORE.load_all(kv).len();
    let after = JOURNAL_STORE.remove(kv, id)?.len();

    let removed = after < before;
    if removed {
        tracing::info!("Deleted journal entry {}", id);
    }
    Ok(removed)
}

/// Find the entry with id `prefix`, or else the only entry whose id starts with it
pub fn find_by_prefix<'a>(entries: &'a [JournalEntry], prefix: &str) -> Option<&'a JournalEntry> {
    if prefix.is_empty() {
        return None;
    }
    if let Some(exact) = entries.iter().find(|e| e.id == prefix) {
        return Some(exact);
    }
    let mut matches = entries.iter().filter(|e| e.id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Some(entry),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_write_trims_and_prepends() {
        let mut kv = MemoryStore::new();
        let first = write_entry(&mut kv, Utc::now(), "first").unwrap().unwrap();
        let second = write_entry(&mut kv, Utc::now(), "\n  second thought \n")
            .unwrap()
            .unwrap();

        assert_eq!(second.content, "second thought");
        let entries = JOURNAL_STORE.load_all(&kv);
        assert_eq!(entries, vec![second, first]);
    }

    #[test]
    fn test_blank_entry_refused() {
        let mut kv = MemoryStore::new();
        assert!(write_entry(&mut kv, Utc::now(), " \n\t ").unwrap().is_none());
        assert!(kv.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut kv = MemoryStore::new();
        let now = Utc::now();
        let a = write_entry(&mut kv, now, "same").unwrap().unwrap();
        let b = write_entry(&mut kv, now, "same").unwrap().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_append_then_delete_restores_list() {
        let mut kv = MemoryStore::new();
        write_entry(&mut kv, Utc::now(), "keep me").unwrap();
        let before = JOURNAL_STORE.load_all(&kv);

        let entry = write_entry(&mut kv, Utc::now(), "delete me").unwrap().unwrap();
        assert!(delete_entry(&mut kv, &entry.id).unwrap());

        assert_eq!(JOURNAL_STORE.load_all(&kv), before);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut kv = MemoryStore::new();
        write_entry(&mut kv, Utc::now(), "entry").unwrap();
        assert!(!delete_entry(&mut kv, "no-such-id").unwrap());
        assert_eq!(JOURNAL_STORE.load_all(&kv).len(), 1);
    }

    #[test]
    fn test_prompt_starter() {
        assert_eq!(
            prompt_starter(PROMPTS[0]),
            "What's one thing I'm grateful for today?\n\n"
        );
    }

    #[test]
    fn test_find_by_prefix() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![
            JournalEntry { id: "abc123".into(), date, content: "a".into() },
            JournalEntry { id: "abd456".into(), date, content: "b".into() },
        ];

        assert_eq!(find_by_prefix(&entries, "abc").unwrap().content, "a");
        assert!(find_by_prefix(&entries, "ab").is_none());
        assert!(find_by_prefix(&entries, "zzz").is_none());
        assert!(find_by_prefix(&entries, "").is_none());
    }

    #[test]
    fn test_find_by_prefix_prefers_exact_id() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![
            JournalEntry { id: "abcd".into(), date, content: "longer".into() },
            JournalEntry { id: "abc".into(), date, content: "exact".into() },
        ];

        assert_eq!(find_by_prefix(&entries, "abc").unwrap().content, "exact");
        assert_eq!(find_by_prefix(&entries, "abcd").unwrap().content, "longer");
        assert!(find_by_prefix(&entries, "ab").is_none());
    }

    #[test]
    fn test_reads_browser_format() {
        let json = r#"[{"id":"1710058530000","date":"2024-03-10T08:15:30.000Z","content":"Grateful for tea"}]"#;
        let entries: Vec<JournalEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].id, "1710058530000");
        assert_eq!(entries[0].content, "Grateful for tea");
    }
}
