//! Plain-text rendering of the five views.
//!
//! Render functions are pure: they take explicit view state and return the
//! text to show. Loading and saving happen at the store boundary before a
//! view is built, never while rendering.

use crate::affirmations::{AFFIRMATIONS, USAGE_TIPS};
use crate::breathing::{BreathingProfile, SequencerState};
use crate::journal::{JournalEntry, FEATURED_PROMPTS, PROMPTS};
use crate::mood::{self, DayBoundary, MoodEntry, MoodLevel};
use crate::resources::ResourceCatalog;
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const APP_NAME: &str = "MindCare";
pub const TAGLINE: &str = "Your daily mental wellness companion";
pub const DISCLAIMER: &str = "Note: This app is a supportive tool and does not replace professional \
mental health care. If you're experiencing a crisis, please contact a mental health professional \
or emergency services.";

/// The five views, in navigation order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Mood,
    Journal,
    Breathing,
    Affirmations,
    Resources,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Mood,
        Tab::Journal,
        Tab::Breathing,
        Tab::Affirmations,
        Tab::Resources,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Mood => "Mood",
            Tab::Journal => "Journal",
            Tab::Breathing => "Breathe",
            Tab::Affirmations => "Affirmations",
            Tab::Resources => "Resources",
        }
    }
}

/// State needed to draw the mood view
#[derive(Clone, Debug)]
pub struct MoodView<'a> {
    pub entries: &'a [MoodEntry],
    pub now: DateTime<Utc>,
    pub day_boundary: DayBoundary,
    pub history_days: usize,
}

/// State needed to draw the journal view
#[derive(Clone, Debug)]
pub struct JournalView<'a> {
    pub entries: &'a [JournalEntry],
    pub day_boundary: DayBoundary,
}

/// State needed to draw the affirmations view
#[derive(Clone, Debug)]
pub struct AffirmationView<'a> {
    pub index: usize,
    pub favorites: &'a [String],
}

/// App title, tagline, disclaimer and the navigation bar with `active` marked
pub fn render_header(active: Tab) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", APP_NAME, TAGLINE);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", DISCLAIMER);
    let _ = writeln!(out);

    let nav: Vec<String> = Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.title())
            } else {
                tab.title().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", nav.join("  "));
    out
}

pub fn render_mood(view: &MoodView<'_>) -> String {
    let mut out = String::new();
    let today = mood::today_entry(view.entries, view.day_boundary, view.now);

    let _ = writeln!(out, "How are you feeling today?");
    let scale: Vec<String> = MoodLevel::ALL
        .iter()
        .map(|m| {
            let marker = if today.map(|e| e.mood) == Some(*m) { "*" } else { " " };
            format!("{}{} {}", marker, m.value(), m.label())
        })
        .collect();
    let _ = writeln!(out, "  {}", scale.join("   "));

    match today {
        Some(entry) => {
            let _ = writeln!(out, "  Logged today: {}", entry.mood);
            if let Some(note) = &entry.note {
                let _ = writeln!(out, "  Note: {}", note);
            }
        }
        None => {
            let _ = writeln!(out, "  Not logged yet today.");
        }
    }

    let recent = mood::recent(view.entries, view.history_days);
    if !recent.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recent History");
        for entry in recent {
            let day = if view.day_boundary.same_day(entry.date, view.now) {
                "Today".to_string()
            } else {
                view.day_boundary
                    .calendar_day(entry.date)
                    .format("%a, %b %-d")
                    .to_string()
            };
            let _ = writeln!(out, "  {:<12} {} {}", day, entry.mood.value(), entry.mood);
            if let Some(note) = &entry.note {
                let _ = writeln!(out, "               {}", note);
            }
        }
        if let Some(avg) = mood::average(recent) {
            let _ = writeln!(out, "  Average: {:.1}", avg);
        }
    }
    out
}

pub fn render_journal(view: &JournalView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Writing Prompts");
    for (i, prompt) in PROMPTS.iter().take(FEATURED_PROMPTS).enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, prompt);
    }

    if view.entries.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No journal entries yet.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Past Entries");
    for entry in view.entries {
        let day = view.day_boundary.calendar_day(entry.date);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {}  [{}]",
            day.format("%A, %B %-d, %Y"),
            short_id(&entry.id)
        );
        for line in entry.content.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }
    out
}

/// All prompts, numbered from one
pub fn render_prompts() -> String {
    let mut out = String::new();
    for (i, prompt) in PROMPTS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, prompt);
    }
    out
}

/// Leading characters of an id, enough to tell entries apart
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Selectable exercises with the active one marked
pub fn render_profiles(profiles: &[BreathingProfile], selected: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Choose an Exercise");
    for profile in profiles {
        let marker = if profile.name == selected { ">" } else { " " };
        let _ = writeln!(
            out,
            "{} {} ({})",
            marker,
            profile.name,
            profile.pattern()
        );
        if !profile.description.is_empty() {
            let _ = writeln!(out, "    {}", profile.description);
        }
    }
    out
}

/// One-line countdown status
pub fn render_breathing(state: &SequencerState, profile: &BreathingProfile) -> String {
    format!(
        "{:>3}  {:<12} {} | completed cycles: {}{}",
        state.remaining_seconds,
        state.phase.label(),
        profile.name,
        state.completed_cycles,
        if state.running { "" } else { " (paused)" }
    )
}

pub fn render_breathing_benefits() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Benefits of Breathing Exercises");
    for benefit in [
        "Reduces stress and anxiety",
        "Improves focus and mental clarity",
        "Lowers heart rate and blood pressure",
        "Promotes better sleep",
    ] {
        let _ = writeln!(out, "  - {}", benefit);
    }
    out
}

pub fn render_affirmation(view: &AffirmationView<'_>) -> String {
    let mut out = String::new();
    let text = AFFIRMATIONS.get(view.index).copied().unwrap_or(AFFIRMATIONS[0]);
    let favorite = crate::affirmations::is_favorite(view.favorites, text);

    let _ = writeln!(out, "Today's Affirmation");
    let _ = writeln!(out);
    let _ = writeln!(out, "  \"{}\"{}", text, if favorite { "  (favorite)" } else { "" });
    let _ = writeln!(out);
    let _ = writeln!(out, "How to Use Affirmations");
    for (i, tip) in USAGE_TIPS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, tip);
    }

    if !view.favorites.is_empty() {
        let _ = writeln!(out);
        out.push_str(&render_favorites(view.favorites));
    }
    out
}

/// Numbered favorites list
pub fn render_favorites(favorites: &[String]) -> String {
    let mut out = String::new();
    if favorites.is_empty() {
        let _ = writeln!(out, "No favorite affirmations yet.");
        return out;
    }
    let _ = writeln!(out, "Your Favorites");
    for (i, text) in favorites.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, text);
    }
    out
}

pub fn render_resources(catalog: &ResourceCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Crisis Support - Available 24/7");
    for line in &catalog.crisis_lines {
        let _ = writeln!(out, "  {}", line.name);
        let _ = writeln!(out, "    {}", line.contact);
        let _ = writeln!(out, "    {}", line.description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Self-Care Activities");
    let _ = writeln!(out, "  Small actions can make a big difference in how you feel");
    for activity in &catalog.self_care {
        let _ = writeln!(out, "  - {}", activity);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Mental Health Resources");
    for org in &catalog.organizations {
        let _ = writeln!(out, "  {} ({})", org.title, org.url);
        let _ = writeln!(out, "    {}", org.description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "When to Seek Professional Help");
    let _ = writeln!(
        out,
        "  Consider reaching out to a mental health professional if you experience:"
    );
    for sign in &catalog.warning_signs {
        let _ = writeln!(out, "  - {}", sign);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Remember: Seeking help is a sign of strength, not weakness."
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breathing::{builtin_profiles, Phase};
    use crate::resources::resource_catalog;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_header_marks_active_tab() {
        let header = render_header(Tab::Breathing);
        assert!(header.contains("[Breathe]"));
        assert!(header.contains("Mood  Journal"));
        assert!(header.contains("does not replace professional"));
    }

    #[test]
    fn test_mood_view_today_and_history() {
        let entries = vec![
            MoodEntry { date: now(), mood: MoodLevel::Good, note: Some("sunny walk".into()) },
            MoodEntry { date: now() - Duration::days(2), mood: MoodLevel::Low, note: None },
        ];
        let text = render_mood(&MoodView {
            entries: &entries,
            now: now(),
            day_boundary: DayBoundary::Utc,
            history_days: 7,
        });

        assert!(text.contains("Logged today: Good"));
        assert!(text.contains("*4 Good"));
        assert!(text.contains("Today"));
        assert!(text.contains("Mon, Jan 1"));
        assert!(text.contains("Average: 3.0"));
    }

    #[test]
    fn test_mood_view_empty() {
        let text = render_mood(&MoodView {
            entries: &[],
            now: now(),
            day_boundary: DayBoundary::Utc,
            history_days: 7,
        });
        assert!(text.contains("Not logged yet today."));
        assert!(!text.contains("Recent History"));
    }

    #[test]
    fn test_mood_history_is_capped() {
        let entries: Vec<MoodEntry> = (0..10)
            .map(|i| MoodEntry {
                date: now() - Duration::days(i),
                mood: MoodLevel::Okay,
                note: None,
            })
            .collect();
        let text = render_mood(&MoodView {
            entries: &entries,
            now: now(),
            day_boundary: DayBoundary::Utc,
            history_days: 3,
        });
        let history = text.split("Recent History").nth(1).unwrap();
        assert_eq!(history.matches("3 Okay").count(), 3);
    }

    #[test]
    fn test_journal_view() {
        let entries = vec![JournalEntry {
            id: "0123456789abcdef".into(),
            date: now(),
            content: "Grateful for tea\n\nand rain".into(),
        }];
        let text = render_journal(&JournalView {
            entries: &entries,
            day_boundary: DayBoundary::Utc,
        });

        assert!(text.contains("Wednesday, January 3, 2024"));
        assert!(text.contains("[01234567]"));
        assert!(text.contains("    and rain"));
        assert!(text.contains("1. What's one thing I'm grateful for today?"));
        assert!(!text.contains("What would make tomorrow better?"));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }

    #[test]
    fn test_breathing_status_line() {
        let profile = &builtin_profiles()[0];
        let state = SequencerState {
            phase: Phase::Hold,
            remaining_seconds: 7,
            completed_cycles: 2,
            running: true,
        };
        let line = render_breathing(&state, profile);
        assert!(line.contains("Hold"));
        assert!(line.contains("completed cycles: 2"));
        assert!(!line.contains("paused"));
    }

    #[test]
    fn test_profiles_marks_selection() {
        let text = render_profiles(builtin_profiles(), "Box Breathing");
        assert!(text.contains("> Box Breathing (4-4-4-4)"));
        assert!(text.contains("  4-7-8 Breathing (4-7-8)"));
    }

    #[test]
    fn test_affirmation_view() {
        let favorites = vec![AFFIRMATIONS[2].to_string()];
        let text = render_affirmation(&AffirmationView { index: 2, favorites: &favorites });
        assert!(text.contains("(favorite)"));
        assert!(text.contains("Your Favorites"));
        assert!(text.contains("1. Read the affirmation slowly"));
    }

    #[test]
    fn test_resources_view() {
        let text = render_resources(resource_catalog());
        assert!(text.contains("988 Suicide & Crisis Lifeline"));
        assert!(text.contains("Text HOME to 741741"));
        assert!(text.contains("psychologytoday.com"));
        assert!(text.contains("sign of strength"));
    }
}
