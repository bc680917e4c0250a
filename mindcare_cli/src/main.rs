use chrono::Utc;
use clap::{Parser, Subcommand};
use mindcare_core::affirmations::{self, AFFIRMATIONS, FAVORITES_STORE};
use mindcare_core::breathing::{
    find_profile, run_session, IntervalTicker, SessionLimit, TickOutcome,
};
use mindcare_core::journal::{self, JOURNAL_STORE, PROMPTS};
use mindcare_core::mood::{self, MOOD_STORE};
use mindcare_core::resources::resource_catalog;
use mindcare_core::storage::{load_value, save_value, BREATHING_PROFILE_KEY};
use mindcare_core::view::{self, AffirmationView, JournalView, MoodView, Tab};
use mindcare_core::*;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mindcare")]
#[command(about = "Daily mental wellness companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track how you feel (default)
    Mood {
        #[command(subcommand)]
        action: Option<MoodAction>,
    },

    /// Write and review journal entries
    Journal {
        #[command(subcommand)]
        action: Option<JournalAction>,
    },

    /// Run a guided breathing exercise
    Breathe {
        /// Exercise to run (case-insensitive)
        #[arg(long)]
        profile: Option<String>,

        /// Number of cycles before the session ends
        #[arg(long)]
        cycles: Option<u64>,

        /// List the available exercises and exit
        #[arg(long)]
        list: bool,

        /// Length of one countdown step in milliseconds (for testing)
        #[arg(long, hide = true)]
        tick_ms: Option<u64>,
    },

    /// Daily affirmations
    Affirm {
        #[command(subcommand)]
        action: Option<AffirmAction>,
    },

    /// Crisis lines and support resources
    Resources,

    /// Export mood history and journal to CSV
    Export {
        /// Output directory (defaults to <data-dir>/export)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum MoodAction {
    /// Show today's mood and recent history (default)
    Show,
    /// Log today's mood, replacing any earlier entry from today
    Log {
        /// 1 = Very Low .. 5 = Great
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        level: u8,

        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum JournalAction {
    /// Show prompts and past entries (default)
    List,
    /// Save a new entry
    Write { text: String },
    /// Save a new entry that starts with prompt number N
    Prompt { number: usize, text: String },
    /// Delete the entry whose id starts with ID
    Delete { id: String },
    /// List every writing prompt
    Prompts,
}

#[derive(Subcommand)]
enum AffirmAction {
    /// Show the current affirmation (default)
    Show,
    /// Move to a new affirmation
    Next,
    /// Add or remove the current affirmation from favorites
    Favorite,
    /// List favorite affirmations
    Favorites,
    /// Remove favorite number N
    Unfavorite { number: usize },
}

fn main() -> Result<()> {
    // Initialize logging
    mindcare_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let mut store = FileStore::new(Config::store_dir(&data_dir));
    tracing::debug!("Using store at {:?}", store.root());

    match cli.command {
        Some(Commands::Mood { action }) => cmd_mood(&mut store, action, &config),
        Some(Commands::Journal { action }) => cmd_journal(&mut store, action, &config),
        Some(Commands::Breathe {
            profile,
            cycles,
            list,
            tick_ms,
        }) => cmd_breathe(&mut store, profile, cycles, list, tick_ms, &config),
        Some(Commands::Affirm { action }) => cmd_affirm(&mut store, action),
        Some(Commands::Resources) => {
            print!("{}", view::render_header(Tab::Resources));
            println!();
            print!("{}", view::render_resources(resource_catalog()));
            Ok(())
        }
        Some(Commands::Export { out }) => {
            let out = out.unwrap_or_else(|| data_dir.join("export"));
            cmd_export(&store, &out)
        }
        None => cmd_mood(&mut store, None, &config),
    }
}

fn cmd_mood(store: &mut FileStore, action: Option<MoodAction>, config: &Config) -> Result<()> {
    let policy = config.mood.day_boundary;
    let now = Utc::now();

    match action.unwrap_or(MoodAction::Show) {
        MoodAction::Show => {
            let entries = MOOD_STORE.load_all(store);
            print!("{}", view::render_header(Tab::Mood));
            println!();
            print!(
                "{}",
                view::render_mood(&MoodView {
                    entries: &entries,
                    now,
                    day_boundary: policy,
                    history_days: config.mood.history_days,
                })
            );
        }
        MoodAction::Log { level, note } => {
            let level = MoodLevel::try_from(level).map_err(Error::Other)?;
            let replacing = mood::today_entry(&MOOD_STORE.load_all(store), policy, now).is_some();

            let saved = mood::save_mood(store, policy, now, Some(level), note.as_deref().unwrap_or(""))?;
            if let Some(entry) = saved {
                if replacing {
                    println!("✓ Today's mood updated: {}", entry.mood);
                } else {
                    println!("✓ Mood saved: {}", entry.mood);
                }
            }
        }
    }
    Ok(())
}

fn cmd_journal(store: &mut FileStore, action: Option<JournalAction>, config: &Config) -> Result<()> {
    let now = Utc::now();

    match action.unwrap_or(JournalAction::List) {
        JournalAction::List => {
            let entries = JOURNAL_STORE.load_all(store);
            print!("{}", view::render_header(Tab::Journal));
            println!();
            print!(
                "{}",
                view::render_journal(&JournalView {
                    entries: &entries,
                    day_boundary: config.mood.day_boundary,
                })
            );
        }
        JournalAction::Write { text } => save_journal_text(store, now, &text)?,
        JournalAction::Prompt { number, text } => {
            let prompt = number
                .checked_sub(1)
                .and_then(|i| PROMPTS.get(i))
                .ok_or_else(|| {
                    Error::Other(format!(
                        "No prompt number {} (choose 1-{})",
                        number,
                        PROMPTS.len()
                    ))
                })?;

            if text.trim().is_empty() {
                println!("Nothing to save.");
                return Ok(());
            }
            let content = format!("{}{}", journal::prompt_starter(prompt), text);
            save_journal_text(store, now, &content)?;
        }
        JournalAction::Delete { id } => {
            let entries = JOURNAL_STORE.load_all(store);
            let Some(entry) = journal::find_by_prefix(&entries, &id) else {
                eprintln!("No single journal entry matches {:?}", id);
                return Ok(());
            };
            if journal::delete_entry(store, &entry.id)? {
                println!("✓ Deleted entry {}", view::short_id(&entry.id));
            }
        }
        JournalAction::Prompts => {
            println!("Writing Prompts");
            print!("{}", view::render_prompts());
        }
    }
    Ok(())
}

fn save_journal_text(
    store: &mut FileStore,
    now: chrono::DateTime<Utc>,
    text: &str,
) -> Result<()> {
    match journal::write_entry(store, now, text)? {
        Some(entry) => println!("✓ Entry saved [{}]", view::short_id(&entry.id)),
        None => println!("Nothing to save."),
    }
    Ok(())
}

fn cmd_breathe(
    store: &mut FileStore,
    profile: Option<String>,
    cycles: Option<u64>,
    list: bool,
    tick_ms: Option<u64>,
    config: &Config,
) -> Result<()> {
    let profiles = config.profiles();

    // Explicit choice, then the last one used, then the configured default
    let selected = match &profile {
        Some(name) => find_profile(&profiles, name)
            .ok_or_else(|| Error::Profile(format!("Unknown breathing profile: {}", name)))?,
        None => load_value::<String>(store, BREATHING_PROFILE_KEY)
            .and_then(|name| find_profile(&profiles, &name))
            .or_else(|| find_profile(&profiles, &config.breathing.default_profile))
            .ok_or_else(|| {
                Error::Profile(format!(
                    "Unknown breathing profile: {}",
                    config.breathing.default_profile
                ))
            })?,
    }
    .clone();

    if list {
        print!("{}", view::render_header(Tab::Breathing));
        println!();
        print!("{}", view::render_profiles(&profiles, &selected.name));
        println!();
        print!("{}", view::render_breathing_benefits());
        return Ok(());
    }

    save_value(store, BREATHING_PROFILE_KEY, &selected.name)?;

    let cycles = cycles.unwrap_or(config.breathing.default_cycles);
    let interval = Duration::from_millis(tick_ms.unwrap_or(config.breathing.tick_millis).max(1));
    let interactive = io::stdout().is_terminal();

    println!("{} ({}), {} cycles", selected.name, selected.pattern(), cycles);

    let mut sequencer = Sequencer::new(selected);
    let mut ticker = IntervalTicker::new(interval);
    let mut stdout = io::stdout();

    let first = view::render_breathing(sequencer.state(), sequencer.profile());
    if interactive {
        print!("\r{}", first);
        let _ = stdout.flush();
    } else {
        println!("{}", first);
    }

    let summary = run_session(
        &mut sequencer,
        &mut ticker,
        SessionLimit::Cycles(cycles),
        |seq, outcome| {
            let line = view::render_breathing(seq.state(), seq.profile());
            if interactive {
                // Pad to clear leftovers from a longer phase label
                print!("\r{:<72}", line);
                let _ = stdout.flush();
            } else if outcome != TickOutcome::Counted {
                println!("{}", line);
            }
        },
    );

    if interactive {
        println!();
    }
    println!(
        "✓ Completed {} cycles of {}",
        summary.completed_cycles,
        sequencer.profile().name
    );
    Ok(())
}

fn cmd_affirm(store: &mut FileStore, action: Option<AffirmAction>) -> Result<()> {
    match action.unwrap_or(AffirmAction::Show) {
        AffirmAction::Show => {
            show_affirmation(store, affirmations::current_index(store));
        }
        AffirmAction::Next => {
            let index = affirmations::advance(store, &mut rand::rng())?;
            show_affirmation(store, index);
        }
        AffirmAction::Favorite => {
            let text = AFFIRMATIONS[affirmations::current_index(store)];
            let (_, added) = affirmations::toggle_favorite(store, text)?;
            if added {
                println!("✓ Added to favorites: \"{}\"", text);
            } else {
                println!("✓ Removed from favorites: \"{}\"", text);
            }
        }
        AffirmAction::Favorites => {
            print!("{}", view::render_favorites(&FAVORITES_STORE.load_all(store)));
        }
        AffirmAction::Unfavorite { number } => {
            let favorites = FAVORITES_STORE.load_all(store);
            let text = number
                .checked_sub(1)
                .and_then(|i| favorites.get(i))
                .ok_or_else(|| Error::Other(format!("No favorite number {}", number)))?;
            FAVORITES_STORE.remove(store, text)?;
            println!("✓ Removed from favorites: \"{}\"", text);
        }
    }
    Ok(())
}

fn show_affirmation(store: &FileStore, index: usize) {
    let favorites = FAVORITES_STORE.load_all(store);
    print!("{}", view::render_header(Tab::Affirmations));
    println!();
    print!(
        "{}",
        view::render_affirmation(&AffirmationView {
            index,
            favorites: &favorites,
        })
    );
}

fn cmd_export(store: &FileStore, out: &Path) -> Result<()> {
    let moods = MOOD_STORE.load_all(store);
    let entries = JOURNAL_STORE.load_all(store);

    let mood_path = out.join(mindcare_core::export::MOOD_CSV);
    let journal_path = out.join(mindcare_core::export::JOURNAL_CSV);

    let mood_count = mindcare_core::export::export_moods(&moods, &mood_path)?;
    let journal_count = mindcare_core::export::export_journal(&entries, &journal_path)?;

    println!("✓ Exported {} mood entries to {}", mood_count, mood_path.display());
    println!(
        "✓ Exported {} journal entries to {}",
        journal_count,
        journal_path.display()
    );
    Ok(())
}
