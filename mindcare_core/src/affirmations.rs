//! Affirmation catalog, random rotation and favorites.

use crate::records::RecordStore;
use crate::storage::{
    load_value, save_value, KeyValueStore, CURRENT_AFFIRMATION_KEY, FAVORITE_AFFIRMATIONS_KEY,
};
use crate::Result;
use rand::Rng;

/// Favorited affirmations, stored as their exact text in the order favorited
pub const FAVORITES_STORE: RecordStore<String> = RecordStore::new(FAVORITE_AFFIRMATIONS_KEY);

pub const AFFIRMATIONS: [&str; 20] = [
    "I am worthy of love and respect.",
    "My feelings are valid and important.",
    "I am doing the best I can, and that's enough.",
    "I choose to be kind to myself today.",
    "I am stronger than my challenges.",
    "It's okay to not be okay sometimes.",
    "I am making progress, even when it's not visible.",
    "I deserve peace and happiness.",
    "My mental health matters.",
    "I am brave for facing each day.",
    "I am not alone in this journey.",
    "Small steps are still steps forward.",
    "I am more than my thoughts and feelings.",
    "I have the power to create positive change.",
    "I am worthy of rest and self-care.",
    "My story isn't over yet.",
    "I am learning and growing every day.",
    "I choose hope over fear.",
    "I am resilient and capable.",
    "Better days are coming.",
];

/// "How to use" steps shown alongside the affirmation
pub const USAGE_TIPS: [&str; 4] = [
    "Read the affirmation slowly and let it sink in",
    "Repeat it out loud or in your mind several times",
    "Try to feel the meaning and believe in the words",
    "Use affirmations daily for best results",
];

/// Pick a random index into `catalog_len` entries, different from `current`
/// whenever there is more than one entry to choose from.
pub fn next_index<R: Rng + ?Sized>(current: usize, catalog_len: usize, rng: &mut R) -> usize {
    match catalog_len {
        0 | 1 => 0,
        len => {
            // Draw from the other len-1 slots and step over `current`
            let pick = rng.random_range(0..len - 1);
            if pick >= current.min(len - 1) {
                pick + 1
            } else {
                pick
            }
        }
    }
}

/// Index of the affirmation on screen, defaulting to the first
pub fn current_index(kv: &dyn KeyValueStore) -> usize {
    load_value::<usize>(kv, CURRENT_AFFIRMATION_KEY)
        .filter(|&i| i < AFFIRMATIONS.len())
        .unwrap_or(0)
}

/// Move to a new random affirmation and remember it
pub fn advance<R: Rng + ?Sized>(kv: &mut dyn KeyValueStore, rng: &mut R) -> Result<usize> {
    let next = next_index(current_index(kv), AFFIRMATIONS.len(), rng);
    save_value(kv, CURRENT_AFFIRMATION_KEY, &next)?;
    tracing::debug!("Showing affirmation {}", next);
    Ok(next)
}

pub fn is_favorite(favorites: &[String], text: &str) -> bool {
    favorites.iter().any(|f| f == text)
}

/// Add `text` to favorites, or remove it if already present.
///
/// Returns the updated favorites and whether `text` is now a favorite.
pub fn toggle_favorite(kv: &mut dyn KeyValueStore, text: &str) -> Result<(Vec<String>, bool)> {
    let favorites = FAVORITES_STORE.load_all(kv);
    if is_favorite(&favorites, text) {
        let updated = FAVORITES_STORE.remove(kv, text)?;
        tracing::info!("Removed favorite affirmation");
        Ok((updated, false))
    } else {
        let updated = FAVORITES_STORE.append(kv, text.to_string())?;
        tracing::info!("Added favorite affirmation");
        Ok((updated, true))
    }
}
