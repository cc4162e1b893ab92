use quiz_types::{CatalogEntry, Champion, GuessOutcome};
use std::collections::{BTreeSet, HashMap};

/// A guess must score strictly above this to count as naming a champion.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

const WORD_BOUNDARY: char = ' ';

/// Canonical comparison form: lowercase with everything outside `[a-z0-9]` removed.
///
/// `"Kai'Sa"`, `"kaisa"` and `"KAI SA"` all become `"kaisa"`.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Sørensen–Dice coefficient over character bigrams, in `[0.0, 1.0]`.
///
/// Each word is padded with a boundary marker on both ends so the first and
/// last letters carry their own bigram. Bigrams are counted as a multiset,
/// so repeated pairs only match as often as they occur on both sides.
pub fn similarity(first: &str, second: &str) -> f64 {
    if first == second {
        return 1.0;
    }
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }

    let first_bigrams = bigrams(first);
    let second_bigrams = bigrams(second);

    let shared: usize = first_bigrams
        .iter()
        .map(|(pair, count)| second_bigrams.get(pair).map_or(0, |other| (*count).min(*other)))
        .sum();
    let total: usize = first_bigrams.values().sum::<usize>() + second_bigrams.values().sum::<usize>();

    (2 * shared) as f64 / total as f64
}

fn bigrams(word: &str) -> HashMap<(char, char), usize> {
    let padded: Vec<char> = std::iter::once(WORD_BOUNDARY)
        .chain(word.chars())
        .chain(std::iter::once(WORD_BOUNDARY))
        .collect();

    let mut counts = HashMap::new();
    for pair in padded.windows(2) {
        *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone)]
struct Candidate {
    entry: CatalogEntry,
    normalized: String,
}

/// Matches free-text guesses against a fixed catalog. Catalog names are
/// normalized once up front; catalog order is preserved because the first
/// entry over the threshold wins.
#[derive(Debug, Clone, Default)]
pub struct GuessMatcher {
    candidates: Vec<Candidate>,
}

impl GuessMatcher {
    pub fn new(catalog: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let candidates = catalog
            .into_iter()
            .map(|entry| Candidate {
                normalized: normalize_name(&entry.name),
                entry,
            })
            .collect();

        Self { candidates }
    }

    pub fn from_champions(champions: &[Champion]) -> Self {
        Self::new(champions.iter().map(Champion::entry))
    }

    pub fn entry_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Find the first catalog entry the guess denotes, with its normalized name.
    pub fn find_match(&self, guess: &str) -> Option<(&CatalogEntry, &str)> {
        let normalized_guess = normalize_name(guess);
        if normalized_guess.is_empty() {
            return None;
        }

        self.candidates
            .iter()
            .find(|candidate| similarity(&candidate.normalized, &normalized_guess) > SIMILARITY_THRESHOLD)
            .map(|candidate| (&candidate.entry, candidate.normalized.as_str()))
    }

    pub fn match_guess(&self, guess: &str, already_guessed: &BTreeSet<String>) -> GuessOutcome {
        match self.find_match(guess) {
            Some((entry, normalized)) if already_guessed.contains(normalized) => {
                GuessOutcome::Duplicate(entry.id.clone())
            }
            Some((entry, _)) => GuessOutcome::Correct(entry.id.clone()),
            None => GuessOutcome::Miss,
        }
    }

    /// Normalized name of the entry with the given id, if it is in the catalog
    pub fn normalized_name_of(&self, id: &str) -> Option<&str> {
        self.candidates
            .iter()
            .find(|candidate| candidate.entry.id == id)
            .map(|candidate| candidate.normalized.as_str())
    }
}

/// One-shot form of [`GuessMatcher::match_guess`] for callers holding a plain slice.
pub fn match_guess(
    guess: &str,
    catalog: &[CatalogEntry],
    already_guessed: &BTreeSet<String>,
) -> GuessOutcome {
    GuessMatcher::new(catalog.iter().cloned()).match_guess(guess, already_guessed)
}
