use std::collections::{BTreeSet, HashMap};

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::engine::filter::CharFilter;

const MIN_SYNTHETIC_LEN: usize = 3;
const MAX_SYNTHETIC_LEN: usize = 6;
/// Weight multiplier for difficult keys when picking the next letter.
const TARGET_BOOST: f64 = 2.0;
const TARGET_START_PROB: f64 = 0.5;

/// Letter-to-letter transition weights used to synthesize pronounceable
/// practice sequences when no dictionary word fits the unlocked keys.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    pub transitions: HashMap<char, Vec<(char, f64)>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
        }
    }

    pub fn add(&mut self, curr: char, next: char, weight: f64) {
        let entry = self.transitions.entry(curr).or_default();
        match entry.iter_mut().find(|(ch, _)| *ch == next) {
            Some((_, w)) => *w += weight,
            None => entry.push((next, weight)),
        }
    }

    pub fn get_next_probs(&self, curr: char) -> Option<&Vec<(char, f64)>> {
        self.transitions.get(&curr)
    }

    pub fn build_english() -> Self {
        let mut table = Self::new();

        let common_bigrams: &[(&str, f64)] = &[
            ("th", 3.0), ("he", 3.0), ("in", 3.0), ("er", 3.0), ("an", 3.0),
            ("re", 3.0), ("on", 3.0), ("at", 3.0), ("en", 3.0), ("nd", 3.0),
            ("ti", 2.0), ("es", 2.0), ("or", 2.0), ("te", 2.0), ("of", 2.0),
            ("ed", 2.0), ("is", 2.0), ("it", 2.0), ("al", 2.0), ("ar", 2.0),
            ("st", 1.5), ("to", 1.5), ("nt", 1.5), ("ng", 1.5), ("se", 1.5),
            ("ha", 1.5), ("as", 1.5), ("ou", 1.5), ("io", 1.5), ("le", 1.5),
            ("ea", 1.0), ("ch", 1.0), ("wh", 1.0), ("sh", 1.0), ("oo", 1.0),
            ("ee", 1.0), ("ai", 1.0), ("ay", 1.0), ("ly", 1.0), ("el", 1.0),
        ];

        for &(pair, weight) in common_bigrams {
            let chars: Vec<char> = pair.chars().collect();
            table.add(chars[0], chars[1], weight);
        }

        let vowels = ['a', 'e', 'i', 'o', 'u'];
        let consonants = [
            'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v',
            'w', 'x', 'y', 'z',
        ];

        for &c in &consonants {
            for &v in &vowels {
                table.add(c, v, 0.5);
                table.add(v, c, 0.4);
            }
        }

        table
    }

    /// Adds the letter pairs of real words on top of the built-in weights.
    pub fn add_words<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            let chars: Vec<char> = word.as_ref().chars().collect();
            for pair in chars.windows(2) {
                self.add(pair[0], pair[1], 0.1);
            }
        }
    }

    /// A short letter sequence drawn only from `filter`'s letters, leaning
    /// toward `targets`. Empty only when the filter allows no letters.
    pub fn synthesize_word(
        &self,
        filter: &CharFilter,
        targets: &BTreeSet<char>,
        rng: &mut SmallRng,
    ) -> String {
        let letters = filter.letters();
        if letters.is_empty() {
            return String::new();
        }

        let targets: Vec<char> = targets
            .iter()
            .copied()
            .filter(|&ch| ch != ' ' && filter.is_allowed(ch))
            .collect();
        let len = rng.gen_range(MIN_SYNTHETIC_LEN..=MAX_SYNTHETIC_LEN);

        let first = if !targets.is_empty() && rng.gen_bool(TARGET_START_PROB) {
            targets.choose(rng).copied()
        } else {
            letters.choose(rng).copied()
        };
        let mut word: Vec<char> = first.into_iter().collect();

        while word.len() < len {
            let prev = word[word.len() - 1];
            let next = self
                .get_next_probs(prev)
                .and_then(|probs| pick_weighted_from(rng, probs, filter, &targets))
                .or_else(|| letters.choose(rng).copied());
            match next {
                Some(ch) => word.push(ch),
                None => break,
            }
        }

        word.into_iter().collect()
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
    }
}

fn pick_weighted_from(
    rng: &mut SmallRng,
    options: &[(char, f64)],
    filter: &CharFilter,
    targets: &[char],
) -> Option<char> {
    let filtered: Vec<(char, f64)> = options
        .iter()
        .filter(|(ch, w)| *ch != ' ' && filter.is_allowed(*ch) && *w > 0.0)
        .map(|&(ch, w)| {
            if targets.contains(&ch) {
                (ch, w * TARGET_BOOST)
            } else {
                (ch, w)
            }
        })
        .collect();

    let total: f64 = filtered.iter().map(|(_, w)| w).sum();
    if filtered.is_empty() || total <= 0.0 {
        return None;
    }

    let mut roll = rng.gen_range(0.0..total);
    for &(ch, weight) in &filtered {
        roll -= weight;
        if roll <= 0.0 {
            return Some(ch);
        }
    }

    filtered.last().map(|&(ch, _)| ch)
}
