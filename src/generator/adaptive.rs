use std::collections::BTreeSet;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engine::filter::CharFilter;
use crate::engine::snapshot::PerformanceSnapshot;
use crate::engine::tuning::{StageTargeting, Tuning};
use crate::generator::TextGenerator;
use crate::generator::dictionary::{Dictionary, SENTENCE_STARTERS};
use crate::generator::stage::Stage;
use crate::generator::transition_table::TransitionTable;

/// What the generator will aim for given a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationPlan {
    pub stage: Stage,
    pub targeting: StageTargeting,
    pub difficult_keys: BTreeSet<char>,
}

/// Picks real words biased toward the weakest keys, relaxing toward
/// natural text as accuracy improves.
pub struct AdaptiveGenerator {
    dictionary: Dictionary,
    table: TransitionTable,
    tuning: Tuning,
    rng: SmallRng,
}

impl AdaptiveGenerator {
    pub fn new(
        dictionary: Dictionary,
        table: TransitionTable,
        mut tuning: Tuning,
        rng: SmallRng,
    ) -> Self {
        tuning.normalize();
        Self {
            dictionary,
            table,
            tuning,
            rng,
        }
    }

    /// Bundled vocabulary and English letter pairs. A seed makes output reproducible.
    pub fn english(tuning: Tuning, seed: Option<u64>) -> Self {
        let dictionary = Dictionary::load();
        let mut table = TransitionTable::build_english();
        table.add_words(dictionary.words_list());
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::new(dictionary, table, tuning, rng)
    }

    pub fn plan(&self, snapshot: &PerformanceSnapshot) -> GenerationPlan {
        let stage = Stage::from_accuracy(snapshot.avg_accuracy, &self.tuning);
        GenerationPlan {
            stage,
            targeting: stage.targeting(&self.tuning),
            difficult_keys: snapshot.difficult_keys(),
        }
    }

    /// `word_count` space-separated words typeable with the unlocked keys.
    /// With nothing but space unlocked the result is `word_count` spaces.
    pub fn generate_text(&mut self, snapshot: &PerformanceSnapshot, word_count: usize) -> String {
        if word_count == 0 {
            return String::new();
        }

        let plan = self.plan(snapshot);
        let filter = CharFilter::new(snapshot.unlocked_keys.iter().copied());
        let vocabulary = self.dictionary.find_matching(&filter);
        debug!(
            stage = %plan.stage,
            difficult_keys = ?plan.difficult_keys,
            vocabulary = vocabulary.len(),
            "generating practice text"
        );

        if vocabulary.is_empty() {
            debug!("no word fits the unlocked keys, synthesizing from letter pairs");
            return self.synthesize(&filter, &plan.difficult_keys, word_count);
        }

        let targeted: Vec<&str> = vocabulary
            .iter()
            .copied()
            .filter(|w| {
                distinct_difficult(w, &plan.difficult_keys) >= plan.targeting.min_difficult_keys
            })
            .collect();
        // Openers are checked against the filter alone so one-letter "a" qualifies.
        let starters: Vec<&str> = SENTENCE_STARTERS
            .iter()
            .copied()
            .filter(|w| filter.allows_word(w))
            .collect();

        let mut words: Vec<&str> = Vec::with_capacity(word_count);
        for i in 0..word_count {
            if i == 0 && plan.stage == Stage::Advanced {
                if let Some(&starter) = starters.choose(&mut self.rng) {
                    words.push(starter);
                    continue;
                }
            }

            let aim = self.rng.gen_bool(plan.targeting.targeting_fraction);
            let pool = if aim && !targeted.is_empty() {
                &targeted
            } else {
                &vocabulary
            };
            if let Some(&word) = pool.choose(&mut self.rng) {
                words.push(word);
            }
        }

        words.join(" ")
    }

    fn synthesize(
        &mut self,
        filter: &CharFilter,
        targets: &BTreeSet<char>,
        word_count: usize,
    ) -> String {
        // Only space unlocked: nothing else can be typed.
        if filter.letters().is_empty() {
            return " ".repeat(word_count);
        }
        (0..word_count)
            .map(|_| self.table.synthesize_word(filter, targets, &mut self.rng))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TextGenerator for AdaptiveGenerator {
    fn generate(&mut self, snapshot: &PerformanceSnapshot, word_count: usize) -> String {
        self.generate_text(snapshot, word_count)
    }
}

fn distinct_difficult(word: &str, difficult: &BTreeSet<char>) -> usize {
    difficult.iter().filter(|&&ch| word.contains(ch)).count()
}
