use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::engine::difficulty;

/// Read-only view of the tracker handed to the text generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub unlocked_keys: BTreeSet<char>,
    pub difficulty_by_key: BTreeMap<char, f64>,
    pub avg_difficulty: f64,
    /// Mean accuracy over unlocked keys with samples; 100 with no samples at all.
    pub avg_accuracy: f64,
    pub total_keys_typed: u64,
}

impl PerformanceSnapshot {
    pub fn difficult_keys(&self) -> BTreeSet<char> {
        difficulty::difficult_keys(&self.difficulty_by_key)
    }

    /// Unlocked keys ordered hardest first, space excluded.
    pub fn ranked_keys(&self) -> Vec<(char, f64)> {
        let mut ranked: Vec<(char, f64)> = self
            .difficulty_by_key
            .iter()
            .filter(|(ch, _)| **ch != ' ')
            .map(|(&ch, &score)| (ch, score))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}
