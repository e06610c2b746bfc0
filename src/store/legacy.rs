use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Deserialize;

use crate::engine::key_stats::KeyStat;
use crate::engine::letter_unlock;
use crate::store::schema::{SCHEMA_VERSION, TrackerState};

/// Stats file written by the earlier script version: lifetime
/// correct/incorrect counters and raw millisecond timings per key.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LegacyStats {
    #[serde(default)]
    pub key_accuracy: HashMap<char, LegacyAccuracy>,
    #[serde(default)]
    pub key_speed: HashMap<char, Vec<f64>>,
    #[serde(default)]
    pub total_keys: u64,
    #[serde(default)]
    pub session_count: u32,
    #[serde(default)]
    pub unlocked_keys: Option<Vec<char>>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct LegacyAccuracy {
    #[serde(default)]
    pub correct: u64,
    #[serde(default)]
    pub incorrect: u64,
}

impl LegacyStats {
    /// Whether a raw JSON record uses the legacy layout.
    pub fn detect(value: &serde_json::Value) -> bool {
        value.get("key_accuracy").is_some() || value.get("key_speed").is_some()
    }

    /// Compact lifetime counters into windows of at most `window` samples,
    /// keeping the accuracy ratio. Errors are placed oldest.
    pub fn into_state(self, window: usize) -> TrackerState {
        let keys: BTreeSet<char> = self
            .key_accuracy
            .keys()
            .chain(self.key_speed.keys())
            .copied()
            .collect();

        let mut key_stats = BTreeMap::new();
        for key in keys {
            let mut stat = KeyStat::default();

            if let Some(acc) = self.key_accuracy.get(&key) {
                let total = acc.correct + acc.incorrect;
                if total > 0 {
                    let kept = total.min(window as u64);
                    let wrong = (acc.incorrect as f64 * kept as f64 / total as f64).round() as u64;
                    stat.accuracy_window.extend((0..kept).map(|i| i >= wrong));
                }
            }

            // Legacy timings include mistyped keystrokes; they are kept as
            // speed samples since the record cannot tell them apart.
            if let Some(times) = self.key_speed.get(&key) {
                let skip = times.len().saturating_sub(window);
                stat.speed_window
                    .extend(times[skip..].iter().map(|ms| ms / 1000.0));
            }

            stat.sanitize(window);
            key_stats.insert(key, stat);
        }

        let unlocked_keys = match self.unlocked_keys {
            Some(keys) => keys.into_iter().collect(),
            None => letter_unlock::starter_keys(),
        };

        let mut state = TrackerState {
            schema_version: SCHEMA_VERSION,
            key_stats,
            unlocked_keys,
            total_keys_typed: self.total_keys,
            session_count: self.session_count,
            last_practice_at: None,
        };
        state.normalize(window);
        state
    }
}
