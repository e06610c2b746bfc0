use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::engine::difficulty;
use crate::engine::key_stats::KeyStat;
use crate::engine::letter_unlock::UnlockOrder;
use crate::engine::snapshot::PerformanceSnapshot;
use crate::engine::tuning::Tuning;
use crate::store::schema::{SCHEMA_VERSION, TrackerState};

/// Per-key rolling statistics plus the unlock decision.
#[derive(Clone, Debug)]
pub struct PerformanceTracker {
    stats: BTreeMap<char, KeyStat>,
    unlocked: BTreeSet<char>,
    total_keys_typed: u64,
    session_count: u32,
    last_practice_at: Option<DateTime<Utc>>,
    order: UnlockOrder,
    tuning: Tuning,
}

impl PerformanceTracker {
    pub fn new(tuning: Tuning, order: UnlockOrder) -> Self {
        Self::from_state(TrackerState::default(), tuning, order)
    }

    pub fn from_state(mut state: TrackerState, tuning: Tuning, order: UnlockOrder) -> Self {
        state.normalize(tuning.window_size);
        Self {
            stats: state.key_stats,
            unlocked: state.unlocked_keys,
            total_keys_typed: state.total_keys_typed,
            session_count: state.session_count,
            last_practice_at: state.last_practice_at,
            order,
            tuning,
        }
    }

    /// Tracker whose unlocked set is exactly `keys` plus space.
    pub fn with_unlocked_keys(keys: &str, tuning: Tuning) -> Self {
        let state = TrackerState {
            unlocked_keys: keys.chars().collect(),
            ..TrackerState::default()
        };
        Self::from_state(state, tuning, UnlockOrder::default())
    }

    pub fn to_state(&self) -> TrackerState {
        TrackerState {
            schema_version: SCHEMA_VERSION,
            key_stats: self.stats.clone(),
            unlocked_keys: self.unlocked.clone(),
            total_keys_typed: self.total_keys_typed,
            session_count: self.session_count,
            last_practice_at: self.last_practice_at,
        }
    }

    /// Called once per process start.
    pub fn begin_session(&mut self) {
        self.session_count += 1;
        self.last_practice_at = Some(Utc::now());
        debug!(session = self.session_count, "session started");
    }

    pub fn record_keystroke(&mut self, key: char, correct: bool, latency_secs: f64) {
        self.stats
            .entry(key)
            .or_default()
            .record(correct, latency_secs, self.tuning.window_size);
        self.total_keys_typed += 1;
    }

    pub fn difficulty_score(&self, key: char) -> f64 {
        self.score_against(key, self.unlocked_mean_wpm())
    }

    fn score_against(&self, key: char, mean_wpm: Option<f64>) -> f64 {
        let stat = self.stats.get(&key);
        let accuracy = difficulty::accuracy_score(stat);
        let speed = difficulty::speed_score(stat.and_then(KeyStat::avg_wpm), mean_wpm);
        difficulty::composite(accuracy, speed, &self.tuning)
    }

    fn unlocked_mean_wpm(&self) -> Option<f64> {
        difficulty::mean_wpm(self.unlocked.iter().filter_map(|ch| self.stats.get(ch)))
    }

    fn difficulty_by_key(&self) -> BTreeMap<char, f64> {
        let mean_wpm = self.unlocked_mean_wpm();
        self.unlocked
            .iter()
            .map(|&ch| (ch, self.score_against(ch, mean_wpm)))
            .collect()
    }

    pub fn avg_difficulty(&self) -> f64 {
        mean(self.difficulty_by_key().values().copied()).unwrap_or(0.0)
    }

    /// Keys without samples are left out; with no samples at all the key
    /// set shows no sign of struggle and reads as 100.
    pub fn avg_accuracy(&self) -> f64 {
        mean(
            self.unlocked
                .iter()
                .filter_map(|ch| self.stats.get(ch))
                .filter_map(KeyStat::accuracy_pct),
        )
        .unwrap_or(100.0)
    }

    pub fn should_unlock_next_key(&self) -> bool {
        let required = self
            .tuning
            .keystrokes_per_key
            .saturating_mul(self.unlocked.len() as u64);
        self.avg_difficulty() < self.tuning.unlock_difficulty && self.total_keys_typed > required
    }

    pub fn unlock_next_key(&mut self) -> Option<char> {
        let next = self.order.next_locked(&self.unlocked)?;
        self.unlocked.insert(next);
        info!(
            key = ?next,
            unlocked = self.unlocked.len(),
            total_keys_typed = self.total_keys_typed,
            "unlocked new key"
        );
        Some(next)
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        let difficulty_by_key = self.difficulty_by_key();
        let avg_difficulty = mean(difficulty_by_key.values().copied()).unwrap_or(0.0);
        PerformanceSnapshot {
            unlocked_keys: self.unlocked.clone(),
            difficulty_by_key,
            avg_difficulty,
            avg_accuracy: self.avg_accuracy(),
            total_keys_typed: self.total_keys_typed,
        }
    }

    pub fn unlocked_keys(&self) -> &BTreeSet<char> {
        &self.unlocked
    }

    pub fn is_unlocked(&self, key: char) -> bool {
        self.unlocked.contains(&key)
    }

    pub fn key_stat(&self, key: char) -> Option<&KeyStat> {
        self.stats.get(&key)
    }

    pub fn total_keys_typed(&self) -> u64 {
        self.total_keys_typed
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn last_practice_at(&self) -> Option<DateTime<Utc>> {
        self.last_practice_at
    }

    pub fn unlock_progress(&self) -> f64 {
        self.order.progress(&self.unlocked)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new(Tuning::default(), UnlockOrder::default())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
