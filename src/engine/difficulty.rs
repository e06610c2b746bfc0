use std::collections::{BTreeMap, BTreeSet};

use crate::engine::key_stats::KeyStat;
use crate::engine::tuning::Tuning;

pub const MAX_DIFFICULTY: f64 = 100.0;

/// 0 when always correct, 100 when always wrong. No samples means no
/// evidence of difficulty.
pub fn accuracy_score(stat: Option<&KeyStat>) -> f64 {
    stat.and_then(KeyStat::accuracy_pct)
        .map(|pct| MAX_DIFFICULTY - pct)
        .unwrap_or(0.0)
}

/// Relative slowness against the mean speed of the key set: a key at or
/// above the mean scores 0, a key at half the mean scores 50.
pub fn speed_score(key_wpm: Option<f64>, mean_wpm: Option<f64>) -> f64 {
    match (key_wpm, mean_wpm) {
        (Some(key), Some(mean)) if mean > 0.0 => {
            (MAX_DIFFICULTY * (1.0 - key / mean)).clamp(0.0, MAX_DIFFICULTY)
        }
        _ => 0.0,
    }
}

pub fn composite(accuracy_score: f64, speed_score: f64, tuning: &Tuning) -> f64 {
    let score = tuning.accuracy_weight * accuracy_score + tuning.speed_weight * speed_score;
    if score.is_finite() {
        score.clamp(0.0, MAX_DIFFICULTY)
    } else {
        0.0
    }
}

/// Mean words-per-minute over the stats that have speed data.
pub fn mean_wpm<'a>(stats: impl IntoIterator<Item = &'a KeyStat>) -> Option<f64> {
    let speeds: Vec<f64> = stats.into_iter().filter_map(KeyStat::avg_wpm).collect();
    if speeds.is_empty() {
        None
    } else {
        Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Keys scoring strictly above the median difficulty of the non-space keys.
/// Space never counts: it separates words rather than appearing in them.
pub fn difficult_keys(difficulty_by_key: &BTreeMap<char, f64>) -> BTreeSet<char> {
    let scored: Vec<(char, f64)> = difficulty_by_key
        .iter()
        .filter(|(ch, _)| **ch != ' ')
        .map(|(&ch, &score)| (ch, score))
        .collect();
    let scores: Vec<f64> = scored.iter().map(|(_, s)| *s).collect();

    let Some(cut) = median(&scores) else {
        return BTreeSet::new();
    };

    scored
        .into_iter()
        .filter(|(_, score)| *score > cut)
        .map(|(ch, _)| ch)
        .collect()
}
