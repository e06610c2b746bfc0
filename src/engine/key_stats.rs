use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Seconds-per-keystroke to words-per-minute: 60 s / 5 chars per word.
const WPM_PER_KEYS_PER_SECOND: f64 = 12.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyStat {
    #[serde(default)]
    pub accuracy_window: VecDeque<bool>,
    /// Latencies in seconds, correct keystrokes only.
    #[serde(default)]
    pub speed_window: VecDeque<f64>,
}

impl KeyStat {
    pub fn record(&mut self, correct: bool, latency_secs: f64, window: usize) {
        push_bounded(&mut self.accuracy_window, correct, window);
        if correct && latency_secs.is_finite() && latency_secs >= 0.0 {
            push_bounded(&mut self.speed_window, latency_secs, window);
        }
    }

    pub fn sample_count(&self) -> usize {
        self.accuracy_window.len()
    }

    /// Percentage of correct samples, `None` before the first sample.
    pub fn accuracy_pct(&self) -> Option<f64> {
        if self.accuracy_window.is_empty() {
            return None;
        }
        let correct = self.accuracy_window.iter().filter(|&&c| c).count();
        Some(correct as f64 / self.accuracy_window.len() as f64 * 100.0)
    }

    pub fn avg_latency_secs(&self) -> Option<f64> {
        if self.speed_window.is_empty() {
            return None;
        }
        Some(self.speed_window.iter().sum::<f64>() / self.speed_window.len() as f64)
    }

    /// A zero mean latency carries no usable speed signal.
    pub fn avg_wpm(&self) -> Option<f64> {
        self.avg_latency_secs()
            .filter(|&latency| latency > 0.0)
            .map(|latency| WPM_PER_KEYS_PER_SECOND / latency)
    }

    /// Enforce window bounds and latency validity on data that did not
    /// come through `record`, e.g. a loaded profile.
    pub fn sanitize(&mut self, window: usize) {
        self.speed_window
            .retain(|latency| latency.is_finite() && *latency >= 0.0);
        trim_front(&mut self.accuracy_window, window);
        trim_front(&mut self.speed_window, window);
    }
}

fn push_bounded<T>(buf: &mut VecDeque<T>, value: T, window: usize) {
    buf.push_back(value);
    trim_front(buf, window);
}

fn trim_front<T>(buf: &mut VecDeque<T>, window: usize) {
    while buf.len() > window {
        buf.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stat_has_no_data() {
        let stat = KeyStat::default();
        assert_eq!(stat.accuracy_pct(), None);
        assert_eq!(stat.avg_wpm(), None);
        assert_eq!(stat.sample_count(), 0);
    }

    #[test]
    fn test_windows_are_bounded() {
        let mut stat = KeyStat::default();
        for i in 0..120 {
            stat.record(i % 3 != 0, 0.2, 50);
        }
        assert_eq!(stat.accuracy_window.len(), 50);
        assert!(stat.speed_window.len() <= 50);
    }

    #[test]
    fn test_oldest_samples_evicted_first() {
        let mut stat = KeyStat::default();
        for _ in 0..5 {
            stat.record(false, 0.5, 5);
        }
        for _ in 0..5 {
            stat.record(true, 0.25, 5);
        }
        assert_eq!(stat.accuracy_pct(), Some(100.0));
    }

    #[test]
    fn test_speed_recorded_only_for_correct() {
        let mut stat = KeyStat::default();
        stat.record(false, 0.9, 50);
        stat.record(true, 0.25, 50);
        assert_eq!(stat.speed_window.len(), 1);
        assert_eq!(stat.accuracy_pct(), Some(50.0));
    }

    #[test]
    fn test_wpm_from_latency() {
        let mut stat = KeyStat::default();
        // 0.2 s per key = 5 keys/s = 300 cpm = 60 wpm
        for _ in 0..10 {
            stat.record(true, 0.2, 50);
        }
        let wpm = stat.avg_wpm().unwrap();
        assert!((wpm - 60.0).abs() < 1e-9, "got {wpm}");
    }

    #[test]
    fn test_negative_latency_not_stored() {
        let mut stat = KeyStat::default();
        stat.record(true, -0.1, 50);
        stat.record(true, f64::NAN, 50);
        assert!(stat.speed_window.is_empty());
        assert_eq!(stat.sample_count(), 2);
    }

    #[test]
    fn test_sanitize_trims_loaded_windows() {
        let mut stat = KeyStat {
            accuracy_window: std::iter::repeat(true).take(80).collect(),
            speed_window: vec![0.1, -2.0, 0.3].into(),
        };
        stat.sanitize(50);
        assert_eq!(stat.accuracy_window.len(), 50);
        assert_eq!(stat.speed_window, VecDeque::from(vec![0.1, 0.3]));
    }
}
