use std::time::Instant;

use crate::session::input::CharStatus;

/// Five keystrokes make one word for speed figures.
pub const CHARS_PER_WORD: f64 = 5.0;

/// One practice string being typed. Text only moves forward; a wrong
/// character is recorded against the expected one and the cursor advances.
pub struct DrillState {
    pub target: Vec<char>,
    pub input: Vec<CharStatus>,
    pub presented_at: Instant,
    pub last_key_at: Option<Instant>,
    pub finished_at: Option<Instant>,
}

impl DrillState {
    pub fn new(text: &str) -> Self {
        Self::presented(text, Instant::now())
    }

    pub fn presented(text: &str, at: Instant) -> Self {
        Self {
            target: text.chars().collect(),
            input: Vec::new(),
            presented_at: at,
            last_key_at: None,
            finished_at: None,
        }
    }

    pub fn text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed(&self) -> usize {
        self.input.len()
    }

    pub fn is_complete(&self) -> bool {
        self.typed() >= self.target.len()
    }

    pub fn expected(&self) -> Option<char> {
        self.target.get(self.typed()).copied()
    }

    /// Time from presentation to the last keystroke, matching how the first
    /// keystroke's latency is measured.
    pub fn elapsed_secs(&self) -> f64 {
        self.finished_at
            .or(self.last_key_at)
            .map(|end| end.saturating_duration_since(self.presented_at).as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn correct_count(&self) -> usize {
        self.input
            .iter()
            .filter(|s| **s == CharStatus::Correct)
            .count()
    }

    pub fn typo_count(&self) -> usize {
        self.typed() - self.correct_count()
    }

    pub fn wpm(&self) -> f64 {
        let minutes = self.elapsed_secs() / 60.0;
        if minutes <= 0.0 {
            return 0.0;
        }
        self.correct_count() as f64 / CHARS_PER_WORD / minutes
    }

    /// 100 before anything is typed.
    pub fn accuracy(&self) -> f64 {
        match self.typed() {
            0 => 100.0,
            typed => self.correct_count() as f64 * 100.0 / typed as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::input;

    #[test]
    fn test_new_drill() {
        let drill = DrillState::new("hello");
        assert_eq!(drill.target.len(), 5);
        assert_eq!(drill.typed(), 0);
        assert!(!drill.is_complete());
        assert_eq!(drill.expected(), Some('h'));
        assert_eq!(drill.accuracy(), 100.0);
        assert_eq!(drill.wpm(), 0.0);
    }

    #[test]
    fn test_empty_drill_is_complete() {
        let drill = DrillState::new("");
        assert!(drill.is_complete());
        assert_eq!(drill.expected(), None);
    }

    #[test]
    fn test_wpm_from_presentation() {
        let t0 = Instant::now();
        let mut drill = DrillState::presented("aaaaaaaaaa", t0);
        for i in 0..10 {
            input::process_char(&mut drill, 'a', t0 + Duration::from_millis(500 * (i + 1)));
        }
        assert!(drill.is_complete());
        assert_eq!(drill.elapsed_secs(), 5.0);
        // 2 words in 5 seconds
        assert!((drill.wpm() - 24.0).abs() < 1e-9, "{}", drill.wpm());
    }

    #[test]
    fn test_accuracy_counts_typos() {
        let t0 = Instant::now();
        let mut drill = DrillState::presented("asdf", t0);
        for (i, ch) in "axdx".chars().enumerate() {
            input::process_char(&mut drill, ch, t0 + Duration::from_millis(100 * i as u64));
        }
        assert_eq!(drill.typo_count(), 2);
        assert_eq!(drill.correct_count(), 2);
        assert_eq!(drill.accuracy(), 50.0);
    }
}
