use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::Config;
use crate::engine::PerformanceTracker;
use crate::generator::{AdaptiveGenerator, TextGenerator};
use crate::session::drill::DrillState;
use crate::session::input;
use crate::session::result::DrillResult;
use crate::store::json_store::JsonStore;

/// Owns the tracker and generator and runs the practice loop:
/// keystroke, stat update, unlock check, next text.
pub struct App {
    pub config: Config,
    pub tracker: PerformanceTracker,
    pub drill: Option<DrillState>,
    pub last_result: Option<DrillResult>,
    generator: Box<dyn TextGenerator>,
    store: Option<JsonStore>,
    pending_unlock: Option<char>,
}

impl App {
    /// Load persisted state (or defaults) and count a new session.
    pub fn new(config: Config, store: Option<JsonStore>) -> Self {
        let state = store
            .as_ref()
            .map(|s| s.load_state(config.tuning.window_size))
            .unwrap_or_default();
        let tracker =
            PerformanceTracker::from_state(state, config.tuning.clone(), config.unlock_order());
        let generator = AdaptiveGenerator::english(config.tuning.clone(), config.seed);
        Self::with_parts(config, tracker, Box::new(generator), store)
    }

    pub fn with_parts(
        config: Config,
        mut tracker: PerformanceTracker,
        generator: Box<dyn TextGenerator>,
        store: Option<JsonStore>,
    ) -> Self {
        tracker.begin_session();
        Self {
            config,
            tracker,
            drill: None,
            last_result: None,
            generator,
            store,
            pending_unlock: None,
        }
    }

    /// Unlock a key if the current set is mastered, then present new text.
    /// Returns the newly unlocked key, if any.
    pub fn start_drill(&mut self) -> Option<char> {
        let unlocked = if self.tracker.should_unlock_next_key() {
            self.tracker.unlock_next_key()
        } else {
            None
        };

        let snapshot = self.tracker.snapshot();
        let text = self.generator.generate(&snapshot, self.config.word_count);
        debug!(
            avg_accuracy = snapshot.avg_accuracy,
            avg_difficulty = snapshot.avg_difficulty,
            text = %text,
            "new drill"
        );
        self.drill = Some(DrillState::new(&text));
        self.pending_unlock = unlocked;
        unlocked
    }

    /// Abandon the current text for a fresh one.
    pub fn restart_drill(&mut self) -> Option<char> {
        if let Some(drill) = self.drill.take() {
            self.last_result = Some(DrillResult::from_drill(&drill, self.pending_unlock));
        }
        self.start_drill()
    }

    /// Feed one typed character. Returns true when it completed the text.
    pub fn type_char(&mut self, ch: char, at: Instant) -> bool {
        let Some(drill) = self.drill.as_mut() else {
            return false;
        };
        if let Some(event) = input::process_char(drill, ch, at) {
            self.tracker
                .record_keystroke(event.expected, event.correct, event.latency_secs);
        }
        drill.is_complete()
    }

    /// Summarize and clear the current drill.
    pub fn finish_drill(&mut self) -> Option<&DrillResult> {
        let drill = self.drill.take()?;
        let result = DrillResult::from_drill(&drill, self.pending_unlock.take());
        info!(
            wpm = result.wpm,
            accuracy = result.accuracy,
            chars = result.total_chars,
            "drill finished"
        );
        self.last_result = Some(result);
        self.last_result.as_ref()
    }

    pub fn current_text(&self) -> Option<String> {
        self.drill.as_ref().map(DrillState::text)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(store) = &self.store {
            store.save_state(&self.tracker.to_state())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::tuning::Tuning;

    fn test_app() -> App {
        let config = Config {
            seed: Some(7),
            ..Config::default()
        };
        App::new(config, None)
    }

    #[test]
    fn test_new_app_counts_session() {
        let app = test_app();
        assert_eq!(app.tracker.session_count(), 1);
        assert!(app.drill.is_none());
    }

    #[test]
    fn test_drill_text_uses_unlocked_keys() {
        let mut app = test_app();
        assert_eq!(app.start_drill(), None);
        let text = app.current_text().unwrap();
        assert_eq!(text.split(' ').count(), 8);
        assert!(text.chars().all(|c| app.tracker.is_unlocked(c)), "{text}");
    }

    #[test]
    fn test_typing_records_expected_keys() {
        let mut app = test_app();
        app.start_drill();
        let text = app.current_text().unwrap();
        let t0 = app.drill.as_ref().unwrap().presented_at;

        let mut done = false;
        for (i, ch) in text.chars().enumerate() {
            done = app.type_char(ch, t0 + Duration::from_millis(200 * (i as u64 + 1)));
        }
        assert!(done);
        assert_eq!(app.tracker.total_keys_typed(), text.chars().count() as u64);

        let result = app.finish_drill().unwrap();
        assert_eq!(result.accuracy, 100.0);
        assert!(!result.partial);
        assert!(app.drill.is_none());
    }

    #[test]
    fn test_mastery_unlocks_on_next_drill() {
        let config = Config {
            seed: Some(3),
            ..Config::default()
        };
        let mut tracker = PerformanceTracker::new(Tuning::default(), config.unlock_order());
        for i in 0..450 {
            let key = ['a', 's', 'd', 'f', 'j', 'k', 'l', ' '][i % 8];
            tracker.record_keystroke(key, true, 0.25);
        }
        let generator = AdaptiveGenerator::english(Tuning::default(), Some(3));
        let mut app = App::with_parts(config, tracker, Box::new(generator), None);

        assert_eq!(app.start_drill(), Some('g'));
        assert!(app.tracker.is_unlocked('g'));
    }

    #[test]
    fn test_restart_keeps_partial_result() {
        let mut app = test_app();
        app.start_drill();
        let first = app.current_text().unwrap().chars().next().unwrap();
        let t0 = app.drill.as_ref().unwrap().presented_at;
        app.type_char(first, t0 + Duration::from_millis(300));
        app.restart_drill();
        assert!(app.last_result.as_ref().unwrap().partial);
        assert!(app.drill.is_some());
    }
}
