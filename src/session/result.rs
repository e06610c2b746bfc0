use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::drill::DrillState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrillResult {
    pub wpm: f64,
    pub accuracy: f64,
    pub correct: usize,
    pub incorrect: usize,
    pub total_chars: usize,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
    /// Key unlocked before this text was generated, if any.
    #[serde(default)]
    pub unlocked_key: Option<char>,
    #[serde(default)]
    pub partial: bool,
}

impl DrillResult {
    pub fn from_drill(drill: &DrillState, unlocked_key: Option<char>) -> Self {
        Self {
            wpm: drill.wpm(),
            accuracy: drill.accuracy(),
            correct: drill.correct_count(),
            incorrect: drill.typo_count(),
            total_chars: drill.target.len(),
            elapsed_secs: drill.elapsed_secs(),
            timestamp: Utc::now(),
            unlocked_key,
            partial: !drill.is_complete(),
        }
    }
}
