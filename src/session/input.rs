use std::time::Instant;

use crate::session::drill::DrillState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
}

/// A completed keystroke, attributed to the key the text expected.
#[derive(Clone, Debug)]
pub struct KeystrokeEvent {
    pub expected: char,
    pub actual: char,
    pub timestamp: Instant,
    pub correct: bool,
    /// Seconds since the previous keystroke, or since the text was shown
    /// for the first one.
    pub latency_secs: f64,
}

pub fn process_char(drill: &mut DrillState, ch: char, at: Instant) -> Option<KeystrokeEvent> {
    let expected = drill.expected()?;

    let previous = drill.last_key_at.unwrap_or(drill.presented_at);
    let latency_secs = at.saturating_duration_since(previous).as_secs_f64();
    let correct = ch == expected;

    drill.input.push(if correct {
        CharStatus::Correct
    } else {
        CharStatus::Incorrect(ch)
    });
    drill.last_key_at = Some(at);

    if drill.is_complete() {
        drill.finished_at = Some(at);
    }

    Some(KeystrokeEvent {
        expected,
        actual: ch,
        timestamp: at,
        correct,
        latency_secs,
    })
}
