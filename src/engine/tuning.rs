use serde::{Deserialize, Serialize};

/// Most recent samples kept per key, for both accuracy and speed.
pub const WINDOW_SIZE: usize = 50;
/// Average difficulty below which the current key set counts as mastered.
pub const UNLOCK_DIFFICULTY_THRESHOLD: f64 = 20.0;
/// Keystrokes required per unlocked key before another key may unlock.
pub const KEYSTROKES_PER_UNLOCKED_KEY: u64 = 50;
pub const ACCURACY_WEIGHT: f64 = 0.7;
pub const SPEED_WEIGHT: f64 = 0.3;
/// Aggregate accuracy below this is the early stage.
pub const EARLY_STAGE_MAX_ACCURACY: f64 = 75.0;
/// Aggregate accuracy above this is the advanced stage.
pub const ADVANCED_STAGE_MIN_ACCURACY: f64 = 90.0;
pub const DEFAULT_WORD_COUNT: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageTargeting {
    pub targeting_fraction: f64,
    pub min_difficult_keys: usize,
}

/// Every threshold the adaptive engine consults, with documented defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_unlock_difficulty")]
    pub unlock_difficulty: f64,
    #[serde(default = "default_keystrokes_per_key")]
    pub keystrokes_per_key: u64,
    #[serde(default = "default_accuracy_weight")]
    pub accuracy_weight: f64,
    #[serde(default = "default_speed_weight")]
    pub speed_weight: f64,
    #[serde(default = "default_early_max_accuracy")]
    pub early_max_accuracy: f64,
    #[serde(default = "default_advanced_min_accuracy")]
    pub advanced_min_accuracy: f64,
    #[serde(default = "default_early_targeting")]
    pub early: StageTargeting,
    #[serde(default = "default_middle_targeting")]
    pub middle: StageTargeting,
    #[serde(default = "default_advanced_targeting")]
    pub advanced: StageTargeting,
}

fn default_window_size() -> usize {
    WINDOW_SIZE
}
fn default_unlock_difficulty() -> f64 {
    UNLOCK_DIFFICULTY_THRESHOLD
}
fn default_keystrokes_per_key() -> u64 {
    KEYSTROKES_PER_UNLOCKED_KEY
}
fn default_accuracy_weight() -> f64 {
    ACCURACY_WEIGHT
}
fn default_speed_weight() -> f64 {
    SPEED_WEIGHT
}
fn default_early_max_accuracy() -> f64 {
    EARLY_STAGE_MAX_ACCURACY
}
fn default_advanced_min_accuracy() -> f64 {
    ADVANCED_STAGE_MIN_ACCURACY
}
fn default_early_targeting() -> StageTargeting {
    StageTargeting {
        targeting_fraction: 0.9,
        min_difficult_keys: 2,
    }
}
fn default_middle_targeting() -> StageTargeting {
    StageTargeting {
        targeting_fraction: 0.6,
        min_difficult_keys: 1,
    }
}
fn default_advanced_targeting() -> StageTargeting {
    StageTargeting {
        targeting_fraction: 0.3,
        min_difficult_keys: 0,
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            unlock_difficulty: default_unlock_difficulty(),
            keystrokes_per_key: default_keystrokes_per_key(),
            accuracy_weight: default_accuracy_weight(),
            speed_weight: default_speed_weight(),
            early_max_accuracy: default_early_max_accuracy(),
            advanced_min_accuracy: default_advanced_min_accuracy(),
            early: default_early_targeting(),
            middle: default_middle_targeting(),
            advanced: default_advanced_targeting(),
        }
    }
}

impl Tuning {
    /// Repair values that would break the engine's range guarantees.
    /// Anything unusable falls back to its default rather than failing.
    pub fn normalize(&mut self) {
        let defaults = Tuning::default();

        if self.window_size == 0 {
            self.window_size = defaults.window_size;
        }
        if !self.unlock_difficulty.is_finite() {
            self.unlock_difficulty = defaults.unlock_difficulty;
        }

        let weights_valid = [self.accuracy_weight, self.speed_weight]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
            && self.accuracy_weight + self.speed_weight <= 1.0 + 1e-9;
        if !weights_valid {
            self.accuracy_weight = defaults.accuracy_weight;
            self.speed_weight = defaults.speed_weight;
        }

        if !(self.early_max_accuracy.is_finite()
            && self.advanced_min_accuracy.is_finite()
            && self.early_max_accuracy <= self.advanced_min_accuracy)
        {
            self.early_max_accuracy = defaults.early_max_accuracy;
            self.advanced_min_accuracy = defaults.advanced_min_accuracy;
        }

        for stage in [&mut self.early, &mut self.middle, &mut self.advanced] {
            if !stage.targeting_fraction.is_finite() {
                stage.targeting_fraction = 0.0;
            }
            stage.targeting_fraction = stage.targeting_fraction.clamp(0.0, 1.0);
        }
    }
}
