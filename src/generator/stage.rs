use std::fmt;

use crate::engine::tuning::{StageTargeting, Tuning};

/// How aggressively practice text targets weak keys, chosen from the
/// aggregate accuracy of the unlocked keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Early,
    Middle,
    Advanced,
}

impl Stage {
    pub fn from_accuracy(avg_accuracy: f64, tuning: &Tuning) -> Self {
        if avg_accuracy < tuning.early_max_accuracy {
            Stage::Early
        } else if avg_accuracy > tuning.advanced_min_accuracy {
            Stage::Advanced
        } else {
            Stage::Middle
        }
    }

    pub fn targeting(self, tuning: &Tuning) -> StageTargeting {
        match self {
            Stage::Early => tuning.early,
            Stage::Middle => tuning.middle,
            Stage::Advanced => tuning.advanced,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Early => "early",
            Stage::Middle => "middle",
            Stage::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        let tuning = Tuning::default();
        assert_eq!(Stage::from_accuracy(0.0, &tuning), Stage::Early);
        assert_eq!(Stage::from_accuracy(74.9, &tuning), Stage::Early);
        assert_eq!(Stage::from_accuracy(75.0, &tuning), Stage::Middle);
        assert_eq!(Stage::from_accuracy(90.0, &tuning), Stage::Middle);
        assert_eq!(Stage::from_accuracy(90.1, &tuning), Stage::Advanced);
        assert_eq!(Stage::from_accuracy(100.0, &tuning), Stage::Advanced);
    }

    #[test]
    fn test_early_stage_targets_heavily() {
        let tuning = Tuning::default();
        let targeting = Stage::from_accuracy(60.0, &tuning).targeting(&tuning);
        assert_eq!(targeting.targeting_fraction, 0.90);
        assert_eq!(targeting.min_difficult_keys, 2);
    }

    #[test]
    fn test_later_stages_relax() {
        let tuning = Tuning::default();
        let middle = Stage::Middle.targeting(&tuning);
        let advanced = Stage::Advanced.targeting(&tuning);
        assert_eq!((middle.targeting_fraction, middle.min_difficult_keys), (0.6, 1));
        assert_eq!((advanced.targeting_fraction, advanced.min_difficult_keys), (0.3, 0));
    }
}
