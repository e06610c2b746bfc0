use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::key_stats::KeyStat;
use crate::engine::letter_unlock;

pub const SCHEMA_VERSION: u32 = 1;

/// Persisted tracker record. Every field has a default so partial or
/// older records still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub key_stats: BTreeMap<char, KeyStat>,
    #[serde(default = "letter_unlock::starter_keys")]
    pub unlocked_keys: BTreeSet<char>,
    #[serde(default, alias = "total_keys")]
    pub total_keys_typed: u64,
    #[serde(default)]
    pub session_count: u32,
    #[serde(default)]
    pub last_practice_at: Option<DateTime<Utc>>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            key_stats: BTreeMap::new(),
            unlocked_keys: letter_unlock::starter_keys(),
            total_keys_typed: 0,
            session_count: 0,
            last_practice_at: None,
        }
    }
}

impl TrackerState {
    /// Bring a loaded record back within the tracker's invariants.
    pub fn normalize(&mut self, window: usize) {
        if !self.unlocked_keys.iter().any(|&ch| ch != ' ') {
            self.unlocked_keys.extend(letter_unlock::starter_keys());
        }
        self.unlocked_keys.insert(' ');
        for stat in self.key_stats.values_mut() {
            stat.sanitize(window);
        }
        self.schema_version = SCHEMA_VERSION;
    }
}

pub const EXPORT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub typefast_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub state: TrackerState,
}
