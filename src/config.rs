use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::letter_unlock::UnlockOrder;
use crate::engine::tuning::{DEFAULT_WORD_COUNT, Tuning};

const MIN_WORD_COUNT: usize = 1;
const MAX_WORD_COUNT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_stats_file")]
    pub stats_file: String,
    /// Fixed seed for reproducible practice text.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Keys unlocked after the alphabet, e.g. punctuation.
    #[serde(default)]
    pub extra_unlock_keys: Vec<char>,
    #[serde(default)]
    pub tuning: Tuning,
}

fn default_word_count() -> usize {
    DEFAULT_WORD_COUNT
}
fn default_stats_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typefast")
        .join("stats.json")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_count: default_word_count(),
            stats_file: default_stats_file(),
            seed: None,
            extra_unlock_keys: Vec::new(),
            tuning: Tuning::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typefast")
            .join("config.toml")
    }

    pub fn stats_path(&self) -> PathBuf {
        PathBuf::from(&self.stats_file)
    }

    pub fn unlock_order(&self) -> UnlockOrder {
        UnlockOrder::with_extra(&self.extra_unlock_keys)
    }

    /// Clamp values loaded from disk or the command line into usable ranges.
    pub fn validate(&mut self) {
        self.word_count = self.word_count.clamp(MIN_WORD_COUNT, MAX_WORD_COUNT);
        if self.stats_file.trim().is_empty() {
            self.stats_file = default_stats_file();
        }
        self.extra_unlock_keys.retain(|ch| !ch.is_control());
        self.tuning.normalize();
    }
}
