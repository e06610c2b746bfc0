use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::store::legacy::LegacyStats;
use crate::store::schema::{EXPORT_VERSION, ExportData, TrackerState};
use crate::store::{Result, StoreError};

/// Tracker state persisted as a single JSON file.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state. A missing file yields defaults; an unreadable
    /// or malformed one is logged and also yields defaults, so a session can
    /// always start.
    pub fn load_state(&self, window: usize) -> TrackerState {
        if !self.path.exists() {
            return TrackerState::default();
        }
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_state(&content, window).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "discarding malformed stats file");
                TrackerState::default()
            }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read stats file");
                TrackerState::default()
            }
        }
    }

    pub fn save_state(&self, state: &TrackerState) -> Result<()> {
        write_atomic(&self.path, state)?;
        debug!(path = %self.path.display(), keys = state.total_keys_typed, "saved stats");
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn export_to(&self, dest: &Path, window: usize) -> Result<ExportData> {
        let data = ExportData {
            typefast_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            state: self.load_state(window),
        };
        write_atomic(dest, &data)?;
        Ok(data)
    }

    /// Replace the stored state with an export file, or with a stats file
    /// written by the legacy script.
    pub fn import_from(&self, src: &Path, window: usize) -> Result<TrackerState> {
        let content = fs::read_to_string(src)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        let mut state = if value.get("typefast_export_version").is_some() {
            let data: ExportData = serde_json::from_value(value)?;
            if data.typefast_export_version != EXPORT_VERSION {
                return Err(StoreError::UnsupportedVersion {
                    found: data.typefast_export_version,
                    expected: EXPORT_VERSION,
                });
            }
            data.state
        } else {
            parse_state(&content, window)?
        };

        state.normalize(window);
        self.save_state(&state)?;
        info!(src = %src.display(), "imported stats");
        Ok(state)
    }
}

fn parse_state(content: &str, window: usize) -> Result<TrackerState> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let mut state = if LegacyStats::detect(&value) {
        info!("converting legacy stats record");
        let legacy: LegacyStats = serde_json::from_value(value)?;
        legacy.into_state(window)
    } else {
        serde_json::from_value(value)?
    };
    state.normalize(window);
    Ok(state)
}

fn write_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(data)?;
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;
    Ok(())
}
