use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

use super::{history::HistoryLog, stats::Stats};

pub const HISTORY_FILE: &str = "history.json";
pub const STATS_FILE: &str = "stats.json";

/// Disk-backed session state: two fixed-name JSON files under the data
/// directory, rewritten after each mutation and reloaded on the next start.
/// Storage trouble is never fatal; a corrupt file is logged and replaced with
/// an empty default, the same stance the UI takes on a broken sessionStorage.
pub struct SessionStore {
    history_path: PathBuf,
    stats_path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            history_path: data_dir.join(HISTORY_FILE),
            stats_path: data_dir.join(STATS_FILE),
        }
    }

    pub fn load_history(&self) -> HistoryLog {
        load_or_default(&self.history_path)
    }

    pub fn save_history(&self, history: &HistoryLog) {
        if let Err(err) = write_json(&self.history_path, history) {
            tracing::warn!(target: "session", error = %err, "failed to persist history");
        }
    }

    pub fn load_stats(&self) -> Stats {
        load_or_default(&self.stats_path)
    }

    pub fn save_stats(&self, stats: &Stats) {
        if let Err(err) = write_json(&self.stats_path, stats) {
            tracing::warn!(target: "session", error = %err, "failed to persist stats");
        }
    }
}

fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        return T::default();
    }
    let parsed = fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| serde_json::from_str(&raw).map_err(anyhow::Error::from));
    match parsed {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                target: "session",
                error = %err,
                file = %path.display(),
                "failed to load session state; starting empty"
            );
            T::default()
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
