use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::domain::ClassificationResult;

/// Writes the current result as `classificacao-<epoch-millis>.json`, the same
/// naming the browser download used.
pub fn export_result(result: &ClassificationResult, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("classificacao-{}.json", Utc::now().timestamp_millis()));
    let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
