use std::collections::VecDeque;

use chrono::Utc;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::ClassificationResult;

pub const HISTORY_CAP: usize = 10;

/// Snapshot of one completed classification, kept so the result can be
/// re-rendered later without another network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub timestamp: String,
    pub classificacao: String,
    pub justificativa: String,
    pub confianca: u8,
    pub preview: String,
    pub full_result: ClassificationResult,
}

impl HistoryEntry {
    pub fn from_result(result: &ClassificationResult, preview: &str, tz: Tz) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            timestamp: now.with_timezone(&tz).format("%d/%m/%Y %H:%M:%S").to_string(),
            classificacao: result.label().to_string(),
            justificativa: result.justificativa.clone().unwrap_or_default(),
            confianca: result.confidence(),
            preview: preview.to_string(),
            full_result: result.clone(),
        }
    }
}

/// Most-recent-first list of completed classifications, capped at
/// [`HISTORY_CAP`]; pushing an 11th entry evicts the oldest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAP);
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64) -> HistoryEntry {
        HistoryEntry {
            id,
            timestamp: String::new(),
            classificacao: "Produtivo".into(),
            justificativa: String::new(),
            confianca: 95,
            preview: format!("email {id}"),
            full_result: serde_json::from_str("{}").unwrap(),
        }
    }

    #[test]
    fn newest_entry_sits_at_the_front() {
        let mut log = HistoryLog::default();
        log.push(entry(1));
        log.push(entry(2));
        assert_eq!(log.get(0).map(|e| e.id), Some(2));
        assert_eq!(log.get(1).map(|e| e.id), Some(1));
    }

    #[test]
    fn eleventh_entry_evicts_the_oldest() {
        let mut log = HistoryLog::default();
        for id in 1..=11 {
            log.push(entry(id));
        }
        assert_eq!(log.len(), HISTORY_CAP);
        assert_eq!(log.get(0).map(|e| e.id), Some(11));
        assert!(log.iter().all(|e| e.id != 1));
    }
}
