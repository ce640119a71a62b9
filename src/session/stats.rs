use serde::{Deserialize, Serialize};

/// Running counters for the session. `total` covers every completed request
/// attempt, successful or not; validation failures never reach the wire and
/// are not counted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total: u64,
    pub successful: u64,
}

impl Stats {
    pub fn record_attempt(&mut self, successful: bool) {
        self.total += 1;
        if successful {
            self.successful += 1;
        }
    }

    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.successful as f64 / self.total as f64 * 100.0)
    }

    /// Display string for the success rate; `-` while nothing was processed
    /// so we never divide by zero.
    pub fn success_rate_display(&self) -> String {
        match self.success_rate() {
            Some(rate) => format!("{rate:.1}%"),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_shows_a_placeholder() {
        assert_eq!(Stats::default().success_rate_display(), "-");
    }

    #[test]
    fn failed_attempts_count_toward_total_only() {
        let mut stats = Stats::default();
        stats.record_attempt(true);
        stats.record_attempt(false);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.successful, 1);
        assert_eq!(stats.success_rate_display(), "50.0%");
    }
}
