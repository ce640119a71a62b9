pub mod history;
pub mod stats;
pub mod store;

pub use history::{HistoryEntry, HistoryLog, HISTORY_CAP};
pub use stats::Stats;
pub use store::SessionStore;
