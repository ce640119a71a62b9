pub mod result;

pub use result::{ClassificationResult, DebugInfo, ResponseMetadata, Verdict};
