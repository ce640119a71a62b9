pub mod client;
pub mod error;
pub mod protocol;

pub use client::ClassifierClient;
pub use error::ClassifyError;
pub use protocol::{SubmissionOptions, SubmissionPayload};
