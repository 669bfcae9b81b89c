mod errors;
mod handler;
mod types;

pub use errors::SubmissionError;
pub use handler::{method_not_allowed, submit_audit, submit_preflight};
pub use types::SubmissionPayload;
