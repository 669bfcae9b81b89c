mod health_check;
mod helpers;
mod submission;

pub use health_check::health_check;
pub use submission::{SubmissionError, method_not_allowed, submit_audit, submit_preflight};
