//! Classify remote parse-job statuses into poll outcomes.
//!
//! `PARSE_SUCCESS` and `PARSE_FAILED` end polling; `PARSING`, `UPLOADED`
//! and anything unrecognised keep it going. An unknown label is never
//! mistaken for a terminal state.

mod dispatch;
mod job_status;
mod response;

pub use dispatch::{PollOutcome, StatusDispatcher};
pub use job_status::JobStatus;
pub use response::{FileStatusData, ProcessContext, StatusResponse};
