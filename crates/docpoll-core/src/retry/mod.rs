//! Retry timing and file-size policy.
//!
//! [`RetryPolicy`] decides how long a poller waits between status checks
//! (constant or exponential backoff with a cap) and which file sizes are
//! acceptable for submission. The poll loop and the CLI share one policy.

mod error;
mod policy;
mod size;

pub use error::PolicyError;
pub use policy::{
    RetryPolicy, RetryPolicyBuilder, DEFAULT_CATEGORY_ID, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MIN_FILE_SIZE,
};
pub use size::format_file_size;
