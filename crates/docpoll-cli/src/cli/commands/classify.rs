//! `docpoll classify` – classify a status the way the poller would.

use anyhow::{Context, Result};
use docpoll_core::status::{PollOutcome, ProcessContext, StatusDispatcher, StatusResponse};
use std::fs;
use std::path::Path;

pub fn classify(
    status: Option<&str>,
    file_id: &str,
    response: Option<&StatusResponse>,
) -> PollOutcome {
    let status = status.or_else(|| response.and_then(|r| r.status()));
    StatusDispatcher::new().resolve(status, &ProcessContext::new(file_id), response)
}

pub fn run_classify(status: Option<&str>, file_id: &str, response: Option<&Path>) -> Result<()> {
    let body = match response {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            let parsed: StatusResponse = serde_json::from_str(&data)
                .with_context(|| format!("parse status response {}", path.display()))?;
            Some(parsed)
        }
        None => None,
    };

    match classify(status, file_id, body.as_ref()) {
        PollOutcome::Success => println!("success"),
        PollOutcome::Failure { message } => println!("failure: {}", message),
        PollOutcome::InProgress => println!("in-progress"),
    }
    Ok(())
}
